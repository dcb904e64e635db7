use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use eframe::egui;

use crate::analytics::{AnalyticsEmitter, HttpEmitter, NullEmitter};
use crate::carousel::arbitrator::NavigationArbitrator;
use crate::carousel::mapper;
use crate::carousel::media::{MediaCache, ThreadedLoader};
use crate::carousel::pin::{Breakpoint, HEADER_OFFSET, PinController, Viewport};
use crate::carousel::scheduler::UpdateScheduler;
use crate::carousel::tween::ease_in_out;
use crate::carousel::ScrollRegion;
use crate::config::Config;
use crate::deck::{self, Deck};
use crate::theme::Theme;

/// Document distance occupied by the hero section above the carousel.
const HERO_HEIGHT: f32 = 520.0;
/// Document distance of the content below the carousel.
const TRAILING_HEIGHT: f32 = 760.0;
/// Max scroll distance applied per frame while inside the pinned region,
/// limiting runaway trackpad momentum.
const MAX_SCROLL_DELTA: f32 = 80.0;
/// Crossfade between slides; skipped entirely during fast scroll.
const CROSSFADE_DURATION: f32 = 0.3;
const KEY_SCROLL_STEP: f32 = 120.0;
const TAB_WIDTH: f32 = 230.0;
const TAB_HEIGHT: f32 = 54.0;
const TAB_GAP: f32 = 12.0;
/// Fallback aspect ratio until the first texture arrives (screenshot size).
const IMAGE_ASPECT: f32 = 2560.0 / 1760.0;
const WATCH_DEBOUNCE: Duration = Duration::from_millis(300);

struct Toast {
    message: String,
    start: Instant,
}

impl Toast {
    fn new(message: String) -> Self {
        Self {
            message,
            start: Instant::now(),
        }
    }

    fn opacity(&self) -> f32 {
        let elapsed = self.start.elapsed().as_secs_f32();
        let duration = 1.5;
        let fade_start = 1.0;
        if elapsed < fade_start {
            1.0
        } else if elapsed < duration {
            1.0 - (elapsed - fade_start) / (duration - fade_start)
        } else {
            0.0
        }
    }

    fn is_expired(&self) -> bool {
        self.start.elapsed().as_secs_f32() >= 1.5
    }
}

/// Debounced manifest watcher for `--watch`.
struct DeckWatcher {
    _debouncer: notify_debouncer_mini::Debouncer<notify_debouncer_mini::notify::RecommendedWatcher>,
    rx: std::sync::mpsc::Receiver<notify_debouncer_mini::DebounceEventResult>,
}

impl DeckWatcher {
    fn new(path: &Path) -> anyhow::Result<Self> {
        let (tx, rx) = std::sync::mpsc::channel();
        let mut debouncer = notify_debouncer_mini::new_debouncer(WATCH_DEBOUNCE, tx)?;
        debouncer.watcher().watch(
            path,
            notify_debouncer_mini::notify::RecursiveMode::NonRecursive,
        )?;
        Ok(Self {
            _debouncer: debouncer,
            rx,
        })
    }

    fn changed(&self) -> bool {
        let mut changed = false;
        while let Ok(events) = self.rx.try_recv() {
            if events.is_ok() {
                changed = true;
            }
        }
        changed
    }
}

struct ShowcaseApp {
    deck: Deck,
    manifest_path: PathBuf,
    theme: Theme,

    /// Virtual document scroll offset, in logical pixels.
    scroll_offset: f32,
    pin: PinController,
    scheduler: UpdateScheduler,
    arbitrator: NavigationArbitrator,
    media: MediaCache,
    textures: Vec<Option<egui::TextureHandle>>,

    /// Last slide actually rendered, for the crossfade.
    shown_index: usize,
    prev_index: usize,
    index_changed_at: Instant,
    snap_transition: bool,

    last_viewport: Option<Viewport>,
    watcher: Option<DeckWatcher>,
    toast: Option<Toast>,

    frame_count: u32,
    fps: f32,
    fps_update: Instant,
}

impl ShowcaseApp {
    fn new(manifest_path: PathBuf, deck: Deck, config: &Config, start: usize, watch: bool) -> Self {
        let theme_name = deck
            .meta
            .theme
            .as_deref()
            .or_else(|| config.defaults.as_ref().and_then(|d| d.theme.as_deref()))
            .unwrap_or("light");
        let theme = Theme::from_name(theme_name);

        let emitter: Box<dyn AnalyticsEmitter> = match config.analytics_endpoint() {
            Some(endpoint) => Box::new(HttpEmitter::new(endpoint.to_string())),
            None => Box::new(NullEmitter),
        };

        let slide_count = deck.slides.len();
        let start = start.min(slide_count.saturating_sub(1));

        let mut media = MediaCache::new(deck.image_paths(), Box::new(ThreadedLoader));
        media.request_initial(start);

        let watcher = if watch {
            DeckWatcher::new(&manifest_path).ok()
        } else {
            None
        };

        let now = Instant::now();
        Self {
            arbitrator: NavigationArbitrator::new(deck.labels(), start, emitter),
            scheduler: UpdateScheduler::new(start),
            textures: vec![None; slide_count],
            deck,
            manifest_path,
            theme,
            scroll_offset: 0.0,
            pin: PinController::new(),
            media,
            shown_index: start,
            prev_index: start,
            index_changed_at: now,
            snap_transition: true,
            last_viewport: None,
            watcher,
            toast: None,
            frame_count: 0,
            fps: 0.0,
            fps_update: now,
        }
    }

    fn slide_count(&self) -> usize {
        self.deck.slides.len()
    }

    fn update_fps(&mut self) {
        self.frame_count += 1;
        let elapsed = self.fps_update.elapsed().as_secs_f32();
        if elapsed >= 0.5 {
            self.fps = self.frame_count as f32 / elapsed;
            self.frame_count = 0;
            self.fps_update = Instant::now();
        }
    }

    /// Keep the pin binding in step with the viewport. A breakpoint crossing
    /// tears the binding down and recreates it; a plain resize rebuilds
    /// geometry in place.
    fn sync_geometry(&mut self, viewport: Viewport) {
        if self.last_viewport == Some(viewport) {
            return;
        }
        self.last_viewport = Some(viewport);

        let count = self.slide_count();
        if !self.pin.is_active() {
            self.pin.activate(Some(HERO_HEIGHT), viewport, count);
        } else if self.pin.breakpoint_changed(viewport.width) {
            self.pin.deactivate();
            self.pin.activate(Some(HERO_HEIGHT), viewport, count);
        } else {
            self.pin.recompute_geometry(Some(HERO_HEIGHT), viewport, count);
        }
    }

    fn container_height(viewport: Viewport) -> f32 {
        viewport.height - HEADER_OFFSET
    }

    fn document_height(&self, viewport: Viewport) -> f32 {
        let pinned = self
            .pin
            .region()
            .map(|r| r.total_distance())
            .unwrap_or(0.0);
        HERO_HEIGHT + pinned + Self::container_height(viewport) + TRAILING_HEIGHT
    }

    /// Screen y of the carousel container's top edge: in document flow
    /// before the anchor, fixed at `HEADER_OFFSET` while pinned, back in
    /// flow (shifted by the pinned distance) after release.
    fn container_screen_top(&self, region: &ScrollRegion) -> f32 {
        let total = region.total_distance();
        if self.scroll_offset < region.anchor_offset {
            HERO_HEIGHT - self.scroll_offset
        } else if self.scroll_offset <= region.anchor_offset + total {
            HEADER_OFFSET
        } else {
            HERO_HEIGHT + total - self.scroll_offset
        }
    }

    /// Explicit navigation: tab click, number key, Home/End.
    fn select(&mut self, index: usize, now: Instant) {
        let Some(region) = self.pin.region().copied() else {
            return;
        };
        self.arbitrator
            .select_slide(index, &region, self.scroll_offset, now);
        self.scheduler.record_commit(index, now);
        self.media.request_near(index);
    }

    fn note_index_change(&mut self, now: Instant) {
        let active = self.arbitrator.active_index();
        if active != self.shown_index {
            self.prev_index = self.shown_index;
            self.shown_index = active;
            self.index_changed_at = now;
            self.snap_transition = self.arbitrator.state().is_fast_scrolling;
        }
    }

    fn reload_deck(&mut self, viewport: Viewport) {
        match deck::load(&self.manifest_path) {
            Ok(new_deck) => {
                let count = new_deck.slides.len();
                self.arbitrator.reset_slides(new_deck.labels());
                let active = self.arbitrator.active_index();
                self.scheduler = UpdateScheduler::new(active);
                self.media = MediaCache::new(new_deck.image_paths(), Box::new(ThreadedLoader));
                self.media.request_initial(active);
                self.textures = vec![None; count];
                self.shown_index = active;
                self.prev_index = active;
                self.snap_transition = true;
                if let Some(name) = new_deck.meta.theme.as_deref() {
                    self.theme = Theme::from_name(name);
                }
                self.deck = new_deck;
                self.pin
                    .recompute_geometry(Some(HERO_HEIGHT), viewport, count);
                self.toast = Some(Toast::new("Deck reloaded".to_string()));
            }
            Err(e) => {
                self.toast = Some(Toast::new(format!("Reload failed: {e}")));
            }
        }
    }
}

impl eframe::App for ShowcaseApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.update_fps();
        let now = Instant::now();

        let screen = ctx.screen_rect();
        let viewport = Viewport {
            width: screen.width(),
            height: screen.height(),
        };
        self.sync_geometry(viewport);

        if self.watcher.as_ref().is_some_and(|w| w.changed()) {
            self.reload_deck(viewport);
        }

        // Collect viewport commands to send AFTER the input closure
        // (sending inside ctx.input() causes RwLock deadlock)
        let mut viewport_cmds: Vec<egui::ViewportCommand> = Vec::new();
        let mut wheel_delta = 0.0_f32;
        let mut selected: Option<usize> = None;
        let count = self.slide_count();

        ctx.input(|i| {
            if i.key_pressed(egui::Key::Q) {
                viewport_cmds.push(egui::ViewportCommand::Close);
                return;
            }
            if i.key_pressed(egui::Key::F) {
                viewport_cmds.push(egui::ViewportCommand::Fullscreen(
                    !i.viewport().fullscreen.unwrap_or(false),
                ));
                return;
            }
            if i.key_pressed(egui::Key::D) {
                self.theme = self.theme.toggled();
                self.toast = Some(Toast::new(format!("Theme: {}", self.theme.name)));
            }

            wheel_delta = i.smooth_scroll_delta.y;
            if i.key_pressed(egui::Key::ArrowDown) {
                wheel_delta -= KEY_SCROLL_STEP;
            }
            if i.key_pressed(egui::Key::ArrowUp) {
                wheel_delta += KEY_SCROLL_STEP;
            }

            const DIGITS: [egui::Key; 9] = [
                egui::Key::Num1,
                egui::Key::Num2,
                egui::Key::Num3,
                egui::Key::Num4,
                egui::Key::Num5,
                egui::Key::Num6,
                egui::Key::Num7,
                egui::Key::Num8,
                egui::Key::Num9,
            ];
            for (index, key) in DIGITS.iter().enumerate() {
                if index < count && i.key_pressed(*key) {
                    selected = Some(index);
                }
            }
            if i.key_pressed(egui::Key::Home) {
                selected = Some(0);
            }
            if i.key_pressed(egui::Key::End) && count > 0 {
                selected = Some(count - 1);
            }
        });

        for cmd in viewport_cmds {
            ctx.send_viewport_cmd(cmd);
        }

        // Wheel speed limiter: clamp per-frame travel inside the pinned
        // region so a single momentum flick cannot blow through every slide.
        if self.pin.in_pin_area(self.scroll_offset) {
            wheel_delta = wheel_delta.clamp(-MAX_SCROLL_DELTA, MAX_SCROLL_DELTA);
        }
        if wheel_delta != 0.0 {
            self.scroll_offset -= wheel_delta;
        }
        let max_scroll = (self.document_height(viewport) - viewport.height).max(0.0);
        self.scroll_offset = self.scroll_offset.clamp(0.0, max_scroll);

        // Programmatic scroll in flight wins over whatever the wheel did.
        if let Some(offset) = self.arbitrator.tick(now) {
            self.scroll_offset = offset.clamp(0.0, max_scroll);
            ctx.request_repaint();
        }

        // Pinned progress -> index proposal -> frame-batched arbitration.
        if let Some(region) = self.pin.region().copied() {
            if let Some(progress) = self.pin.progress(self.scroll_offset) {
                if let Some(index) = mapper::map_index(progress, &region, count) {
                    self.scheduler.propose(index);
                }
            }
        }
        if let Some(proposal) = self.scheduler.flush(now) {
            if self.arbitrator.receive_scroll_proposal(proposal.index) {
                self.scheduler.record_commit(proposal.index, now);
                self.media.request_near(proposal.index);
            }
        }
        self.arbitrator
            .set_fast_scrolling(self.scheduler.is_fast_scrolling());

        if let Some(index) = selected {
            self.select(index, now);
        }

        // Finished decodes become textures on this thread only.
        for (index, image) in self.media.poll() {
            let texture = ctx.load_texture(
                format!("slide-{index}"),
                image,
                egui::TextureOptions::LINEAR,
            );
            if let Some(slot) = self.textures.get_mut(index) {
                *slot = Some(texture);
            }
            self.arbitrator.mark_loaded(index);
        }

        self.note_index_change(now);

        let bg = self.theme.background;
        let mut clicked_tab: Option<usize> = None;

        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(bg).inner_margin(0.0))
            .show(ctx, |ui| {
                let rect = ui.max_rect();
                ui.painter().rect_filled(rect, 0.0, bg);

                self.draw_hero(ui, rect);
                clicked_tab = self.draw_carousel(ui, rect, viewport, now);
                self.draw_trailing(ui, rect, viewport);
                self.draw_chrome(ui, rect);

                if let Some(ref toast) = self.toast {
                    let opacity = toast.opacity();
                    if opacity > 0.0 {
                        draw_toast(ui, rect, &self.theme, &toast.message, opacity);
                        ctx.request_repaint();
                    }
                }
            });

        if let Some(index) = clicked_tab {
            self.select(index, now);
            self.note_index_change(now);
            ctx.request_repaint();
        }

        if self.toast.as_ref().is_some_and(|t| t.is_expired()) {
            self.toast = None;
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        // Page-transition contract: never leave a half-unpinned region behind.
        self.pin.teardown();
    }
}

impl ShowcaseApp {
    fn draw_hero(&self, ui: &egui::Ui, rect: egui::Rect) {
        let y = 180.0 - self.scroll_offset;
        if y < -HERO_HEIGHT {
            return;
        }

        let title = self
            .deck
            .meta
            .title
            .clone()
            .unwrap_or_else(|| "Showcase".to_string());
        let title_galley = ui.painter().layout(
            title,
            egui::FontId::proportional(self.theme.heading_size),
            self.theme.heading_color,
            rect.width() - 120.0,
        );
        ui.painter().galley(
            egui::pos2(rect.left() + 60.0, y),
            title_galley,
            self.theme.heading_color,
        );

        if let Some(ref tagline) = self.deck.meta.tagline {
            let galley = ui.painter().layout(
                tagline.clone(),
                egui::FontId::proportional(self.theme.tagline_size),
                self.theme.foreground,
                rect.width() - 120.0,
            );
            ui.painter().galley(
                egui::pos2(rect.left() + 60.0, y + self.theme.heading_size + 28.0),
                galley,
                self.theme.foreground,
            );
        }
    }

    /// Draw the (possibly pinned) carousel container: tab rail, image area,
    /// skeletons, and the initial-load overlay. Returns a clicked tab index.
    fn draw_carousel(
        &self,
        ui: &egui::Ui,
        rect: egui::Rect,
        viewport: Viewport,
        now: Instant,
    ) -> Option<usize> {
        let region = self.pin.region().copied()?;
        let count = self.slide_count();
        if count == 0 {
            return None;
        }

        let top = self.container_screen_top(&region);
        let container = egui::Rect::from_min_size(
            egui::pos2(rect.left(), top),
            egui::vec2(rect.width(), Self::container_height(viewport)),
        );
        if !container.intersects(rect) {
            return None;
        }

        let progress = self.pin.progress(self.scroll_offset).unwrap_or_else(|| {
            if self.scroll_offset < region.anchor_offset {
                0.0
            } else {
                1.0
            }
        });
        let intro_t = ease_in_out(mapper::intro_progress(progress, &region));
        let wide = self.pin.breakpoint() == Some(Breakpoint::Wide);

        let mut clicked = None;
        let image_left = if wide {
            clicked = self.draw_tab_rail(ui, container, intro_t);
            container.left() + TAB_WIDTH + 120.0
        } else {
            container.left() + 24.0
        };

        // Entrance animation: the image area scales in and slides to center
        // over the intro phase. Index tracking is unaffected.
        let scale = 0.92 + 0.08 * intro_t;
        let slide_in = 80.0 * (1.0 - intro_t);

        let area = egui::Rect::from_min_max(
            egui::pos2(image_left, container.top() + 24.0),
            egui::pos2(container.right() - 48.0, container.bottom() - 24.0),
        );
        let image_rect = fit_aspect(area, self.texture_aspect()).scale_from_center(scale);
        let image_rect = image_rect.translate(egui::vec2(slide_in, 0.0));

        self.draw_slide_media(ui, image_rect, now);

        if self.media.is_initial_load() {
            self.draw_loading_overlay(ui, image_rect);
        }

        clicked
    }

    fn texture_aspect(&self) -> f32 {
        self.textures
            .get(self.shown_index)
            .and_then(|t| t.as_ref())
            .map(|t| {
                let size = t.size_vec2();
                size.x / size.y
            })
            .unwrap_or(IMAGE_ASPECT)
    }

    /// Active slide with a short crossfade from the previous one. During fast
    /// scroll the fade is skipped so rapid index changes stay crisp.
    fn draw_slide_media(&self, ui: &egui::Ui, image_rect: egui::Rect, now: Instant) {
        let elapsed = now.saturating_duration_since(self.index_changed_at).as_secs_f32();
        let fade = if self.snap_transition {
            1.0
        } else {
            (elapsed / CROSSFADE_DURATION).clamp(0.0, 1.0)
        };

        // Card behind the screenshot.
        ui.painter()
            .rect_filled(image_rect.expand(10.0), 14.0, self.theme.surface);

        if fade < 1.0 && self.prev_index != self.shown_index {
            self.draw_one_slide(ui, self.prev_index, image_rect, 1.0 - fade);
        }
        self.draw_one_slide(ui, self.shown_index, image_rect, fade);

        if fade < 1.0 {
            ui.ctx().request_repaint();
        }
    }

    fn draw_one_slide(&self, ui: &egui::Ui, index: usize, image_rect: egui::Rect, opacity: f32) {
        if opacity < 0.01 {
            return;
        }
        match self.textures.get(index).and_then(|t| t.as_ref()) {
            Some(texture) => {
                let tint =
                    egui::Color32::from_white_alpha((opacity * 255.0) as u8);
                ui.painter().image(
                    texture.id(),
                    image_rect,
                    egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                    tint,
                );
            }
            None => {
                // Skeleton: pulses until the decode lands (or forever after a
                // failed load).
                let time = ui.input(|i| i.time) as f32;
                let pulse = 0.55 + 0.25 * (time * 3.0).sin();
                ui.painter().rect_filled(
                    image_rect,
                    8.0,
                    Theme::with_opacity(self.theme.skeleton, pulse * opacity),
                );
                ui.ctx().request_repaint();
            }
        }
    }

    fn draw_tab_rail(&self, ui: &egui::Ui, container: egui::Rect, intro_t: f32) -> Option<usize> {
        let count = self.slide_count();
        let rail_x = container.left() + 24.0 + 64.0 * intro_t;
        let total_h = count as f32 * TAB_HEIGHT + (count.saturating_sub(1)) as f32 * TAB_GAP;
        let mut y = container.center().y - total_h / 2.0;

        let mut clicked = None;
        for (index, slide) in self.deck.slides.iter().enumerate() {
            let tab_rect = egui::Rect::from_min_size(
                egui::pos2(rail_x, y),
                egui::vec2(TAB_WIDTH, TAB_HEIGHT),
            );
            y += TAB_HEIGHT + TAB_GAP;

            let response = ui.interact(
                tab_rect,
                ui.id().with(("showcase-tab", index)),
                egui::Sense::click(),
            );
            if response.clicked() {
                clicked = Some(index);
            }

            let active = index == self.arbitrator.active_index();
            if active {
                ui.painter().rect_filled(tab_rect, 10.0, self.theme.surface);
            } else if response.hovered() {
                ui.painter().rect_filled(
                    tab_rect,
                    10.0,
                    Theme::with_opacity(self.theme.surface, 0.5),
                );
            }

            let icon_rect = egui::Rect::from_min_size(
                tab_rect.min + egui::vec2(10.0, (TAB_HEIGHT - 34.0) / 2.0),
                egui::vec2(34.0, 34.0),
            );
            let (icon_color, label_color) = if active {
                (self.theme.accent, self.theme.heading_color)
            } else {
                (
                    Theme::with_opacity(self.theme.foreground, 0.6),
                    Theme::with_opacity(self.theme.foreground, 0.75),
                )
            };
            if active {
                ui.painter().rect_stroke(
                    icon_rect,
                    8.0,
                    egui::Stroke::new(1.0, Theme::with_opacity(self.theme.accent, 0.5)),
                    egui::StrokeKind::Inside,
                );
            }
            let icon_galley = ui.painter().layout_no_wrap(
                slide.icon.clone(),
                egui::FontId::proportional(18.0),
                icon_color,
            );
            ui.painter().galley(
                icon_rect.center() - icon_galley.rect.size() / 2.0,
                icon_galley,
                icon_color,
            );

            let label_galley = ui.painter().layout_no_wrap(
                slide.label.clone(),
                egui::FontId::proportional(self.theme.label_size),
                label_color,
            );
            let label_pos = egui::pos2(
                icon_rect.right() + 12.0,
                tab_rect.center().y - label_galley.rect.height() / 2.0,
            );
            ui.painter().galley(label_pos, label_galley, label_color);
        }

        clicked
    }

    fn draw_loading_overlay(&self, ui: &egui::Ui, image_rect: egui::Rect) {
        ui.painter().rect_filled(
            image_rect,
            8.0,
            Theme::with_opacity(self.theme.background, 0.85),
        );

        let center = image_rect.center();
        let time = ui.input(|i| i.time) as f32;
        let start_angle = time * 4.0;
        let radius = 18.0;
        let points: Vec<egui::Pos2> = (0..=36)
            .map(|step| {
                let angle = start_angle + step as f32 / 36.0 * std::f32::consts::TAU * 0.75;
                center + radius * egui::vec2(angle.cos(), angle.sin())
            })
            .collect();
        ui.painter().add(egui::Shape::line(
            points,
            egui::Stroke::new(4.0, self.theme.accent),
        ));

        let galley = ui.painter().layout_no_wrap(
            "Loading...".to_string(),
            egui::FontId::proportional(16.0),
            self.theme.foreground,
        );
        ui.painter().galley(
            egui::pos2(center.x - galley.rect.width() / 2.0, center.y + 34.0),
            galley,
            self.theme.foreground,
        );

        ui.ctx().request_repaint();
    }

    fn draw_trailing(&self, ui: &egui::Ui, rect: egui::Rect, viewport: Viewport) {
        let pinned = self
            .pin
            .region()
            .map(|r| r.total_distance())
            .unwrap_or(0.0);
        let doc_top = HERO_HEIGHT + pinned + Self::container_height(viewport) + 120.0;
        let y = doc_top - self.scroll_offset;
        if y > rect.bottom() {
            return;
        }

        let galley = ui.painter().layout(
            "That's the tour. Scroll back up or press Home to start over.".to_string(),
            egui::FontId::proportional(self.theme.tagline_size),
            self.theme.foreground,
            rect.width() - 120.0,
        );
        ui.painter()
            .galley(egui::pos2(rect.left() + 60.0, y), galley, self.theme.foreground);
    }

    fn draw_chrome(&self, ui: &egui::Ui, rect: egui::Rect) {
        // Slide counter
        let counter_text = format!(
            "{} / {}",
            self.arbitrator.active_index() + 1,
            self.slide_count()
        );
        let counter_color = Theme::with_opacity(self.theme.foreground, 0.35);
        let counter_galley = ui.painter().layout_no_wrap(
            counter_text,
            egui::FontId::monospace(14.0),
            counter_color,
        );
        let counter_pos = egui::pos2(
            rect.right() - counter_galley.rect.width() - 16.0,
            rect.bottom() - 30.0,
        );
        ui.painter()
            .galley(counter_pos, counter_galley, counter_color);

        // FPS overlay
        let fps_text = format!("{:.0} fps", self.fps);
        let fps_color = Theme::with_opacity(self.theme.foreground, 0.3);
        let fps_galley =
            ui.painter()
                .layout_no_wrap(fps_text, egui::FontId::monospace(14.0), fps_color);
        let fps_pos = egui::pos2(
            rect.right() - fps_galley.rect.width() - 12.0,
            rect.top() + 10.0,
        );
        ui.painter().galley(fps_pos, fps_galley, fps_color);
    }
}

/// Largest rect with the given aspect ratio centered inside `area`.
fn fit_aspect(area: egui::Rect, aspect: f32) -> egui::Rect {
    let mut width = area.width();
    let mut height = width / aspect;
    if height > area.height() {
        height = area.height();
        width = height * aspect;
    }
    egui::Rect::from_center_size(area.center(), egui::vec2(width, height))
}

fn draw_toast(ui: &egui::Ui, rect: egui::Rect, theme: &Theme, message: &str, opacity: f32) {
    let toast_color = Theme::with_opacity(theme.foreground, opacity * 0.9);
    let toast_bg = Theme::with_opacity(theme.surface, opacity * 0.9);
    let galley = ui.painter().layout_no_wrap(
        message.to_string(),
        egui::FontId::proportional(18.0),
        toast_color,
    );
    let padding = 14.0;
    let toast_rect = egui::Rect::from_min_size(
        egui::pos2(
            rect.center().x - galley.rect.width() / 2.0 - padding,
            rect.bottom() - 80.0,
        ),
        egui::vec2(
            galley.rect.width() + padding * 2.0,
            galley.rect.height() + padding * 2.0,
        ),
    );
    ui.painter().rect_filled(toast_rect, 8.0, toast_bg);
    let text_pos = egui::pos2(toast_rect.left() + padding, toast_rect.top() + padding);
    ui.painter().galley(text_pos, galley, toast_color);
}

pub fn run(
    file: PathBuf,
    windowed: bool,
    start_slide: Option<usize>,
    watch: bool,
) -> anyhow::Result<()> {
    let deck = deck::load(&file)?;
    let config = Config::load_or_default();

    let title = deck.meta.title.clone().unwrap_or_else(|| {
        format!(
            "scrolldeck \u{2014} {}",
            file.file_name().unwrap_or_default().to_string_lossy()
        )
    });

    let start = start_slide.map(|s| s.saturating_sub(1)).unwrap_or(0);

    let viewport = if windowed {
        egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_title(title.clone())
    } else {
        egui::ViewportBuilder::default()
            .with_fullscreen(true)
            .with_title(title.clone())
    };

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        &title,
        options,
        Box::new(move |_cc| Ok(Box::new(ShowcaseApp::new(file, deck, &config, start, watch)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}
