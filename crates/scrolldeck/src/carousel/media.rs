use std::path::{Path, PathBuf};
use std::sync::mpsc::{Receiver, Sender, channel};

use eframe::egui;

/// Slides within this distance of the starting slide are requested eagerly.
pub const EAGER_WINDOW: usize = 2;

/// Load lifecycle of one slide's media.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    NotRequested,
    Loading,
    Loaded,
    /// A failed load stays failed: no retry, no user-visible error. The
    /// slide keeps showing its skeleton placeholder.
    Failed,
}

/// Outcome of one asynchronous decode, delivered back to the UI thread.
pub struct LoadResult {
    pub index: usize,
    pub image: Result<egui::ColorImage, String>,
}

/// Seam between the cache and the decode transport, so tests can substitute
/// a synchronous stub.
pub trait MediaLoader {
    /// Begin loading `path`; deliver the outcome on `tx`. Must not block the
    /// caller.
    fn begin_load(&self, index: usize, path: &Path, tx: Sender<LoadResult>);
}

/// Production loader: decodes with the `image` crate on a spawned thread.
pub struct ThreadedLoader;

impl MediaLoader for ThreadedLoader {
    fn begin_load(&self, index: usize, path: &Path, tx: Sender<LoadResult>) {
        let path = path.to_path_buf();
        std::thread::spawn(move || {
            let image = image::open(&path)
                .map(|img| {
                    let rgba = img.into_rgba8();
                    let size = [rgba.width() as usize, rgba.height() as usize];
                    egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw())
                })
                .map_err(|e| e.to_string());
            // The receiver may be gone during shutdown; nothing to do then.
            let _ = tx.send(LoadResult { index, image });
        });
    }
}

/// Per-slide loaded/unloaded bookkeeping plus the global first-paint guard.
///
/// Slide 0 is always requested eagerly, as is a small window around the
/// starting slide; everything else waits until it becomes active or
/// adjacent to the active slide. `is_initial_load` stays true until slide
/// 0's media reports loaded, and the host shows a blocking overlay while it
/// is.
pub struct MediaCache {
    paths: Vec<PathBuf>,
    states: Vec<LoadState>,
    loader: Box<dyn MediaLoader>,
    tx: Sender<LoadResult>,
    rx: Receiver<LoadResult>,
    initial_load: bool,
}

impl MediaCache {
    pub fn new(paths: Vec<PathBuf>, loader: Box<dyn MediaLoader>) -> Self {
        let (tx, rx) = channel();
        let states = vec![LoadState::NotRequested; paths.len()];
        Self {
            paths,
            states,
            loader,
            tx,
            rx,
            initial_load: true,
        }
    }

    pub fn slide_count(&self) -> usize {
        self.paths.len()
    }

    pub fn state(&self, index: usize) -> LoadState {
        self.states
            .get(index)
            .copied()
            .unwrap_or(LoadState::NotRequested)
    }

    pub fn is_loaded(&self, index: usize) -> bool {
        self.state(index) == LoadState::Loaded
    }

    /// True until slide 0's media has loaded.
    pub fn is_initial_load(&self) -> bool {
        self.initial_load
    }

    /// Eager requests issued once at startup: slide 0 plus the window
    /// around the starting slide.
    pub fn request_initial(&mut self, start: usize) {
        self.request(0);
        let lo = start.saturating_sub(EAGER_WINDOW - 1);
        let hi = (start + EAGER_WINDOW).min(self.paths.len());
        for index in lo..hi {
            self.request(index);
        }
    }

    /// Request the newly active slide and its immediate neighbors.
    pub fn request_near(&mut self, active: usize) {
        if active > 0 {
            self.request(active - 1);
        }
        self.request(active);
        self.request(active + 1);
    }

    /// Begin loading a single slide's media if it has never been requested.
    pub fn request(&mut self, index: usize) {
        let Some(state) = self.states.get_mut(index) else {
            return;
        };
        if *state != LoadState::NotRequested {
            return;
        }
        *state = LoadState::Loading;
        self.loader.begin_load(index, &self.paths[index], self.tx.clone());
    }

    /// Drain finished decodes. Returns the newly loaded slides with their
    /// pixel data; failures only flip the state and report nothing.
    pub fn poll(&mut self) -> Vec<(usize, egui::ColorImage)> {
        let mut loaded = Vec::new();
        while let Ok(result) = self.rx.try_recv() {
            let Some(state) = self.states.get_mut(result.index) else {
                continue;
            };
            match result.image {
                Ok(image) => {
                    *state = LoadState::Loaded;
                    if result.index == 0 {
                        self.initial_load = false;
                    }
                    loaded.push((result.index, image));
                }
                Err(_) => {
                    *state = LoadState::Failed;
                }
            }
        }
        loaded
    }
}
