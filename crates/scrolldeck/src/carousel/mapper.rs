use super::ScrollRegion;

/// Map normalized pin progress to a discrete slide index.
///
/// `progress` is the position within the whole pinned region, `0.0` at the
/// moment pinning engages and `1.0` at release. Returns `None` while the
/// travelled distance is still inside the intro phase; from the intro
/// boundary onward, every progress value maps to exactly one index in
/// `[0, slide_count)`.
///
/// Floor semantics: a progress value that lands exactly on a slide's upper
/// edge belongs to the *next* slide, so the per-slide intervals are
/// closed-open and partition the post-intro range with no gaps or overlaps.
/// The scaled offset is multiplied by `slide_count` before dividing by
/// `main_distance` so exact boundary inputs stay exact.
///
/// Distances must be finite and non-negative with `main_distance > 0`; that
/// is the contract of the [`ScrollRegion`] constructor site, not a runtime
/// condition this function recovers from.
pub fn map_index(progress: f32, region: &ScrollRegion, slide_count: usize) -> Option<usize> {
    debug_assert!(region.intro_distance.is_finite() && region.intro_distance >= 0.0);
    debug_assert!(region.main_distance.is_finite() && region.main_distance > 0.0);

    if slide_count == 0 {
        return None;
    }

    let travelled = progress * region.total_distance();
    if travelled < region.intro_distance {
        return None;
    }

    let scaled = (travelled - region.intro_distance) * slide_count as f32 / region.main_distance;
    Some((scaled.floor() as usize).min(slide_count - 1))
}

/// Progress through the intro phase alone, clamped to `[0, 1]`.
///
/// Drives the entrance animation (image area scaling in, tab list sliding
/// over); `1.0` for the entire index-tracked phase.
pub fn intro_progress(progress: f32, region: &ScrollRegion) -> f32 {
    if region.intro_distance <= 0.0 {
        return 1.0;
    }
    let travelled = progress * region.total_distance();
    (travelled / region.intro_distance).clamp(0.0, 1.0)
}
