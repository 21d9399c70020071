//! Maps a raw drag distance onto the fraction complete of a paused transition.
//!
//! Dragging up (negative distance) drives toward [`DrawerState::Expanded`],
//! dragging down drives toward [`DrawerState::Collapsed`]. The result is
//! added to the fraction captured when the animation was interrupted and then
//! saturated, so overshooting the physical drag never moves the playhead
//! outside `0.0..=1.0`.

use super::DrawerState;

/// Convert `distance_traveled` into a fraction complete toward `target`.
///
/// # Panics
///
/// Panics if `total_distance` is not a positive finite number. A zero distance
/// means the drawer geometry was never measured.
pub fn map_distance(
    distance_traveled: f32,
    total_distance: f32,
    interrupted_progress: f32,
    target: DrawerState,
) -> f32 {
    assert!(
        total_distance.is_finite() && total_distance > 0.0,
        "drag mapped against an unmeasured drawer (total distance {})",
        total_distance
    );

    let raw = distance_traveled / total_distance;
    let relative = raw + interrupted_progress;

    let fraction = match target {
        DrawerState::Expanded if relative > 0.0 => 0.0,
        DrawerState::Collapsed if relative < 0.0 => 0.0,
        DrawerState::Expanded if relative < -1.0 => 1.0,
        DrawerState::Collapsed if relative > 1.0 => 1.0,
        // Magnitude of the drag, not its signed value, is added to the baseline
        _ => raw.abs() + interrupted_progress,
    };
    fraction.clamp(0.0, 1.0)
}
