use std::time::Duration;

use super::TimingFunction;

/// Lifecycle of a [`TransitionAnimator`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimatorState {
    /// Created but not started, or finished
    Inactive,
    /// Started; either running on its own clock or paused for scrubbing
    Active,
}

/// Where the animated properties ended up when an animation finished
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimatingPosition {
    /// Values the animation started from (it ran reversed)
    Start,
    /// Values the animation was built to reach
    End,
}

/// One-shot callback invoked when the animator finishes
pub type CompletionCallback = Box<dyn FnOnce(AnimatingPosition)>;

/// A cancellable, pausable, reversible, time-based animation.
///
/// The animated value is a playhead in `0.0..=1.0` from the start values to
/// the end values. [`fraction_complete`](Self::fraction_complete) is measured
/// in the current direction of travel, so reversing maps `f` to `1.0 - f`
/// without moving the playhead.
///
/// Implementations must not invoke the completion callback from
/// [`reverse`](Self::reverse) or
/// [`set_fraction_complete`](Self::set_fraction_complete); only
/// [`advance`](Self::advance) may finish the animation.
pub trait TransitionAnimator {
    fn state(&self) -> AnimatorState;

    /// Whether the animator advances on its own clock
    fn is_running(&self) -> bool;

    fn is_reversed(&self) -> bool;

    /// Begin running from the current playhead
    fn start(&mut self);

    /// Stop advancing and return the current fraction complete.
    /// Pausing an already paused animator only reports the fraction.
    fn pause(&mut self) -> f32;

    fn fraction_complete(&self) -> f32;

    /// Move the playhead directly (scrubbing). Ignored while running.
    fn set_fraction_complete(&mut self, fraction: f32);

    /// Toggle the direction of travel in place, without restarting
    fn reverse(&mut self);

    /// Resume from the current playhead with new timing.
    ///
    /// A `duration_factor` of `0.0` keeps the duration proportional to the
    /// remaining distance; any other value scales the base duration.
    fn continue_to_completion(&mut self, timing: TimingFunction, duration_factor: f32);

    /// Register the one-shot completion callback, replacing any previous one
    fn on_complete(&mut self, callback: CompletionCallback);

    /// Advance the clock by `dt`. Returns the playhead after the step.
    fn advance(&mut self, dt: Duration) -> f32;

    /// Current playhead, 0.0 at the start values and 1.0 at the end values
    fn playhead(&self) -> f32;
}
