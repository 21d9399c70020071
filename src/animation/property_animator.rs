use std::time::Duration;

use super::{
    Animatable, AnimatingPosition, AnimatorState, CompletionCallback, SpringState, TimingFunction,
    TransitionAnimator,
};

/// Threshold used to decide when a spring segment has come to rest
const SPRING_SETTLE_THRESHOLD: f32 = 1e-3;

/// Segment length at which a spring runs on real time. Spring presets are
/// tuned to settle in about this long.
const SPRING_REFERENCE_SECS: f32 = 1.0;

/// Spring time after which a segment is treated as settled
const SPRING_MAX_SECS: f32 = 10.0;

/// One time-driven run of the playhead toward an end
struct Segment {
    from: f32,
    to: f32,
    elapsed_secs: f32,
    duration_secs: f32,
    timing: TimingFunction,
    spring: Option<SpringState>,
}

impl Segment {
    fn new(from: f32, to: f32, duration: Duration, timing: TimingFunction) -> Self {
        let spring = timing.is_spring().then(SpringState::new);
        Self {
            from,
            to,
            elapsed_secs: 0.0,
            duration_secs: duration.as_secs_f32(),
            timing,
            spring,
        }
    }

    /// Step the segment clock; returns the new playhead and whether the run is over
    fn step(&mut self, dt: Duration) -> (f32, bool) {
        self.elapsed_secs += dt.as_secs_f32();

        if (self.to - self.from).abs() < f32::EPSILON {
            return (self.to, true);
        }

        if self.duration_secs <= 0.0 {
            return (self.to, true);
        }

        if let (Some(spring), TimingFunction::Spring(config)) = (&mut self.spring, &self.timing) {
            // Spring clock runs faster for short segments, slower for long ones
            let spring_secs = self.elapsed_secs * SPRING_REFERENCE_SECS / self.duration_secs;
            if spring_secs >= SPRING_MAX_SECS {
                return (self.to, true);
            }
            let t = spring.step(spring_secs, config);
            let settled = spring.is_settled(SPRING_SETTLE_THRESHOLD);
            return (f32::lerp(&self.from, &self.to, t), settled);
        }

        let t = self.elapsed_secs / self.duration_secs;
        if t >= 1.0 - 1e-4 {
            return (self.to, true);
        }
        let eased = self.timing.evaluate(t);
        (f32::lerp(&self.from, &self.to, eased), false)
    }
}

/// Frame-driven [`TransitionAnimator`].
///
/// Time only moves through [`advance`](TransitionAnimator::advance), which the
/// host calls once per frame. Scrubbing is linear; continuing or reversing
/// re-bases the run on the current playhead so the values never jump.
pub struct PropertyAnimator {
    duration: Duration,
    timing: TimingFunction,
    state: AnimatorState,
    reversed: bool,
    playhead: f32,
    segment: Option<Segment>,
    completion: Option<CompletionCallback>,
}

impl PropertyAnimator {
    pub fn new(duration: Duration, timing: TimingFunction) -> Self {
        Self {
            duration,
            timing,
            state: AnimatorState::Inactive,
            reversed: false,
            playhead: 0.0,
            segment: None,
            completion: None,
        }
    }

    fn end_playhead(&self) -> f32 {
        if self.reversed {
            0.0
        } else {
            1.0
        }
    }

    fn remaining_distance(&self) -> f32 {
        (self.end_playhead() - self.playhead).abs().min(1.0)
    }

    fn run_toward_end(&mut self, timing: TimingFunction, duration: Duration) {
        self.segment = Some(Segment::new(
            self.playhead,
            self.end_playhead(),
            duration,
            timing,
        ));
    }

    fn finish(&mut self) {
        self.playhead = self.end_playhead();
        self.segment = None;
        self.state = AnimatorState::Inactive;

        let position = if self.reversed {
            AnimatingPosition::Start
        } else {
            AnimatingPosition::End
        };
        log::trace!("Animator finished at {:?}", position);
        if let Some(callback) = self.completion.take() {
            callback(position);
        }
    }
}

impl TransitionAnimator for PropertyAnimator {
    fn state(&self) -> AnimatorState {
        self.state
    }

    fn is_running(&self) -> bool {
        self.segment.is_some()
    }

    fn is_reversed(&self) -> bool {
        self.reversed
    }

    fn start(&mut self) {
        if self.is_running() {
            return;
        }
        self.state = AnimatorState::Active;
        let duration = self.duration.mul_f32(self.remaining_distance());
        self.run_toward_end(self.timing.clone(), duration);
    }

    fn pause(&mut self) -> f32 {
        self.state = AnimatorState::Active;
        self.segment = None;
        self.fraction_complete()
    }

    fn fraction_complete(&self) -> f32 {
        let fraction = if self.reversed {
            1.0 - self.playhead
        } else {
            self.playhead
        };
        fraction.clamp(0.0, 1.0)
    }

    fn set_fraction_complete(&mut self, fraction: f32) {
        if self.is_running() {
            log::trace!("Ignoring scrub on a running animator");
            return;
        }
        let fraction = fraction.clamp(0.0, 1.0);
        self.playhead = if self.reversed {
            1.0 - fraction
        } else {
            fraction
        };
        if self.state == AnimatorState::Inactive {
            self.state = AnimatorState::Active;
        }
    }

    fn reverse(&mut self) {
        self.reversed = !self.reversed;
        if let Some(segment) = self.segment.take() {
            let duration = self.duration.mul_f32(self.remaining_distance());
            self.run_toward_end(segment.timing, duration);
        }
    }

    fn continue_to_completion(&mut self, timing: TimingFunction, duration_factor: f32) {
        if self.state != AnimatorState::Active {
            log::warn!(
                "continue_to_completion on a {:?} animator, starting it instead",
                self.state
            );
            self.state = AnimatorState::Active;
        }
        let duration = if duration_factor > 0.0 {
            self.duration.mul_f32(duration_factor)
        } else {
            self.duration.mul_f32(self.remaining_distance())
        };
        self.run_toward_end(timing, duration);
    }

    fn on_complete(&mut self, callback: CompletionCallback) {
        self.completion = Some(callback);
    }

    fn advance(&mut self, dt: Duration) -> f32 {
        let Some(segment) = self.segment.as_mut() else {
            return self.playhead;
        };

        let (playhead, done) = segment.step(dt);
        self.playhead = playhead;
        if done {
            self.finish();
        }
        self.playhead
    }

    fn playhead(&self) -> f32 {
        self.playhead
    }
}
