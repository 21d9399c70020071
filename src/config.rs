use std::time::Duration;

use crate::animation::{SpringConfig, TimingFunction};

/// Tunables for a drawer transition
#[derive(Clone, Debug)]
pub struct DrawerConfig {
    /// Length of a full collapsed-to-expanded run
    pub duration: Duration,
    /// Curve for tap-driven runs
    pub timing: TimingFunction,
    /// Curve used to finish after a drag ends
    pub completion_timing: TimingFunction,
    /// Duration override when finishing a drag; 0.0 keeps the
    /// remaining-distance duration
    pub duration_factor: f32,
    /// Resting offset of the drawer while collapsed
    pub collapsed_offset: f32,
}

impl Default for DrawerConfig {
    fn default() -> Self {
        Self {
            duration: Duration::from_secs(1),
            timing: TimingFunction::Spring(SpringConfig::with_damping_ratio(100.0, 1.0)),
            completion_timing: TimingFunction::EaseOut,
            duration_factor: 0.0,
            collapsed_offset: 50.0,
        }
    }
}

impl DrawerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn timing(mut self, timing: TimingFunction) -> Self {
        self.timing = timing;
        self
    }

    pub fn completion_timing(mut self, timing: TimingFunction) -> Self {
        self.completion_timing = timing;
        self
    }

    pub fn duration_factor(mut self, factor: f32) -> Self {
        self.duration_factor = factor;
        self
    }

    pub fn collapsed_offset(mut self, offset: f32) -> Self {
        self.collapsed_offset = offset;
        self
    }
}
