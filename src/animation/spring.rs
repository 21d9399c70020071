/// Configuration for spring physics animation
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringConfig {
    /// Mass of the spring (default: 1.0)
    pub mass: f32,
    /// Stiffness of the spring
    pub stiffness: f32,
    /// Damping coefficient
    pub damping: f32,
}

impl SpringConfig {
    /// Critically damped spring: reaches the target as fast as possible
    /// without overshooting. Damping is `2 * sqrt(stiffness * mass)`.
    pub const CRITICALLY_DAMPED: Self = Self {
        mass: 1.0,
        stiffness: 100.0,
        damping: 20.0,
    };

    /// Bouncy spring with visible overshoot
    pub const BOUNCY: Self = Self {
        mass: 1.0,
        stiffness: 200.0,
        damping: 10.0,
    };

    /// Build a unit-mass spring from a damping ratio.
    ///
    /// A ratio of 1.0 is critically damped, lower values oscillate before
    /// settling.
    pub fn with_damping_ratio(stiffness: f32, damping_ratio: f32) -> Self {
        let mass = 1.0;
        Self {
            mass,
            stiffness,
            damping: damping_ratio * 2.0 * (stiffness * mass).sqrt(),
        }
    }

    /// Damping ratio of this configuration (1.0 = critically damped)
    pub fn damping_ratio(&self) -> f32 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::CRITICALLY_DAMPED
    }
}

/// Running state of a spring simulation that travels from 0.0 to 1.0
#[derive(Clone, Debug)]
pub struct SpringState {
    /// Current position (0.0 = start, 1.0 = target)
    pub position: f32,
    /// Current velocity
    pub velocity: f32,
    /// Elapsed time at the previous step, in seconds
    pub last_t: f32,
}

impl SpringState {
    pub fn new() -> Self {
        Self {
            position: 0.0,
            velocity: 0.0,
            last_t: 0.0,
        }
    }

    /// Step the simulation to `elapsed_secs` (total time since the spring
    /// started) and return the new position, which may overshoot 1.0.
    pub fn step(&mut self, elapsed_secs: f32, config: &SpringConfig) -> f32 {
        let mut dt = (elapsed_secs - self.last_t).max(0.0);
        self.last_t = elapsed_secs;

        // Large frame gaps are integrated in ~30fps slices for stability
        const MAX_DT: f32 = 0.033;
        while dt > 1e-6 {
            let step = dt.min(MAX_DT);
            let displacement = self.position - 1.0;
            let force = -config.stiffness * displacement - config.damping * self.velocity;
            let acceleration = force / config.mass;

            // Semi-implicit Euler
            self.velocity += acceleration * step;
            self.position += self.velocity * step;
            dt -= step;
        }

        self.position
    }

    /// Position near the target and velocity near zero
    pub fn is_settled(&self, threshold: f32) -> bool {
        (self.position - 1.0).abs() < threshold && self.velocity.abs() < threshold
    }
}

impl Default for SpringState {
    fn default() -> Self {
        Self::new()
    }
}
