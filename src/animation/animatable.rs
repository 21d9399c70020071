use crate::transform::Transform;

/// Trait for values that can be interpolated between two resting states
pub trait Animatable: Clone + PartialEq + 'static {
    /// Linear interpolation between two values.
    /// t = 0.0 returns `from`, t = 1.0 returns `to`; t may overshoot for springs.
    fn lerp(from: &Self, to: &Self, t: f32) -> Self;
}

impl Animatable for f32 {
    fn lerp(from: &Self, to: &Self, t: f32) -> Self {
        from + (to - from) * t
    }
}

impl Animatable for Transform {
    /// Element-wise blend. Exact for the scale + translation transforms the
    /// drawer labels use; rotations are not preserved.
    fn lerp(from: &Self, to: &Self, t: f32) -> Self {
        let mut data = [0.0f32; 16];
        for (i, value) in data.iter_mut().enumerate() {
            *value = f32::lerp(&from.data[i], &to.data[i], t);
        }
        Transform { data }
    }
}
