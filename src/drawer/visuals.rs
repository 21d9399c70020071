//! Concrete visual properties of the drawer and the trait that pushes them
//! into a view tree.
//!
//! Every resting state maps to one [`DrawerVisuals`] value. While a transition
//! is in flight the controller blends the two resting values by the
//! animator's playhead, so blur, label alpha and label transforms track a
//! scrub continuously instead of toggling.

use super::{DrawerLayout, DrawerState};
use crate::animation::Animatable;
use crate::transform::Transform;

/// Opacity and transform of one title label
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LabelVisual {
    pub alpha: f32,
    pub transform: Transform,
}

impl LabelVisual {
    pub fn new(alpha: f32, transform: Transform) -> Self {
        Self { alpha, transform }
    }
}

impl Animatable for LabelVisual {
    /// Alpha saturates to `0.0..=1.0` when a spring overshoots
    fn lerp(from: &Self, to: &Self, t: f32) -> Self {
        Self {
            alpha: f32::lerp(&from.alpha, &to.alpha, t).clamp(0.0, 1.0),
            transform: Transform::lerp(&from.transform, &to.transform, t),
        }
    }
}

/// The closed (collapsed) and open (expanded) title labels, cross-faded
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LabelPair {
    pub closed: LabelVisual,
    pub open: LabelVisual,
}

impl Animatable for LabelPair {
    fn lerp(from: &Self, to: &Self, t: f32) -> Self {
        Self {
            closed: LabelVisual::lerp(&from.closed, &to.closed, t),
            open: LabelVisual::lerp(&from.open, &to.open, t),
        }
    }
}

/// Every property the drawer transition animates
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawerVisuals {
    /// Top offset of the drawer
    pub offset: f32,
    /// Background blur intensity; 0.0 means no effect, 1.0 the full effect
    pub blur: f32,
    pub corner_radius: f32,
    pub labels: LabelPair,
}

impl DrawerVisuals {
    /// Values of a drawer at rest in `state`
    pub fn resting(state: DrawerState, layout: &DrawerLayout) -> Self {
        let geometry = &layout.geometry;
        let reshape = &layout.labels;

        match state {
            DrawerState::Collapsed => Self {
                offset: geometry.collapsed_offset(),
                blur: 0.0,
                corner_radius: state.corner_radius(),
                labels: LabelPair {
                    closed: LabelVisual::new(1.0, Transform::IDENTITY),
                    open: LabelVisual::new(
                        0.0,
                        Transform::translate(0.0, -reshape.closed_translation)
                            .then(&Transform::scale(reshape.closed_scale)),
                    ),
                },
            },
            DrawerState::Expanded => Self {
                offset: geometry.expanded_offset(),
                blur: 1.0,
                corner_radius: state.corner_radius(),
                labels: LabelPair {
                    closed: LabelVisual::new(
                        0.0,
                        Transform::translate(0.0, reshape.closed_translation)
                            .then(&Transform::scale(1.0 / reshape.closed_scale)),
                    ),
                    open: LabelVisual::new(1.0, Transform::IDENTITY),
                },
            },
        }
    }

    pub fn has_blur(&self) -> bool {
        self.blur > 0.0
    }
}

impl Animatable for DrawerVisuals {
    fn lerp(from: &Self, to: &Self, t: f32) -> Self {
        Self {
            offset: f32::lerp(&from.offset, &to.offset, t),
            blur: f32::lerp(&from.blur, &to.blur, t).clamp(0.0, 1.0),
            corner_radius: f32::lerp(&from.corner_radius, &to.corner_radius, t),
            labels: LabelPair::lerp(&from.labels, &to.labels, t),
        }
    }
}

/// Receives drawer visuals and writes them into the host's views.
///
/// Each effect has its own method with an empty default, so a screen wires
/// only the effects it shows.
pub trait VisualEffectsApplier {
    fn apply_offset(&mut self, _offset: f32) {}

    /// `intensity` 0.0 clears the blur effect, 1.0 restores the full effect
    fn apply_blur(&mut self, _intensity: f32) {}

    fn apply_labels(&mut self, _labels: &LabelPair) {}

    fn apply_corner_radius(&mut self, _radius: f32) {}

    fn apply(&mut self, visuals: &DrawerVisuals) {
        self.apply_offset(visuals.offset);
        self.apply_blur(visuals.blur);
        self.apply_labels(&visuals.labels);
        self.apply_corner_radius(visuals.corner_radius);
    }
}

impl<T: VisualEffectsApplier + ?Sized> VisualEffectsApplier for &mut T {
    fn apply_offset(&mut self, offset: f32) {
        (**self).apply_offset(offset);
    }

    fn apply_blur(&mut self, intensity: f32) {
        (**self).apply_blur(intensity);
    }

    fn apply_labels(&mut self, labels: &LabelPair) {
        (**self).apply_labels(labels);
    }

    fn apply_corner_radius(&mut self, radius: f32) {
        (**self).apply_corner_radius(radius);
    }

    fn apply(&mut self, visuals: &DrawerVisuals) {
        (**self).apply(visuals);
    }
}

/// Applier that drops everything, for headless controllers
#[derive(Clone, Copy, Debug, Default)]
pub struct NoEffects;

impl VisualEffectsApplier for NoEffects {}
