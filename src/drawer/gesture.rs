//! Adapter from recognized gestures to controller events.
//!
//! Recognizing a tap versus a pan happens upstream; this module only maps the
//! recognizer phases onto [`DrawerController`] calls. Vertical values follow
//! screen coordinates, so positive means downward.

use super::{DrawerController, DrawerState, EventResponse, VisualEffectsApplier};
use crate::animation::TransitionAnimator;
use crate::error::Result;

/// A gesture phase delivered by the host's recognizers
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureEvent {
    Tap,
    PanBegan,
    /// Vertical translation since the pan began
    PanChanged { translation: f32 },
    /// Pan lifted with a vertical velocity
    PanEnded { velocity: f32 },
    /// Recognizer cancelled or failed
    PanCancelled,
}

/// Whether releasing a drag with `velocity` abandons the transition toward `target`.
///
/// A release moving away from the target cancels; zero velocity keeps going.
pub fn drag_cancels(velocity: f32, target: DrawerState) -> bool {
    match target {
        DrawerState::Expanded => velocity > 0.0,
        DrawerState::Collapsed => velocity < 0.0,
    }
}

impl<V: VisualEffectsApplier, A: TransitionAnimator> DrawerController<V, A> {
    pub fn handle_gesture(&mut self, event: GestureEvent) -> Result<EventResponse> {
        match event {
            GestureEvent::Tap => self.on_tap(),
            GestureEvent::PanBegan => self.on_drag_begin(),
            GestureEvent::PanChanged { translation } => self.on_drag_update(translation),
            GestureEvent::PanEnded { velocity } => self.on_drag_end(velocity),
            GestureEvent::PanCancelled => self.on_drag_cancel(),
        }
    }
}
