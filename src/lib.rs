//! Interactive drawer transitions.
//!
//! A drawer slides between a collapsed and an expanded resting position. A tap
//! runs the transition on its own clock; a drag pauses it, scrubs it, and
//! hands it back to the clock on release, possibly reversed. Background blur,
//! title labels and corner radius follow the same playhead.
//!
//! The host owns the views and the frame clock:
//!
//! ```ignore
//! let mut drawer = DrawerController::new(DrawerConfig::default(), my_views);
//! drawer.set_layout(DrawerLayout::new(geometry, &label_metrics)?);
//!
//! drawer.handle_gesture(GestureEvent::Tap)?;
//! // once per frame
//! drawer.advance(frame_delta);
//! ```

pub mod animation;
pub mod config;
pub mod drawer;
pub mod error;
pub mod transform;

pub use config::DrawerConfig;
pub use error::{DrawerError, Result};

pub mod prelude {
    pub use crate::animation::{
        AnimatingPosition, PropertyAnimator, SpringConfig, TimingFunction, TransitionAnimator,
    };
    pub use crate::drawer::{
        ControllerPhase, DrawerController, DrawerGeometry, DrawerLayout, DrawerState,
        DrawerVisuals, EventResponse, GestureEvent, LabelMetrics, LabelPair, NoEffects,
        VisualEffectsApplier,
    };
    pub use crate::transform::Transform;
    pub use crate::{DrawerConfig, DrawerError};
}
