//! The drawer transition: resting states, drag-to-progress mapping, the
//! visual properties of each state and the controller tying them together.

mod controller;
mod geometry;
mod gesture;
mod progress;
mod state;
mod visuals;

pub use controller::{
    ControllerPhase, DrawerController, EventResponse, SessionId, TransitionSession,
};
pub use geometry::{DrawerGeometry, DrawerLayout, LabelMetrics, LabelReshape};
pub use gesture::{drag_cancels, GestureEvent};
pub use progress::map_distance;
pub use state::{opposite, DrawerState};
pub use visuals::{DrawerVisuals, LabelPair, LabelVisual, NoEffects, VisualEffectsApplier};
