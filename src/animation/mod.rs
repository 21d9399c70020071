mod animatable;
mod animator;
mod property_animator;
mod spring;
mod timing;

pub use animatable::Animatable;
pub use animator::{AnimatingPosition, AnimatorState, CompletionCallback, TransitionAnimator};
pub use property_animator::PropertyAnimator;
pub use spring::{SpringConfig, SpringState};
pub use timing::TimingFunction;
