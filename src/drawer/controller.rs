use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

use super::progress::map_distance;
use super::{drag_cancels, DrawerLayout, DrawerState, DrawerVisuals, VisualEffectsApplier};
use crate::animation::{Animatable, AnimatingPosition, PropertyAnimator, TransitionAnimator};
use crate::config::DrawerConfig;
use crate::error::{DrawerError, Result};

/// Identifies one transition session for the lifetime of a controller
pub type SessionId = u64;

/// Whether an event changed the transition
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventResponse {
    /// Out-of-order event, dropped without side effects
    Ignored,
    Handled,
}

/// Coarse state of the controller
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControllerPhase {
    /// No transition in flight
    Idle,
    /// Transition advancing on the animator's clock
    Running,
    /// Transition paused and driven by a drag
    Interactive,
}

#[derive(Clone, Copy, Debug)]
struct Completion {
    session: SessionId,
    position: AnimatingPosition,
}

/// Completions reported by animators, drained by the controller.
///
/// Animator callbacks hold a clone of the queue and the id of their session,
/// never the controller itself, so a callback can retire its own session.
#[derive(Clone, Default)]
struct CompletionQueue(Rc<RefCell<VecDeque<Completion>>>);

impl CompletionQueue {
    fn push(&self, completion: Completion) {
        self.0.borrow_mut().push_back(completion);
    }

    fn pop(&self) -> Option<Completion> {
        self.0.borrow_mut().pop_front()
    }
}

/// A transition in flight. At most one exists per controller.
pub struct TransitionSession<A> {
    id: SessionId,
    /// State the drawer rested in when the session began
    start_state: DrawerState,
    target_state: DrawerState,
    animator: A,
    interrupted_progress: Option<f32>,
    interactive: bool,
    from: DrawerVisuals,
    to: DrawerVisuals,
}

impl<A: TransitionAnimator> TransitionSession<A> {
    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn target_state(&self) -> DrawerState {
        self.target_state
    }

    pub fn is_reversed(&self) -> bool {
        self.animator.is_reversed()
    }

    /// Fraction complete captured when the session was last paused for a drag
    pub fn interrupted_progress(&self) -> Option<f32> {
        self.interrupted_progress
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    pub fn animator(&self) -> &A {
        &self.animator
    }

    /// Blend of the two resting values at the animator's playhead
    pub fn visuals(&self) -> DrawerVisuals {
        DrawerVisuals::lerp(&self.from, &self.to, self.animator.playhead())
    }

    fn pause(&mut self) {
        let fraction = self.animator.pause();
        self.interrupted_progress = Some(fraction);
        self.interactive = true;
    }

    fn reverse(&mut self) {
        self.animator.reverse();
        self.target_state = self.target_state.opposite();
    }

    fn landed_state(&self, position: AnimatingPosition) -> DrawerState {
        match position {
            AnimatingPosition::Start => self.start_state,
            AnimatingPosition::End => self.start_state.opposite(),
        }
    }
}

type AnimatorFactory<A> = Box<dyn FnMut(&DrawerConfig) -> A>;

/// Drives the drawer between its two resting states from taps and drags.
///
/// All events, including [`advance`](Self::advance), must be delivered from
/// one thread in order. Animator completions are queued and handled after
/// the call that produced them returns to the controller.
pub struct DrawerController<V, A = PropertyAnimator> {
    config: DrawerConfig,
    layout: Option<DrawerLayout>,
    state: DrawerState,
    session: Option<TransitionSession<A>>,
    next_session_id: SessionId,
    completions: CompletionQueue,
    make_animator: AnimatorFactory<A>,
    applier: V,
}

impl<V: VisualEffectsApplier> DrawerController<V> {
    /// Controller using [`PropertyAnimator`] with the configured duration and timing
    pub fn new(config: DrawerConfig, applier: V) -> Self {
        Self::with_animator(config, applier, |config| {
            PropertyAnimator::new(config.duration, config.timing.clone())
        })
    }
}

impl<V: VisualEffectsApplier, A: TransitionAnimator> DrawerController<V, A> {
    pub fn with_animator<F>(config: DrawerConfig, applier: V, make_animator: F) -> Self
    where
        F: FnMut(&DrawerConfig) -> A + 'static,
    {
        Self {
            config,
            layout: None,
            state: DrawerState::default(),
            session: None,
            next_session_id: 0,
            completions: CompletionQueue::default(),
            make_animator: Box::new(make_animator),
            applier,
        }
    }

    /// Install measured geometry and label metrics.
    ///
    /// The current visuals are pushed immediately, so the first call leaves
    /// the open label shrunk and the blur cleared. A session in flight keeps
    /// its playhead and blends between the new resting values.
    pub fn set_layout(&mut self, layout: DrawerLayout) {
        self.layout = Some(layout);
        if let Some(session) = self.session.as_mut() {
            session.from = DrawerVisuals::resting(session.start_state, &layout);
            session.to = DrawerVisuals::resting(session.start_state.opposite(), &layout);
        }
        if let Some(visuals) = self.visuals() {
            self.applier.apply(&visuals);
        }
    }

    pub fn layout(&self) -> Option<&DrawerLayout> {
        self.layout.as_ref()
    }

    pub fn config(&self) -> &DrawerConfig {
        &self.config
    }

    /// Last committed resting state
    pub fn state(&self) -> DrawerState {
        self.state
    }

    /// State the drawer is heading to: the session target, or the resting state when idle
    pub fn target_state(&self) -> DrawerState {
        self.session
            .as_ref()
            .map_or(self.state, TransitionSession::target_state)
    }

    pub fn phase(&self) -> ControllerPhase {
        match &self.session {
            None => ControllerPhase::Idle,
            Some(session) if session.interactive => ControllerPhase::Interactive,
            Some(_) => ControllerPhase::Running,
        }
    }

    pub fn session(&self) -> Option<&TransitionSession<A>> {
        self.session.as_ref()
    }

    pub fn is_reversed(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(TransitionSession::is_reversed)
    }

    pub fn interrupted_progress(&self) -> Option<f32> {
        self.session
            .as_ref()
            .and_then(TransitionSession::interrupted_progress)
    }

    /// Fraction complete toward the target, `None` when idle
    pub fn fraction_complete(&self) -> Option<f32> {
        self.session
            .as_ref()
            .map(|session| session.animator.fraction_complete())
    }

    /// Current values of every animated property, once layout is known
    pub fn visuals(&self) -> Option<DrawerVisuals> {
        match &self.session {
            Some(session) => Some(session.visuals()),
            None => self
                .layout
                .as_ref()
                .map(|layout| DrawerVisuals::resting(self.state, layout)),
        }
    }

    pub fn applier(&self) -> &V {
        &self.applier
    }

    pub fn applier_mut(&mut self) -> &mut V {
        &mut self.applier
    }

    /// Tap: start a run toward the other state, or reverse the run in flight.
    pub fn on_tap(&mut self) -> Result<EventResponse> {
        let layout = self.require_layout()?;

        let response = match self.session.as_mut() {
            None => {
                self.begin_session(&layout);
                EventResponse::Handled
            }
            Some(session) if session.interactive => {
                log::debug!("Tap ignored while session {} is being dragged", session.id);
                EventResponse::Ignored
            }
            Some(session) => {
                session.reverse();
                log::debug!(
                    "Session {} reversed toward {:?}",
                    session.id,
                    session.target_state
                );
                EventResponse::Handled
            }
        };

        self.process_completions();
        Ok(response)
    }

    /// Drag began: pause the run in flight, or start a paused one.
    pub fn on_drag_begin(&mut self) -> Result<EventResponse> {
        let layout = self.require_layout()?;

        if self.session.is_none() {
            self.begin_session(&layout);
        }
        let response = match self.session.as_mut() {
            Some(session) if session.interactive => {
                log::debug!("Drag begin ignored, session {} already interactive", session.id);
                EventResponse::Ignored
            }
            Some(session) => {
                session.pause();
                log::debug!(
                    "Session {} interactive at {:?} toward {:?}",
                    session.id,
                    session.interrupted_progress,
                    session.target_state
                );
                EventResponse::Handled
            }
            None => EventResponse::Ignored,
        };

        self.process_completions();
        Ok(response)
    }

    /// Drag moved by `vertical_distance` since it began. Up is negative.
    pub fn on_drag_update(&mut self, vertical_distance: f32) -> Result<EventResponse> {
        let layout = self.require_layout()?;

        if !vertical_distance.is_finite() {
            log::debug!("Drag update ignored, distance {}", vertical_distance);
            return Ok(EventResponse::Ignored);
        }

        let Some(session) = self.session.as_mut().filter(|s| s.interactive) else {
            log::debug!("Drag update ignored without an interactive session");
            return Ok(EventResponse::Ignored);
        };
        let Some(interrupted) = session.interrupted_progress else {
            log::debug!("Drag update ignored, session {} never paused", session.id);
            return Ok(EventResponse::Ignored);
        };

        let fraction = map_distance(
            vertical_distance,
            layout.geometry.total_distance(),
            interrupted,
            session.target_state,
        );
        session.animator.set_fraction_complete(fraction);
        log::trace!("Session {} scrubbed to {:.3}", session.id, fraction);

        let visuals = session.visuals();
        self.applier.apply(&visuals);
        self.process_completions();
        Ok(EventResponse::Handled)
    }

    /// Drag released with `velocity` (points per second, down is positive).
    /// Moving away from the target cancels the transition.
    pub fn on_drag_end(&mut self, velocity: f32) -> Result<EventResponse> {
        self.require_layout()?;

        let Some(session) = self.session.as_ref().filter(|s| s.interactive) else {
            log::debug!("Drag end ignored without an interactive session");
            return Ok(EventResponse::Ignored);
        };
        let cancelled = drag_cancels(velocity, session.target_state);
        self.end_drag(cancelled)
    }

    /// Gesture recognizer cancelled or failed; the drawer returns to where it was heading from
    pub fn on_drag_cancel(&mut self) -> Result<EventResponse> {
        self.end_drag(true)
    }

    /// Hand an interactive session back to the clock, reversed first if `cancelled`
    pub fn end_drag(&mut self, cancelled: bool) -> Result<EventResponse> {
        self.require_layout()?;

        let Some(session) = self.session.as_mut().filter(|s| s.interactive) else {
            log::debug!("Drag end ignored without an interactive session");
            return Ok(EventResponse::Ignored);
        };

        if cancelled {
            session.reverse();
        }
        session.animator.continue_to_completion(
            self.config.completion_timing.clone(),
            self.config.duration_factor,
        );
        session.interactive = false;
        log::debug!(
            "Session {} continuing toward {:?} (cancelled: {})",
            session.id,
            session.target_state,
            cancelled
        );

        self.process_completions();
        Ok(EventResponse::Handled)
    }

    /// Advance the transition clock by one frame and push the new visuals.
    ///
    /// Returns true while a transition is still in flight.
    pub fn advance(&mut self, dt: Duration) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };

        let playhead = session.animator.advance(dt);
        log::trace!("Session {} playhead {:.3}", session.id, playhead);
        let visuals = session.visuals();
        self.applier.apply(&visuals);

        self.process_completions();
        self.session.is_some()
    }

    fn require_layout(&self) -> Result<DrawerLayout> {
        self.layout.ok_or(DrawerError::LayoutNotMeasured)
    }

    fn begin_session(&mut self, layout: &DrawerLayout) {
        let id = self.next_session_id;
        self.next_session_id += 1;

        let start_state = self.state;
        let target_state = start_state.opposite();
        let mut animator = (self.make_animator)(&self.config);

        let completions = self.completions.clone();
        animator.on_complete(Box::new(move |position| {
            completions.push(Completion {
                session: id,
                position,
            });
        }));
        animator.start();

        log::debug!("Session {} started: {:?} -> {:?}", id, start_state, target_state);
        self.session = Some(TransitionSession {
            id,
            start_state,
            target_state,
            animator,
            interrupted_progress: None,
            interactive: false,
            from: DrawerVisuals::resting(start_state, layout),
            to: DrawerVisuals::resting(target_state, layout),
        });
    }

    fn process_completions(&mut self) {
        while let Some(completion) = self.completions.pop() {
            let current = self
                .session
                .as_ref()
                .is_some_and(|session| session.id == completion.session);
            if !current {
                log::trace!("Dropping stale completion of session {}", completion.session);
                continue;
            }
            if let Some(session) = self.session.take() {
                self.commit(session, completion.position);
            }
        }
    }

    fn commit(&mut self, session: TransitionSession<A>, position: AnimatingPosition) {
        let landed = session.landed_state(position);
        if landed != session.target_state {
            log::warn!(
                "Session {} landed on {:?} while targeting {:?}",
                session.id,
                landed,
                session.target_state
            );
        }

        self.state = session.target_state;
        log::debug!("Session {} committed {:?}", session.id, self.state);

        if let Some(layout) = &self.layout {
            let visuals = DrawerVisuals::resting(self.state, layout);
            self.applier.apply(&visuals);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{AnimatorState, CompletionCallback, TimingFunction};
    use crate::drawer::{DrawerGeometry, LabelMetrics, NoEffects};
    use std::cell::Cell;

    const FRAME: Duration = Duration::from_millis(16);
    const TOTAL: f32 = 400.0;

    fn layout() -> DrawerLayout {
        DrawerLayout::new(
            DrawerGeometry::new(50.0, 50.0 + TOTAL).unwrap(),
            &LabelMetrics {
                closed_height: 20.0,
                open_height: 40.0,
                closed_frame_y: 30.0,
                open_frame_y: 100.0,
            },
        )
        .unwrap()
    }

    fn controller() -> DrawerController<NoEffects> {
        let config = DrawerConfig::default().timing(TimingFunction::Linear);
        let mut controller = DrawerController::new(config, NoEffects);
        controller.set_layout(layout());
        controller
    }

    fn run_to_idle<V: VisualEffectsApplier, A: TransitionAnimator>(
        controller: &mut DrawerController<V, A>,
    ) {
        for _ in 0..1000 {
            if !controller.advance(FRAME) {
                return;
            }
        }
        panic!("transition never finished");
    }

    #[test]
    fn test_events_before_layout_fail() {
        let mut controller = DrawerController::new(DrawerConfig::default(), NoEffects);
        assert_eq!(controller.on_tap(), Err(DrawerError::LayoutNotMeasured));
        assert_eq!(controller.on_drag_begin(), Err(DrawerError::LayoutNotMeasured));
        assert_eq!(
            controller.on_drag_update(-10.0),
            Err(DrawerError::LayoutNotMeasured)
        );
        assert_eq!(controller.on_drag_end(0.0), Err(DrawerError::LayoutNotMeasured));
        assert_eq!(controller.phase(), ControllerPhase::Idle);
    }

    #[test]
    fn test_tap_runs_to_expanded() {
        let mut controller = controller();
        assert_eq!(controller.on_tap(), Ok(EventResponse::Handled));
        assert_eq!(controller.phase(), ControllerPhase::Running);
        assert_eq!(controller.target_state(), DrawerState::Expanded);
        assert_eq!(controller.state(), DrawerState::Collapsed);

        run_to_idle(&mut controller);
        assert_eq!(controller.phase(), ControllerPhase::Idle);
        assert_eq!(controller.state(), DrawerState::Expanded);
    }

    #[test]
    fn test_second_tap_reverses_in_place() {
        let mut controller = controller();
        controller.on_tap().unwrap();
        controller.advance(Duration::from_millis(200));
        let id = controller.session().map(TransitionSession::id);
        let before = controller.visuals();

        controller.on_tap().unwrap();
        assert_eq!(controller.session().map(TransitionSession::id), id);
        assert_eq!(controller.target_state(), DrawerState::Collapsed);
        assert!(controller.is_reversed());
        assert_eq!(controller.visuals(), before);

        run_to_idle(&mut controller);
        assert_eq!(controller.state(), DrawerState::Collapsed);
    }

    #[test]
    fn test_double_reversal_is_identity() {
        let mut controller = controller();
        controller.on_tap().unwrap();
        let target = controller.target_state();
        let reversed = controller.is_reversed();
        controller.on_tap().unwrap();
        controller.on_tap().unwrap();
        assert_eq!(controller.target_state(), target);
        assert_eq!(controller.is_reversed(), reversed);
    }

    #[test]
    fn test_drag_scrubs_and_finishes() {
        let mut controller = controller();
        assert_eq!(controller.on_drag_begin(), Ok(EventResponse::Handled));
        assert_eq!(controller.phase(), ControllerPhase::Interactive);
        assert_eq!(controller.interrupted_progress(), Some(0.0));

        controller.on_drag_update(-0.3 * TOTAL).unwrap();
        let fraction = controller.fraction_complete().unwrap();
        assert!((fraction - 0.3).abs() < 1e-5);

        // Repeating the same distance does not accumulate
        controller.on_drag_update(-0.3 * TOTAL).unwrap();
        assert_eq!(controller.fraction_complete(), Some(fraction));

        controller.on_drag_end(0.0).unwrap();
        assert_eq!(controller.phase(), ControllerPhase::Running);
        run_to_idle(&mut controller);
        assert_eq!(controller.state(), DrawerState::Expanded);
    }

    #[test]
    fn test_drag_released_away_from_target_cancels() {
        let mut controller = controller();
        controller.on_drag_begin().unwrap();
        controller.on_drag_update(-0.3 * TOTAL).unwrap();
        controller.on_drag_end(5.0).unwrap();
        assert_eq!(controller.target_state(), DrawerState::Collapsed);
        run_to_idle(&mut controller);
        assert_eq!(controller.state(), DrawerState::Collapsed);
    }

    #[test]
    fn test_drag_begin_while_running_redirects_session() {
        let mut controller = controller();
        controller.on_tap().unwrap();
        controller.advance(Duration::from_millis(500));
        let id = controller.session().map(TransitionSession::id);

        controller.on_drag_begin().unwrap();
        assert_eq!(controller.session().map(TransitionSession::id), id);
        assert_eq!(controller.phase(), ControllerPhase::Interactive);
        let interrupted = controller.interrupted_progress().unwrap();
        assert!((interrupted - 0.5).abs() < 0.05, "interrupted at {}", interrupted);
    }

    #[test]
    fn test_out_of_order_events_are_ignored() {
        let mut controller = controller();
        assert_eq!(controller.on_drag_update(-10.0), Ok(EventResponse::Ignored));
        assert_eq!(controller.on_drag_end(0.0), Ok(EventResponse::Ignored));
        assert_eq!(controller.phase(), ControllerPhase::Idle);

        controller.on_drag_begin().unwrap();
        assert_eq!(controller.on_tap(), Ok(EventResponse::Ignored));
        assert_eq!(controller.on_drag_begin(), Ok(EventResponse::Ignored));
        assert_eq!(controller.phase(), ControllerPhase::Interactive);

        controller.on_drag_end(0.0).unwrap();
        assert_eq!(controller.on_drag_update(-10.0), Ok(EventResponse::Ignored));
    }

    #[test]
    fn test_non_finite_drag_distance_is_ignored() {
        let mut controller = controller();
        controller.on_drag_begin().unwrap();
        controller.on_drag_update(-0.25 * TOTAL).unwrap();
        let before = controller.visuals();

        for distance in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY] {
            assert_eq!(
                controller.on_drag_update(distance),
                Ok(EventResponse::Ignored)
            );
        }
        let fraction = controller.fraction_complete().unwrap();
        assert!((fraction - 0.25).abs() < 1e-5);
        assert_eq!(controller.visuals(), before);
        assert_eq!(controller.phase(), ControllerPhase::Interactive);
    }

    #[derive(Default)]
    struct Calls {
        continued_with: RefCell<Option<(String, f32)>>,
        callback: RefCell<Option<CompletionCallback>>,
        reversed: Cell<bool>,
    }

    /// Animator that only records calls; the test fires completion by hand
    struct ScriptedAnimator {
        calls: Rc<Calls>,
        fraction: f32,
    }

    impl TransitionAnimator for ScriptedAnimator {
        fn state(&self) -> AnimatorState {
            AnimatorState::Active
        }
        fn is_running(&self) -> bool {
            false
        }
        fn is_reversed(&self) -> bool {
            self.calls.reversed.get()
        }
        fn start(&mut self) {}
        fn pause(&mut self) -> f32 {
            self.fraction
        }
        fn fraction_complete(&self) -> f32 {
            self.fraction
        }
        fn set_fraction_complete(&mut self, fraction: f32) {
            self.fraction = fraction;
        }
        fn reverse(&mut self) {
            self.calls.reversed.set(!self.calls.reversed.get());
        }
        fn continue_to_completion(&mut self, timing: TimingFunction, duration_factor: f32) {
            *self.calls.continued_with.borrow_mut() = Some((format!("{:?}", timing), duration_factor));
        }
        fn on_complete(&mut self, callback: CompletionCallback) {
            *self.calls.callback.borrow_mut() = Some(callback);
        }
        fn advance(&mut self, _dt: Duration) -> f32 {
            self.fraction
        }
        fn playhead(&self) -> f32 {
            self.fraction
        }
    }

    #[test]
    fn test_drag_end_continues_with_ease_out_and_zero_factor() {
        let calls = Rc::new(Calls::default());
        let shared = calls.clone();
        let mut controller =
            DrawerController::with_animator(DrawerConfig::default(), NoEffects, move |_| {
                ScriptedAnimator {
                    calls: shared.clone(),
                    fraction: 0.0,
                }
            });
        controller.set_layout(layout());

        controller.on_drag_begin().unwrap();
        controller.on_drag_update(-0.5 * TOTAL).unwrap();
        controller.on_drag_end(-1.0).unwrap();
        assert_eq!(
            calls.continued_with.borrow().clone(),
            Some(("EaseOut".to_string(), 0.0))
        );

        // Completion only lands once the controller drains its queue
        let callback = calls.callback.borrow_mut().take().unwrap();
        callback(AnimatingPosition::End);
        assert_eq!(controller.phase(), ControllerPhase::Running);
        assert!(!controller.advance(FRAME));
        assert_eq!(controller.state(), DrawerState::Expanded);
    }

    #[test]
    fn test_stale_completion_is_dropped() {
        let calls = Rc::new(Calls::default());
        let shared = calls.clone();
        let mut controller =
            DrawerController::with_animator(DrawerConfig::default(), NoEffects, move |_| {
                ScriptedAnimator {
                    calls: shared.clone(),
                    fraction: 0.0,
                }
            });
        controller.set_layout(layout());

        controller.on_tap().unwrap();
        let first = calls.callback.borrow_mut().take().unwrap();
        first(AnimatingPosition::End);
        controller.advance(FRAME);
        assert_eq!(controller.state(), DrawerState::Expanded);

        // A second session begins; replaying the old callback must not retire it
        controller.on_tap().unwrap();
        controller.completions.push(Completion {
            session: 0,
            position: AnimatingPosition::End,
        });
        assert!(controller.advance(FRAME));
        assert_eq!(controller.phase(), ControllerPhase::Running);
        assert_eq!(controller.target_state(), DrawerState::Collapsed);
    }
}
