//! Drives a drawer headlessly with a simulated 60fps clock and prints the
//! visuals. Run with `RUST_LOG=drawer=debug` to follow the session lifecycle.

use std::time::Duration;

use drawer::prelude::*;

const FRAME: Duration = Duration::from_millis(16);

struct ConsoleViews;

impl VisualEffectsApplier for ConsoleViews {
    fn apply(&mut self, visuals: &DrawerVisuals) {
        println!(
            "offset {:7.2}  blur {:.2}  radius {:5.2}  closed {:.2}  open {:.2}",
            visuals.offset,
            visuals.blur,
            visuals.corner_radius,
            visuals.labels.closed.alpha,
            visuals.labels.open.alpha,
        );
    }
}

fn settle(drawer: &mut DrawerController<ConsoleViews>) {
    while drawer.advance(FRAME) {}
}

fn main() -> Result<(), DrawerError> {
    env_logger::init();

    let config = DrawerConfig::default().duration(Duration::from_millis(400));
    let mut drawer = DrawerController::new(config.clone(), ConsoleViews);
    drawer.set_layout(DrawerLayout::new(
        DrawerGeometry::measured(&config, 450.0)?,
        &LabelMetrics {
            closed_height: 20.0,
            open_height: 34.0,
            closed_frame_y: 14.0,
            open_frame_y: 60.0,
        },
    )?);

    println!("-- tap");
    drawer.handle_gesture(GestureEvent::Tap)?;
    settle(&mut drawer);

    println!("-- drag down, released downward");
    drawer.handle_gesture(GestureEvent::PanBegan)?;
    for step in 1..=5 {
        drawer.handle_gesture(GestureEvent::PanChanged {
            translation: step as f32 * 40.0,
        })?;
    }
    drawer.handle_gesture(GestureEvent::PanEnded { velocity: 300.0 })?;
    settle(&mut drawer);

    println!("-- tap, then tap again mid-flight");
    drawer.handle_gesture(GestureEvent::Tap)?;
    for _ in 0..8 {
        drawer.advance(FRAME);
    }
    drawer.handle_gesture(GestureEvent::Tap)?;
    settle(&mut drawer);

    println!("resting: {:?}", drawer.state());
    Ok(())
}
