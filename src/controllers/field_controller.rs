// src/controllers/field_controller.rs
//
// FieldController drives one field: it turns clock readings into frame
// deltas, routes host input, reseeds on resize and stops for good on
// teardown. One controller per canvas, no shared state.

use nannou::prelude::*;
use rand::RngCore;
use tracing::{debug, info, warn};

use super::input::InputEvent;
use crate::animation::clock::{Clock, FrameTimer};
use crate::config::Config;
use crate::effects::GlowOverlay;
use crate::error::FieldError;
use crate::models::{Bounds, Field};
use crate::render::{render_field, DrawCommand};
use crate::services::random::{entropy_source, seeded_source, RandomSource};

#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// Torn down; nothing will be drawn again.
    Stopped,
    /// Hidden or zero-sized; the frame body was skipped.
    Paused,
    Rendered(Vec<DrawCommand>),
}

pub struct FieldController {
    config: Config,
    field: Option<Field>,
    overlay: GlowOverlay,
    timer: FrameTimer,
    // each (re)seeded field draws its own generator from this one
    rng: RandomSource,
    visible: bool,
    has_area: bool,
    frame: u64,
}

impl FieldController {
    pub fn start(config: Config, width: f32, height: f32) -> Result<Self, FieldError> {
        Self::start_with_rng(config, width, height, entropy_source())
    }

    pub fn start_with_rng(
        config: Config,
        width: f32,
        height: f32,
        mut rng: RandomSource,
    ) -> Result<Self, FieldError> {
        config.validate()?;
        let palette = config.palette()?;
        let overlay = GlowOverlay::from_config(&palette, &config.overlay);

        let field = Field::seed(&config, Bounds::new(width, height), seeded_source(rng.next_u64()))?;
        info!(
            mode = ?config.field.mode,
            points = field.points().len(),
            width,
            height,
            "field started"
        );

        Ok(Self {
            timer: FrameTimer::new(config.field.max_frame_dt),
            config,
            field: Some(field),
            overlay,
            rng,
            visible: true,
            has_area: true,
            frame: 0,
        })
    }

    pub fn field(&self) -> Option<&Field> {
        self.field.as_ref()
    }

    pub fn is_running(&self) -> bool {
        self.field.is_some()
    }

    pub fn is_paused(&self) -> bool {
        !(self.visible && self.has_area)
    }

    pub fn tick(&mut self, clock: &dyn Clock) -> TickOutcome {
        let Some(field) = self.field.as_mut() else {
            return TickOutcome::Stopped;
        };

        if !(self.visible && self.has_area) {
            // resuming must not see the whole pause as one frame
            self.timer.reset();
            return TickOutcome::Paused;
        }

        let dt = self.timer.delta(clock.now_ms());
        field.update(dt);
        let commands = render_field(field, &self.overlay, self.frame);
        self.frame += 1;
        TickOutcome::Rendered(commands)
    }

    pub fn handle(&mut self, event: InputEvent) {
        if self.field.is_none() {
            return;
        }

        match event {
            InputEvent::PointerMoved { x, y } => {
                if let Some(field) = self.field.as_mut() {
                    let p = vec2(x, y);
                    let inside = field.bounds().contains(p);
                    field.set_pointer(inside.then_some(p));
                }
            }
            InputEvent::PointerEntered => {
                debug!("pointer entered");
            }
            InputEvent::PointerLeft => {
                if let Some(field) = self.field.as_mut() {
                    field.set_pointer(None);
                }
            }
            InputEvent::Clicked { x, y } => {
                if let Some(field) = self.field.as_mut() {
                    let p = vec2(x, y);
                    if field.bounds().contains(p) {
                        field.trigger_wave(Some(p));
                    }
                }
            }
            InputEvent::Resized { width, height } => self.resize(width, height),
            InputEvent::VisibilityChanged(visible) => {
                debug!(visible, "visibility changed");
                self.visible = visible;
                if !visible {
                    self.timer.reset();
                }
            }
        }
    }

    /// Swaps in a freshly seeded field sized to the new surface. A zero
    /// area keeps the old field and pauses until a usable size arrives.
    fn resize(&mut self, width: f32, height: f32) {
        let bounds = Bounds::new(width, height);
        if !bounds.is_usable() {
            debug!(width, height, "surface has no area, pausing");
            self.has_area = false;
            self.timer.reset();
            return;
        }

        match Field::seed(&self.config, bounds, seeded_source(self.rng.next_u64())) {
            Ok(field) => {
                debug!(width, height, points = field.points().len(), "reseeded field");
                self.field = Some(field);
                self.has_area = true;
                self.timer.reset();
            }
            Err(err) => {
                warn!(%err, "resize rejected");
                self.has_area = false;
            }
        }
    }

    /// Stops ticking and drops the field with everything it scheduled.
    pub fn teardown(&mut self) {
        if self.field.take().is_some() {
            info!(frames = self.frame, "field torn down");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::clock::ManualClock;
    use crate::config::FieldMode;

    fn controller(mode: FieldMode) -> FieldController {
        let mut config = Config::default();
        config.field.mode = mode;
        FieldController::start_with_rng(config, 400.0, 300.0, seeded_source(40)).unwrap()
    }

    fn rendered(outcome: TickOutcome) -> Vec<DrawCommand> {
        match outcome {
            TickOutcome::Rendered(commands) => commands,
            other => panic!("expected a rendered frame, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_surface_fails_fast() {
        let tests = vec![(0.0, 300.0), (400.0, 0.0), (f32::NAN, 300.0), (-1.0, 10.0)];
        for (w, h) in tests {
            let result = FieldController::start(Config::default(), w, h);
            assert!(
                matches!(result, Err(FieldError::InvalidSurface { .. })),
                "Failed for {}x{}",
                w,
                h
            );
        }
    }

    #[test]
    fn test_invalid_config_fails_fast() {
        let mut config = Config::default();
        config.palette.accents = vec!["not a colour".to_string()];
        let result = FieldController::start(config, 400.0, 300.0);
        assert!(matches!(result, Err(FieldError::Config(_))));
    }

    #[test]
    fn test_first_frame_uses_nominal_dt_then_caps() {
        let clock = ManualClock::new();
        let mut ctl = controller(FieldMode::Network);

        rendered(ctl.tick(&clock));
        let after_first = ctl.field().unwrap().now();
        assert!((after_first - crate::animation::clock::FRAME_MS).abs() < 1e-3);

        clock.advance(5000.0);
        rendered(ctl.tick(&clock));
        let after_second = ctl.field().unwrap().now();
        assert!((after_second - after_first - 100.0).abs() < 1e-3);
    }

    #[test]
    fn test_hidden_pauses_without_dt_spike() {
        let clock = ManualClock::new();
        let mut ctl = controller(FieldMode::Network);
        rendered(ctl.tick(&clock));
        let before = ctl.field().unwrap().now();

        ctl.handle(InputEvent::VisibilityChanged(false));
        clock.advance(60_000.0);
        assert_eq!(ctl.tick(&clock), TickOutcome::Paused);
        assert_eq!(ctl.field().unwrap().now(), before);

        ctl.handle(InputEvent::VisibilityChanged(true));
        clock.advance(10_000.0);
        rendered(ctl.tick(&clock));
        let resumed = ctl.field().unwrap().now() - before;
        assert!((resumed - crate::animation::clock::FRAME_MS).abs() < 1e-3);
    }

    #[test]
    fn test_pointer_tracking() {
        let mut ctl = controller(FieldMode::Network);
        ctl.handle(InputEvent::PointerEntered);
        ctl.handle(InputEvent::PointerMoved { x: 120.0, y: 80.0 });
        assert_eq!(ctl.field().unwrap().pointer(), Some(vec2(120.0, 80.0)));

        ctl.handle(InputEvent::PointerMoved { x: 900.0, y: 80.0 });
        assert!(!ctl.field().unwrap().pointer_inside());

        ctl.handle(InputEvent::PointerMoved { x: 10.0, y: 10.0 });
        ctl.handle(InputEvent::PointerLeft);
        assert_eq!(ctl.field().unwrap().pointer(), None);
    }

    #[test]
    fn test_click_starts_wave() {
        let mut ctl = controller(FieldMode::Network);
        let clock = ManualClock::new();
        // let the opening wave finish scheduling
        for _ in 0..20 {
            rendered(ctl.tick(&clock));
            clock.advance(16.0);
        }
        assert_eq!(ctl.field().unwrap().pending_activations(), 0);

        ctl.handle(InputEvent::Clicked { x: 200.0, y: 150.0 });
        assert!(ctl.field().unwrap().pending_activations() > 0);
    }

    #[test]
    fn test_tap_waves_and_lift_clears_pointer() {
        use crate::controllers::input::TouchTracker;

        let mut ctl = controller(FieldMode::Network);
        let clock = ManualClock::new();
        for _ in 0..20 {
            rendered(ctl.tick(&clock));
            clock.advance(16.0);
        }

        let mut touch = TouchTracker::new();
        for event in touch.handle(3, TouchPhase::Started, vec2(200.0, 150.0)) {
            ctl.handle(event);
        }
        assert!(ctl.field().unwrap().pointer_inside());

        for event in touch.handle(3, TouchPhase::Ended, vec2(201.0, 151.0)) {
            ctl.handle(event);
        }
        assert!(ctl.field().unwrap().pending_activations() > 0);
        assert!(!ctl.field().unwrap().pointer_inside());
    }

    #[test]
    fn test_click_leaves_particles_alone() {
        let mut ctl = controller(FieldMode::Particles);
        ctl.handle(InputEvent::Clicked { x: 200.0, y: 150.0 });
        let field = ctl.field().unwrap();
        assert_eq!(field.pending_activations(), 0);
        assert!(field.points().iter().all(|p| !p.is_active()));
    }

    #[test]
    fn test_resize_reseeds_and_zero_area_pauses() {
        let clock = ManualClock::new();
        let mut ctl = controller(FieldMode::Particles);
        rendered(ctl.tick(&clock));

        ctl.handle(InputEvent::Resized {
            width: 800.0,
            height: 600.0,
        });
        let field = ctl.field().unwrap();
        assert_eq!(field.bounds(), Bounds::new(800.0, 600.0));
        assert_eq!(field.now(), 0.0);

        ctl.handle(InputEvent::Resized {
            width: 0.0,
            height: 600.0,
        });
        assert!(ctl.is_paused());
        assert_eq!(ctl.tick(&clock), TickOutcome::Paused);
        assert_eq!(ctl.field().unwrap().bounds(), Bounds::new(800.0, 600.0));

        ctl.handle(InputEvent::Resized {
            width: 300.0,
            height: 200.0,
        });
        assert!(!ctl.is_paused());
        rendered(ctl.tick(&clock));
    }

    #[test]
    fn test_teardown_stops_everything() {
        let clock = ManualClock::new();
        let mut ctl = controller(FieldMode::Network);
        rendered(ctl.tick(&clock));

        ctl.teardown();
        assert!(!ctl.is_running());
        assert_eq!(ctl.tick(&clock), TickOutcome::Stopped);

        ctl.handle(InputEvent::Clicked { x: 10.0, y: 10.0 });
        ctl.handle(InputEvent::Resized {
            width: 500.0,
            height: 500.0,
        });
        assert!(ctl.field().is_none());
        clock.advance(5000.0);
        assert_eq!(ctl.tick(&clock), TickOutcome::Stopped);

        // a second teardown is harmless
        ctl.teardown();
    }

    #[test]
    fn test_every_frame_starts_with_background() {
        let clock = ManualClock::new();
        let mut ctl = controller(FieldMode::Particles);
        for _ in 0..30 {
            let commands = rendered(ctl.tick(&clock));
            assert!(matches!(commands[0], DrawCommand::Background { .. }));
            clock.advance(16.0);
        }
    }
}
