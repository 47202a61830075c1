// src/main.rs
use nannou::prelude::*;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use neurofield::{
    animation::SystemClock,
    config::Config,
    controllers::{FieldController, HostVisibility, InputEvent, TickOutcome, TouchTracker},
    render::{CanvasTransform, DrawCommand},
};

struct Model {
    controller: FieldController,
    clock: SystemClock,
    transform: CanvasTransform,
    commands: Vec<DrawCommand>,
    visibility: HostVisibility,
    touch: TouchTracker,
}

fn main() {
    init_logging();
    nannou::app(model).update(update).exit(exit).run();
}

fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("neurofield=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn model(app: &App) -> Model {
    let config = Config::load().unwrap_or_else(|err| {
        warn!(%err, "no usable config.toml, using defaults");
        Config::default()
    });

    let window = app
        .new_window()
        .title(&config.window.title)
        .size(config.window.width, config.window.height)
        .view(view)
        .key_pressed(key_pressed)
        .mouse_moved(mouse_moved)
        .mouse_pressed(mouse_pressed)
        .mouse_entered(mouse_entered)
        .mouse_exited(mouse_exited)
        .touch(touch)
        .resized(resized)
        .raw_event(raw_window_event)
        .build();
    if let Err(err) = window {
        error!(?err, "could not open window");
        std::process::exit(1);
    }

    let (width, height) = (config.window.width as f32, config.window.height as f32);
    let controller = match FieldController::start(config, width, height) {
        Ok(controller) => controller,
        Err(err) => {
            error!(%err, "field failed to start");
            std::process::exit(1);
        }
    };

    Model {
        controller,
        clock: SystemClock::new(),
        transform: CanvasTransform::new(width, height),
        commands: Vec::new(),
        visibility: HostVisibility::default(),
        touch: TouchTracker::new(),
    }
}

fn update(_app: &App, model: &mut Model, _update: Update) {
    match model.controller.tick(&model.clock) {
        TickOutcome::Rendered(commands) => model.commands = commands,
        // keep showing the last frame
        TickOutcome::Paused => {}
        TickOutcome::Stopped => model.commands.clear(),
    }
}

fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    for command in &model.commands {
        command.draw(&draw, &model.transform);
    }
    if let Err(err) = draw.to_frame(app, &frame) {
        warn!(?err, "failed to draw frame");
    }
}

fn exit(_app: &App, mut model: Model) {
    model.controller.teardown();
}

/************************** Window Input ************************************** */

fn mouse_moved(_app: &App, model: &mut Model, pos: Point2) {
    let p = model.transform.to_canvas(pos);
    model
        .controller
        .handle(InputEvent::PointerMoved { x: p.x, y: p.y });
}

fn mouse_pressed(app: &App, model: &mut Model, button: MouseButton) {
    if button == MouseButton::Left {
        let p = model.transform.to_canvas(app.mouse.position());
        model.controller.handle(InputEvent::Clicked { x: p.x, y: p.y });
    }
}

fn mouse_entered(_app: &App, model: &mut Model) {
    model.controller.handle(InputEvent::PointerEntered);
}

fn mouse_exited(_app: &App, model: &mut Model) {
    model.controller.handle(InputEvent::PointerLeft);
}

fn touch(_app: &App, model: &mut Model, touch: TouchEvent) {
    let p = model.transform.to_canvas(touch.position);
    for event in model.touch.handle(touch.id, touch.phase, p) {
        model.controller.handle(event);
    }
}

// minimised or fully covered windows stop drawing
fn raw_window_event(_app: &App, model: &mut Model, event: &nannou::winit::event::WindowEvent) {
    if let nannou::winit::event::WindowEvent::Occluded(occluded) = event {
        let event = model.visibility.set_occluded(*occluded);
        model.controller.handle(event);
    }
}

fn resized(_app: &App, model: &mut Model, size: Vec2) {
    model.transform = CanvasTransform::new(size.x, size.y);
    model.controller.handle(InputEvent::Resized {
        width: size.x,
        height: size.y,
    });
}

fn key_pressed(_app: &App, model: &mut Model, key: Key) {
    match key {
        Key::Space => {
            let event = model.visibility.toggle_pause();
            info!(paused = model.visibility.is_user_paused(), "toggled pause");
            model.controller.handle(event);
        }
        Key::Escape => model.controller.teardown(),
        _ => {}
    }
}
