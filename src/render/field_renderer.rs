// src/render/field_renderer.rs
//
// Turns a field into one frame of draw commands, layered back to front:
// background, links, points, overlay.

use nannou::prelude::*;

use super::draw_command::DrawCommand;
use crate::config::{FieldMode, Palette};
use crate::effects::GlowOverlay;
use crate::models::{AnimatedPoint, Field, Shape};
use crate::utilities::color::scale_alpha;

const LINK_WEIGHT: f32 = 1.0;

pub fn render_field(field: &Field, overlay: &GlowOverlay, frame: u64) -> Vec<DrawCommand> {
    let palette = field.palette();
    let mut commands = Vec::with_capacity(field.points().len() * 2 + 2);

    commands.push(DrawCommand::Background {
        color: palette.background,
    });

    match field.mode() {
        FieldMode::Network => push_links(field, palette, &mut commands),
        FieldMode::Particles => push_proximity_links(field, palette, &mut commands),
    }

    for point in field.points().iter().filter(|p| p.is_renderable()) {
        commands.push(point_command(point, fill_for(point, field.mode(), palette)));
    }

    if let Some(command) = overlay.command(frame) {
        commands.push(command);
    }

    commands
}

fn push_links(field: &Field, palette: &Palette, commands: &mut Vec<DrawCommand>) {
    let points = field.points();
    for point in points.iter().filter(|p| p.is_renderable()) {
        for link in point.links.iter().filter(|l| l.is_visible()) {
            let Some(target) = points.get(link.to).filter(|t| t.is_renderable()) else {
                continue;
            };
            commands.push(DrawCommand::Line {
                start: point.position,
                end: link.tip(point.position, target.position),
                weight: LINK_WEIGHT,
                color: scale_alpha(palette.link, link.opacity()),
            });
        }
    }
}

fn push_proximity_links(field: &Field, palette: &Palette, commands: &mut Vec<DrawCommand>) {
    let points = field.points();
    let weight = field.config().particles.connection_width;
    for link in field.proximity_links() {
        commands.push(DrawCommand::Line {
            start: points[link.a].position,
            end: points[link.b].position,
            weight,
            color: scale_alpha(palette.proximity_link, link.opacity),
        });
    }
}

fn fill_for(point: &AnimatedPoint, mode: FieldMode, palette: &Palette) -> Rgba {
    if point.is_active() {
        return point.color;
    }
    match mode {
        FieldMode::Network => palette.idle_fill,
        FieldMode::Particles => palette.particle,
    }
}

fn point_command(point: &AnimatedPoint, color: Rgba) -> DrawCommand {
    let center = point.position;
    let radius = point.radius;
    match point.rendered_shape() {
        Shape::Circle => DrawCommand::Circle {
            center,
            radius,
            color,
        },
        Shape::Square => DrawCommand::Square {
            center,
            half_size: radius,
            color,
        },
        Shape::Triangle => DrawCommand::Triangle {
            center,
            radius,
            color,
        },
    }
}
