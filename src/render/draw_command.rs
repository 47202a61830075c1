// src/render/draw_command.rs
//
// DrawCommand is a single drawing operation in canvas coordinates. The
// renderer builds a list of them each frame and the window replays it
// onto nannou's Draw.

use nannou::prelude::*;
use std::f32::consts::PI;

use super::canvas_transform::CanvasTransform;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Background {
        color: Rgba,
    },
    Line {
        start: Vec2,
        end: Vec2,
        weight: f32,
        color: Rgba,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: Rgba,
    },
    Square {
        center: Vec2,
        half_size: f32,
        color: Rgba,
    },
    Triangle {
        center: Vec2,
        radius: f32,
        color: Rgba,
    },
    /// Translucent wash over the whole canvas.
    Overlay {
        color: Rgba,
    },
}

/// Apex up, base vertices at 30 degrees below the horizontal.
pub fn triangle_vertices(center: Vec2, radius: f32) -> [Vec2; 3] {
    let (sin, cos) = (PI / 6.0).sin_cos();
    [
        vec2(center.x, center.y - radius),
        vec2(center.x + radius * cos, center.y + radius * sin),
        vec2(center.x - radius * cos, center.y + radius * sin),
    ]
}

impl DrawCommand {
    pub fn draw(&self, draw: &Draw, transform: &CanvasTransform) {
        match self {
            DrawCommand::Background { color } => {
                draw.background().color(*color);
            }
            DrawCommand::Line {
                start,
                end,
                weight,
                color,
            } => {
                draw.line()
                    .start(transform.to_world(*start))
                    .end(transform.to_world(*end))
                    .stroke_weight(*weight)
                    .color(*color)
                    .caps_round();
            }
            DrawCommand::Circle {
                center,
                radius,
                color,
            } => {
                draw.ellipse()
                    .xy(transform.to_world(*center))
                    .radius(*radius)
                    .color(*color);
            }
            DrawCommand::Square {
                center,
                half_size,
                color,
            } => {
                draw.rect()
                    .xy(transform.to_world(*center))
                    .w_h(half_size * 2.0, half_size * 2.0)
                    .color(*color);
            }
            DrawCommand::Triangle {
                center,
                radius,
                color,
            } => {
                let [a, b, c] = triangle_vertices(*center, *radius);
                draw.tri()
                    .points(
                        transform.to_world(a),
                        transform.to_world(b),
                        transform.to_world(c),
                    )
                    .color(*color);
            }
            DrawCommand::Overlay { color } => {
                draw.rect()
                    .x_y(0.0, 0.0)
                    .w_h(transform.width, transform.height)
                    .color(*color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_triangle_apex_up_in_canvas_space() {
        let [apex, right, left] = triangle_vertices(vec2(50.0, 50.0), 10.0);
        assert_eq!(apex, vec2(50.0, 40.0));
        assert!((right.x - (50.0 + 10.0 * 0.866_025)).abs() < 1e-3);
        assert!((right.y - 55.0).abs() < 1e-4);
        assert!((left.x + right.x - 100.0).abs() < 1e-4);
        assert_eq!(left.y, right.y);
    }
}
