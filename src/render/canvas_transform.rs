// src/render/canvas_transform.rs
//
// Canvas pixels (origin top-left, y down) to nannou world coordinates
// (origin centre, y up), and back for pointer input.

use nannou::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasTransform {
    pub width: f32,
    pub height: f32,
}

impl CanvasTransform {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn to_world(&self, p: Vec2) -> Point2 {
        pt2(p.x - self.width / 2.0, self.height / 2.0 - p.y)
    }

    pub fn to_canvas(&self, p: Point2) -> Vec2 {
        vec2(p.x + self.width / 2.0, self.height / 2.0 - p.y)
    }
}
