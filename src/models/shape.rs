// src/models/shape.rs

use rand::RngCore;

use crate::services::random::pick_index;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Shape {
    #[default]
    Circle,
    Square,
    Triangle,
}

impl Shape {
    pub const ALL: [Shape; 3] = [Shape::Circle, Shape::Square, Shape::Triangle];

    pub fn random(rng: &mut dyn RngCore) -> Self {
        pick_index(rng, Self::ALL.len())
            .map(|i| Self::ALL[i])
            .unwrap_or_default()
    }
}
