// src/models/point.rs
//
// A single animated node: position, size and shape easing, the
// activation lifecycle, and the links it owns.

use nannou::prelude::*;
use rand::RngCore;

use super::link::{Link, LinkEvent};
use super::shape::Shape;
use crate::config::PointConfig;
use crate::services::random::{in_range, pick_index};
use crate::utilities::easing::{ease_toward, ramp};

/// Activation requested by a link that reached its destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingActivation {
    pub index: usize,
    pub chain_depth: u32,
}

/// Link limits a point checks when it activates.
#[derive(Debug, Clone, Copy)]
pub struct LinkLimits {
    pub max_connections: usize,
    pub max_chain_length: u32,
}

#[derive(Debug, Clone)]
pub struct AnimatedPoint {
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
    pub target_radius: f32,
    pub shape: Shape,
    pub target_shape: Shape,
    pub color: Rgba,
    pub links: Vec<Link>,

    active: bool,
    activation_time: f32,
    deactivate_at: Option<f32>,
    chain_depth: u32,
    animation_progress: f32,
    idle_radius: [f32; 2],
}

impl AnimatedPoint {
    pub fn new(
        position: Vec2,
        idle_radius: [f32; 2],
        accents: &[Rgba],
        rng: &mut dyn RngCore,
    ) -> Self {
        let radius = in_range(rng, idle_radius);
        let color = pick_index(rng, accents.len())
            .map(|i| accents[i])
            .unwrap_or_else(|| rgba(0.0, 0.0, 0.0, 1.0));

        Self {
            position,
            velocity: Vec2::ZERO,
            radius,
            target_radius: radius,
            shape: Shape::Circle,
            target_shape: Shape::Circle,
            color,
            links: Vec::new(),
            active: false,
            activation_time: 0.0,
            deactivate_at: None,
            chain_depth: 0,
            animation_progress: 0.0,
            idle_radius,
        }
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    /// Starts an activation. Returns true when the point may look for
    /// new links; false when it was already active or has no budget left.
    pub fn activate(
        &mut self,
        now: f32,
        chain_depth: u32,
        cfg: &PointConfig,
        limits: LinkLimits,
        rng: &mut dyn RngCore,
    ) -> bool {
        if self.active {
            return false;
        }

        self.active = true;
        self.activation_time = now;
        self.chain_depth = chain_depth;
        self.target_radius = in_range(rng, cfg.active_radius);
        self.target_shape = Shape::random(rng);
        self.deactivate_at = Some(now + in_range(rng, cfg.active_duration));

        self.links.len() < limits.max_connections && chain_depth < limits.max_chain_length
    }

    /// Returns to idle and lets every owned link fade out.
    pub fn deactivate(&mut self, rng: &mut dyn RngCore) {
        self.active = false;
        self.deactivate_at = None;
        self.target_radius = in_range(rng, self.idle_radius);
        for link in self.links.iter_mut() {
            link.deactivate();
        }
    }

    /// Advances timers, easing and links. Returns the activations fired
    /// by links that finished growing this tick.
    pub fn update(
        &mut self,
        now: f32,
        dt: f32,
        cfg: &PointConfig,
        rng: &mut dyn RngCore,
    ) -> Vec<PendingActivation> {
        if self.deactivate_at.is_some_and(|at| now >= at) {
            self.deactivate(rng);
        }

        self.radius = ease_toward(self.radius, self.target_radius, dt, cfg.ease_rate, cfg.ease_cap);

        self.animation_progress = if self.active {
            ramp(now - self.activation_time, cfg.morph_duration)
        } else {
            (self.animation_progress - dt * cfg.morph_decay).max(0.0)
        };

        let next_depth = self.chain_depth + 1;
        let mut fired = Vec::new();
        for link in self.links.iter_mut() {
            if let Some(LinkEvent::Reached { to }) = link.update(dt) {
                fired.push(PendingActivation {
                    index: to,
                    chain_depth: next_depth,
                });
            }
        }

        if self.links.iter().any(Link::is_spent) {
            self.links.retain(|link| !link.is_spent());
        }

        fired
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn activation_time(&self) -> f32 {
        self.activation_time
    }

    pub fn deactivate_at(&self) -> Option<f32> {
        self.deactivate_at
    }

    pub fn chain_depth(&self) -> u32 {
        self.chain_depth
    }

    pub fn animation_progress(&self) -> f32 {
        self.animation_progress
    }

    pub fn is_linked_to(&self, index: usize) -> bool {
        self.links.iter().any(|link| link.to == index)
    }

    /// Swap to the target shape once the morph is half way.
    pub fn rendered_shape(&self) -> Shape {
        if self.shape != self.target_shape && self.animation_progress > 0.5 {
            self.target_shape
        } else {
            self.shape
        }
    }

    /// Non-finite state is skipped rather than drawn.
    pub fn is_renderable(&self) -> bool {
        self.position.x.is_finite()
            && self.position.y.is_finite()
            && self.radius.is_finite()
            && self.radius >= 0.0
    }
}
