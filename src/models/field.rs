// src/models/field.rs
//
// The Field owns every point of one canvas (and through them every link)
// and runs the per-frame rules for the selected mode:
//
// network   - lattice of points, stochastic activation, links that grow
//             toward neighbours and activate them on arrival
// particles - drifting particles pushed away from the pointer and
//             recycled at the opposite edge when they leave the canvas

use nannou::prelude::*;
use rand::Rng;
use tracing::{debug, warn};

use super::geometry::{distance_sq, nearest_k, Bounds, Edge, ProximityGrid};
use super::link::Link;
use super::point::{AnimatedPoint, LinkLimits, PendingActivation};
use crate::animation::clock::FRAME_MS;
use crate::animation::schedule::ActivationSchedule;
use crate::config::{Config, FieldMode, Palette};
use crate::error::FieldError;
use crate::services::random::{chance, pick_index, RandomSource};

/// A stateless connection between two nearby particles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProximityLink {
    pub a: usize,
    pub b: usize,
    pub opacity: f32,
}

pub struct Field {
    config: Config,
    palette: Palette,
    bounds: Bounds,
    points: Vec<AnimatedPoint>,
    // lattice positions never move, so their index is built once
    lattice_index: Option<ProximityGrid>,
    schedule: ActivationSchedule,
    pointer: Option<Vec2>,
    rng: RandomSource,
    now: f32,
    skipped_reported: usize,
}

impl Field {
    /// Builds and seeds a field without starting a wave.
    pub fn new(config: &Config, bounds: Bounds, mut rng: RandomSource) -> Result<Self, FieldError> {
        if !bounds.is_usable() {
            return Err(FieldError::InvalidSurface {
                width: bounds.width,
                height: bounds.height,
            });
        }
        let palette = config.palette()?;

        let points = match config.field.mode {
            FieldMode::Network => seed_lattice(config, &palette, bounds, rng.as_mut()),
            FieldMode::Particles => seed_scatter(config, &palette, bounds, rng.as_mut()),
        };

        let lattice_index = match config.field.mode {
            FieldMode::Network => {
                let positions: Vec<Vec2> = points.iter().map(|p| p.position).collect();
                Some(ProximityGrid::build(
                    &positions,
                    config.network.connection_radius,
                ))
            }
            FieldMode::Particles => None,
        };

        debug!(
            mode = ?config.field.mode,
            points = points.len(),
            width = bounds.width,
            height = bounds.height,
            "seeded field"
        );

        Ok(Self {
            config: config.clone(),
            palette,
            bounds,
            points,
            lattice_index,
            schedule: ActivationSchedule::new(),
            pointer: None,
            rng,
            now: 0.0,
            skipped_reported: 0,
        })
    }

    /// Builds a field and opens it with a wave at a random spot.
    pub fn seed(config: &Config, bounds: Bounds, rng: RandomSource) -> Result<Self, FieldError> {
        let mut field = Self::new(config, bounds, rng)?;
        field.trigger_wave(None);
        Ok(field)
    }

    /************************** Accessors ********************************** */

    pub fn mode(&self) -> FieldMode {
        self.config.field.mode
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn points(&self) -> &[AnimatedPoint] {
        &self.points
    }

    pub fn now(&self) -> f32 {
        self.now
    }

    pub fn pointer(&self) -> Option<Vec2> {
        self.pointer
    }

    pub fn pending_activations(&self) -> usize {
        self.schedule.len()
    }

    pub fn pointer_inside(&self) -> bool {
        self.pointer.is_some()
    }

    /// `None` means the pointer is outside the canvas.
    pub fn set_pointer(&mut self, pointer: Option<Vec2>) {
        self.pointer = pointer;
    }

    #[cfg(test)]
    pub(crate) fn points_mut(&mut self) -> &mut [AnimatedPoint] {
        &mut self.points
    }

    fn positions(&self) -> Vec<Vec2> {
        self.points.iter().map(|p| p.position).collect()
    }

    fn link_limits(&self) -> LinkLimits {
        LinkLimits {
            max_connections: self.config.network.max_connections,
            max_chain_length: self.config.network.max_chain_length,
        }
    }

    /************************** Activation ********************************* */

    /// Activates the `wave_size` points nearest `center` (random when
    /// `None`), each `wave_stagger` ms after the previous one.
    /// Particles have no activation lifecycle, so waves only touch the
    /// network lattice.
    pub fn trigger_wave(&mut self, center: Option<Vec2>) {
        if self.mode() != FieldMode::Network {
            return;
        }

        let center = center.unwrap_or_else(|| {
            vec2(
                self.rng.gen::<f32>() * self.bounds.width,
                self.rng.gen::<f32>() * self.bounds.height,
            )
        });

        let nearest = nearest_k(&self.positions(), center, self.config.field.wave_size);
        debug!(x = center.x, y = center.y, count = nearest.len(), "wave");

        for (order, index) in nearest.into_iter().enumerate() {
            let delay = order as f32 * self.config.field.wave_stagger;
            if delay <= 0.0 {
                self.activate_point(index, 0);
            } else {
                self.schedule.push(self.now + delay, index, 0);
            }
        }
    }

    /// Activates one point and, in network mode, lets it reach out to
    /// neighbours. Returns false when the point was already active.
    pub fn activate_point(&mut self, index: usize, chain_depth: u32) -> bool {
        let limits = self.link_limits();
        let Some(point) = self.points.get_mut(index) else {
            return false;
        };
        if point.is_active() || !point.is_renderable() {
            return false;
        }

        let may_link = point.activate(
            self.now,
            chain_depth,
            &self.config.points,
            limits,
            self.rng.as_mut(),
        );
        if may_link && self.mode() == FieldMode::Network {
            self.establish_links(index);
        }
        true
    }

    /// Links `index` to up to two random eligible neighbours.
    fn establish_links(&mut self, index: usize) {
        let network = &self.config.network;
        let positions = self.positions();
        let source = &self.points[index];

        let nearby = match &self.lattice_index {
            Some(grid) => grid.within(&positions, source.position, network.connection_radius),
            None => {
                let radius_sq = network.connection_radius * network.connection_radius;
                (0..positions.len())
                    .filter(|&i| distance_sq(positions[i], source.position) < radius_sq)
                    .collect()
            }
        };

        let mut candidates: Vec<usize> = nearby
            .into_iter()
            .filter(|&i| {
                let target = &self.points[i];
                i != index
                    && !source.is_linked_to(i)
                    && target.links.len() < network.max_connections
                    && !target.is_active()
            })
            .collect();
        if candidates.is_empty() {
            return;
        }

        let capacity = network.max_connections.saturating_sub(source.links.len());
        let wanted: usize = self.rng.gen_range(1..=2);
        let count = wanted.min(candidates.len()).min(capacity);
        let (growth, fade) = (network.growth_speed, network.fade_speed);

        for _ in 0..count {
            let Some(pick) = pick_index(self.rng.as_mut(), candidates.len()) else {
                break;
            };
            let target = candidates.swap_remove(pick);
            self.points[index]
                .links
                .push(Link::new(index, target, growth, fade));
        }
    }

    /************************** Frame Update ******************************* */

    pub fn update(&mut self, dt: f32) {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.now += dt;

        for entry in self.schedule.take_due(self.now) {
            self.activate_point(entry.index, entry.chain_depth);
        }

        if self.mode() == FieldMode::Particles {
            self.move_particles(dt);
        }

        let mut fired: Vec<PendingActivation> = Vec::new();
        let mut skipped = 0;
        for point in self.points.iter_mut() {
            if !point.is_renderable() {
                skipped += 1;
                continue;
            }
            fired.extend(point.update(self.now, dt, &self.config.points, self.rng.as_mut()));
        }
        if skipped != self.skipped_reported {
            if skipped > 0 {
                warn!(skipped, "skipping points with non-finite state");
            }
            self.skipped_reported = skipped;
        }

        for pending in fired {
            self.activate_point(pending.index, pending.chain_depth);
        }

        if self.mode() == FieldMode::Network {
            self.network_interaction(dt);
        }
    }

    fn network_interaction(&mut self, dt: f32) {
        let network = self.config.network.clone();

        match self.pointer {
            Some(pointer) => {
                let hover_sq = network.hover_radius * network.hover_radius;
                for index in 0..self.points.len() {
                    let point = &self.points[index];
                    if point.is_active() || distance_sq(point.position, pointer) >= hover_sq {
                        continue;
                    }
                    if chance(self.rng.as_mut(), network.hover_chance) {
                        self.activate_point(index, 0);
                    }
                }

                if chance(self.rng.as_mut(), network.random_activation_chance) {
                    self.activate_random_idle();
                }
            }
            None => {
                let p = network.idle_activation_rate * dt;
                for index in 0..self.points.len() {
                    if !self.points[index].is_active() && chance(self.rng.as_mut(), p) {
                        self.activate_point(index, 0);
                    }
                }
            }
        }
    }

    /// Keeps the field lively while the pointer rests.
    fn activate_random_idle(&mut self) {
        let idle: Vec<usize> = (0..self.points.len())
            .filter(|&i| !self.points[i].is_active())
            .collect();
        if idle.len() < 2 {
            return;
        }
        if let Some(pick) = pick_index(self.rng.as_mut(), idle.len()) {
            self.activate_point(idle[pick], 0);
        }
    }

    fn move_particles(&mut self, dt: f32) {
        let cfg = &self.config.particles;
        let scale = dt / FRAME_MS;
        let max_speed = cfg.max_speed();
        let bounds = self.bounds;
        let pointer = self.pointer;

        for point in self.points.iter_mut() {
            if !point.is_renderable() {
                continue;
            }

            point.position += point.velocity * scale;

            if let Some(pointer) = pointer {
                let delta = point.position - pointer;
                let distance = delta.length();
                if distance > 0.0 && distance < cfg.repel_radius {
                    let force = (cfg.repel_radius - distance) / cfg.repel_radius;
                    point.velocity += delta / distance * force * cfg.repel_strength * scale;
                }
            }

            if let Some(exit) = bounds.exit_edge(point.position) {
                regenerate(point, exit, bounds, self.rng.as_mut());
            }

            let speed = point.velocity.length();
            if speed > max_speed {
                point.velocity *= max_speed / speed;
            }
        }
    }

    /// Pairs of particles closer than `connection_distance`, recomputed
    /// from current positions on every call.
    pub fn proximity_links(&self) -> Vec<ProximityLink> {
        let distance = self.config.particles.connection_distance;
        let positions = self.positions();
        ProximityGrid::build(&positions, distance)
            .pairs_within(&positions, distance)
            .into_iter()
            .map(|(a, b, d)| ProximityLink {
                a,
                b,
                opacity: 1.0 - d / distance,
            })
            .collect()
    }
}

/************************** Seeding ***************************************** */

/// Lattice positions centred in `spacing` cells, strided to stay within
/// `max_points`.
pub fn lattice_positions(bounds: Bounds, spacing: f32, max_points: usize) -> Vec<Vec2> {
    let cols = (bounds.width / spacing).floor().max(0.0) as usize;
    let rows = (bounds.height / spacing).floor().max(0.0) as usize;
    let total = cols.saturating_mul(rows);
    if total == 0 || max_points == 0 {
        return Vec::new();
    }

    let stride = if total <= max_points {
        1
    } else {
        total.div_ceil(max_points)
    };

    let mut positions = Vec::with_capacity(total.min(max_points));
    'columns: for i in (0..cols).step_by(stride) {
        for j in (0..rows).step_by(stride) {
            positions.push(vec2(
                i as f32 * spacing + spacing / 2.0,
                j as f32 * spacing + spacing / 2.0,
            ));
            if positions.len() >= max_points {
                break 'columns;
            }
        }
    }
    positions
}

fn seed_lattice(
    config: &Config,
    palette: &Palette,
    bounds: Bounds,
    rng: &mut dyn rand::RngCore,
) -> Vec<AnimatedPoint> {
    lattice_positions(bounds, config.network.spacing, config.network.max_points)
        .into_iter()
        .map(|position| {
            AnimatedPoint::new(position, config.points.idle_radius, &palette.accents, rng)
        })
        .collect()
}

fn seed_scatter(
    config: &Config,
    palette: &Palette,
    bounds: Bounds,
    rng: &mut dyn rand::RngCore,
) -> Vec<AnimatedPoint> {
    let cfg = &config.particles;
    let idle = [cfg.size, cfg.size];
    (0..cfg.count)
        .map(|_| {
            let position = vec2(
                rng.gen::<f32>() * bounds.width,
                rng.gen::<f32>() * bounds.height,
            );
            let velocity = vec2(
                (rng.gen::<f32>() - 0.5) * cfg.speed,
                (rng.gen::<f32>() - 0.5) * cfg.speed,
            );
            AnimatedPoint::new(position, idle, &palette.accents, rng).with_velocity(velocity)
        })
        .collect()
}

/// Re-enters a particle on the edge opposite the one it left through,
/// heading inward.
fn regenerate(point: &mut AnimatedPoint, exit: Edge, bounds: Bounds, rng: &mut dyn rand::RngCore) {
    let entry = exit.opposite();
    point.position = bounds.point_on_edge(entry, rng.gen::<f32>());
    match entry {
        Edge::Left => point.velocity.x = point.velocity.x.abs(),
        Edge::Right => point.velocity.x = -point.velocity.x.abs(),
        Edge::Top => point.velocity.y = point.velocity.y.abs(),
        Edge::Bottom => point.velocity.y = -point.velocity.y.abs(),
    }
}
