// src/models/geometry.rs
// Canvas bounds and the proximity queries the field runs every frame.

use nannou::prelude::*;
use std::collections::HashMap;

/// Canvas area in pixels. Origin is the top-left corner, y grows down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

impl Edge {
    pub fn opposite(self) -> Self {
        match self {
            Edge::Top => Edge::Bottom,
            Edge::Bottom => Edge::Top,
            Edge::Left => Edge::Right,
            Edge::Right => Edge::Left,
        }
    }
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// A surface that can hold a field: finite and non-empty.
    pub fn is_usable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= 0.0 && p.x <= self.width && p.y >= 0.0 && p.y <= self.height
    }

    /// The edge a point has crossed, if it is outside.
    /// Horizontal overshoot wins when a point leaves through a corner.
    pub fn exit_edge(&self, p: Vec2) -> Option<Edge> {
        if p.x < 0.0 {
            Some(Edge::Left)
        } else if p.x > self.width {
            Some(Edge::Right)
        } else if p.y < 0.0 {
            Some(Edge::Top)
        } else if p.y > self.height {
            Some(Edge::Bottom)
        } else {
            None
        }
    }

    /// A point on `edge` at fraction `t` (0..=1) along it.
    pub fn point_on_edge(&self, edge: Edge, t: f32) -> Vec2 {
        let t = t.clamp(0.0, 1.0);
        match edge {
            Edge::Top => vec2(self.width * t, 0.0),
            Edge::Bottom => vec2(self.width * t, self.height),
            Edge::Left => vec2(0.0, self.height * t),
            Edge::Right => vec2(self.width, self.height * t),
        }
    }
}

pub fn distance_sq(a: Vec2, b: Vec2) -> f32 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    dx * dx + dy * dy
}

/// Indices of the `k` positions nearest `center`, nearest first.
/// Keeps a bounded sorted buffer instead of sorting everything.
pub fn nearest_k(positions: &[Vec2], center: Vec2, k: usize) -> Vec<usize> {
    if k == 0 {
        return Vec::new();
    }

    let mut nearest: Vec<(f32, usize)> = Vec::with_capacity(k + 1);
    for (index, position) in positions.iter().enumerate() {
        let d = distance_sq(*position, center);
        if !d.is_finite() {
            continue;
        }
        if nearest.len() == k && d >= nearest[k - 1].0 {
            continue;
        }
        // ties keep their encounter order
        let slot = nearest.partition_point(|(other, _)| *other <= d);
        nearest.insert(slot, (d, index));
        nearest.truncate(k);
    }

    nearest.into_iter().map(|(_, index)| index).collect()
}

/// Uniform bucket grid for radius queries.
#[derive(Debug, Clone)]
pub struct ProximityGrid {
    cell_size: f32,
    cells: HashMap<(i32, i32), Vec<usize>>,
}

impl ProximityGrid {
    pub fn build(positions: &[Vec2], cell_size: f32) -> Self {
        let cell_size = if cell_size.is_finite() && cell_size > 0.0 {
            cell_size
        } else {
            1.0
        };
        let mut grid = Self {
            cell_size,
            cells: HashMap::new(),
        };
        for (index, position) in positions.iter().enumerate() {
            if position.x.is_finite() && position.y.is_finite() {
                let key = grid.cell_of(*position);
                grid.cells.entry(key).or_default().push(index);
            }
        }
        grid
    }

    fn cell_of(&self, p: Vec2) -> (i32, i32) {
        (
            (p.x / self.cell_size).floor() as i32,
            (p.y / self.cell_size).floor() as i32,
        )
    }

    /// Indices strictly closer than `radius` to `center`, ascending.
    pub fn within(&self, positions: &[Vec2], center: Vec2, radius: f32) -> Vec<usize> {
        let radius_sq = radius * radius;
        let reach = (radius / self.cell_size).ceil() as i32;
        let (cx, cy) = self.cell_of(center);

        let mut found = Vec::new();
        // cell coordinates saturate far from the origin
        for gx in cx.saturating_sub(reach)..=cx.saturating_add(reach) {
            for gy in cy.saturating_sub(reach)..=cy.saturating_add(reach) {
                if let Some(bucket) = self.cells.get(&(gx, gy)) {
                    found.extend(
                        bucket
                            .iter()
                            .copied()
                            .filter(|&i| distance_sq(positions[i], center) < radius_sq),
                    );
                }
            }
        }
        found.sort_unstable();
        found
    }

    /// Every unordered pair (a < b) closer than `radius`, with its distance.
    pub fn pairs_within(&self, positions: &[Vec2], radius: f32) -> Vec<(usize, usize, f32)> {
        let mut pairs = Vec::new();
        for (a, position) in positions.iter().enumerate() {
            if !(position.x.is_finite() && position.y.is_finite()) {
                continue;
            }
            for b in self.within(positions, *position, radius) {
                if b > a {
                    pairs.push((a, b, distance_sq(*position, positions[b]).sqrt()));
                }
            }
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod bounds_tests {
        use super::*;

        #[test]
        fn test_exit_edges() {
            let bounds = Bounds::new(100.0, 50.0);
            let tests = vec![
                (vec2(50.0, 25.0), None),
                (vec2(-1.0, 25.0), Some(Edge::Left)),
                (vec2(101.0, 25.0), Some(Edge::Right)),
                (vec2(50.0, -0.5), Some(Edge::Top)),
                (vec2(50.0, 51.0), Some(Edge::Bottom)),
                (vec2(-3.0, -3.0), Some(Edge::Left)),
            ];
            for (p, expected) in tests {
                assert_eq!(bounds.exit_edge(p), expected, "Failed for {:?}", p);
            }
        }

        #[test]
        fn test_usable() {
            assert!(Bounds::new(10.0, 10.0).is_usable());
            assert!(!Bounds::new(0.0, 10.0).is_usable());
            assert!(!Bounds::new(10.0, f32::NAN).is_usable());
            assert!(!Bounds::new(-5.0, 10.0).is_usable());
        }

        #[test]
        fn test_point_on_edge() {
            let bounds = Bounds::new(100.0, 50.0);
            assert_eq!(bounds.point_on_edge(Edge::Right, 0.5), vec2(100.0, 25.0));
            assert_eq!(bounds.point_on_edge(Edge::Top, 0.25), vec2(25.0, 0.0));
            assert!(bounds.contains(bounds.point_on_edge(Edge::Bottom, 1.0)));
            assert_eq!(Edge::Left.opposite(), Edge::Right);
        }
    }

    mod proximity_tests {
        use super::*;

        fn line_of_points(n: usize, spacing: f32) -> Vec<Vec2> {
            (0..n).map(|i| vec2(i as f32 * spacing, 0.0)).collect()
        }

        #[test]
        fn test_nearest_k_partial_selection() {
            let positions = line_of_points(10, 10.0);
            let nearest = nearest_k(&positions, vec2(42.0, 0.0), 3);
            assert_eq!(nearest, vec![4, 5, 3]);

            assert!(nearest_k(&positions, vec2(0.0, 0.0), 0).is_empty());
            assert_eq!(nearest_k(&positions, vec2(0.0, 0.0), 50).len(), 10);
        }

        #[test]
        fn test_nearest_k_ties_keep_order() {
            let positions = vec![vec2(-1.0, 0.0), vec2(1.0, 0.0), vec2(0.0, 1.0)];
            assert_eq!(nearest_k(&positions, Vec2::ZERO, 2), vec![0, 1]);
        }

        #[test]
        fn test_grid_matches_brute_force() {
            let positions: Vec<Vec2> = (0..60)
                .map(|i| vec2((i * 37 % 400) as f32, (i * 53 % 300) as f32))
                .collect();
            let grid = ProximityGrid::build(&positions, 70.0);

            for center in [vec2(0.0, 0.0), vec2(200.0, 150.0), vec2(399.0, 10.0)] {
                let expected: Vec<usize> = (0..positions.len())
                    .filter(|&i| distance_sq(positions[i], center) < 70.0 * 70.0)
                    .collect();
                assert_eq!(grid.within(&positions, center, 70.0), expected);
            }
        }

        #[test]
        fn test_radius_is_exclusive() {
            let positions = line_of_points(3, 70.0);
            let grid = ProximityGrid::build(&positions, 70.0);
            assert_eq!(grid.within(&positions, positions[0], 70.0), vec![0]);
        }

        #[test]
        fn test_queries_far_from_origin() {
            let positions = vec![vec2(1.0e12, 1.0e12), vec2(-1.0e12, 5.0), vec2(10.0, 10.0)];
            let grid = ProximityGrid::build(&positions, 150.0);
            // saturated cells may merge distant points, the distance check still applies
            assert_eq!(grid.within(&positions, positions[0], 150.0), vec![0]);
            assert_eq!(grid.within(&positions, positions[1], 150.0), vec![1]);
            assert!(grid.pairs_within(&positions, 150.0).is_empty());
        }

        #[test]
        fn test_pairs_within() {
            let positions = line_of_points(4, 100.0);
            let grid = ProximityGrid::build(&positions, 150.0);
            let pairs = grid.pairs_within(&positions, 150.0);
            let keys: Vec<(usize, usize)> = pairs.iter().map(|(a, b, _)| (*a, *b)).collect();
            assert_eq!(keys, vec![(0, 1), (1, 2), (2, 3)]);
            assert!(pairs.iter().all(|(_, _, d)| (*d - 100.0).abs() < 1e-4));
        }
    }
}
