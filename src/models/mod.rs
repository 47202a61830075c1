pub mod field;
pub mod geometry;
pub mod link;
pub mod point;
pub mod shape;

pub use field::{Field, ProximityLink};
pub use geometry::{Bounds, Edge, ProximityGrid};
pub use link::{Link, LinkEvent};
pub use point::{AnimatedPoint, LinkLimits, PendingActivation};
pub use shape::Shape;
