pub mod random;

pub use random::{entropy_source, seeded_source, RandomSource};
