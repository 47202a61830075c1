pub mod field_controller;
pub mod input;

pub use field_controller::{FieldController, TickOutcome};
pub use input::{HostVisibility, InputEvent, TouchTracker};
