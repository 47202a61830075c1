pub mod clock;
pub mod schedule;

pub use clock::{Clock, FrameTimer, ManualClock, SystemClock, FRAME_MS};
pub use schedule::{ActivationSchedule, ScheduledActivation};
