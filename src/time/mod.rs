pub mod clock;
pub mod timestep;

pub use clock::{Clock, ManualClock, SystemClock};
pub use timestep::{FixedTimestep, Tick, MAX_FRAME_TIME};
