//! Library for named stopwatches that survive between invocations.

pub mod clock;
pub mod commands;
pub mod errors;
pub mod location;
pub mod storage;
pub mod timer;

pub use clock::{Clock, FixedClock, SystemClock};
pub use errors::TimerError;
pub use storage::{NamedTimer, Store, DEFAULT_TIMER_NAME};
pub use timer::Timer;
