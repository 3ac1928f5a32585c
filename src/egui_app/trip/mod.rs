//! Trip request polling: the monitor and its scheduler.

pub mod monitor;
pub mod scheduler;

pub use monitor::{TripMonitor, TripPhase};
pub use scheduler::PollScheduler;
