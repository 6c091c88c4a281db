//! Logging infrastructure: the [`Log`] trait and its backends.

mod logger;
mod memory;
mod subscriber;
mod types;

pub use logger::Logger;
pub use memory::{Level, LogLine, MemoryLog};
pub use subscriber::init_subscriber;
pub use types::{Log, StepEntry, StepStatus};
