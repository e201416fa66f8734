//! Background workers owned by the runtime.

mod ticker;

pub use ticker::{Command, TickWorker};
