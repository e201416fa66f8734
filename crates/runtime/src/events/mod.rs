//! Topic-based event bus for kiosk events.
//!
//! Events are published to specific topics, and consumers subscribe only to
//! the topics they need. Publishing is best-effort: a kiosk never blocks on a
//! slow or absent subscriber.

mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::{AccessEvent, VisitEvent};
