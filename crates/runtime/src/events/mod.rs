//! Topic-based event bus for session events.
//!
//! Engine notifications, drop results, input gestures, and value displays
//! are published to topics; consumers subscribe only to what they render.

mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::{DropReport, InputEvent};
