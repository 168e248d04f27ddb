//! Interactive session layer for the grid-inventory engine.
//!
//! This crate wires the pure `loot-core` engine to a presentation layer. A
//! [`Session`] accepts raw pointer, key, and frame input, drives the engine,
//! and publishes every observable change on a topic-based [`EventBus`].
//!
//! Modules are organized by responsibility:
//! - [`session`] hosts the session and its region bookkeeping
//! - [`input`] turns pointer travel and click timing into gestures
//! - [`events`] provides the topic-based event bus
//! - [`oracle`] adapts descriptors and screen geometry to the core oracles
//! - [`value`] formats region totals for display
pub mod config;
pub mod error;
pub mod events;
pub mod input;
pub mod oracle;
pub mod session;
pub mod value;

pub use config::RuntimeConfig;
pub use error::{Result, RuntimeError};
pub use events::{DropReport, Event, EventBus, InputEvent, Topic};
pub use input::{DragAction, DragController, DragPhase, KeyInput};
pub use oracle::{ItemCatalog, OracleManager, ScreenLayout};
pub use session::Session;
pub use value::{ValueDisplay, ValueTier, format_thousands};
