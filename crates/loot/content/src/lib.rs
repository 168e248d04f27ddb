//! Data-driven stash content and loaders.
//!
//! This crate holds content that lives outside the stash state and provides
//! loaders for the files that describe it:
//! - Item descriptor catalogs (RON or JSON)
//! - Inventory templates (RON)
//! - Loadout presets (RON)
//! - Engine configuration (TOML)
//!
//! Content is consumed by runtime oracles and sessions; none of it is stored in
//! `StashState` except through engine calls.

pub mod presets;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use presets::{LoadoutPreset, PresetAmmo, PresetEntry, PresetError, PresetPosition};

#[cfg(feature = "loaders")]
pub use loaders::{
    ConfigLoader, ContentFactory, ItemLoader, ItemTable, PresetLoader, TemplateLoader,
};
