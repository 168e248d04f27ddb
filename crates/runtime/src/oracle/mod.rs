//! Runtime wrappers around the read-only collaborators of the stash engine.
//!
//! These implementations expose `loot-core` oracle traits and bundle them into
//! an [`OracleManager`] so the session can build [`loot_core::Env`] snapshots
//! on demand. Descriptors are immutable at runtime; screen geometry is
//! replaced whenever the presentation layer reports a new layout.
mod items;
mod screen;

use std::sync::Arc;

use loot_core::{EngineConfig, Env, StashEnv};

pub use items::ItemCatalog;
pub use screen::ScreenLayout;

/// Owns every oracle a session needs.
#[derive(Clone)]
pub struct OracleManager {
    pub(crate) items: Arc<ItemCatalog>,
    pub(crate) screen: ScreenLayout,
    pub(crate) config: EngineConfig,
}

impl OracleManager {
    pub fn new(items: Arc<ItemCatalog>, screen: ScreenLayout, config: EngineConfig) -> Self {
        Self {
            items,
            screen,
            config,
        }
    }

    /// Borrows the oracles as the trait-object environment the core expects.
    pub fn as_stash_env(&self) -> StashEnv<'_> {
        Env::with_all(self.items.as_ref(), &self.screen, &self.config).as_stash_env()
    }

    pub fn items(&self) -> &ItemCatalog {
        &self.items
    }

    pub fn screen(&self) -> &ScreenLayout {
        &self.screen
    }

    pub fn screen_mut(&mut self) -> &mut ScreenLayout {
        &mut self.screen
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}
