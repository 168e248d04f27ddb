//! Traits describing read-only collaborators.
//!
//! Oracles expose item descriptors and on-screen grid geometry. The [`Env`]
//! aggregate bundles them with the engine config so call sites receive their
//! dependencies explicitly instead of reaching for a global.
mod bounds;
mod error;
mod items;

pub use bounds::BoundsOracle;
pub use error::OracleError;
pub use items::{AccessorySlotSpec, GunSpec, ItemInfo, ItemOracle, LayoutRect};

use crate::config::EngineConfig;

/// Aggregates read-only oracles required by spawning and pointer resolution.
#[derive(Debug)]
pub struct Env<'a, I, B>
where
    I: ItemOracle + ?Sized,
    B: BoundsOracle + ?Sized,
{
    items: Option<&'a I>,
    bounds: Option<&'a B>,
    config: Option<&'a EngineConfig>,
}

// Manual impls: derives would require `I: Clone`, which trait objects are not.
impl<I, B> Clone for Env<'_, I, B>
where
    I: ItemOracle + ?Sized,
    B: BoundsOracle + ?Sized,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<I, B> Copy for Env<'_, I, B>
where
    I: ItemOracle + ?Sized,
    B: BoundsOracle + ?Sized,
{
}

pub type StashEnv<'a> = Env<'a, dyn ItemOracle + 'a, dyn BoundsOracle + 'a>;

impl<'a, I, B> Env<'a, I, B>
where
    I: ItemOracle + ?Sized,
    B: BoundsOracle + ?Sized,
{
    pub fn new(
        items: Option<&'a I>,
        bounds: Option<&'a B>,
        config: Option<&'a EngineConfig>,
    ) -> Self {
        Self {
            items,
            bounds,
            config,
        }
    }

    pub fn with_all(items: &'a I, bounds: &'a B, config: &'a EngineConfig) -> Self {
        Self::new(Some(items), Some(bounds), Some(config))
    }

    pub fn empty() -> Self {
        Self {
            items: None,
            bounds: None,
            config: None,
        }
    }

    /// Returns the ItemOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::ItemsNotAvailable` if no item oracle was provided.
    pub fn items(&self) -> Result<&'a I, OracleError> {
        self.items.ok_or(OracleError::ItemsNotAvailable)
    }

    /// Returns the BoundsOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::BoundsNotAvailable` if no bounds oracle was provided.
    pub fn bounds(&self) -> Result<&'a B, OracleError> {
        self.bounds.ok_or(OracleError::BoundsNotAvailable)
    }

    /// Returns the engine config, or an error if not available.
    pub fn config(&self) -> Result<&'a EngineConfig, OracleError> {
        self.config.ok_or(OracleError::ConfigNotAvailable)
    }

    /// Looks up a descriptor by name through the item oracle.
    pub fn info_by_name(&self, name: &str) -> Result<ItemInfo, OracleError> {
        self.items()?
            .info_by_name(name)
            .ok_or_else(|| OracleError::UnknownName(name.to_owned()))
    }
}

impl<'a, I, B> Env<'a, I, B>
where
    I: ItemOracle + 'a,
    B: BoundsOracle + 'a,
{
    /// Converts this environment into a trait-object based `StashEnv`.
    pub fn as_stash_env(&self) -> StashEnv<'a> {
        let items: Option<&'a dyn ItemOracle> = self.items.map(|items| items as _);
        let bounds: Option<&'a dyn BoundsOracle> = self.bounds.map(|bounds| bounds as _);
        Env::new(items, bounds, self.config)
    }
}
