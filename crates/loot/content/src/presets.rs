//! Loadout presets: named lists of items dropped into inventory nodes.
//!
//! A preset names items by descriptor name and nodes by template key, so the
//! same preset works for any inventory built from a compatible template.
//! Everything goes through [`StashEngine`], which keeps placement rules and
//! value events intact.

use loot_core::{
    BoundsOracle, Cell, Env, InteractionError, InventoryId, ItemId, ItemOracle, NodeKind,
    OracleError, PlacementError, StashEngine, StateError,
};

/// Errors raised while applying a preset.
#[derive(Debug, thiserror::Error)]
pub enum PresetError {
    #[error("preset '{preset}' references unknown node '{node}'")]
    UnknownNode { preset: String, node: String },

    #[error("preset '{preset}' places an item on title node '{node}'")]
    NotPlaceable { preset: String, node: String },

    #[error("container node '{node}' has no member grid {member}")]
    UnknownMember { node: String, member: usize },

    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error(transparent)]
    Placement(#[from] PlacementError),

    #[error(transparent)]
    Interaction(#[from] InteractionError),

    #[error(transparent)]
    State(#[from] StateError),
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoadoutPreset {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub entries: Vec<PresetEntry>,
}

/// One item of a preset, with everything mounted or loaded into it.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PresetEntry {
    /// Template key of the grid or container node.
    pub node: String,
    /// Descriptor name.
    pub item: String,
    /// Explicit cell; omitted means first free cell.
    #[cfg_attr(feature = "serde", serde(default))]
    pub position: Option<PresetPosition>,
    /// Overrides the descriptor's initial stack.
    #[cfg_attr(feature = "serde", serde(default))]
    pub stack: Option<u32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub ammo: Vec<PresetAmmo>,
    /// Accessory descriptor names, each mounted into the first free socket
    /// that accepts it.
    #[cfg_attr(feature = "serde", serde(default))]
    pub accessories: Vec<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PresetPosition {
    /// Member grid index when the node is a container.
    #[cfg_attr(feature = "serde", serde(default))]
    pub member: usize,
    pub col: i32,
    pub row: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub rotated: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PresetAmmo {
    pub item: String,
    pub count: u32,
}

impl LoadoutPreset {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    pub fn with_entry(mut self, entry: PresetEntry) -> Self {
        self.entries.push(entry);
        self
    }

    /// Spawns every entry and places it into `inventory`.
    ///
    /// All or nothing: if any entry fails, no item of the preset is left in
    /// the state. Returns the top-level items in entry order.
    pub fn apply<I, B>(
        &self,
        engine: &mut StashEngine<'_>,
        env: &Env<'_, I, B>,
        inventory: InventoryId,
    ) -> Result<Vec<ItemId>, PresetError>
    where
        I: ItemOracle + ?Sized,
        B: BoundsOracle + ?Sized,
    {
        engine.atomically(|engine| {
            let mut spawned = Vec::with_capacity(self.entries.len());
            for entry in &self.entries {
                let item = entry.build(engine, env)?;
                self.place(engine, inventory, entry, item)?;
                spawned.push(item);
            }
            Ok(spawned)
        })
    }

    fn place(
        &self,
        engine: &mut StashEngine<'_>,
        inventory: InventoryId,
        entry: &PresetEntry,
        item: ItemId,
    ) -> Result<(), PresetError> {
        let node = engine
            .state()
            .inventory(inventory)?
            .node(&entry.node)
            .cloned()
            .ok_or_else(|| PresetError::UnknownNode {
                preset: self.name.clone(),
                node: entry.node.clone(),
            })?;

        let cell = entry.position.map(|at| Cell::new(at.col, at.row));
        match node {
            NodeKind::Grid(grid) => {
                engine.add_item(grid, item, cell)?;
            }
            NodeKind::Container(container) => match entry.position {
                Some(at) => {
                    let grid = engine
                        .state()
                        .container(container)?
                        .grids
                        .get(at.member)
                        .copied()
                        .ok_or_else(|| PresetError::UnknownMember {
                            node: entry.node.clone(),
                            member: at.member,
                        })?;
                    engine.add_item(grid, item, cell)?;
                }
                None => {
                    engine.add_to_container(container, item)?;
                }
            },
            NodeKind::Title(_) => {
                return Err(PresetError::NotPlaceable {
                    preset: self.name.clone(),
                    node: entry.node.clone(),
                });
            }
        }
        Ok(())
    }
}

impl PresetEntry {
    pub fn new(node: impl Into<String>, item: impl Into<String>) -> Self {
        Self {
            node: node.into(),
            item: item.into(),
            position: None,
            stack: None,
            ammo: Vec::new(),
            accessories: Vec::new(),
        }
    }

    pub fn at(mut self, col: i32, row: i32) -> Self {
        self.position = Some(PresetPosition {
            member: 0,
            col,
            row,
            rotated: false,
        });
        self
    }

    pub fn rotated(mut self) -> Self {
        if let Some(position) = self.position.as_mut() {
            position.rotated = true;
        }
        self
    }

    pub fn with_stack(mut self, stack: u32) -> Self {
        self.stack = Some(stack);
        self
    }

    pub fn with_ammo(mut self, item: impl Into<String>, count: u32) -> Self {
        self.ammo.push(PresetAmmo {
            item: item.into(),
            count,
        });
        self
    }

    pub fn with_accessory(mut self, item: impl Into<String>) -> Self {
        self.accessories.push(item.into());
        self
    }

    /// Spawns the loose item and fits it out before it is placed, so the
    /// region value is refreshed once with everything mounted.
    fn build<I, B>(
        &self,
        engine: &mut StashEngine<'_>,
        env: &Env<'_, I, B>,
    ) -> Result<ItemId, PresetError>
    where
        I: ItemOracle + ?Sized,
        B: BoundsOracle + ?Sized,
    {
        let config = env.config()?;
        let mut info = env.info_by_name(&self.item)?;
        if let Some(stack) = self.stack {
            info.stack = stack;
        }
        let item = engine.spawn(&info, config)?;

        for accessory in &self.accessories {
            let info = env.info_by_name(accessory)?;
            let mounted = engine.spawn(&info, config)?;
            engine.attach_accessory(item, mounted)?;
        }
        for ammo in &self.ammo {
            let info = env.info_by_name(&ammo.item)?;
            engine.load_rounds(item, info.id, ammo.count, info.base_value)?;
        }
        if self.position.is_some_and(|at| at.rotated) {
            engine.rotate_loose(item)?;
        }
        Ok(item)
    }
}
