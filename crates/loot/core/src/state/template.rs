//! Inventory templates: declarative node lists instantiated into the arena.
//!
//! Built-in templates cover the player loadout and a loot box; catalogs can
//! ship additional ones through the content loaders.

use std::collections::BTreeMap;

use crate::env::LayoutRect;

use super::{
    AcceptSet, ContainerSpec, ContentNode, GridOwner, GridSpec, InventoryId, ItemCategory,
    NodeKind, RegionId, SlotBinding, StashState, StateError,
};

/// One content node of an inventory template.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeSpec {
    Title { key: String, text: String },
    Grid { key: String, grid: GridSpec },
    Container { key: String, container: ContainerSpec },
    /// Socket whose occupant installs its carried layout into `container`
    /// (the key of a container node in the same template).
    EquipSlot {
        key: String,
        grid: GridSpec,
        container: String,
    },
}

impl NodeSpec {
    pub fn key(&self) -> &str {
        match self {
            Self::Title { key, .. }
            | Self::Grid { key, .. }
            | Self::Container { key, .. }
            | Self::EquipSlot { key, .. } => key,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InventoryTemplate {
    pub title: String,
    pub nodes: Vec<NodeSpec>,
}

impl InventoryTemplate {
    pub const PRIMARY_WEAPON_1: &'static str = "PrimaryWeapon1";
    pub const PRIMARY_WEAPON_2: &'static str = "PrimaryWeapon2";
    pub const SECONDARY: &'static str = "Secondary";
    pub const KNIFE: &'static str = "Knife";
    pub const HELMET: &'static str = "Helmet";
    pub const ARMOR: &'static str = "Armor";
    pub const CHEST_RIG: &'static str = "ChestRig";
    pub const CHEST_RIG_CONTAINER: &'static str = "ContainerChestRigs";
    pub const POCKET: &'static str = "pocket";
    pub const BACKPACK: &'static str = "Backpack";
    pub const BACKPACK_CONTAINER: &'static str = "ContainerBackpack";
    pub const SECURE_CONTAINER: &'static str = "ContainerSecure";
    pub const SPOILS: &'static str = "spoilsBox";

    /// Equipment sockets, pockets, chest rig, backpack, and secure container.
    pub fn player_loadout() -> Self {
        let primary = || AcceptSet::only([ItemCategory::PrimaryWeapon]);
        let socket = |accept: AcceptSet, aspect: f32| {
            GridSpec::socket(accept).with_cell_size(crate::EngineConfig::DEFAULT_CELL_SIZE * 1.75, aspect)
        };
        let pocket = (0..5)
            .map(|i| LayoutRect::new(1, 1, 1.05 * i as f32, 0.0))
            .collect();

        Self {
            title: "Player".into(),
            nodes: vec![
                NodeSpec::Title {
                    key: "equipmentTitle".into(),
                    text: "Equipment".into(),
                },
                NodeSpec::Grid {
                    key: Self::PRIMARY_WEAPON_1.into(),
                    grid: socket(primary(), 2.5).titled("Primary weapon"),
                },
                NodeSpec::Grid {
                    key: Self::PRIMARY_WEAPON_2.into(),
                    grid: socket(primary(), 2.5).titled("Primary weapon"),
                },
                NodeSpec::Grid {
                    key: Self::SECONDARY.into(),
                    grid: socket(AcceptSet::only([ItemCategory::SecondaryWeapon]), 1.0)
                        .titled("Sidearm"),
                },
                NodeSpec::Grid {
                    key: Self::KNIFE.into(),
                    grid: socket(AcceptSet::only([ItemCategory::Knife]), 1.0).titled("Melee"),
                },
                NodeSpec::Grid {
                    key: Self::HELMET.into(),
                    grid: socket(AcceptSet::only([ItemCategory::Helmet]), 1.0).titled("Helmet"),
                },
                NodeSpec::Grid {
                    key: Self::ARMOR.into(),
                    grid: socket(AcceptSet::only([ItemCategory::Armor]), 1.0).titled("Armor"),
                },
                NodeSpec::EquipSlot {
                    key: Self::CHEST_RIG.into(),
                    grid: socket(AcceptSet::only([ItemCategory::ChestRigs]), 1.0)
                        .titled("Chest rig"),
                    container: Self::CHEST_RIG_CONTAINER.into(),
                },
                NodeSpec::Container {
                    key: Self::CHEST_RIG_CONTAINER.into(),
                    container: ContainerSpec::carrier("Chest rig"),
                },
                NodeSpec::Container {
                    key: Self::POCKET.into(),
                    container: ContainerSpec::new("Pocket", pocket),
                },
                NodeSpec::EquipSlot {
                    key: Self::BACKPACK.into(),
                    grid: socket(AcceptSet::only([ItemCategory::Backpack]), 1.0)
                        .titled("Backpack"),
                    container: Self::BACKPACK_CONTAINER.into(),
                },
                NodeSpec::Container {
                    key: Self::BACKPACK_CONTAINER.into(),
                    container: ContainerSpec::carrier("Backpack"),
                },
                NodeSpec::Container {
                    key: Self::SECURE_CONTAINER.into(),
                    container: ContainerSpec::new(
                        "Secure container",
                        vec![LayoutRect::new(3, 3, 0.0, 0.0)],
                    ),
                },
            ],
        }
    }

    /// Single 7x8 loot grid.
    pub fn spoils_box() -> Self {
        Self {
            title: "Spoils".into(),
            nodes: vec![NodeSpec::Grid {
                key: Self::SPOILS.into(),
                grid: GridSpec::new(7, 8).titled("Spoils"),
            }],
        }
    }

    /// Creates the inventory and all of its nodes inside `state`.
    ///
    /// Containers are created before sockets so an equip slot may reference a
    /// container listed after it. Nodes keep template order.
    pub fn instantiate(
        &self,
        state: &mut StashState,
        region: Option<RegionId>,
    ) -> Result<InventoryId, StateError> {
        let inventory = state.create_inventory(self.title.clone(), region)?;
        let countable = state.inventory(inventory)?.countable;

        let mut containers = BTreeMap::new();
        for node in &self.nodes {
            if let NodeSpec::Container { key, container } = node {
                let mut spec = container.clone();
                spec.countable &= countable;
                let id = state.create_container(&spec, Some(inventory))?;
                containers.insert(key.as_str(), id);
            }
        }

        let mut nodes = Vec::with_capacity(self.nodes.len());
        for node in &self.nodes {
            let kind = match node {
                NodeSpec::Title { text, .. } => NodeKind::Title(text.clone()),
                NodeSpec::Grid { grid, .. } => {
                    let mut spec = grid.clone();
                    spec.countable &= countable;
                    NodeKind::Grid(state.create_grid(&spec, GridOwner::Inventory(inventory))?)
                }
                NodeSpec::Container { key, .. } => match containers.get(key.as_str()) {
                    Some(id) => NodeKind::Container(*id),
                    None => continue,
                },
                NodeSpec::EquipSlot {
                    key,
                    grid,
                    container,
                } => {
                    let bound = *containers.get(container.as_str()).ok_or_else(|| {
                        StateError::UnboundSlot {
                            node: key.clone(),
                            container: container.clone(),
                        }
                    })?;
                    let mut spec = grid.clone();
                    spec.countable &= countable;
                    let slot = state.create_grid(&spec, GridOwner::Inventory(inventory))?;
                    state.grid_mut(slot)?.binding = Some(SlotBinding::Equip(bound));
                    state.container_mut(bound)?.bound_slot = Some(slot);
                    NodeKind::Grid(slot)
                }
            };
            nodes.push(ContentNode {
                key: node.key().to_owned(),
                kind,
            });
        }

        state.inventory_mut(inventory)?.nodes = nodes;
        Ok(inventory)
    }
}
