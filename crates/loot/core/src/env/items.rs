use crate::state::{AcceptSet, Grade, InfoId, ItemCategory};

/// Item-info provider. The engine never caches descriptors; it looks them up
/// when an item is spawned or a preset references one by name.
pub trait ItemOracle: Send + Sync {
    fn info_by_id(&self, id: InfoId) -> Option<ItemInfo>;

    fn info_by_name(&self, name: &str) -> Option<ItemInfo>;

    /// Returns all descriptors available in this oracle.
    fn all_infos(&self) -> Vec<ItemInfo>;
}

/// Static descriptor an item instance is created from.
///
/// Geometry is the unrotated footprint. `max_stack == 0` means "use the
/// category default" (60 for ammo, 1 otherwise).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemInfo {
    pub id: InfoId,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub category: ItemCategory,
    #[cfg_attr(feature = "serde", serde(default))]
    pub grade: Grade,
    pub width: u16,
    pub height: u16,
    #[cfg_attr(feature = "serde", serde(default))]
    pub base_value: u64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub max_stack: u32,
    /// Initial stack size of a freshly spawned instance.
    #[cfg_attr(feature = "serde", serde(default = "default_stack"))]
    pub stack: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub search_seconds: Option<f32>,
    /// Internal grids carried by backpacks and chest rigs.
    #[cfg_attr(feature = "serde", serde(default))]
    pub subgrid_layout: Vec<LayoutRect>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub accessories: Vec<AccessorySlotSpec>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub gun: Option<GunSpec>,
    /// Caliber of an ammo item.
    #[cfg_attr(feature = "serde", serde(default))]
    pub caliber: Option<String>,
}

#[cfg(feature = "serde")]
fn default_stack() -> u32 {
    1
}

impl ItemInfo {
    pub fn new(
        id: InfoId,
        name: impl Into<String>,
        category: ItemCategory,
        width: u16,
        height: u16,
        base_value: u64,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            category,
            grade: Grade::default(),
            width,
            height,
            base_value,
            max_stack: 0,
            stack: 1,
            search_seconds: None,
            subgrid_layout: Vec::new(),
            accessories: Vec::new(),
            gun: None,
            caliber: None,
        }
    }

    pub fn with_grade(mut self, grade: u8) -> Self {
        self.grade = Grade(grade);
        self
    }

    pub fn with_stack(mut self, stack: u32, max_stack: u32) -> Self {
        self.stack = stack;
        self.max_stack = max_stack;
        self
    }

    pub fn with_search_seconds(mut self, seconds: f32) -> Self {
        self.search_seconds = Some(seconds);
        self
    }

    pub fn with_layout(mut self, layout: Vec<LayoutRect>) -> Self {
        self.subgrid_layout = layout;
        self
    }

    pub fn with_accessory(mut self, name: impl Into<String>, accept: AcceptSet) -> Self {
        self.accessories.push(AccessorySlotSpec {
            name: name.into(),
            accept,
        });
        self
    }

    pub fn with_gun(mut self, caliber: impl Into<String>, capacity: u32) -> Self {
        self.gun = Some(GunSpec {
            caliber: caliber.into(),
            capacity,
        });
        self
    }

    pub fn with_caliber(mut self, caliber: impl Into<String>) -> Self {
        self.caliber = Some(caliber.into());
        self
    }

    /// Effective stack ceiling after category defaults are applied.
    pub fn effective_max_stack(&self) -> u32 {
        match (self.max_stack, &self.category) {
            (0, ItemCategory::Ammo) => crate::EngineConfig::DEFAULT_AMMO_MAX_STACK,
            (0, _) => 1,
            (max, _) => max,
        }
    }
}

/// One member grid of a composite layout, in cells.
///
/// `x`/`y` are fractional cell offsets inside the container panel.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutRect {
    pub width: u16,
    pub height: u16,
    pub x: f32,
    pub y: f32,
}

impl LayoutRect {
    pub const fn new(width: u16, height: u16, x: f32, y: f32) -> Self {
        Self {
            width,
            height,
            x,
            y,
        }
    }
}

/// Named accessory socket on an item, e.g. "scope" accepting `accScope`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AccessorySlotSpec {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub accept: AcceptSet,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GunSpec {
    pub caliber: String,
    pub capacity: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ammo_defaults_to_sixty_per_stack() {
        let ammo = ItemInfo::new(InfoId(1), "9x19 PST", ItemCategory::Ammo, 1, 1, 40);
        let helmet = ItemInfo::new(InfoId(2), "Helmet", ItemCategory::Helmet, 2, 2, 9000);
        let salt = ItemInfo::new(InfoId(3), "Salt", ItemCategory::Consume, 1, 1, 10).with_stack(1, 5);

        assert_eq!(ammo.effective_max_stack(), 60);
        assert_eq!(helmet.effective_max_stack(), 1);
        assert_eq!(salt.effective_max_stack(), 5);
    }
}
