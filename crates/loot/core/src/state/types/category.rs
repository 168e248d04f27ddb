//! Item category tags and the accept sets that filter them.

use std::collections::BTreeSet;

/// Category tag of an item, checked against grid accept sets.
///
/// Unknown tags parse into [`ItemCategory::Custom`] so catalogs can introduce
/// new categories without a code change.
#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display, strum::EnumString,
)]
#[strum(serialize_all = "camelCase", ascii_case_insensitive)]
pub enum ItemCategory {
    Collection,
    Consume,
    Key,
    Armor,
    Helmet,
    ChestRigs,
    Backpack,
    #[strum(to_string = "primaryWeapon", serialize = "gunRifle")]
    PrimaryWeapon,
    #[strum(to_string = "secondaryWeapon", serialize = "gunPistol")]
    SecondaryWeapon,
    Knife,
    Ammo,
    AccBackGrip,
    AccBarrel,
    AccForeGrip,
    AccFunctional,
    AccHandGuard,
    AccMagazine,
    AccMuzzle,
    AccScope,
    AccStock,
    #[strum(default)]
    Custom(String),
}

impl ItemCategory {
    pub fn is_accessory(&self) -> bool {
        matches!(
            self,
            Self::AccBackGrip
                | Self::AccBarrel
                | Self::AccForeGrip
                | Self::AccFunctional
                | Self::AccHandGuard
                | Self::AccMagazine
                | Self::AccMuzzle
                | Self::AccScope
                | Self::AccStock
        )
    }

    pub fn is_weapon(&self) -> bool {
        matches!(self, Self::PrimaryWeapon | Self::SecondaryWeapon)
    }
}

// Categories travel as their tag string in every data format.
#[cfg(feature = "serde")]
impl serde::Serialize for ItemCategory {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for ItemCategory {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let tag = <String as serde::Deserialize>::deserialize(deserializer)?;
        tag.parse().map_err(serde::de::Error::custom)
    }
}

/// Set of categories a grid accepts. The empty set accepts everything.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct AcceptSet(BTreeSet<ItemCategory>);

impl AcceptSet {
    pub fn any() -> Self {
        Self(BTreeSet::new())
    }

    pub fn only<I>(categories: I) -> Self
    where
        I: IntoIterator<Item = ItemCategory>,
    {
        Self(categories.into_iter().collect())
    }

    pub fn accepts(&self, category: &ItemCategory) -> bool {
        self.0.is_empty() || self.0.contains(category)
    }

    pub fn is_any(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ItemCategory> {
        self.0.iter()
    }
}

impl FromIterator<ItemCategory> for AcceptSet {
    fn from_iter<T: IntoIterator<Item = ItemCategory>>(iter: T) -> Self {
        Self::only(iter)
    }
}
