use super::{ContainerId, GridId, InventoryId, RegionId};

/// A named box of content nodes: the player loadout or one loot box.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InventoryState {
    pub id: InventoryId,
    pub title: String,
    pub nodes: Vec<ContentNode>,
    pub countable: bool,
    pub enabled: bool,
    pub scroll: ScrollState,
    pub region: Option<RegionId>,
}

impl InventoryState {
    pub fn node(&self, key: &str) -> Option<&NodeKind> {
        self.nodes
            .iter()
            .find(|node| node.key == key)
            .map(|node| &node.kind)
    }

    /// Direct member grids in node order.
    pub fn grids(&self) -> impl Iterator<Item = GridId> + '_ {
        self.nodes.iter().filter_map(|node| match node.kind {
            NodeKind::Grid(grid) => Some(grid),
            _ => None,
        })
    }

    pub fn containers(&self) -> impl Iterator<Item = ContainerId> + '_ {
        self.nodes.iter().filter_map(|node| match node.kind {
            NodeKind::Container(container) => Some(container),
            _ => None,
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContentNode {
    pub key: String,
    pub kind: NodeKind,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeKind {
    /// Decorative heading; holds nothing.
    Title(String),
    Grid(GridId),
    Container(ContainerId),
}

/// Vertical scroll position of an inventory panel.
///
/// `offset` is zero at the top and negative when scrolled down.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollState {
    pub offset: f32,
    pub content_height: f32,
    pub viewport_height: f32,
}

impl ScrollState {
    pub fn max_scroll(&self) -> f32 {
        (self.content_height - self.viewport_height).max(0.0)
    }

    /// Scrolls by `delta` pixels, clamped into `[-max_scroll, 0]`.
    pub fn scroll_by(&mut self, delta: f32) {
        self.offset = (self.offset + delta).clamp(-self.max_scroll(), 0.0);
    }

    pub fn resize(&mut self, content_height: f32, viewport_height: f32) {
        self.content_height = content_height;
        self.viewport_height = viewport_height;
        self.scroll_by(0.0);
    }
}
