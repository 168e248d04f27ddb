use loot_core::{DropOutcome, ItemId, RegionId};
use serde::{Deserialize, Serialize};

/// Result of one pointer release.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DropReport {
    pub item: ItemId,
    pub outcome: DropOutcome,
}

/// Gestures recognised by the drag controller.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    DragStarted { item: ItemId },
    Rotated { item: ItemId, flipped: bool },
    DragCancelled { item: ItemId },
    /// Single click: open the detail panel.
    DetailRequested { item: ItemId },
    /// Double click moved the item to the other region.
    QuickMoved { item: ItemId, to: RegionId },
    /// Double click found no room on the other side.
    QuickMoveFailed { item: ItemId },
}
