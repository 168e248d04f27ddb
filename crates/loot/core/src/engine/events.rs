use crate::state::{Cell, ContainerId, GridId, ItemId, RegionId};

/// Notifications recorded by every mutating engine call, in the order the
/// mutations happened. Presentation layers replay them to move sprites,
/// refresh panels, and redraw value totals.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StashEvent {
    /// Item now sits at `cell` of `grid`; `pixel_size` feeds the resize hook.
    Placed {
        item: ItemId,
        grid: GridId,
        cell: Cell,
        rotated: bool,
        pixel_size: (f32, f32),
    },
    DraggedIn {
        item: ItemId,
        grid: GridId,
        cell: Cell,
        from: Option<GridId>,
    },
    DraggedOut {
        item: ItemId,
        grid: GridId,
    },
    Destroyed {
        item: ItemId,
    },
    StackChanged {
        item: ItemId,
        current: u32,
    },
    AmmoLoaded {
        gun: ItemId,
        rounds: u32,
    },
    /// A carried layout moved from `item` into `container`.
    LayoutInstalled {
        item: ItemId,
        container: ContainerId,
    },
    /// The contents of `container` were snapshotted back onto `item`.
    LayoutStored {
        item: ItemId,
        container: ContainerId,
    },
    Revealed {
        item: ItemId,
    },
    ValueChanged {
        region: RegionId,
        total: u64,
    },
}
