use std::fmt;

macro_rules! arena_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        pub struct $name(pub u32);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($label, "#{}"), self.0)
            }
        }
    };
}

arena_id!(
    /// Identifier of a live item instance.
    ItemId,
    "item"
);
arena_id!(
    /// Identifier of a cell grid (inventory grid, container member, or item slot).
    GridId,
    "grid"
);
arena_id!(ContainerId, "container");
arena_id!(InventoryId, "inventory");
arena_id!(RegionId, "region");
arena_id!(
    /// Identifier of an item descriptor in the item-info catalog.
    InfoId,
    "info"
);

/// Integer cell coordinate inside a grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub col: i32,
    pub row: i32,
}

impl Cell {
    pub const ORIGIN: Self = Self { col: 0, row: 0 };

    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// Translates this cell by another cell used as an offset.
    pub const fn offset(self, by: Cell) -> Self {
        Self::new(self.col.saturating_add(by.col), self.row.saturating_add(by.row))
    }

    pub const fn delta(self, from: Cell) -> Self {
        Self::new(self.col.saturating_sub(from.col), self.row.saturating_sub(from.row))
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}

/// Half-open rectangle of cells: `[col, col + width) x [row, row + height)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellRect {
    pub col: i32,
    pub row: i32,
    pub width: u16,
    pub height: u16,
}

impl CellRect {
    pub const fn new(col: i32, row: i32, width: u16, height: u16) -> Self {
        Self {
            col,
            row,
            width,
            height,
        }
    }

    pub const fn at(cell: Cell, width: u16, height: u16) -> Self {
        Self::new(cell.col, cell.row, width, height)
    }

    pub const fn origin(&self) -> Cell {
        Cell::new(self.col, self.row)
    }

    /// Exclusive right edge. Widened so cells near `i32::MAX` cannot overflow.
    pub const fn right(&self) -> i64 {
        self.col as i64 + self.width as i64
    }

    pub const fn bottom(&self) -> i64 {
        self.row as i64 + self.height as i64
    }

    /// Strict overlap test; rectangles that only share an edge do not intersect.
    pub const fn intersects(&self, other: &CellRect) -> bool {
        (self.col as i64) < other.right()
            && (other.col as i64) < self.right()
            && (self.row as i64) < other.bottom()
            && (other.row as i64) < self.bottom()
    }

    /// True if `other` lies entirely inside `self`.
    pub const fn contains_rect(&self, other: &CellRect) -> bool {
        other.col >= self.col
            && other.row >= self.row
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }
}

/// Pointer position in global screen pixels.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
}

impl ScreenPoint {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned screen rectangle in global pixels.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScreenRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl ScreenRect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Inclusive on all four edges, matching how pointer hits are resolved.
    pub fn contains(&self, point: ScreenPoint) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }
}

/// Rarity grade of an item. Drives the background color tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Grade(pub u8);

impl Grade {
    pub const MAX: Self = Self(7);

    const PALETTE: [u32; 8] = [
        0x808080, 0x808080, 0x367e68, 0x4b6b87, 0x695687, 0xa16e50, 0xa14a4c, 0xa14a4c,
    ];

    /// RGB color for this grade; grades above the palette use the top color.
    pub const fn color(self) -> u32 {
        let index = if self.0 as usize >= Self::PALETTE.len() {
            Self::PALETTE.len() - 1
        } else {
            self.0 as usize
        };
        Self::PALETTE[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touching_rects_do_not_intersect() {
        let a = CellRect::new(0, 0, 2, 2);
        let right = CellRect::new(2, 0, 1, 2);
        let below = CellRect::new(0, 2, 2, 1);
        let inside = CellRect::new(1, 1, 2, 2);

        assert!(!a.intersects(&right));
        assert!(!a.intersects(&below));
        assert!(a.intersects(&inside));
        assert!(inside.intersects(&a));
    }

    #[test]
    fn contains_rect_is_inclusive_of_edges() {
        let outer = CellRect::new(1, 1, 3, 2);
        assert!(outer.contains_rect(&CellRect::new(1, 1, 3, 2)));
        assert!(outer.contains_rect(&CellRect::new(2, 2, 1, 1)));
        assert!(!outer.contains_rect(&CellRect::new(0, 1, 2, 1)));
    }

    #[test]
    fn edges_near_the_integer_limit_do_not_wrap() {
        let far = CellRect::new(i32::MAX, i32::MAX, 2, 3);
        assert_eq!(far.right(), i64::from(i32::MAX) + 2);
        assert_eq!(far.bottom(), i64::from(i32::MAX) + 3);

        let grid = CellRect::new(0, 0, 3, 3);
        assert!(!grid.contains_rect(&far));
        assert!(!grid.intersects(&far));
        assert!(!far.intersects(&CellRect::new(i32::MIN, i32::MIN, 1, 1)));
    }

    #[test]
    fn grade_color_saturates() {
        assert_eq!(Grade(0).color(), 0x808080);
        assert_eq!(Grade(4).color(), 0x695687);
        assert_eq!(Grade(42).color(), 0xa14a4c);
    }

    #[test]
    fn ids_display_with_kind_prefix() {
        assert_eq!(ItemId(3).to_string(), "item#3");
        assert_eq!(GridId(12).to_string(), "grid#12");
        assert_eq!(Cell::new(2, -1).to_string(), "(2, -1)");
    }
}
