/// Engine configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Pixel edge length of one cell before the grid aspect is applied.
    pub cell_size: f32,
    /// Pointer travel (pixels, per axis) that turns a press into a drag.
    pub drag_threshold: f32,
    /// Window in which a second click counts as a double click.
    pub double_click_window_ms: u64,
    /// When false, spawned items are revealed immediately.
    pub needs_search: bool,
    /// Search time for items whose descriptor does not set one.
    pub default_search_seconds: f32,
}

impl EngineConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum accessory slots carried by a single item.
    pub const MAX_ACCESSORY_SLOTS: usize = 9;
    /// Upper bound on ownership chain walks (grid -> item -> grid ...).
    pub const MAX_NESTING_DEPTH: usize = 32;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_CELL_SIZE: f32 = 72.0;
    pub const DRAG_THRESHOLD_PX: f32 = 5.0;
    pub const DOUBLE_CLICK_WINDOW_MS: u64 = 200;
    pub const DEFAULT_SEARCH_SECONDS: f32 = 1.2;
    pub const DEFAULT_AMMO_MAX_STACK: u32 = 60;

    pub fn new() -> Self {
        Self {
            cell_size: Self::DEFAULT_CELL_SIZE,
            drag_threshold: Self::DRAG_THRESHOLD_PX,
            double_click_window_ms: Self::DOUBLE_CLICK_WINDOW_MS,
            needs_search: true,
            default_search_seconds: Self::DEFAULT_SEARCH_SECONDS,
        }
    }

    /// Configuration with search disabled, used by tests and sandbox tools.
    pub fn without_search() -> Self {
        Self {
            needs_search: false,
            ..Self::new()
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}
