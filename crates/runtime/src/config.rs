//! Runtime configuration and environment overrides.
use std::env;
use std::path::PathBuf;

use loot_core::EngineConfig;

/// Settings for a [`crate::Session`].
#[derive(Clone, Debug, PartialEq)]
pub struct RuntimeConfig {
    pub engine: EngineConfig,
    /// Capacity of each event bus topic.
    pub event_buffer_size: usize,
    /// Directory holding `items.ron`, `templates.ron`, `presets.ron` and
    /// `config.toml`.
    pub data_dir: Option<PathBuf>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            event_buffer_size: 100,
            data_dir: None,
        }
    }
}

impl RuntimeConfig {
    pub fn new(engine: EngineConfig) -> Self {
        Self {
            engine,
            ..Self::default()
        }
    }

    /// Construct configuration from process environment variables, reading a
    /// `.env` file first when one is present.
    ///
    /// Environment variables:
    /// - `LOOT_NEEDS_SEARCH` - Items spawn hidden until searched (default: true)
    /// - `LOOT_DRAG_THRESHOLD` - Pixels of travel before a press becomes a drag (default: 5)
    /// - `LOOT_DOUBLE_CLICK_MS` - Double click window in milliseconds (default: 200)
    /// - `LOOT_EVENT_BUFFER` - Event bus capacity per topic (default: 100)
    /// - `LOOT_DATA_DIR` - Content directory (default: none)
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let mut config = Self::default();

        if let Some(needs_search) = read_env::<bool>("LOOT_NEEDS_SEARCH") {
            config.engine.needs_search = needs_search;
        }
        if let Some(threshold) = read_env::<f32>("LOOT_DRAG_THRESHOLD") {
            config.engine.drag_threshold = threshold.max(0.0);
        }
        if let Some(window) = read_env::<u64>("LOOT_DOUBLE_CLICK_MS") {
            config.engine.double_click_window_ms = window;
        }
        if let Some(capacity) = read_env::<usize>("LOOT_EVENT_BUFFER") {
            config.event_buffer_size = capacity.max(1);
        }
        config.data_dir = env::var("LOOT_DATA_DIR").ok().map(PathBuf::from);

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
