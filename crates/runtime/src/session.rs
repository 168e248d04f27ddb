//! Interactive stash session.
//!
//! A [`Session`] owns the stash state, the oracles, and the drag controller.
//! The presentation layer forwards raw pointer, key, and frame events; the
//! session turns them into engine calls and publishes everything that
//! changed on the [`EventBus`]. All calls are synchronous and never block.

use std::collections::HashMap;
use std::sync::Arc;

use loot_content::{ContentFactory, LoadoutPreset};
use loot_core::{
    Cell, DropOutcome, DropPreview, EngineConfig, Env, GridId, InventoryId, InventoryTemplate,
    ItemId, PlacementError, RegionId, ScreenPoint, ScreenRect, StashEngine, StashEvent,
    StashState, preview_drop, resolve_target,
};
use tracing::{debug, info, warn};

use crate::config::RuntimeConfig;
use crate::error::{Result, RuntimeError};
use crate::events::{DropReport, Event, EventBus, InputEvent};
use crate::input::{DragAction, DragController, KeyInput};
use crate::oracle::{ItemCatalog, OracleManager, ScreenLayout};
use crate::value::ValueDisplay;

pub struct Session {
    state: StashState,
    oracles: OracleManager,
    bus: EventBus,
    drag: DragController,
    player: RegionId,
    spoils: RegionId,
    displays: HashMap<RegionId, ValueDisplay>,
}

impl Session {
    /// Builds a session with the player loadout on one side and a single
    /// spoils box on the other.
    pub fn new(config: RuntimeConfig, items: ItemCatalog) -> Result<Self> {
        let mut state = StashState::new();
        let player = state.create_region("Player", true)?;
        let spoils = state.create_region("Spoils", false)?;
        InventoryTemplate::player_loadout().instantiate(&mut state, Some(player))?;
        InventoryTemplate::spoils_box().instantiate(&mut state, Some(spoils))?;

        let drag = DragController::new(&config.engine);
        let oracles = OracleManager::new(Arc::new(items), ScreenLayout::new(), config.engine);
        Ok(Self {
            state,
            oracles,
            bus: EventBus::with_capacity(config.event_buffer_size),
            drag,
            player,
            spoils,
            displays: HashMap::from([(player, ValueDisplay::default())]),
        })
    }

    /// Builds a session from the content in `config.data_dir`.
    ///
    /// A `config.toml` there replaces the engine settings of `config`.
    pub fn from_data_dir(mut config: RuntimeConfig) -> Result<Self> {
        let Some(dir) = config.data_dir.clone() else {
            return Self::new(config, ItemCatalog::new());
        };
        let factory = ContentFactory::new(dir);
        if factory.data_dir().join("config.toml").exists() {
            config.engine = factory.load_config()?;
        }
        let items = ItemCatalog::from_infos(factory.load_items()?);
        info!(items = items.len(), dir = %factory.data_dir().display(), "Loaded stash content");
        Self::new(config, items)
    }

    // ===== accessors =====

    pub fn state(&self) -> &StashState {
        &self.state
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn oracles(&self) -> &OracleManager {
        &self.oracles
    }

    pub fn player_region(&self) -> RegionId {
        self.player
    }

    pub fn spoils_region(&self) -> RegionId {
        self.spoils
    }

    /// Active inventory of a region.
    pub fn current_inventory(&self, region: RegionId) -> Result<Option<InventoryId>> {
        Ok(self.state.region(region)?.current_inventory())
    }

    /// Last published total of a countable region.
    pub fn value_display(&self, region: RegionId) -> Option<&ValueDisplay> {
        self.displays.get(&region)
    }

    /// Records where the presentation layer drew a grid.
    pub fn set_grid_bounds(&mut self, grid: GridId, rect: ScreenRect) {
        self.oracles.screen_mut().set_bounds(grid, rect);
    }

    pub fn clear_grid_bounds(&mut self, grid: GridId) {
        self.oracles.screen_mut().clear_bounds(grid);
    }

    // ===== content =====

    /// Adds another inventory to the spoils side, e.g. a second loot box or
    /// a fallen player's loadout. It starts disabled unless it is the first.
    pub fn add_spoils_inventory(&mut self, template: &InventoryTemplate) -> Result<InventoryId> {
        let inventory = template.instantiate(&mut self.state, Some(self.spoils))?;
        debug!(%inventory, title = %template.title, "Added spoils inventory");
        Ok(inventory)
    }

    /// Spawns a preset into `inventory`.
    ///
    /// Only the spoils side is ever searched, so items placed anywhere else
    /// spawn revealed regardless of `needs_search`.
    pub fn apply_preset(
        &mut self,
        inventory: InventoryId,
        preset: &LoadoutPreset,
    ) -> Result<Vec<ItemId>> {
        let searched = self.state.inventory(inventory)?.region == Some(self.spoils);
        let config = EngineConfig {
            needs_search: searched && self.oracles.config().needs_search,
            ..self.oracles.config().clone()
        };
        let env = Env::with_all(self.oracles.items(), self.oracles.screen(), &config);
        let mut engine = StashEngine::new(&mut self.state);
        let applied = preset.apply(&mut engine, &env, inventory);
        let events = engine.into_events();
        self.publish_all(events);

        let items = applied?;
        info!(preset = %preset.name, %inventory, items = items.len(), "Applied preset");
        Ok(items)
    }

    // ===== regions =====

    pub fn switch_region(&mut self, region: RegionId, index: usize) -> Result<bool> {
        let mut engine = StashEngine::new(&mut self.state);
        let switched = engine.switch_region(region, index);
        let events = engine.into_events();
        self.publish_all(events);

        let switched = switched?;
        if switched {
            info!(%region, index, "Switched region inventory");
        } else {
            debug!(%region, index, "Ignored out-of-range region switch");
        }
        Ok(switched)
    }

    pub fn scroll(&mut self, inventory: InventoryId, delta: f32) -> Result<f32> {
        let mut engine = StashEngine::new(&mut self.state);
        Ok(engine.scroll_inventory(inventory, delta)?)
    }

    // ===== pointer and keyboard =====

    /// Pointer pressed on `item`. Hidden items and presses during another
    /// gesture are refused.
    pub fn pointer_down(&mut self, item: ItemId, point: ScreenPoint) -> Result<bool> {
        if !self.state.item(item)?.is_revealed() {
            debug!(%item, "Refused press on hidden item");
            return Ok(false);
        }
        let armed = self.drag.press(item, point);
        if armed {
            debug!(%item, "Drag armed");
        }
        Ok(armed)
    }

    /// Pointer moved. While dragging, returns hover feedback for the cell
    /// under the pointer.
    pub fn pointer_move(&mut self, point: ScreenPoint) -> Result<Option<DropPreview>> {
        let (item, flipped) = match self.drag.motion(point) {
            Some(DragAction::Started { item }) => {
                debug!(%item, "Drag started");
                self.bus.publish(Event::Input(InputEvent::DragStarted { item }));
                (item, false)
            }
            Some(DragAction::Moved { item, flipped, .. }) => (item, flipped),
            _ => return Ok(None),
        };
        self.preview(item, point, flipped).map(Some)
    }

    /// Pointer released. Returns the drop outcome when a drag ended.
    pub fn pointer_up(&mut self, point: ScreenPoint, now_ms: u64) -> Result<Option<DropOutcome>> {
        let mut outcome = None;
        for action in self.drag.release(point, now_ms) {
            match action {
                DragAction::Released {
                    item,
                    point,
                    flipped,
                } => {
                    let resolved = self.resolve_release(item, point, flipped);
                    self.drag.finish();
                    outcome = Some(resolved?);
                }
                DragAction::Click { item } => self.request_detail(item),
                DragAction::DoubleClick { item } => {
                    self.quick_move_gesture(item)?;
                }
                _ => {}
            }
        }
        Ok(outcome)
    }

    pub fn key_down(&mut self, key: KeyInput) {
        let event = match key {
            KeyInput::Rotate => match self.drag.rotate() {
                Some(DragAction::Rotated { item, flipped }) => {
                    debug!(%item, flipped, "Drag rotated");
                    InputEvent::Rotated { item, flipped }
                }
                _ => return,
            },
            KeyInput::Cancel => match self.drag.cancel() {
                Some(DragAction::Cancelled { item }) => {
                    debug!(%item, "Drag cancelled");
                    InputEvent::DragCancelled { item }
                }
                _ => return,
            },
            KeyInput::Other => return,
        };
        self.bus.publish(Event::Input(event));
    }

    /// Per-frame update: fires overdue single clicks and spends `dt`
    /// seconds searching the active spoils inventory.
    pub fn tick(&mut self, now_ms: u64, dt: f32) -> Result<Vec<ItemId>> {
        if let Some(DragAction::Click { item }) = self.drag.tick(now_ms) {
            self.request_detail(item);
        }

        let Some(inventory) = self.state.region(self.spoils)?.current_inventory() else {
            return Ok(Vec::new());
        };
        let mut engine = StashEngine::new(&mut self.state);
        let revealed = engine.advance_search(inventory, dt);
        let events = engine.into_events();
        self.publish_all(events);
        Ok(revealed?)
    }

    // ===== quick move =====

    /// Moves `item` into the active inventory of the other region.
    ///
    /// Returns `None` when nothing over there has room; the item stays put.
    pub fn quick_move(&mut self, item: ItemId) -> Result<Option<(GridId, Cell)>> {
        let current = self.state.item(item)?;
        if !current.is_revealed() {
            return Err(RuntimeError::Hidden { item });
        }
        let from = current.region.ok_or(RuntimeError::Unplaced { item })?;
        let to = if from == self.player {
            self.spoils
        } else {
            self.player
        };

        let mut engine = StashEngine::new(&mut self.state);
        let placed = engine.add_to_region(to, item);
        let events = engine.into_events();
        self.publish_all(events);

        match placed {
            Ok(slot) => {
                info!(%item, %from, %to, "Quick-moved item");
                Ok(Some(slot))
            }
            Err(PlacementError::NoRoom { .. }) => {
                debug!(%item, %to, "No room for quick move");
                Ok(None)
            }
            Err(err) => Err(err.into()),
        }
    }

    fn quick_move_gesture(&mut self, item: ItemId) -> Result<()> {
        let event = match self.quick_move(item)? {
            Some(_) => {
                let to = self
                    .state
                    .item(item)?
                    .region
                    .ok_or(RuntimeError::Unplaced { item })?;
                InputEvent::QuickMoved { item, to }
            }
            None => InputEvent::QuickMoveFailed { item },
        };
        self.bus.publish(Event::Input(event));
        Ok(())
    }

    // ===== internals =====

    fn preview(&self, item: ItemId, point: ScreenPoint, flipped: bool) -> Result<DropPreview> {
        let env = self.oracles.as_stash_env();
        let target = resolve_target(&self.state, &env, item, point, flipped)?;
        Ok(preview_drop(&self.state, item, target, flipped)?)
    }

    fn resolve_release(
        &mut self,
        item: ItemId,
        point: ScreenPoint,
        flipped: bool,
    ) -> Result<DropOutcome> {
        let env = self.oracles.as_stash_env();
        let target = resolve_target(&self.state, &env, item, point, flipped)?;

        let mut engine = StashEngine::new(&mut self.state);
        let resolved = engine.resolve_drop(item, target, flipped);
        let events = engine.into_events();
        self.publish_all(events);

        let outcome = resolved.inspect_err(|err| warn!(%item, %err, "Drop failed"))?;
        debug!(%item, ?target, ?outcome, "Drop resolved");
        self.bus.publish(Event::Drop(DropReport {
            item,
            outcome: outcome.clone(),
        }));
        Ok(outcome)
    }

    fn request_detail(&self, item: ItemId) {
        debug!(%item, "Single click");
        self.bus
            .publish(Event::Input(InputEvent::DetailRequested { item }));
    }

    fn publish_all(&mut self, events: Vec<StashEvent>) {
        for event in events {
            if let StashEvent::ValueChanged { region, total } = event
                && self.state.region(region).is_ok_and(|r| r.countable)
            {
                let display = ValueDisplay::new(total);
                self.displays.insert(region, display.clone());
                self.bus.publish(Event::Value { region, display });
            }
            self.bus.publish(Event::Stash(event));
        }
    }
}
