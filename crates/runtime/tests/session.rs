use std::fs;

use loot_content::{LoadoutPreset, PresetEntry};
use loot_core::{
    Cell, DropOutcome, DropPreview, EngineConfig, GridId, InfoId, InventoryTemplate, ItemCategory,
    ItemId, ItemInfo, NodeKind, RevertReason, ScreenPoint, ScreenRect,
};
use loot_runtime::{
    Event, InputEvent, ItemCatalog, KeyInput, RuntimeConfig, Session, Topic, ValueTier,
};
use tempfile::TempDir;
use tokio::sync::broadcast::Receiver;

const CELL: f32 = EngineConfig::DEFAULT_CELL_SIZE;

fn catalog() -> ItemCatalog {
    ItemCatalog::from_infos([
        ItemInfo::new(InfoId(1), "Salt", ItemCategory::Consume, 1, 1, 50),
        ItemInfo::new(InfoId(2), "Rolex", ItemCategory::Collection, 1, 1, 150_000)
            .with_search_seconds(0.5),
        ItemInfo::new(InfoId(3), "Crowbar", ItemCategory::Consume, 2, 1, 900),
        ItemInfo::new(InfoId(4), "Altyn", ItemCategory::Helmet, 2, 2, 60_000)
            .with_search_seconds(2.0),
    ])
}

fn session(config: EngineConfig) -> Session {
    Session::new(RuntimeConfig::new(config), catalog()).unwrap()
}

fn spoils_grid(session: &Session) -> GridId {
    let inventory = session
        .current_inventory(session.spoils_region())
        .unwrap()
        .unwrap();
    match session.state().inventory(inventory).unwrap().node(InventoryTemplate::SPOILS) {
        Some(NodeKind::Grid(grid)) => *grid,
        other => panic!("spoils node is not a grid: {other:?}"),
    }
}

/// Places `item` into the spoils box and lays the box out at the origin.
fn seed_spoils(session: &mut Session, item: &str) -> (GridId, ItemId) {
    let grid = spoils_grid(session);
    let inventory = session
        .current_inventory(session.spoils_region())
        .unwrap()
        .unwrap();
    let preset = LoadoutPreset::new("seed")
        .with_entry(PresetEntry::new(InventoryTemplate::SPOILS, item).at(0, 0));
    let items = session.apply_preset(inventory, &preset).unwrap();
    session.set_grid_bounds(grid, ScreenRect::new(0.0, 0.0, 7.0 * CELL, 8.0 * CELL));
    (grid, items[0])
}

/// Center of a 1x1 item sitting at `(col, row)` of a grid drawn at the origin.
fn center(col: i32, row: i32) -> ScreenPoint {
    ScreenPoint::new((col as f32 + 0.5) * CELL, (row as f32 + 0.5) * CELL)
}

fn drain(rx: &mut Receiver<Event>) -> Vec<Event> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

#[test]
fn dragging_moves_an_item_inside_the_spoils_box() {
    let mut session = session(EngineConfig::without_search());
    let (grid, salt) = seed_spoils(&mut session, "Salt");
    let mut placement = session.bus().subscribe(Topic::Placement);

    assert!(session.pointer_down(salt, center(0, 0)).unwrap());
    let preview = session.pointer_move(center(3, 2)).unwrap();
    assert_eq!(preview, Some(DropPreview::Place { flip: false }));

    let outcome = session.pointer_up(center(3, 2), 1_000).unwrap();
    assert_eq!(
        outcome,
        Some(DropOutcome::Placed {
            grid,
            cell: Cell::new(3, 2),
            rotated: false,
        })
    );

    let drops: Vec<_> = drain(&mut placement)
        .into_iter()
        .filter(|event| matches!(event, Event::Drop(_)))
        .collect();
    assert_eq!(drops.len(), 1);
}

#[test]
fn release_outside_every_grid_reverts() {
    let mut session = session(EngineConfig::without_search());
    let (grid, salt) = seed_spoils(&mut session, "Salt");

    session.pointer_down(salt, center(0, 0)).unwrap();
    session.pointer_move(ScreenPoint::new(2_000.0, 2_000.0)).unwrap();
    let outcome = session
        .pointer_up(ScreenPoint::new(2_000.0, 2_000.0), 500)
        .unwrap();

    assert_eq!(outcome, Some(DropOutcome::Reverted(RevertReason::NoTarget)));
    assert_eq!(session.state().item(salt).unwrap().parent, Some(grid));
}

#[test]
fn hidden_items_refuse_presses_until_searched() {
    let mut session = session(EngineConfig::new());
    let (_, rolex) = seed_spoils(&mut session, "Rolex");
    let mut search = session.bus().subscribe(Topic::Search);

    assert!(!session.pointer_down(rolex, center(0, 0)).unwrap());
    assert!(session.quick_move(rolex).is_err());

    assert!(session.tick(0, 0.25).unwrap().is_empty());
    assert_eq!(session.tick(16, 0.25).unwrap(), vec![rolex]);
    assert_eq!(drain(&mut search).len(), 1);

    assert!(session.pointer_down(rolex, center(0, 0)).unwrap());
}

#[test]
fn player_presets_spawn_revealed_even_when_searching() {
    let mut session = session(EngineConfig::new());
    let player = session.current_inventory(session.player_region()).unwrap().unwrap();
    let preset = LoadoutPreset::new("kit")
        .with_entry(PresetEntry::new(InventoryTemplate::HELMET, "Altyn"));
    let altyn = session.apply_preset(player, &preset).unwrap()[0];

    assert!(session.state().item(altyn).unwrap().is_revealed());
    assert!(session.pointer_down(altyn, ScreenPoint::new(10.0, 10.0)).unwrap());
    session.key_down(KeyInput::Cancel);

    let placed = session.quick_move(altyn).unwrap();
    assert!(placed.is_some());
    assert_eq!(
        session.state().item(altyn).unwrap().region,
        Some(session.spoils_region())
    );
}

#[test]
fn quick_move_updates_the_player_value_display() {
    let mut session = session(EngineConfig::without_search());
    let (_, rolex) = seed_spoils(&mut session, "Rolex");
    let mut values = session.bus().subscribe(Topic::Value);

    let placed = session.quick_move(rolex).unwrap();
    assert!(placed.is_some());
    assert_eq!(
        session.state().item(rolex).unwrap().region,
        Some(session.player_region())
    );

    let display = session.value_display(session.player_region()).unwrap();
    assert_eq!(display.text, "150,000");
    assert_eq!(display.tier, ValueTier::Purple);
    assert!(session.value_display(session.spoils_region()).is_none());

    let published = drain(&mut values);
    assert!(published.iter().any(|event| matches!(
        event,
        Event::Value { display, .. } if display.total == 150_000
    )));
}

#[test]
fn single_click_requests_details_after_the_window() {
    let mut session = session(EngineConfig::without_search());
    let (_, salt) = seed_spoils(&mut session, "Salt");
    let mut input = session.bus().subscribe(Topic::Input);

    session.pointer_down(salt, center(0, 0)).unwrap();
    assert_eq!(session.pointer_up(center(0, 0), 1_000).unwrap(), None);
    assert!(drain(&mut input).is_empty());

    session.tick(1_300, 0.3).unwrap();
    let events = drain(&mut input);
    assert!(matches!(
        events.as_slice(),
        [Event::Input(InputEvent::DetailRequested { item })] if *item == salt
    ));
}

#[test]
fn double_click_quick_moves_to_the_player() {
    let mut session = session(EngineConfig::without_search());
    let (_, salt) = seed_spoils(&mut session, "Salt");
    let mut input = session.bus().subscribe(Topic::Input);
    let player = session.player_region();

    session.pointer_down(salt, center(0, 0)).unwrap();
    session.pointer_up(center(0, 0), 1_000).unwrap();
    session.pointer_down(salt, center(0, 0)).unwrap();
    session.pointer_up(center(0, 0), 1_120).unwrap();

    let events = drain(&mut input);
    assert!(events.iter().any(|event| matches!(
        event,
        Event::Input(InputEvent::QuickMoved { item, to }) if *item == salt && *to == player
    )));
    assert_eq!(session.state().item(salt).unwrap().region, Some(player));
}

#[test]
fn rotate_key_only_matters_while_dragging() {
    let mut session = session(EngineConfig::without_search());
    let (_, crowbar) = seed_spoils(&mut session, "Crowbar");
    let mut input = session.bus().subscribe(Topic::Input);

    session.key_down(KeyInput::Rotate);
    assert!(drain(&mut input).is_empty());

    session.pointer_down(crowbar, center(1, 0)).unwrap();
    session.pointer_move(center(1, 3)).unwrap();
    session.key_down(KeyInput::from_char('R'));
    session.key_down(KeyInput::Cancel);

    let events = drain(&mut input);
    assert!(matches!(
        events.as_slice(),
        [
            Event::Input(InputEvent::DragStarted { .. }),
            Event::Input(InputEvent::Rotated { flipped: true, .. }),
            Event::Input(InputEvent::DragCancelled { .. }),
        ]
    ));
    assert!(!session.state().item(crowbar).unwrap().rotated);
}

#[test]
fn switching_spoils_inventories_retargets_quick_moves() {
    let mut session = session(EngineConfig::without_search());
    let spoils = session.spoils_region();
    let second = session
        .add_spoils_inventory(&InventoryTemplate::spoils_box())
        .unwrap();
    assert!(!session.state().inventory(second).unwrap().enabled);

    assert!(session.switch_region(spoils, 1).unwrap());
    assert!(!session.switch_region(spoils, 7).unwrap());
    assert_eq!(session.current_inventory(spoils).unwrap(), Some(second));
    assert!(session.state().inventory(second).unwrap().enabled);
}

#[test]
fn sessions_load_content_from_a_data_dir() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("items.ron"),
        r#"(items: [(id: 7, name: "Ledx", type: "medical", width: 1, height: 1, base_value: 250000)])"#,
    )
    .unwrap();
    fs::write(dir.path().join("config.toml"), "needs_search = false\n").unwrap();

    let config = RuntimeConfig {
        data_dir: Some(dir.path().to_path_buf()),
        ..RuntimeConfig::default()
    };
    let session = Session::from_data_dir(config).unwrap();

    assert_eq!(session.oracles().items().len(), 1);
    assert!(!session.oracles().config().needs_search);
}
