use std::fs;
use std::path::PathBuf;

use loot_content::{
    ConfigLoader, ContentFactory, ItemLoader, LoadoutPreset, PresetEntry, PresetError,
    PresetLoader, TemplateLoader,
};
use loot_core::{
    BoundsOracle, Env, EngineConfig, GridId, InfoId, InventoryTemplate, ItemCategory, ItemInfo,
    ItemOracle, NodeKind, ScreenRect, StashEngine, StashState,
};
use tempfile::TempDir;

const ITEMS_RON: &str = r#"(
    items: [
        (
            id: 1,
            name: "AKM",
            type: "gunRifle",
            grade: 4,
            width: 4,
            height: 2,
            base_value: 30000,
            accessories: [
                (name: "scope", accept: ["accScope"]),
                (name: "muzzle", accept: ["accMuzzle"]),
            ],
            gun: Some((caliber: "7.62x39", capacity: 30)),
        ),
        (
            id: 2,
            name: "7.62x39 PS",
            type: "ammo",
            width: 1,
            height: 1,
            base_value: 120,
            stack: 60,
            caliber: Some("7.62x39"),
        ),
        (
            id: 3,
            name: "PSO-1",
            type: "accScope",
            width: 2,
            height: 1,
            base_value: 5000,
        ),
        (
            id: 4,
            name: "Salt",
            type: "consume",
            width: 1,
            height: 1,
            base_value: 50,
            max_stack: 10,
            search_seconds: Some(0.5),
        ),
        (
            id: 5,
            name: "Pilgrim",
            type: "backpack",
            width: 5,
            height: 7,
            base_value: 18000,
            subgrid_layout: [
                (width: 5, height: 3, x: 0.0, y: 0.0),
                (width: 2, height: 2, x: 0.0, y: 3.0),
            ],
        ),
        (
            id: 6,
            name: "Bandage",
            type: "consume",
            width: 1,
            height: 1,
            base_value: 400,
        ),
    ],
)"#;

const PRESETS_RON: &str = r#"(
    presets: [
        (
            name: "raider",
            entries: [
                (
                    node: "PrimaryWeapon1",
                    item: "AKM",
                    ammo: [(item: "7.62x39 PS", count: 40)],
                    accessories: ["PSO-1"],
                ),
                (node: "pocket", item: "Salt", stack: Some(3)),
                (node: "Backpack", item: "Pilgrim"),
                (
                    node: "ContainerBackpack",
                    item: "Bandage",
                    position: Some((member: 1, col: 1, row: 1)),
                ),
            ],
        ),
    ],
)"#;

struct Catalog(Vec<ItemInfo>);

impl ItemOracle for Catalog {
    fn info_by_id(&self, id: InfoId) -> Option<ItemInfo> {
        self.0.iter().find(|info| info.id == id).cloned()
    }

    fn info_by_name(&self, name: &str) -> Option<ItemInfo> {
        self.0.iter().find(|info| info.name == name).cloned()
    }

    fn all_infos(&self) -> Vec<ItemInfo> {
        self.0.clone()
    }
}

struct Offscreen;

impl BoundsOracle for Offscreen {
    fn grid_bounds(&self, _: GridId) -> Option<ScreenRect> {
        None
    }
}

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn node_grid(state: &StashState, inventory: loot_core::InventoryId, key: &str) -> GridId {
    match state.inventory(inventory).unwrap().node(key) {
        Some(NodeKind::Grid(grid)) => *grid,
        other => panic!("{key} is not a grid node: {other:?}"),
    }
}

#[test]
fn item_catalog_parses_ron_with_category_aliases() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "items.ron", ITEMS_RON);

    let items = ItemLoader::load(&path).unwrap();
    assert_eq!(items.len(), 6);

    let rifle = &items[0];
    assert_eq!(rifle.category, ItemCategory::PrimaryWeapon);
    assert_eq!(rifle.accessories.len(), 2);
    assert_eq!(rifle.gun.as_ref().unwrap().capacity, 30);
    assert_eq!(items[1].effective_max_stack(), 60);
    assert_eq!(items[3].search_seconds, Some(0.5));
    assert_eq!(items[4].subgrid_layout.len(), 2);
}

#[test]
fn item_catalog_accepts_json() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "items.json",
        r#"{"items": [{"id": 9, "name": "Rolex", "type": "collection", "width": 1, "height": 1, "base_value": 75000}]}"#,
    );

    let items = ItemLoader::load(&path).unwrap();
    assert_eq!(items[0].id, InfoId(9));
    assert_eq!(items[0].category, ItemCategory::Collection);
    assert_eq!(items[0].stack, 1);
}

#[test]
fn unknown_categories_survive_loading() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "items.ron",
        r#"(items: [(id: 1, name: "Ledx", type: "medical", width: 1, height: 1)])"#,
    );

    let items = ItemLoader::load(&path).unwrap();
    assert_eq!(items[0].category, ItemCategory::Custom("medical".into()));
}

#[test]
fn duplicate_names_are_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "items.ron",
        r#"(items: [
            (id: 1, name: "Salt", type: "consume", width: 1, height: 1),
            (id: 2, name: "Salt", type: "consume", width: 1, height: 1),
        ])"#,
    );

    let err = ItemLoader::load(&path).unwrap_err();
    assert!(err.to_string().contains("Duplicate item name"));
}

#[test]
fn malformed_files_report_the_format() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "items.ron", "(items: [");

    let err = ItemLoader::load(&path).unwrap_err();
    assert!(err.to_string().contains("item catalog RON"));

    let missing = ItemLoader::load(&dir.path().join("absent.ron")).unwrap_err();
    assert!(missing.to_string().contains("Failed to read file"));
}

#[test]
fn config_fills_missing_keys_with_defaults() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "config.toml", "needs_search = false\ncell_size = 64.0\n");

    let config = ConfigLoader::load(&path).unwrap();
    assert!(!config.needs_search);
    assert_eq!(config.cell_size, 64.0);
    assert_eq!(config.double_click_window_ms, EngineConfig::DOUBLE_CLICK_WINDOW_MS);

    let path = write(&dir, "bad.toml", "cell_size = 0.0\n");
    assert!(ConfigLoader::load(&path).is_err());
}

#[test]
fn templates_round_trip_through_ron_and_instantiate() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "templates.ron",
        r#"(templates: [
            (
                title: "Crate",
                nodes: [
                    Title(key: "head", text: "Weapon crate"),
                    Grid(key: "main", grid: (width: 6, height: 4)),
                    Grid(key: "optic", grid: (width: 1, height: 1, fullfill: true, accept: ["accScope"])),
                ],
            ),
        ])"#,
    );

    let template = TemplateLoader::load_named(&path, "Crate").unwrap();
    assert_eq!(template.nodes.len(), 3);
    assert!(TemplateLoader::load_named(&path, "Missing").is_err());

    let mut state = StashState::new();
    let region = state.create_region("loot", true).unwrap();
    let inventory = template.instantiate(&mut state, Some(region)).unwrap();
    let optic = node_grid(&state, inventory, "optic");
    assert!(state.grid(optic).unwrap().fullfill);
    assert_eq!(state.grid(node_grid(&state, inventory, "main")).unwrap().width, 6);
}

#[test]
fn preset_fits_out_a_player_loadout() {
    let dir = TempDir::new().unwrap();
    write(&dir, "items.ron", ITEMS_RON);
    write(&dir, "presets.ron", PRESETS_RON);
    write(&dir, "config.toml", "needs_search = false\n");

    let factory = ContentFactory::new(dir.path());
    let config = factory.load_config().unwrap();
    let catalog = Catalog(factory.load_items().unwrap());
    let preset = factory
        .load_presets()
        .unwrap()
        .into_iter()
        .find(|preset| preset.name == "raider")
        .unwrap();

    let mut state = StashState::new();
    let region = state.create_region("player", true).unwrap();
    let inventory = InventoryTemplate::player_loadout()
        .instantiate(&mut state, Some(region))
        .unwrap();

    let env = Env::with_all(&catalog, &Offscreen, &config);
    let mut engine = StashEngine::new(&mut state);
    let items = preset.apply(&mut engine, &env, inventory).unwrap();
    assert_eq!(items.len(), 4);
    drop(engine);

    let [rifle, salt, pack, bandage] = items[..] else {
        panic!("expected four items");
    };

    let weapon_slot = node_grid(&state, inventory, InventoryTemplate::PRIMARY_WEAPON_1);
    let rifle_state = state.item(rifle).unwrap();
    assert_eq!(rifle_state.parent, Some(weapon_slot));
    assert_eq!(rifle_state.loaded_rounds(), 30);
    let scope_slot = rifle_state.slots[0].grid;
    assert_eq!(state.grid(scope_slot).unwrap().items.len(), 1);

    assert_eq!(state.item(salt).unwrap().stack.current, 3);

    let Some(NodeKind::Container(backpack)) = state
        .inventory(inventory)
        .unwrap()
        .node(InventoryTemplate::BACKPACK_CONTAINER)
        .cloned()
    else {
        panic!("backpack container missing");
    };
    let container = state.container(backpack).unwrap();
    assert_eq!(container.carried_by, Some(pack));
    assert_eq!(state.item(bandage).unwrap().parent, Some(container.grids[1]));
    assert_eq!(state.item(bandage).unwrap().region, Some(region));

    let expected = 30_000 + 5_000 + 30 * 120 + 50 * 3 + 18_000 + 400;
    assert_eq!(state.region_value(region), expected);
}

#[test]
fn preset_with_unknown_node_fails() {
    let catalog = Catalog(vec![ItemInfo::new(
        InfoId(1),
        "Salt",
        ItemCategory::Consume,
        1,
        1,
        50,
    )]);
    let config = EngineConfig::without_search();
    let preset = LoadoutPreset::new("broken").with_entry(PresetEntry::new("nowhere", "Salt"));

    let mut state = StashState::new();
    let inventory = InventoryTemplate::spoils_box()
        .instantiate(&mut state, None)
        .unwrap();
    let env = Env::with_all(&catalog, &Offscreen, &config);
    let err = preset
        .apply(&mut StashEngine::new(&mut state), &env, inventory)
        .unwrap_err();

    assert!(matches!(err, PresetError::UnknownNode { node, .. } if node == "nowhere"));
}

#[test]
fn failed_preset_leaves_the_inventory_untouched() {
    let catalog = Catalog(vec![
        ItemInfo::new(InfoId(1), "Salt", ItemCategory::Consume, 1, 1, 50),
        ItemInfo::new(InfoId(2), "Safe", ItemCategory::Collection, 8, 8, 90_000),
    ]);
    let config = EngineConfig::without_search();
    let preset = LoadoutPreset::new("too big")
        .with_entry(PresetEntry::new(InventoryTemplate::SPOILS, "Salt"))
        .with_entry(PresetEntry::new(InventoryTemplate::SPOILS, "Safe"));

    let mut state = StashState::new();
    let region = state.create_region("spoils", true).unwrap();
    let inventory = InventoryTemplate::spoils_box()
        .instantiate(&mut state, Some(region))
        .unwrap();
    let before = state.clone();

    let env = Env::with_all(&catalog, &Offscreen, &config);
    let mut engine = StashEngine::new(&mut state);
    let err = preset.apply(&mut engine, &env, inventory).unwrap_err();
    assert!(matches!(err, PresetError::Placement(_)));
    assert!(engine.events().is_empty());
    drop(engine);

    assert!(state.items.is_empty());
    assert_eq!(state, before);
    let spoils = node_grid(&state, inventory, InventoryTemplate::SPOILS);
    assert!(state.grid(spoils).unwrap().items.is_empty());
}

#[test]
fn preset_catalog_loads_from_disk() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "presets.ron", PRESETS_RON);

    let presets = PresetLoader::load(&path).unwrap();
    let raider = &presets[0];
    assert_eq!(raider.entries.len(), 4);
    assert_eq!(raider.entries[0].accessories, vec!["PSO-1".to_owned()]);
    assert_eq!(raider.entries[3].position.unwrap().member, 1);
}
