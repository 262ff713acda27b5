use std::fs;
use std::path::Path;

use lootbox_core::config::{Config, StorageBackend};
use lootbox_core::logging::init_logging;
use lootbox_core::models::{BoxItemDraft, Rarity};
use lootbox_core::storage::{FileStore, KeyValueStore};
use lootbox_core::LootBoxService;
use uuid::Uuid;

fn file_config() -> Config {
    let mut config = Config::default();
    config.storage.backend = StorageBackend::File;
    config.storage.data_dir =
        std::env::temp_dir().join(format!("lootbox-it-{}", Uuid::new_v4()));
    config.draw.rng_seed = Some(77);
    config
}

fn cleanup(dir: &Path) {
    let _ = fs::remove_dir_all(dir);
}

#[test]
fn test_state_survives_restart() {
    init_logging();
    let config = file_config();

    let (created, opened) = {
        let mut service = LootBoxService::from_config(&config).unwrap();
        let created = service
            .add_items(vec![
                BoxItemDraft::with_default_percentage(
                    "Q",
                    lootbox_core::models::IdentifierType::Letter,
                    Rarity::Legendary,
                ),
                BoxItemDraft::image("data:image/jpeg;base64,/9j/4AAQ", Rarity::Valuable, 15.0),
            ])
            .unwrap();
        let opened = service.draw().unwrap();
        (created, opened)
    };

    let service = LootBoxService::from_config(&config).unwrap();
    assert_eq!(service.list().items, created);
    assert_eq!(service.history()[0], opened.item);
    assert_eq!(service.stats().total_opens, 1);
    assert_eq!(service.stats().available, 1);

    cleanup(&config.storage.data_dir);
}

#[test]
fn test_legacy_file_is_upgraded_on_load() {
    init_logging();
    let config = file_config();
    let store = FileStore::open(&config.storage.data_dir).unwrap();
    store
        .write(
            &config.storage.key,
            r#"{
                "id": "1",
                "name": "Mi Lista de Cajas",
                "description": "",
                "creatorName": "Creador",
                "items": [
                    {"id": "1-0", "identifier": "1", "identifierType": "numero", "rarity": "basico", "percentage": 50, "createdAt": "2025-06-10T12:00:00Z"},
                    {"id": "1-1", "identifier": "Imagen", "identifierType": "imagen", "rarity": "legendario", "percentage": 1, "imageUrl": "data:image/jpeg;base64,AA", "createdAt": "2025-06-10T12:00:00Z"}
                ],
                "totalOpens": 9,
                "createdAt": "2025-06-10T12:00:00Z",
                "updatedAt": "2025-06-10T12:00:00Z"
            }"#,
        )
        .unwrap();

    let mut service = LootBoxService::from_config(&config).unwrap();
    let stats = service.stats();
    assert_eq!(stats.total, 2);
    assert_eq!(stats.total_opens, 9);
    assert!(stats.removal_policy_active);
    assert_eq!(service.list().items[1].rarity, Rarity::Legendary);

    // 下一次修改会以当前版本写回
    service.draw().unwrap();
    let raw = store.read(&config.storage.key).unwrap().unwrap();
    assert!(raw.contains("\"schemaVersion\""));
    assert!(raw.contains("\"rarity\": \"legendary\""));

    cleanup(&config.storage.data_dir);
}

#[test]
fn test_memory_backend_from_config() {
    let mut config = Config::default();
    config.storage.backend = StorageBackend::Memory;
    let mut service = LootBoxService::from_config(&config).unwrap();

    service
        .add_number_range(10, 12, Rarity::Medium, Rarity::Medium.default_percentage())
        .unwrap();
    let labels: Vec<String> = service
        .list()
        .items
        .iter()
        .map(|item| item.display_label())
        .collect();
    assert_eq!(labels, vec!["Item 10", "Item 11", "Item 12"]);
}
