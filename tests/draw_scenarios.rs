use std::collections::HashMap;

use lootbox_core::models::{BoxItemDraft, HISTORY_LIMIT, IdentifierType, Rarity};
use lootbox_core::services::{EntropySource, MetadataUpdate, SeededEntropy, SequenceEntropy};
use lootbox_core::storage::{KeyValueStore, MemoryStore, PersistenceGateway};
use lootbox_core::{AppError, LootBoxService};

const KEY: &str = "loot-box-data";

fn open_service(store: &MemoryStore, entropy: Box<dyn EntropySource>) -> LootBoxService {
    LootBoxService::new(PersistenceGateway::new(Box::new(store.clone())), KEY, entropy)
}

fn draft(identifier: &str, percentage: f64) -> BoxItemDraft {
    BoxItemDraft::new(identifier, IdentifierType::Alphanumeric, Rarity::Medium, percentage)
}

fn set_removal_policy(service: &mut LootBoxService, enabled: bool) {
    let list = service.list();
    let update = MetadataUpdate {
        name: list.name.clone(),
        description: list.description.clone(),
        creator_name: list.creator_name.clone(),
        remove_items_from_list: enabled,
    };
    service.update_metadata(update).unwrap();
}

#[test]
fn test_ninety_ten_with_replacement() {
    let store = MemoryStore::new();
    let mut service = open_service(&store, Box::new(SeededEntropy::new(12345)));
    set_removal_policy(&mut service, false);
    service.add_items(vec![draft("a", 90.0), draft("b", 10.0)]).unwrap();

    let mut counts: HashMap<String, u32> = HashMap::new();
    for _ in 0..1000 {
        let result = service.draw().unwrap();
        *counts.entry(result.item.identifier).or_default() += 1;
    }

    let a = counts.get("a").copied().unwrap_or(0);
    let b = counts.get("b").copied().unwrap_or(0);
    assert!((850..=950).contains(&a), "count(a) = {a}");
    assert!((50..=150).contains(&b), "count(b) = {b}");
    assert_eq!(service.stats().total_opens, 1000);
    assert_eq!(service.stats().available, 2);
}

#[test]
fn test_two_items_without_replacement_then_reset() {
    let store = MemoryStore::new();
    let mut service = open_service(&store, Box::new(SequenceEntropy::new(vec![0.3, 0.8])));
    service.add_items(vec![draft("x", 50.0), draft("y", 50.0)]).unwrap();

    let first = service.draw().unwrap().item;
    let second = service.draw().unwrap().item;
    assert_ne!(first.id, second.id);

    let mut drawn = service.list().drawn_item_ids.clone();
    drawn.sort();
    let mut expected: Vec<String> = service.list().items.iter().map(|i| i.id.clone()).collect();
    expected.sort();
    assert_eq!(drawn, expected);
    assert!(service.available_items().is_empty());

    let err = service.draw().unwrap_err();
    assert!(matches!(err, AppError::Exhausted));
    assert_eq!(err.report().0, "EXHAUSTED");
    assert_eq!(service.stats().total_opens, 2);

    service.reset().unwrap();
    assert_eq!(service.available_items().len(), 2);
    assert!(service.history().is_empty());
    assert_eq!(service.stats().total_opens, 2);
}

#[test]
fn test_exhaustion_after_k_draws() {
    let store = MemoryStore::new();
    let mut service = open_service(&store, Box::new(SeededEntropy::new(3)));
    let drafts = (1..=7).map(|n| draft(&format!("b{n}"), n as f64)).collect();
    service.add_items(drafts).unwrap();

    for n in 1..=7 {
        service.draw().unwrap();
        assert_eq!(service.stats().available, 7 - n);
    }
    assert!(service.stats().exhausted);
    assert!(matches!(service.draw(), Err(AppError::Exhausted)));
}

#[test]
fn test_history_keeps_last_ten_newest_first() {
    let store = MemoryStore::new();
    let mut service = open_service(&store, Box::new(SeededEntropy::new(8)));
    service.add_number_range(1, 20, Rarity::Basic, 5.0).unwrap();

    let mut last = None;
    for _ in 0..14 {
        last = Some(service.draw().unwrap().item);
    }

    assert_eq!(service.history().len(), HISTORY_LIMIT);
    assert_eq!(Some(&service.history()[0]), last.as_ref());
    assert_eq!(service.stats().total_opens, 14);
}

#[test]
fn test_reload_mid_session_keeps_committed_draw() {
    let store = MemoryStore::new();
    let mut service = open_service(&store, Box::new(SeededEntropy::new(1)));
    service.add_items(vec![draft("only", 1.0), draft("other", 1.0)]).unwrap();
    let result = service.draw().unwrap();

    // 模拟展示动画期间页面被重新加载
    let reloaded = open_service(&store, Box::new(SeededEntropy::new(2)));
    assert_eq!(reloaded.history()[0], result.item);
    assert_eq!(reloaded.stats().total_opens, 1);
    assert_eq!(reloaded.list().drawn_item_ids, vec![result.item.id.clone()]);
}

#[test]
fn test_removing_a_drawn_item_keeps_draw_state_consistent() {
    let store = MemoryStore::new();
    let mut service = open_service(&store, Box::new(SequenceEntropy::new(vec![0.0])));
    service.add_items(vec![draft("a", 1.0), draft("b", 1.0)]).unwrap();

    let drawn = service.draw().unwrap().item;
    service.remove_item(&drawn.id).unwrap();

    let stats = service.stats();
    assert_eq!(stats.total, 1);
    assert_eq!(stats.drawn, 0);
    assert_eq!(stats.available, 1);
    // 历史是快照，删除条目不影响
    assert_eq!(service.history()[0].id, drawn.id);
}

#[test]
fn test_hard_reset_erases_record() {
    let store = MemoryStore::new();
    let mut service = open_service(&store, Box::new(SeededEntropy::new(5)));
    service.add_items(vec![draft("a", 1.0)]).unwrap();
    service.draw().unwrap();
    assert!(store.read(KEY).unwrap().is_some());

    service.hard_reset().unwrap();
    assert!(store.read(KEY).unwrap().is_none());
    let stats = service.stats();
    assert_eq!(stats.total, 0);
    assert_eq!(stats.total_opens, 0);
    assert!(stats.removal_policy_active);
}

#[test]
fn test_corrupt_record_starts_fresh() {
    let store = MemoryStore::new();
    store.write(KEY, "{\"items\": \"broken\"").unwrap();

    let service = open_service(&store, Box::new(SeededEntropy::new(5)));
    assert_eq!(service.stats().total, 0);
    assert_eq!(service.list().name, "My Box List");
}
