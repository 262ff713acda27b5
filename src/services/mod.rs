pub mod draw_engine;
pub mod draw_state;
pub mod loot_box_service;
pub mod pool_store;

pub use draw_engine::{
    EntropySource, SeededEntropy, SequenceEntropy, ThreadEntropy, select_random_item,
};
pub use loot_box_service::*;
pub use pool_store::{MetadataUpdate, PoolStore, number_range_drafts};
