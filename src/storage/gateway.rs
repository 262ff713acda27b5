use migration::{Migrator, MigratorTrait, SCHEMA_VERSION_FIELD, Value};

use super::KeyValueStore;
use crate::error::{AppError, AppResult};
use crate::models::BoxList;

/// 把整份列表（含抽取状态）作为一条记录按键持久化
pub struct PersistenceGateway {
    store: Box<dyn KeyValueStore>,
}

impl PersistenceGateway {
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// 读取记录；不存在、读取失败或无法解析时返回 `default`，不向上抛错
    pub fn load(&self, key: &str, default: BoxList) -> BoxList {
        let raw = match self.store.read(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                log::debug!("No persisted record under {key}, starting fresh");
                return default;
            }
            Err(e) => {
                log::warn!("Failed to read persisted record {key}: {e}");
                return default;
            }
        };

        match decode_record(&raw) {
            Ok(list) => {
                log::info!(
                    "Loaded list {} with {} boxes ({} opens)",
                    list.id,
                    list.items.len(),
                    list.total_opens
                );
                list
            }
            Err(e) => {
                e.report();
                default
            }
        }
    }

    /// 覆盖写入记录
    pub fn save(&self, key: &str, list: &BoxList) -> AppResult<()> {
        let encoded = encode_record(list)?;
        self.store.write(key, &encoded)
    }

    /// 删除记录（仅硬重置使用）
    pub fn clear(&self, key: &str) -> AppResult<()> {
        self.store.remove(key)?;
        log::info!("Cleared persisted record {key}");
        Ok(())
    }
}

/// 解析记录：先按版本执行迁移，再反序列化并修复不变量
pub fn decode_record(raw: &str) -> AppResult<BoxList> {
    let mut value: Value = serde_json::from_str(raw).map_err(corrupt)?;
    let applied = Migrator::up(&mut value).map_err(|e| corrupt(format!("{e:#}")))?;
    if applied > 0 {
        log::info!("Upgraded persisted record through {applied} migration(s)");
    }

    let mut list: BoxList = serde_json::from_value(value).map_err(corrupt)?;
    if list.normalize() {
        log::warn!("Persisted record {} had inconsistent draw state, repaired", list.id);
    }
    Ok(list)
}

fn corrupt(e: impl std::fmt::Display) -> AppError {
    AppError::PersistenceCorruption(e.to_string())
}

/// 序列化记录，并写入当前版本号
pub fn encode_record(list: &BoxList) -> AppResult<String> {
    let mut value = serde_json::to_value(list)?;
    if let Some(object) = value.as_object_mut() {
        object.insert(
            SCHEMA_VERSION_FIELD.to_string(),
            Value::from(Migrator::latest_version()),
        );
    }
    Ok(serde_json::to_string_pretty(&value)?)
}
