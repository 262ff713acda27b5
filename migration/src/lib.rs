//! 持久化记录的版本迁移
//!
//! 每个迁移对应一个模块，按时间顺序登记在 [`Migrator::migrations`] 中。
//! 记录中的 `schemaVersion` 表示已经应用过的迁移数量，缺失时视为 0（版本化之前写入的记录）。

pub use serde_json::{Map, Value};

use anyhow::{Result, bail};

mod m20250601_000001_initial;
mod m20250612_000001_add_remove_items_flag;
mod m20250620_000001_add_draw_state;

/// 记录中保存版本号的字段名
pub const SCHEMA_VERSION_FIELD: &str = "schemaVersion";

/// 迁移期间对原始 JSON 记录的访问封装
pub struct RecordManager<'a> {
    record: &'a mut Map<String, Value>,
}

impl<'a> RecordManager<'a> {
    pub fn new(record: &'a mut Map<String, Value>) -> Self {
        Self { record }
    }

    /// 字段存在且不为 null
    pub fn has_field(&self, name: &str) -> bool {
        !matches!(self.record.get(name), None | Some(Value::Null))
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.record.get(name)
    }

    /// 字段缺失（或为 null）时写入默认值，返回是否写入
    pub fn add_field_default(&mut self, name: &str, default: Value) -> bool {
        if self.has_field(name) {
            return false;
        }
        self.record.insert(name.to_string(), default);
        true
    }
}

pub trait MigrationTrait {
    fn name(&self) -> &'static str;

    fn up(&self, manager: &mut RecordManager<'_>) -> Result<()>;
}

pub trait MigratorTrait {
    fn migrations() -> Vec<Box<dyn MigrationTrait>>;

    /// 当前代码写出的记录版本
    fn latest_version() -> u32 {
        Self::migrations().len() as u32
    }

    /// 读取记录中的版本号（缺失为 0）
    fn version_of(record: &Value) -> Result<u32> {
        match record.get(SCHEMA_VERSION_FIELD) {
            None | Some(Value::Null) => Ok(0),
            Some(v) => match v.as_u64().and_then(|n| u32::try_from(n).ok()) {
                Some(n) => Ok(n),
                None => bail!("invalid {SCHEMA_VERSION_FIELD}: {v}"),
            },
        }
    }

    /// 依次应用尚未执行的迁移，返回本次应用的数量
    fn up(record: &mut Value) -> Result<usize> {
        let current = Self::version_of(record)? as usize;
        let migrations = Self::migrations();
        if current > migrations.len() {
            bail!(
                "record schema version {} is newer than supported version {}",
                current,
                migrations.len()
            );
        }

        let Some(object) = record.as_object_mut() else {
            bail!("persisted record is not a JSON object");
        };

        let mut applied = 0;
        for (index, migration) in migrations.iter().enumerate().skip(current) {
            let mut manager = RecordManager::new(object);
            migration.up(&mut manager)?;
            object.insert(SCHEMA_VERSION_FIELD.to_string(), Value::from(index as u32 + 1));
            log::debug!("Applied record migration {}", migration.name());
            applied += 1;
        }
        Ok(applied)
    }
}

pub struct Migrator;

impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250601_000001_initial::Migration),
            Box::new(m20250612_000001_add_remove_items_flag::Migration),
            Box::new(m20250620_000001_add_draw_state::Migration),
        ]
    }
}
