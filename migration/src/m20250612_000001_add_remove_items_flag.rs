use crate::{MigrationTrait, RecordManager};
use anyhow::Result;
use serde_json::Value;

/// removeItemsFromList 是后加的字段，旧记录按“抽中即移除”处理
pub struct Migration;

impl MigrationTrait for Migration {
    fn name(&self) -> &'static str {
        "m20250612_000001_add_remove_items_flag"
    }

    fn up(&self, manager: &mut RecordManager<'_>) -> Result<()> {
        manager.add_field_default("removeItemsFromList", Value::Bool(true));
        Ok(())
    }
}
