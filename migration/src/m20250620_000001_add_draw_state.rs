use crate::{MigrationTrait, RecordManager};
use anyhow::Result;
use serde_json::Value;

/// 抽取状态字段：已抽取ID、最近记录、累计开启次数
pub struct Migration;

impl MigrationTrait for Migration {
    fn name(&self) -> &'static str {
        "m20250620_000001_add_draw_state"
    }

    fn up(&self, manager: &mut RecordManager<'_>) -> Result<()> {
        manager.add_field_default("drawnItemIds", Value::Array(Vec::new()));
        manager.add_field_default("history", Value::Array(Vec::new()));
        manager.add_field_default("totalOpens", Value::from(0u64));
        Ok(())
    }
}
