use crate::{MigrationTrait, RecordManager};
use anyhow::{Result, bail};

/// 基线版本：版本化之前写入的记录至少要有 items 数组，否则不是一份盒子列表
pub struct Migration;

impl MigrationTrait for Migration {
    fn name(&self) -> &'static str {
        "m20250601_000001_initial"
    }

    fn up(&self, manager: &mut RecordManager<'_>) -> Result<()> {
        match manager.field("items") {
            Some(items) if items.is_array() => Ok(()),
            Some(other) => bail!("items must be an array, found {other}"),
            None => bail!("record has no items field"),
        }
    }
}
