use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::models::{BoxItem, BoxItemDraft, BoxList, IdentifierType, MAX_BOXES, Rarity};
use crate::utils::generate_item_id;

/// 列表信息编辑请求
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataUpdate {
    pub name: String,
    pub description: String,
    pub creator_name: String,
    pub remove_items_from_list: bool,
}

/// 条目集合与列表元数据，不包含任何抽取逻辑
#[derive(Debug, Clone, PartialEq)]
pub struct PoolStore {
    list: BoxList,
}

impl PoolStore {
    pub fn new(list: BoxList) -> Self {
        Self { list }
    }

    pub fn list(&self) -> &BoxList {
        &self.list
    }

    pub(crate) fn list_mut(&mut self) -> &mut BoxList {
        &mut self.list
    }

    /// 检查再加入 `additional` 个条目后是否超过上限
    pub fn ensure_capacity(&self, additional: usize) -> AppResult<()> {
        let current = self.list.items.len();
        if current.saturating_add(additional) > MAX_BOXES {
            return Err(AppError::ValidationError(format!(
                "Cannot add {additional} boxes: the limit is {MAX_BOXES} and the list already has {current}"
            )));
        }
        Ok(())
    }

    /// 追加条目（按输入顺序），返回新建的条目
    ///
    /// 先校验全部草稿，任一不合法则整批拒绝，列表保持不变。
    /// 上限由调用方通过 [`PoolStore::ensure_capacity`] 预先检查。
    pub fn add_items(
        &mut self,
        drafts: Vec<BoxItemDraft>,
        now: DateTime<Utc>,
    ) -> AppResult<Vec<BoxItem>> {
        let validated = drafts
            .into_iter()
            .map(BoxItemDraft::validate)
            .collect::<AppResult<Vec<_>>>()?;
        if validated.is_empty() {
            return Ok(Vec::new());
        }

        let created: Vec<BoxItem> = validated
            .into_iter()
            .map(|draft| BoxItem::from_draft(draft, generate_item_id(), now))
            .collect();

        self.list.items.extend(created.iter().cloned());
        self.list.updated_at = now;
        Ok(created)
    }

    /// 删除条目；不存在时什么也不做
    ///
    /// 同时从已抽取集合中去掉该ID。
    pub fn remove_item(&mut self, id: &str, now: DateTime<Utc>) -> Option<BoxItem> {
        let position = self.list.items.iter().position(|item| item.id == id)?;
        let removed = self.list.items.remove(position);
        self.list.drawn_item_ids.retain(|drawn| drawn != id);
        self.list.updated_at = now;
        Some(removed)
    }

    /// 替换列表元数据；关闭移除模式时清空已抽取集合
    pub fn update_metadata(&mut self, update: MetadataUpdate, now: DateTime<Utc>) {
        self.list.name = update.name;
        self.list.description = update.description;
        self.list.creator_name = update.creator_name;
        self.list.remove_items_from_list = update.remove_items_from_list;
        if !self.list.remove_items_from_list {
            self.list.drawn_item_ids.clear();
        }
        self.list.updated_at = now;
    }
}

/// 连续数字区间的批量草稿（start..=end）
pub fn number_range_drafts(
    start: i64,
    end: i64,
    rarity: Rarity,
    percentage: f64,
) -> AppResult<Vec<BoxItemDraft>> {
    let count = range_len(start, end)?;
    if count > MAX_BOXES as u64 {
        return Err(AppError::ValidationError(format!(
            "A range of {count} boxes exceeds the limit of {MAX_BOXES}"
        )));
    }

    Ok((start..=end)
        .map(|n| BoxItemDraft::new(n.to_string(), IdentifierType::Number, rarity, percentage))
        .collect())
}

/// 区间包含的数字个数
pub fn range_len(start: i64, end: i64) -> AppResult<u64> {
    if start > end {
        return Err(AppError::ValidationError(format!(
            "Range start {start} must not be greater than end {end}"
        )));
    }
    Ok(end.abs_diff(start).saturating_add(1))
}
