use std::collections::HashSet;

use chrono::{DateTime, Utc};
use migration::{Migrator, MigratorTrait};
use serde::{Deserialize, Serialize};

use super::BoxItem;

/// 单个列表最多可容纳的盒子数量
pub const MAX_BOXES: usize = 100;
/// 最近记录保留条数
pub const HISTORY_LIMIT: usize = 10;

pub const DEFAULT_LIST_ID: &str = "1";
pub const DEFAULT_LIST_NAME: &str = "My Box List";
pub const DEFAULT_LIST_DESCRIPTION: &str = "An epic collection of mystery boxes";
pub const DEFAULT_CREATOR_NAME: &str = "Creator";

/// 一个命名的盒子池，连同抽取状态一起持久化
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxList {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub creator_name: String,
    pub items: Vec<BoxItem>,
    /// 为 true 时抽中的条目在重置前不再参与抽取
    #[serde(default = "default_true")]
    pub remove_items_from_list: bool,
    /// 已抽取条目ID（无重复，仅在移除模式下非空）
    #[serde(default)]
    pub drawn_item_ids: Vec<String>,
    /// 最近抽取记录，新的在前，最多 HISTORY_LIMIT 条
    #[serde(default)]
    pub history: Vec<BoxItem>,
    /// 累计开启次数，只有硬重置会清零
    #[serde(default)]
    pub total_opens: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub schema_version: u32,
}

fn default_true() -> bool {
    true
}

impl BoxList {
    pub fn with_defaults(now: DateTime<Utc>) -> Self {
        Self {
            id: DEFAULT_LIST_ID.to_string(),
            name: DEFAULT_LIST_NAME.to_string(),
            description: DEFAULT_LIST_DESCRIPTION.to_string(),
            creator_name: DEFAULT_CREATOR_NAME.to_string(),
            items: Vec::new(),
            remove_items_from_list: true,
            drawn_item_ids: Vec::new(),
            history: Vec::new(),
            total_opens: 0,
            created_at: now,
            updated_at: now,
            schema_version: Migrator::latest_version(),
        }
    }

    pub fn item(&self, id: &str) -> Option<&BoxItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn contains_item(&self, id: &str) -> bool {
        self.item(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// 修复读入记录中违反不变量的部分，返回是否有改动：
    /// 重复ID的条目只保留第一个；已抽取ID去重且必须指向现有条目；
    /// 非移除模式下已抽取集合为空；历史截断到上限。
    pub fn normalize(&mut self) -> bool {
        let before = (
            self.items.len(),
            self.drawn_item_ids.len(),
            self.history.len(),
        );

        let mut seen = HashSet::new();
        self.items.retain(|item| seen.insert(item.id.clone()));

        if self.remove_items_from_list {
            let item_ids: HashSet<&str> = self.items.iter().map(|i| i.id.as_str()).collect();
            let mut kept = HashSet::new();
            self.drawn_item_ids
                .retain(|id| item_ids.contains(id.as_str()) && kept.insert(id.clone()));
        } else {
            self.drawn_item_ids.clear();
        }

        self.history.truncate(HISTORY_LIMIT);

        before
            != (
                self.items.len(),
                self.drawn_item_ids.len(),
                self.history.len(),
            )
    }
}

impl Default for BoxList {
    fn default() -> Self {
        Self::with_defaults(Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BoxItemDraft, IdentifierType, Rarity};

    fn item(id: &str) -> BoxItem {
        BoxItem::from_draft(
            BoxItemDraft::new(id, IdentifierType::Letter, Rarity::Basic, 10.0),
            id.to_string(),
            Utc::now(),
        )
    }

    #[test]
    fn test_defaults() {
        let list = BoxList::default();
        assert_eq!(list.id, DEFAULT_LIST_ID);
        assert_eq!(list.name, DEFAULT_LIST_NAME);
        assert!(list.remove_items_from_list);
        assert!(list.is_empty());
        assert_eq!(list.total_opens, 0);
        assert_eq!(list.created_at, list.updated_at);
    }

    #[test]
    fn test_normalize_prunes_dangling_and_duplicate_ids() {
        let mut list = BoxList::default();
        list.items = vec![item("a"), item("b"), item("a")];
        list.drawn_item_ids = vec!["a".into(), "ghost".into(), "a".into()];
        list.history = (0..15).map(|_| item("b")).collect();

        assert!(list.normalize());
        assert_eq!(list.items.len(), 2);
        assert_eq!(list.drawn_item_ids, vec!["a".to_string()]);
        assert_eq!(list.history.len(), HISTORY_LIMIT);
        assert!(!list.normalize());
    }

    #[test]
    fn test_normalize_clears_drawn_ids_without_removal_policy() {
        let mut list = BoxList::default();
        list.items = vec![item("a")];
        list.remove_items_from_list = false;
        list.drawn_item_ids = vec!["a".into()];

        list.normalize();
        assert!(list.drawn_item_ids.is_empty());
    }

    #[test]
    fn test_serializes_camel_case() {
        let value = serde_json::to_value(BoxList::default()).unwrap();
        assert!(value.get("removeItemsFromList").is_some());
        assert!(value.get("drawnItemIds").is_some());
        assert!(value.get("totalOpens").is_some());
        assert!(value.get("creatorName").is_some());
    }
}
