use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::BoxItem;

/// 一次已提交的抽取结果（动画/展示层订阅的就是它）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenResult {
    pub item: BoxItem,
    pub timestamp: DateTime<Utc>,
    pub list_id: String,
    pub list_name: String,
}

/// 列表统计信息
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolStats {
    /// 累计开启次数
    pub total_opens: u64,
    /// 当前可抽取数量
    pub available: usize,
    /// 条目总数
    pub total: usize,
    /// 已抽取数量（移除模式）
    pub drawn: usize,
    pub removal_policy_active: bool,
    /// 没有可抽取的条目（需要重置或添加）
    pub exhausted: bool,
}
