use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::models::{BoxItem, BoxList, HISTORY_LIMIT, PoolStats};

/// 当前可参与抽取的条目
///
/// 移除模式下排除已抽取的条目，否则返回全部条目。抽取引擎只接收这个视图。
pub fn available_items<'a>(
    items: &'a [BoxItem],
    drawn_ids: &[String],
    removal_policy: bool,
) -> Vec<&'a BoxItem> {
    if !removal_policy {
        return items.iter().collect();
    }
    let drawn: HashSet<&str> = drawn_ids.iter().map(String::as_str).collect();
    items
        .iter()
        .filter(|item| !drawn.contains(item.id.as_str()))
        .collect()
}

/// 计算一次抽取后的 (已抽取ID, 最近记录)
pub fn record_draw(
    selected: &BoxItem,
    removal_policy: bool,
    prior_drawn_ids: &[String],
    prior_history: &[BoxItem],
) -> (Vec<String>, Vec<BoxItem>) {
    let mut drawn_ids = prior_drawn_ids.to_vec();
    if removal_policy && !drawn_ids.iter().any(|id| *id == selected.id) {
        drawn_ids.push(selected.id.clone());
    }

    let mut history = Vec::with_capacity(HISTORY_LIMIT);
    history.push(selected.clone());
    history.extend(
        prior_history
            .iter()
            .take(HISTORY_LIMIT.saturating_sub(1))
            .cloned(),
    );

    (drawn_ids, history)
}

/// 把一次已完成的抽取写入列表：更新已抽取集合、历史，开启次数 +1
pub fn commit_draw(list: &mut BoxList, selected: &BoxItem, now: DateTime<Utc>) {
    let (drawn_ids, history) = record_draw(
        selected,
        list.remove_items_from_list,
        &list.drawn_item_ids,
        &list.history,
    );
    list.drawn_item_ids = drawn_ids;
    list.history = history;
    list.total_opens += 1;
    list.updated_at = now;
}

/// 软重置：清空已抽取集合与历史，保留条目和累计开启次数
pub fn reset(list: &mut BoxList, now: DateTime<Utc>) {
    list.drawn_item_ids.clear();
    list.history.clear();
    list.updated_at = now;
}

pub fn stats(list: &BoxList) -> PoolStats {
    let available = available_items(
        &list.items,
        &list.drawn_item_ids,
        list.remove_items_from_list,
    )
    .len();

    PoolStats {
        total_opens: list.total_opens,
        available,
        total: list.items.len(),
        drawn: list.drawn_item_ids.len(),
        removal_policy_active: list.remove_items_from_list,
        exhausted: available == 0,
    }
}
