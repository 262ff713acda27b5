use chrono::Utc;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::{BoxItem, BoxItemDraft, BoxList, OpenResult, PoolStats, Rarity};
use crate::services::draw_engine::{self, EntropySource, SeededEntropy, ThreadEntropy};
use crate::services::draw_state;
use crate::services::pool_store::{self, MetadataUpdate, PoolStore};
use crate::storage::{PersistenceGateway, open_store};

/// 面向界面层的入口：条目管理、抽取、重置与统计
///
/// 每个修改操作都在列表副本上执行，持久化成功后才替换当前状态；
/// 写入失败时返回错误，内存中的状态保持不变。
pub struct LootBoxService {
    store: PoolStore,
    gateway: PersistenceGateway,
    entropy: Box<dyn EntropySource>,
    storage_key: String,
}

impl LootBoxService {
    /// 从存储中加载列表（没有或损坏时使用默认列表）
    pub fn new(
        gateway: PersistenceGateway,
        storage_key: impl Into<String>,
        entropy: Box<dyn EntropySource>,
    ) -> Self {
        let storage_key = storage_key.into();
        let list = gateway.load(&storage_key, BoxList::default());
        Self {
            store: PoolStore::new(list),
            gateway,
            entropy,
            storage_key,
        }
    }

    pub fn from_config(config: &Config) -> AppResult<Self> {
        let gateway = PersistenceGateway::new(open_store(&config.storage)?);
        let entropy: Box<dyn EntropySource> = match config.draw.rng_seed {
            Some(seed) => {
                log::info!("Using seeded entropy source ({seed})");
                Box::new(SeededEntropy::new(seed))
            }
            None => Box::new(ThreadEntropy),
        };
        Ok(Self::new(gateway, config.storage.key.clone(), entropy))
    }

    pub fn list(&self) -> &BoxList {
        self.store.list()
    }

    pub fn history(&self) -> &[BoxItem] {
        &self.store.list().history
    }

    pub fn available_items(&self) -> Vec<&BoxItem> {
        let list = self.store.list();
        draw_state::available_items(
            &list.items,
            &list.drawn_item_ids,
            list.remove_items_from_list,
        )
    }

    pub fn stats(&self) -> PoolStats {
        draw_state::stats(self.store.list())
    }

    /// 批量添加条目，超过 MAX_BOXES 时整批拒绝
    pub fn add_items(&mut self, drafts: Vec<BoxItemDraft>) -> AppResult<Vec<BoxItem>> {
        self.store.ensure_capacity(drafts.len())?;
        if drafts.is_empty() {
            return Ok(Vec::new());
        }
        let created = self.transact(|store, _| store.add_items(drafts, Utc::now()))?;
        log::info!(
            "Added {} boxes, list now has {}",
            created.len(),
            self.store.list().items.len()
        );
        Ok(created)
    }

    /// 添加 start..=end 的数字条目
    pub fn add_number_range(
        &mut self,
        start: i64,
        end: i64,
        rarity: Rarity,
        percentage: f64,
    ) -> AppResult<Vec<BoxItem>> {
        let count = pool_store::range_len(start, end)?;
        let count = usize::try_from(count).map_err(|_| {
            AppError::ValidationError(format!("Range {start}..={end} is too large"))
        })?;
        self.store.ensure_capacity(count)?;
        let drafts = pool_store::number_range_drafts(start, end, rarity, percentage)?;
        self.add_items(drafts)
    }

    /// 删除条目；不存在时不做任何事（也不写存储）
    pub fn remove_item(&mut self, id: &str) -> AppResult<Option<BoxItem>> {
        if !self.store.list().contains_item(id) {
            return Ok(None);
        }
        let removed = self.transact(|store, _| Ok(store.remove_item(id, Utc::now())))?;
        log::info!("Removed box {id}");
        Ok(removed)
    }

    pub fn update_metadata(&mut self, update: MetadataUpdate) -> AppResult<()> {
        self.transact(|store, _| {
            store.update_metadata(update, Utc::now());
            Ok(())
        })
    }

    /// 抽取一次
    ///
    /// 选择、记录与持久化在返回前一次完成；展示层拿到结果后再做动画。
    /// 没有可抽取条目时返回 [`AppError::Exhausted`]，需要重置后再抽。
    pub fn draw(&mut self) -> AppResult<OpenResult> {
        let result = self.transact(|store, entropy| {
            let selected = {
                let list = store.list();
                let available = draw_state::available_items(
                    &list.items,
                    &list.drawn_item_ids,
                    list.remove_items_from_list,
                );
                if available.is_empty() {
                    return Err(AppError::Exhausted);
                }
                draw_engine::select_random_item(&available, entropy)?.clone()
            };

            let now = Utc::now();
            draw_state::commit_draw(store.list_mut(), &selected, now);
            let list = store.list();
            Ok(OpenResult {
                item: selected,
                timestamp: now,
                list_id: list.id.clone(),
                list_name: list.name.clone(),
            })
        })?;

        log::info!(
            "Opened box {} ({}, {:?}), total opens {}",
            result.item.id,
            result.item.identifier,
            result.item.rarity,
            self.store.list().total_opens
        );
        Ok(result)
    }

    /// 软重置：恢复所有条目为可抽取，保留累计开启次数
    pub fn reset(&mut self) -> AppResult<()> {
        self.transact(|store, _| {
            draw_state::reset(store.list_mut(), Utc::now());
            Ok(())
        })?;
        log::info!("Draw state reset");
        Ok(())
    }

    /// 硬重置：删除持久化记录并恢复默认列表
    pub fn hard_reset(&mut self) -> AppResult<()> {
        self.gateway.clear(&self.storage_key)?;
        self.store = PoolStore::new(BoxList::default());
        log::info!("All data erased");
        Ok(())
    }

    fn transact<T, F>(&mut self, op: F) -> AppResult<T>
    where
        F: FnOnce(&mut PoolStore, &mut dyn EntropySource) -> AppResult<T>,
    {
        let mut staged = self.store.clone();
        let output = op(&mut staged, self.entropy.as_mut())?;
        self.gateway.save(&self.storage_key, staged.list())?;
        self.store = staged;
        Ok(output)
    }
}
