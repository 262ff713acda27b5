use std::borrow::Borrow;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{AppError, AppResult};
use crate::models::BoxItem;

/// 抽取所用的随机源，可注入以便测试
pub trait EntropySource {
    /// 返回 [0, 1) 区间内的均匀样本
    fn next_uniform(&mut self) -> f64;
}

/// 线程本地随机数生成器（默认）
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadEntropy;

impl EntropySource for ThreadEntropy {
    fn next_uniform(&mut self) -> f64 {
        rand::thread_rng().gen_range(0.0..1.0)
    }
}

/// 固定种子的随机源，同一种子产生相同的抽取序列
#[derive(Debug, Clone)]
pub struct SeededEntropy {
    rng: StdRng,
}

impl SeededEntropy {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl EntropySource for SeededEntropy {
    fn next_uniform(&mut self) -> f64 {
        self.rng.gen_range(0.0..1.0)
    }
}

/// 按给定序列循环返回样本（空序列恒为 0）
#[derive(Debug, Clone)]
pub struct SequenceEntropy {
    samples: Vec<f64>,
    cursor: usize,
}

impl SequenceEntropy {
    pub fn new(samples: Vec<f64>) -> Self {
        Self { samples, cursor: 0 }
    }
}

impl EntropySource for SequenceEntropy {
    fn next_uniform(&mut self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        let sample = self.samples[self.cursor % self.samples.len()];
        self.cursor += 1;
        sample
    }
}

/// 条目的有效权重；损坏数据中的非正数或非有限值按 0 处理
fn effective_weight(item: &BoxItem) -> f64 {
    if item.percentage.is_finite() && item.percentage > 0.0 {
        item.percentage
    } else {
        0.0
    }
}

/// 按权重随机选出一个下标
///
/// 累积权重轮盘：r = u * Σw，按顺序逐个减去权重，第一个使余数 ≤ 0 的条目命中。
/// 浮点误差导致走完仍未命中时，由最后一个正权重条目兜底。
pub fn select_random_index<I: Borrow<BoxItem>>(
    pool: &[I],
    entropy: &mut dyn EntropySource,
) -> AppResult<usize> {
    if pool.is_empty() {
        return Err(AppError::InvalidPool(
            "Cannot draw from an empty pool".into(),
        ));
    }

    let total: f64 = pool.iter().map(|item| effective_weight(item.borrow())).sum();
    if !total.is_finite() || total <= 0.0 {
        return Err(AppError::InvalidPool(format!(
            "Total weight must be positive and finite, got {total}"
        )));
    }

    let sample = entropy.next_uniform();
    let sample = if sample.is_finite() {
        sample.clamp(0.0, 1.0)
    } else {
        0.0
    };

    let mut remainder = sample * total;
    let mut last_positive = None;
    for (index, item) in pool.iter().enumerate() {
        let weight = effective_weight(item.borrow());
        if weight <= 0.0 {
            continue;
        }
        last_positive = Some(index);
        remainder -= weight;
        if remainder <= 0.0 {
            return Ok(index);
        }
    }

    last_positive.ok_or_else(|| AppError::InvalidPool("No item carries a positive weight".into()))
}

/// 按权重随机选出一个条目
pub fn select_random_item<'a, I: Borrow<BoxItem>>(
    pool: &'a [I],
    entropy: &mut dyn EntropySource,
) -> AppResult<&'a BoxItem> {
    let index = select_random_index(pool, entropy)?;
    Ok(pool[index].borrow())
}
