//! 选项打乱能力
//!
//! 随机源作为显式参数注入 QuestionFactory，测试可以固定种子或固定排列

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::warn;

/// 对候选选项文本做一次排列
pub trait OptionShuffler {
    fn shuffle(&mut self, texts: &mut [String]);
}

/// 基于随机数生成器的均匀随机排列
pub struct RandomShuffler<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomShuffler<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomShuffler<StdRng> {
    /// 固定种子，输出可复现
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// 每次运行使用新的不可预测种子
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    /// 有种子时固定，否则取系统熵
    pub fn from_seed_option(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }
}

impl<R: Rng> OptionShuffler for RandomShuffler<R> {
    fn shuffle(&mut self, texts: &mut [String]) {
        texts.shuffle(&mut self.rng);
    }
}

/// 按给定下标排列，`order[i]` 为第 i 个位置取用的原下标
///
/// 下标必须是 `0..len` 的一个排列
#[derive(Debug, Clone)]
pub struct FixedPermutation {
    order: Vec<usize>,
}

impl FixedPermutation {
    /// `order` 不是 `0..len` 的排列（下标越界或重复）时返回 None
    pub fn new(order: Vec<usize>) -> Option<Self> {
        let mut seen = vec![false; order.len()];
        for &from in &order {
            match seen.get_mut(from) {
                Some(slot) if !*slot => *slot = true,
                _ => return None,
            }
        }
        Some(Self { order })
    }

    /// 不改变顺序
    pub fn identity(len: usize) -> Self {
        Self {
            order: (0..len).collect(),
        }
    }
}

impl OptionShuffler for FixedPermutation {
    /// 长度与排列不一致时保持原顺序
    fn shuffle(&mut self, texts: &mut [String]) {
        if self.order.len() != texts.len() {
            warn!(
                "固定排列长度 {} 与选项数 {} 不一致，保持原顺序",
                self.order.len(),
                texts.len()
            );
            return;
        }
        let original = texts.to_vec();
        for (slot, &from) in texts.iter_mut().zip(&self.order) {
            *slot = original[from].clone();
        }
    }
}
