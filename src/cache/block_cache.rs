//! 访问器本地块缓存
//!
//! 每个访问器持有一个容量固定的小缓存，里面是它当前检出的全部块。
//! 缓存只负责记账和 LRU 顺序，不接触同步器：被驱逐的块由调用者负责归还。
//!
//! ```text
//! struct BlockCache<T> {
//!     cache: LruCache<BlockId, Block<T>>,  // O(1)，自动LRU
//!     stats: CacheStats,                   // 统计信息
//! }
//! ```

use crate::block::Block;
use crate::error::{Error, ErrorKind, Result};
use crate::types::BlockId;
use core::num::NonZeroUsize;
use lru::LruCache;

/// 缓存统计信息
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// 总访问次数
    pub total_accesses: u64,
    /// 缓存命中次数
    pub hits: u64,
    /// 缓存未命中次数（每次未命中对应一次检出）
    pub misses: u64,
    /// 因容量不足驱逐的块数
    pub evictions: u64,
    /// 归还时写回的脏块数
    pub writebacks: u64,
}

impl CacheStats {
    /// 计算命中率
    pub fn hit_rate(&self) -> f64 {
        if self.total_accesses == 0 {
            0.0
        } else {
            self.hits as f64 / self.total_accesses as f64
        }
    }
}

/// 访问器本地块缓存
///
/// 1. **自动LRU管理**：
///    - `touch(id)` 命中时把块移到最近使用
///    - `pop_lru()` 取出最久未使用的块
///
/// 2. **所有权清晰**：
///    - 缓存拥有块，块离开缓存时所有权交给调用者
///    - 调用者必须把取出的块归还给同步器
pub struct BlockCache<T> {
    /// LRU缓存核心：管理块的访问顺序
    cache: LruCache<BlockId, Block<T>>,

    /// 统计信息
    stats: CacheStats,
}

impl<T: Copy> BlockCache<T> {
    /// 创建新的块缓存
    ///
    /// # 参数
    ///
    /// * `capacity` - 缓存容量（块数量，blocking factor），至少为 1
    pub fn new(capacity: usize) -> Result<Self> {
        let capacity = NonZeroUsize::new(capacity).ok_or(Error::new(
            ErrorKind::InvalidInput,
            "Cache capacity must be at least 1",
        ))?;
        Ok(Self {
            cache: LruCache::new(capacity),
            stats: CacheStats::default(),
        })
    }

    /// 记录一次访问，返回是否命中
    ///
    /// 命中时块被移到最近使用端。
    pub fn touch(&mut self, id: BlockId) -> bool {
        self.stats.total_accesses += 1;
        if self.cache.get(&id).is_some() {
            self.stats.hits += 1;
            log::trace!("[CACHE] {} HIT", id);
            true
        } else {
            self.stats.misses += 1;
            log::trace!("[CACHE] {} MISS, cache={}/{}", id, self.cache.len(), self.capacity());
            false
        }
    }

    /// 查找块（不改变 LRU 顺序，不计入统计）
    pub fn peek(&self, id: BlockId) -> Option<&Block<T>> {
        self.cache.peek(&id)
    }

    /// 查找块的可变引用（不改变 LRU 顺序，不计入统计）
    pub fn peek_mut(&mut self, id: BlockId) -> Option<&mut Block<T>> {
        self.cache.peek_mut(&id)
    }

    /// 块是否在缓存中
    pub fn contains(&self, id: BlockId) -> bool {
        self.cache.contains(&id)
    }

    /// 插入新检出的块
    ///
    /// 缓存已满时返回被挤出的最久未使用块，调用者必须归还它。
    /// 调用者应保证块不在缓存中。
    pub fn insert(&mut self, block: Block<T>) -> Option<Block<T>> {
        let id = block.id();
        debug_assert!(!self.cache.contains(&id));
        let evicted = self.cache.push(id, block).map(|(_, old)| old);
        if let Some(old) = &evicted {
            self.stats.evictions += 1;
            log::debug!("[CACHE] inserting {} pushed out {}", id, old.id());
        }
        evicted
    }

    /// 驱逐最久未使用的块
    pub fn pop_lru(&mut self) -> Option<Block<T>> {
        let (id, block) = self.cache.pop_lru()?;
        self.stats.evictions += 1;
        log::debug!("[CACHE] evicted {} (dirty={})", id, block.is_dirty());
        Some(block)
    }

    /// 取出全部块（从最久未使用开始）
    pub fn drain(&mut self) -> Vec<Block<T>> {
        let mut blocks = Vec::with_capacity(self.cache.len());
        while let Some((_, block)) = self.cache.pop_lru() {
            blocks.push(block);
        }
        blocks
    }

    /// 记录一次脏块写回
    pub fn record_writeback(&mut self) {
        self.stats.writebacks += 1;
    }

    /// 缓存中的块 ID（从最近使用开始）
    pub fn ids(&self) -> Vec<BlockId> {
        self.cache.iter().map(|(id, _)| *id).collect()
    }

    /// 获取缓存统计信息
    pub fn stats(&self) -> CacheStats {
        self.stats.clone()
    }

    /// 获取缓存容量
    pub fn capacity(&self) -> usize {
        self.cache.cap().get()
    }

    /// 获取当前缓存块数量
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// 检查缓存是否为空
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// 检查缓存是否已满
    pub fn is_full(&self) -> bool {
        self.cache.len() >= self.capacity()
    }

    /// 获取脏块数量
    pub fn dirty_count(&self) -> usize {
        self.cache.iter().filter(|(_, b)| b.is_dirty()).count()
    }
}

impl<T> core::fmt::Debug for BlockCache<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BlockCache")
            .field("capacity", &self.cache.cap())
            .field("len", &self.cache.len())
            .field("stats", &self.stats)
            .finish()
    }
}
