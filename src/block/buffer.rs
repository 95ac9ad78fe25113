//! 块数据结构
//!
//! 一个块是某个 [`BlockId`] 覆盖的全部样本在内存中的稠密副本。

use crate::types::{AccessorId, BlockId};
use bitflags::bitflags;
use core::ops::Range;

bitflags! {
    /// 块状态标志
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct BlockFlags: u8 {
        /// 数据已从栅格载入（有效）
        const UPTODATE = 0x01;
        /// 载入后被修改过（脏）
        const DIRTY    = 0x02;
        /// 只读策略下的共享副本
        const SHARED   = 0x04;
    }
}

/// 已检出的块
///
/// 块只能由同步器在检出时创建，对外总是包在 [`BlockGuard`](super::BlockGuard)
/// 或访问器缓存中，离开时归还给同步器。
/// 它没有实现 `Clone`：持有一个 `Block` 就证明持有者拥有该块的监护权
/// （读写策略下是排他的）。
///
/// 样本按行优先排列，偏移为 `(row - first_row) * cols + col`。
pub struct Block<T> {
    /// 块 ID
    id: BlockId,
    /// 持有者
    owner: AccessorId,
    /// 所在波段
    band: usize,
    /// 覆盖的行范围
    rows: Range<usize>,
    /// 列数
    cols: usize,
    /// 样本数据
    data: Vec<T>,
    /// 状态标志
    flags: BlockFlags,
}

impl<T: Copy> Block<T> {
    /// 由同步器在载入完成后创建
    pub(crate) fn new(
        id: BlockId,
        owner: AccessorId,
        band: usize,
        rows: Range<usize>,
        cols: usize,
        data: Vec<T>,
        shared: bool,
    ) -> Self {
        debug_assert_eq!(data.len(), rows.len() * cols);
        let mut flags = BlockFlags::UPTODATE;
        if shared {
            flags.insert(BlockFlags::SHARED);
        }
        Self {
            id,
            owner,
            band,
            rows,
            cols,
            data,
            flags,
        }
    }

    /// 块 ID
    pub fn id(&self) -> BlockId {
        self.id
    }

    /// 持有者
    pub fn owner(&self) -> AccessorId {
        self.owner
    }

    /// 所在波段
    pub fn band(&self) -> usize {
        self.band
    }

    /// 覆盖的行范围
    pub fn row_range(&self) -> Range<usize> {
        self.rows.clone()
    }

    /// 列数
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// 样本数
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// 是否不含样本
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// 状态标志
    pub fn flags(&self) -> BlockFlags {
        self.flags
    }

    /// 是否被修改过
    pub fn is_dirty(&self) -> bool {
        self.flags.contains(BlockFlags::DIRTY)
    }

    /// 是否是只读共享副本
    pub fn is_shared(&self) -> bool {
        self.flags.contains(BlockFlags::SHARED)
    }

    /// 是否包含栅格坐标 `(col, row)`
    pub fn covers(&self, col: usize, row: usize) -> bool {
        col < self.cols && self.rows.contains(&row)
    }

    /// 栅格坐标对应的块内偏移
    pub fn offset_of(&self, col: usize, row: usize) -> Option<usize> {
        if self.covers(col, row) {
            Some((row - self.rows.start) * self.cols + col)
        } else {
            None
        }
    }

    /// 按块内偏移读取
    ///
    /// 偏移由分区定位得到，越界时 panic。
    pub(crate) fn get(&self, offset: usize) -> T {
        self.data[offset]
    }

    /// 按块内偏移写入，并标记为脏
    pub(crate) fn set(&mut self, offset: usize, value: T) {
        self.data[offset] = value;
        self.mark_dirty();
    }

    /// 只读访问全部样本
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// 可写访问全部样本，并标记为脏
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.mark_dirty();
        &mut self.data
    }

    /// 标记为脏（已修改）
    pub fn mark_dirty(&mut self) {
        self.flags.insert(BlockFlags::DIRTY);
    }
}

impl<T> core::fmt::Debug for Block<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Block")
            .field("id", &self.id)
            .field("owner", &self.owner)
            .field("band", &self.band)
            .field("rows", &self.rows)
            .field("data_len", &self.data.len())
            .field("flags", &self.flags)
            .finish()
    }
}
