//! 块句柄 - RAII 风格的块监护
//!
//! [`BlockGuard`] 持有一个已检出的块，离开作用域时自动归还给同步器。
//! 所有退出路径（包括 panic 展开）都会归还，持有权不会泄漏。

use crate::block::Block;
use crate::error::Result;
use crate::raster::Raster;
use crate::sync::Synchronizer;
use crate::types::BlockId;

/// 块句柄
///
/// 由 [`Synchronizer::checkout`]、[`Synchronizer::try_checkout`] 或
/// [`Synchronizer::lock_block`] 创建：
/// - 获取时从栅格载入数据（阻塞检出会等待块可用）
/// - 在持有期间，读写策略下其他线程无法检出同一块
/// - 修改时自动标记为脏
/// - 丢弃时归还块，脏数据写回栅格
///
/// # 示例
///
/// ```rust,ignore
/// let mut guard = sync.lock_block(BlockId(0))?;
/// guard.with_data_mut(|data| {
///     for v in data.iter_mut() {
///         *v += 1.0;
///     }
/// });
/// // guard 超出作用域时自动归还
/// ```
pub struct BlockGuard<'a, R: Raster> {
    /// 同步器引用
    sync: &'a Synchronizer<R>,
    /// 持有的块（释放后为 None）
    block: Option<Block<R::Sample>>,
}

impl<'a, R: Raster> BlockGuard<'a, R> {
    pub(crate) fn new(sync: &'a Synchronizer<R>, block: Block<R::Sample>) -> Self {
        Self {
            sync,
            block: Some(block),
        }
    }

    pub(crate) fn synchronizer(&self) -> &'a Synchronizer<R> {
        self.sync
    }

    /// 块 ID
    pub fn id(&self) -> BlockId {
        self.block().id()
    }

    /// 只读访问块
    pub fn block(&self) -> &Block<R::Sample> {
        // 只有 release/drop 会取走块，二者都消费或终结 guard
        match &self.block {
            Some(block) => block,
            None => unreachable!("block guard used after release"),
        }
    }

    /// 按栅格坐标读取（坐标不在块内时返回 None）
    pub fn get(&self, col: usize, row: usize) -> Option<R::Sample> {
        let block = self.block();
        block.offset_of(col, row).map(|offset| block.get(offset))
    }

    /// 按栅格坐标写入，返回坐标是否在块内
    pub fn set(&mut self, col: usize, row: usize, value: R::Sample) -> bool {
        let block = self.block_mut();
        match block.offset_of(col, row) {
            Some(offset) => {
                block.set(offset, value);
                true
            }
            None => false,
        }
    }

    /// 通过闭包只读访问块数据
    pub fn with_data<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&[R::Sample]) -> T,
    {
        f(self.block().as_slice())
    }

    /// 通过闭包修改块数据，自动标记为脏
    pub fn with_data_mut<F, T>(&mut self, f: F) -> T
    where
        F: FnOnce(&mut [R::Sample]) -> T,
    {
        f(self.block_mut().as_mut_slice())
    }

    /// 手动归还（消费 self），返回写回的结果
    ///
    /// 通常不需要手动调用，Drop 会自动处理，但 Drop 只能记录错误。
    pub fn release(mut self) -> Result<()> {
        self.do_release()
    }

    fn block_mut(&mut self) -> &mut Block<R::Sample> {
        match &mut self.block {
            Some(block) => block,
            None => unreachable!("block guard used after release"),
        }
    }

    fn do_release(&mut self) -> Result<()> {
        match self.block.take() {
            Some(block) => {
                log::trace!("[GUARD] releasing {}", block.id());
                self.sync.checkin_block(block)
            }
            None => Ok(()),
        }
    }
}

impl<'a, R: Raster> core::fmt::Debug for BlockGuard<'a, R> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BlockGuard").field("block", &self.block).finish()
    }
}

/// 实现 Drop trait，自动归还块
impl<'a, R: Raster> Drop for BlockGuard<'a, R> {
    fn drop(&mut self) {
        if let Err(e) = self.do_release() {
            log::error!("[GUARD] checkin failed on drop: {}", e);
        }
    }
}
