//! 栅格同步器
//!
//! 每个被包装的栅格对应一个同步器，它是并发控制的唯一来源：
//! - 把栅格划分为块（见 [`BlockLayout`]）
//! - 维护检出表：每个块的持有者和等待队列
//! - 是唯一直接访问栅格的组件，所有读写都发生在 `checkout`/`checkin` 内
//!
//! # 锁的层次
//!
//! 同步器内部有两把锁：
//!
//! 1. `table` - 保护检出表，只在修改持有关系时短暂持有
//! 2. `raster` - 串行化对栅格的访问，每次只覆盖一个块的拷贝
//!
//! 两把锁从不同时持有。载入在取得持有权之后进行，写回在释放持有权之前进行，
//! 因此同一块的前后两个持有者之间存在 happens-before 关系：
//! 后一个持有者看到的正是前一个持有者留下的状态。

use super::config::SyncConfig;
use super::table::{Acquire, CheckoutTable, Release};
use crate::block::{Block, BlockGuard, BlockLayout};
use crate::error::{Error, ErrorKind, Result};
use crate::raster::Raster;
use crate::types::{AccessPolicy, AccessorId, BlockId};
use core::sync::atomic::{AtomicU64, Ordering};
use parking_lot::Mutex;

/// 同步器统计信息
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncStats {
    /// 成功检出次数
    pub checkouts: u64,
    /// 成功归还次数
    pub checkins: u64,
    /// 检出时块已被占用的次数（包括非阻塞检出被拒绝）
    pub contended: u64,
    /// 归还时直接移交给等待者的次数
    pub handoffs: u64,
    /// 从栅格载入块的次数
    pub loads: u64,
    /// 写回栅格的次数
    pub writebacks: u64,
}

#[derive(Debug, Default)]
struct Counters {
    checkouts: AtomicU64,
    checkins: AtomicU64,
    contended: AtomicU64,
    handoffs: AtomicU64,
    loads: AtomicU64,
    writebacks: AtomicU64,
}

impl Counters {
    fn bump(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    fn snapshot(&self) -> SyncStats {
        SyncStats {
            checkouts: self.checkouts.load(Ordering::Relaxed),
            checkins: self.checkins.load(Ordering::Relaxed),
            contended: self.contended.load(Ordering::Relaxed),
            handoffs: self.handoffs.load(Ordering::Relaxed),
            loads: self.loads.load(Ordering::Relaxed),
            writebacks: self.writebacks.load(Ordering::Relaxed),
        }
    }
}

/// 栅格同步器
///
/// 通过 `Arc` 在访问器之间共享。栅格本身不需要是线程安全的，
/// 只需要 `Send`：同步器保证同一时刻只有一个线程访问它。
///
/// # 示例
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use rastersync::{AccessPolicy, MemoryRaster, Synchronizer, SyncedAccessor};
///
/// let raster = MemoryRaster::<f64>::new(512, 512, 3);
/// let sync = Arc::new(Synchronizer::new(raster, AccessPolicy::ReadWrite)?);
///
/// let mut accessor = SyncedAccessor::new(Arc::clone(&sync), 2)?;
/// let v = accessor.get_value(10, 20, 0)?;
/// accessor.set_value(10, 20, 0, v + 1.0)?;
/// drop(accessor); // 归还所有块
///
/// let raster = Arc::try_unwrap(sync).ok().unwrap().into_raster();
/// ```
pub struct Synchronizer<R: Raster> {
    /// 被包装的栅格
    raster: Mutex<R>,
    /// 块分区
    layout: BlockLayout,
    /// 访问策略
    policy: AccessPolicy,
    /// 检出表
    table: Mutex<CheckoutTable>,
    /// 下一个访问器 ID
    next_accessor: AtomicU64,
    /// 统计计数
    counters: Counters,
}

impl<R: Raster> Synchronizer<R> {
    /// 使用默认分区创建同步器
    ///
    /// 栅格的行、列或波段数为零时返回 `InvalidConstruction`。
    pub fn new(raster: R, policy: AccessPolicy) -> Result<Self> {
        Self::with_config(raster, SyncConfig::default().with_policy(policy))
    }

    /// 使用给定配置创建同步器
    pub fn with_config(raster: R, config: SyncConfig) -> Result<Self> {
        let layout = BlockLayout::new(
            raster.rows(),
            raster.cols(),
            raster.bands(),
            config.blocks_per_band,
        )?;

        log::debug!(
            "[SYNC] new {}x{}x{} raster, policy={:?}, {} blocks ({} rows each)",
            layout.rows(),
            layout.cols(),
            layout.bands(),
            config.policy,
            layout.block_count(),
            layout.rows_per_block()
        );

        Ok(Self {
            raster: Mutex::new(raster),
            layout,
            policy: config.policy,
            table: Mutex::new(CheckoutTable::new()),
            next_accessor: AtomicU64::new(1),
            counters: Counters::default(),
        })
    }

    /// 块分区
    pub fn layout(&self) -> &BlockLayout {
        &self.layout
    }

    /// 访问策略
    pub fn policy(&self) -> AccessPolicy {
        self.policy
    }

    /// 分配新的访问器 ID
    ///
    /// 同步器关闭后返回 `Disposed`。
    pub fn register(&self) -> Result<AccessorId> {
        if self.table.lock().is_closed() {
            return Err(Error::new(ErrorKind::Disposed, "Synchronizer has been closed"));
        }
        Ok(AccessorId(self.next_accessor.fetch_add(1, Ordering::Relaxed)))
    }

    /// 检出块（阻塞）
    ///
    /// - 块空闲：载入数据并把 `requester` 记为持有者
    /// - 块被其他访问器持有：挂起当前线程，直到持有者归还并把块移交过来
    /// - 只读策略：从不阻塞，返回共享副本
    ///
    /// 返回的句柄在离开作用域时自动归还块（包括 `?` 提前返回和 panic 展开），
    /// 也可以通过 [`Synchronizer::checkin`] 或 [`BlockGuard::release`] 显式归还。
    ///
    /// # 错误
    ///
    /// - `InvalidBlock` - 块 ID 不属于分区
    /// - `OwnershipViolation` - `requester` 已经持有该块
    /// - `Disposed` - 同步器已关闭（包括等待期间被关闭）
    pub fn checkout(&self, id: BlockId, requester: AccessorId) -> Result<BlockGuard<'_, R>> {
        let block = self.checkout_block(id, requester)?;
        Ok(BlockGuard::new(self, block))
    }

    /// 检出块（非阻塞）
    ///
    /// 块被其他访问器持有时立即返回 `Busy`，不进入等待队列。
    pub fn try_checkout(&self, id: BlockId, requester: AccessorId) -> Result<BlockGuard<'_, R>> {
        let block = self.try_checkout_block(id, requester)?;
        Ok(BlockGuard::new(self, block))
    }

    /// 归还句柄持有的块，返回写回的结果
    ///
    /// 句柄必须来自本同步器，否则返回 `OwnershipViolation`
    /// （此时句柄仍会把块归还给它自己的同步器）。
    pub fn checkin(&self, guard: BlockGuard<'_, R>) -> Result<()> {
        if !core::ptr::eq(guard.synchronizer(), self) {
            return Err(Error::new(
                ErrorKind::OwnershipViolation,
                "Block guard belongs to another synchronizer",
            ));
        }
        guard.release()
    }

    /// 检出块（阻塞），返回裸块
    ///
    /// 调用者负责通过 [`Synchronizer::checkin_block`] 归还。
    pub(crate) fn checkout_block(&self, id: BlockId, requester: AccessorId) -> Result<Block<R::Sample>> {
        self.layout.validate(id)?;
        if !self.policy.is_exclusive() {
            return self.checkout_shared(id, requester);
        }

        {
            let mut table = self.table.lock();
            if table.is_closed() {
                return Err(Error::new(ErrorKind::Disposed, "Synchronizer has been closed"));
            }

            match table.try_acquire(id, requester)? {
                Acquire::Granted => {
                    log::trace!("[SYNC] checkout {} by {} (free)", id, requester);
                }
                Acquire::Busy(owner) => {
                    Counters::bump(&self.counters.contended);
                    let signal = table.enqueue(id, requester);
                    log::debug!(
                        "[SYNC] checkout {} by {} blocked, held by {} ({} waiting)",
                        id,
                        requester,
                        owner,
                        table.waiting_on(id)
                    );

                    loop {
                        signal.wait(&mut table);
                        if table.is_owner(id, requester) {
                            break;
                        }
                        if table.is_closed() {
                            table.cancel_wait(id, requester);
                            return Err(Error::new(
                                ErrorKind::Disposed,
                                "Synchronizer closed while waiting for block",
                            ));
                        }
                    }
                    log::trace!("[SYNC] checkout {} by {} (handed off)", id, requester);
                }
            }
        }

        self.load(id, requester, false)
    }

    /// 检出块（非阻塞），返回裸块
    pub(crate) fn try_checkout_block(&self, id: BlockId, requester: AccessorId) -> Result<Block<R::Sample>> {
        self.layout.validate(id)?;
        if !self.policy.is_exclusive() {
            return self.checkout_shared(id, requester);
        }

        {
            let mut table = self.table.lock();
            if table.is_closed() {
                return Err(Error::new(ErrorKind::Disposed, "Synchronizer has been closed"));
            }
            if let Acquire::Busy(owner) = table.try_acquire(id, requester)? {
                Counters::bump(&self.counters.contended);
                log::trace!("[SYNC] try_checkout {} by {} refused, held by {}", id, requester, owner);
                return Err(Error::new(ErrorKind::Busy, "Block is checked out by another accessor"));
            }
        }

        self.load(id, requester, false)
    }

    /// 检出块并包装为 RAII 句柄
    ///
    /// 句柄使用一次性的访问器 ID，离开作用域时自动归还。
    pub fn lock_block(&self, id: BlockId) -> Result<BlockGuard<'_, R>> {
        let requester = self.register()?;
        self.checkout(id, requester)
    }

    /// 归还裸块
    ///
    /// 块为脏时先把数据写回栅格（恰好覆盖块的行范围），再释放持有权；
    /// 如果有等待者，持有权直接移交给队首的等待者。
    ///
    /// 写回失败时仍然释放持有权并返回错误，避免等待者永远挂起。
    ///
    /// # 错误
    ///
    /// - `InvalidBlock` - 块 ID 不属于分区
    /// - `OwnershipViolation` - 调用者不是块的持有者
    /// - `PermissionDenied` - 只读共享副本被修改过
    pub(crate) fn checkin_block(&self, block: Block<R::Sample>) -> Result<()> {
        let id = block.id();
        let who = block.owner();
        self.layout.validate(id)?;

        if block.is_shared() {
            self.table.lock().remove_reader(id, who)?;
            Counters::bump(&self.counters.checkins);
            if block.is_dirty() {
                log::warn!("[SYNC] shared block {} modified by {}, changes dropped", id, who);
                return Err(Error::new(
                    ErrorKind::PermissionDenied,
                    "Read-only block was modified",
                ));
            }
            log::trace!("[SYNC] checkin {} by {} (shared)", id, who);
            return Ok(());
        }

        if !self.table.lock().is_owner(id, who) {
            return Err(Error::new(
                ErrorKind::OwnershipViolation,
                "Block is not checked out by the caller",
            ));
        }

        let flushed = if block.is_dirty() {
            let result = self.raster.lock().write_rows(block.band(), block.row_range(), block.as_slice());
            if result.is_ok() {
                Counters::bump(&self.counters.writebacks);
                log::debug!("[SYNC] wrote back {} ({} samples)", id, block.len());
            }
            result
        } else {
            Ok(())
        };

        match self.table.lock().release(id, who)? {
            Release::Freed => log::trace!("[SYNC] checkin {} by {} (freed)", id, who),
            Release::HandedOff(next) => {
                Counters::bump(&self.counters.handoffs);
                log::debug!("[SYNC] checkin {} by {}, handed off to {}", id, who, next);
            }
        }
        Counters::bump(&self.counters.checkins);

        if let Err(e) = &flushed {
            log::error!("[SYNC] write back of {} failed: {}", id, e);
        }
        flushed
    }

    /// 关闭同步器
    ///
    /// 之后的 `register`/`checkout` 返回 `Disposed`，正在等待的检出也以 `Disposed` 返回。
    /// 归还仍然有效，已检出的块可以正常写回。
    pub fn close(&self) {
        let mut table = self.table.lock();
        let held = table.checked_out();
        if held > 0 {
            log::warn!("[SYNC] closing with {} blocks still checked out", held);
        }
        table.close();
        log::debug!("[SYNC] closed");
    }

    /// 是否已关闭
    pub fn is_closed(&self) -> bool {
        self.table.lock().is_closed()
    }

    /// 块的排他持有者
    pub fn owner_of(&self, id: BlockId) -> Option<AccessorId> {
        self.table.lock().owner_of(id)
    }

    /// 块的共享持有者数量（只读策略）
    pub fn readers_of(&self, id: BlockId) -> usize {
        self.table.lock().readers_of(id)
    }

    /// 在块上等待的访问器数量
    pub fn waiting_on(&self, id: BlockId) -> usize {
        self.table.lock().waiting_on(id)
    }

    /// 当前被检出的块数
    pub fn checked_out(&self) -> usize {
        self.table.lock().checked_out()
    }

    /// 统计信息
    pub fn stats(&self) -> SyncStats {
        self.counters.snapshot()
    }

    /// 取回被包装的栅格
    ///
    /// 仍有块未归还时，这些块的修改会丢失，这里只记录警告。
    pub fn into_raster(self) -> R {
        let held = self.table.lock().checked_out();
        if held > 0 {
            log::warn!("[SYNC] into_raster with {} blocks still checked out", held);
        }
        self.raster.into_inner()
    }

    fn checkout_shared(&self, id: BlockId, requester: AccessorId) -> Result<Block<R::Sample>> {
        {
            let mut table = self.table.lock();
            if table.is_closed() {
                return Err(Error::new(ErrorKind::Disposed, "Synchronizer has been closed"));
            }
            table.add_reader(id, requester);
        }
        log::trace!("[SYNC] checkout {} by {} (shared)", id, requester);
        self.load(id, requester, true)
    }

    /// 从栅格载入块，调用者已取得持有权
    ///
    /// 载入失败时归还持有权。
    fn load(&self, id: BlockId, requester: AccessorId, shared: bool) -> Result<Block<R::Sample>> {
        let band = self.layout.band_of(id);
        let rows = self.layout.row_range(id);
        let mut data: Vec<R::Sample> = vec![Default::default(); self.layout.block_len(id)];

        let result = self.raster.lock().read_rows(band, rows.clone(), &mut data);
        if let Err(e) = result {
            log::error!("[SYNC] loading {} failed: {}", id, e);
            let mut table = self.table.lock();
            let released = if shared {
                table.remove_reader(id, requester)
            } else {
                table.release(id, requester).map(|_| ())
            };
            if let Err(release_err) = released {
                log::error!("[SYNC] releasing {} after failed load: {}", id, release_err);
            }
            return Err(e);
        }

        Counters::bump(&self.counters.loads);
        Counters::bump(&self.counters.checkouts);
        log::debug!("[SYNC] loaded {} rows {:?} band {} for {}", id, rows, band, requester);
        Ok(Block::new(id, requester, band, rows, self.layout.cols(), data, shared))
    }
}

impl<R: Raster> core::fmt::Debug for Synchronizer<R> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Synchronizer")
            .field("layout", &self.layout)
            .field("policy", &self.policy)
            .field("checked_out", &self.checked_out())
            .field("stats", &self.stats())
            .finish()
    }
}
