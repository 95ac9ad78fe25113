//! 同步访问器
//!
//! [`SyncedAccessor`] 是每个线程（或每个使用者）持有的轻量门面，
//! 提供与 [`Raster`] 相同的样本级读写接口：
//!
//! ```text
//! get_value(col, row, band)
//!   │
//!   ├─ 定位块: (row, band) -> BlockId
//!   ├─ 块在本地缓存中 -> 直接读写缓存副本（无同步开销）
//!   └─ 未命中:
//!        ├─ 缓存已满 -> 驱逐 LRU 块（脏则写回）并归还给同步器
//!        ├─ try_checkout 成功 -> 放入缓存
//!        └─ 块被占用 -> 先归还自己持有的全部块，再阻塞等待移交
//! ```
//!
//! 线程只在不持有任何块时才会阻塞，因此访问器之间不会形成环路等待。
//!
//! # 原子性
//!
//! 块一旦检出给某个访问器，其他访问器在它归还之前既看不到也改不了这个块。
//! 因此同一线程在一个块内、中间没有发生驱逐的一串 `get_value`/`set_value`
//! 相对于其他线程是原子的；[`SyncedAccessor::update`] 把单个样本的
//! 读-改-写包装成一次调用。
//!
//! 原子性只以单个块为单位。除了 LRU 驱逐，未命中的块被占用时访问器还会
//! 归还自己持有的全部块，所以 `get(A) -> get(B) -> set(A)` 这样跨块的序列中，
//! A 可能在中间被其他访问器修改过。需要跨块一致的计算应自行加锁。

use crate::block::Block;
use crate::cache::{BlockCache, CacheStats};
use crate::error::{Error, ErrorKind, Result};
use crate::raster::Raster;
use crate::sync::Synchronizer;
use crate::types::{AccessorId, BlockId};
use std::sync::{Arc, Weak};

/// 同步访问器
///
/// 通过共享的 [`Synchronizer`] 访问栅格。每个访问器有自己的块缓存，
/// 容量即 blocking factor。访问器被丢弃时归还全部缓存块，
/// 脏数据在同步器把块标记为空闲之前写回栅格。
///
/// 任何一次未命中都可能让已缓存的块被归还（容量驱逐，或者目标块被占用时
/// 归还全部持有），因此读写的原子性只覆盖同一个块、且中间没有未命中的访问。
///
/// # 示例
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use std::thread;
///
/// let sync = Arc::new(Synchronizer::new(raster, AccessPolicy::ReadWrite)?);
/// thread::scope(|s| {
///     for _ in 0..4 {
///         s.spawn(|| {
///             let mut accessor = SyncedAccessor::new(Arc::clone(&sync), 2)?;
///             accessor.update(0, 0, 0, |v| v + 1.0)?;
///             Ok::<_, Error>(())
///         });
///     }
/// });
/// ```
pub struct SyncedAccessor<R: Raster> {
    /// 共享的同步器
    sync: Arc<Synchronizer<R>>,
    /// 本访问器的身份
    id: AccessorId,
    /// 当前检出的块
    cache: BlockCache<R::Sample>,
}

impl<R: Raster> SyncedAccessor<R> {
    /// 创建访问器
    ///
    /// # 参数
    ///
    /// * `sync` - 共享的同步器
    /// * `capacity` - 本地缓存容量（块数），至少为 1
    ///
    /// # 错误
    ///
    /// - `InvalidInput` - 容量为 0
    /// - `Disposed` - 同步器已关闭
    pub fn new(sync: Arc<Synchronizer<R>>, capacity: usize) -> Result<Self> {
        let cache = BlockCache::new(capacity)?;
        let id = sync.register()?;
        log::debug!("[ACCESSOR] {} attached, cache capacity {}", id, capacity);
        Ok(Self { sync, id, cache })
    }

    /// 从弱引用创建访问器
    ///
    /// 同步器已经被释放时返回 `Disposed`。
    pub fn from_weak(sync: &Weak<Synchronizer<R>>, capacity: usize) -> Result<Self> {
        let sync = sync
            .upgrade()
            .ok_or(Error::new(ErrorKind::Disposed, "Synchronizer has been dropped"))?;
        Self::new(sync, capacity)
    }

    /// 访问器 ID
    pub fn id(&self) -> AccessorId {
        self.id
    }

    /// 共享的同步器
    pub fn synchronizer(&self) -> &Arc<Synchronizer<R>> {
        &self.sync
    }

    /// 读取样本
    ///
    /// 坐标越界时返回 `OutOfBounds`；块被其他访问器持有时阻塞。
    pub fn get_value(&mut self, col: usize, row: usize, band: usize) -> Result<R::Sample> {
        let (id, offset) = self.sync.layout().locate(col, row, band)?;
        let block = self.cached_block(id)?;
        Ok(block.get(offset))
    }

    /// 写入样本，块被标记为脏
    ///
    /// 只读策略下返回 `PermissionDenied`。
    pub fn set_value(&mut self, col: usize, row: usize, band: usize, value: R::Sample) -> Result<()> {
        self.ensure_writable()?;
        let (id, offset) = self.sync.layout().locate(col, row, band)?;
        let block = self.cached_block(id)?;
        block.set(offset, value);
        Ok(())
    }

    /// 原子地读-改-写一个样本，返回新值
    ///
    /// 原子性只覆盖这一个样本所在的块：之前读到的其他块的值在本次调用中
    /// 可能已经被归还并被其他访问器修改。
    pub fn update<F>(&mut self, col: usize, row: usize, band: usize, f: F) -> Result<R::Sample>
    where
        F: FnOnce(R::Sample) -> R::Sample,
    {
        self.ensure_writable()?;
        let (id, offset) = self.sync.layout().locate(col, row, band)?;
        let block = self.cached_block(id)?;
        let value = f(block.get(offset));
        block.set(offset, value);
        Ok(value)
    }

    /// 归还全部缓存块，返回归还的块数
    ///
    /// 某个块写回失败时仍会继续归还其余块，最后返回第一个错误。
    pub fn release_all(&mut self) -> Result<usize> {
        let blocks = self.cache.drain();
        let count = blocks.len();
        let mut first_err = None;
        for block in blocks {
            if let Err(e) = self.check_in(block) {
                if first_err.is_none() {
                    first_err = Some(e);
                }
            }
        }
        match first_err {
            Some(e) => Err(e),
            None => Ok(count),
        }
    }

    /// 当前缓存的块（从最近使用开始）
    pub fn cached_blocks(&self) -> Vec<BlockId> {
        self.cache.ids()
    }

    /// 缓存容量
    pub fn capacity(&self) -> usize {
        self.cache.capacity()
    }

    /// 缓存统计信息
    pub fn stats(&self) -> CacheStats {
        self.cache.stats()
    }

    fn ensure_writable(&self) -> Result<()> {
        if self.sync.policy().is_writable() {
            Ok(())
        } else {
            Err(Error::new(
                ErrorKind::PermissionDenied,
                "Raster is shared read-only",
            ))
        }
    }

    /// 确保块在本地缓存中，返回缓存副本
    fn cached_block(&mut self, id: BlockId) -> Result<&mut Block<R::Sample>> {
        if !self.cache.touch(id) {
            self.admit(id)?;
        }
        self.cache.peek_mut(id).ok_or(Error::new(
            ErrorKind::InvalidBlock,
            "Block missing from accessor cache",
        ))
    }

    /// 检出块并放入缓存
    fn admit(&mut self, id: BlockId) -> Result<()> {
        while self.cache.is_full() {
            match self.cache.pop_lru() {
                Some(victim) => self.check_in(victim)?,
                None => break,
            }
        }

        let block = match self.sync.try_checkout_block(id, self.id) {
            Ok(block) => block,
            Err(e) if e.kind() == ErrorKind::Busy => {
                // 阻塞前放下全部持有，避免环路等待
                let released = self.release_all()?;
                log::debug!(
                    "[ACCESSOR] {} waiting for {}, released {} held blocks",
                    self.id,
                    id,
                    released
                );
                self.sync.checkout_block(id, self.id)?
            }
            Err(e) => return Err(e),
        };

        if let Some(victim) = self.cache.insert(block) {
            self.check_in(victim)?;
        }
        Ok(())
    }

    fn check_in(&mut self, block: Block<R::Sample>) -> Result<()> {
        let flushes = block.is_dirty() && !block.is_shared();
        self.sync.checkin_block(block)?;
        if flushes {
            self.cache.record_writeback();
        }
        Ok(())
    }
}

impl<R: Raster> Drop for SyncedAccessor<R> {
    fn drop(&mut self) {
        if self.cache.is_empty() {
            return;
        }
        match self.release_all() {
            Ok(count) => log::debug!("[ACCESSOR] {} dropped, released {} blocks", self.id, count),
            Err(e) => log::error!("[ACCESSOR] {} failed to release blocks on drop: {}", self.id, e),
        }
    }
}

impl<R: Raster> Raster for SyncedAccessor<R> {
    type Sample = R::Sample;

    fn rows(&self) -> usize {
        self.sync.layout().rows()
    }

    fn cols(&self) -> usize {
        self.sync.layout().cols()
    }

    fn bands(&self) -> usize {
        self.sync.layout().bands()
    }

    fn get(&mut self, col: usize, row: usize, band: usize) -> Result<Self::Sample> {
        self.get_value(col, row, band)
    }

    fn set(&mut self, col: usize, row: usize, band: usize, value: Self::Sample) -> Result<()> {
        self.set_value(col, row, band, value)
    }
}

impl<R: Raster> core::fmt::Debug for SyncedAccessor<R> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SyncedAccessor")
            .field("id", &self.id)
            .field("cache", &self.cache)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::DEFAULT_CACHE_CAPACITY;
    use crate::raster::{ByteRaster, MemoryRaster};
    use crate::sync::SyncConfig;
    use crate::types::AccessPolicy;
    use std::sync::Barrier;
    use std::thread;
    use std::time::{Duration, Instant};

    fn ramp(rows: usize, cols: usize, bands: usize) -> MemoryRaster<f64> {
        MemoryRaster::from_fn(rows, cols, bands, |col, row, band| {
            ((band * rows + row) * cols + col) as f64
        })
    }

    fn ramp_i64(rows: usize, cols: usize, bands: usize) -> MemoryRaster<i64> {
        MemoryRaster::from_fn(rows, cols, bands, |col, row, band| {
            ((band * rows + row) * cols + col) as i64
        })
    }

    fn shared<R: Raster>(raster: R, blocks_per_band: usize) -> Arc<Synchronizer<R>> {
        let config = SyncConfig::default().with_blocks_per_band(blocks_per_band);
        Arc::new(Synchronizer::with_config(raster, config).unwrap())
    }

    fn unwrap_raster<R: Raster>(sync: Arc<Synchronizer<R>>) -> R {
        Arc::try_unwrap(sync).ok().unwrap().into_raster()
    }

    /// 轮询直到条件成立（最多 5 秒）
    fn wait_until(mut cond: impl FnMut() -> bool) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while !cond() {
            assert!(Instant::now() < deadline, "condition not reached in time");
            thread::sleep(Duration::from_millis(1));
        }
    }

    #[test]
    fn test_single_thread_add_ten() {
        let (rows, cols, bands) = (7, 5, 3);
        for capacity in 1..=4 {
            for blocks in [1, 2, 3, 5, 16] {
                let sync = shared(ramp(rows, cols, bands), blocks);
                let mut accessor = SyncedAccessor::new(Arc::clone(&sync), capacity).unwrap();
                for band in 0..bands {
                    for row in 0..rows {
                        for col in 0..cols {
                            let v = accessor.get_value(col, row, band).unwrap();
                            accessor.set_value(col, row, band, v + 10.0).unwrap();
                        }
                    }
                }
                drop(accessor);

                assert_eq!(sync.checked_out(), 0);
                let raster = unwrap_raster(sync);
                let expected = ramp(rows, cols, bands);
                for (got, want) in raster.as_slice().iter().zip(expected.as_slice()) {
                    assert_eq!(*got, want + 10.0, "capacity={} blocks={}", capacity, blocks);
                }
            }
        }
    }

    #[test]
    fn test_concurrent_increments() {
        let (rows, cols, bands) = (10, 10, 10);
        let sync = shared(ramp(rows, cols, bands), 4);
        let barrier = Barrier::new(10);

        thread::scope(|s| {
            for _ in 0..10 {
                s.spawn(|| {
                    let mut accessor =
                        SyncedAccessor::new(Arc::clone(&sync), DEFAULT_CACHE_CAPACITY).unwrap();
                    barrier.wait();
                    for band in 0..bands {
                        for row in 0..rows {
                            for col in 0..cols {
                                let v = accessor.get_value(col, row, band).unwrap();
                                accessor.set_value(col, row, band, v + 10.0).unwrap();
                            }
                        }
                    }
                });
            }
        });

        assert_eq!(sync.checked_out(), 0);
        let raster = unwrap_raster(sync);
        let expected = ramp(rows, cols, bands);
        for (got, want) in raster.as_slice().iter().zip(expected.as_slice()) {
            assert!((got - (want + 100.0)).abs() < 1e-7, "got {} want {}", got, want + 100.0);
        }
    }

    #[test]
    fn test_repeated_passes_mixed_order() {
        let (rows, cols, bands) = (9, 4, 2);
        let (threads, passes) = (4, 3);
        let sync = shared(ramp_i64(rows, cols, bands), 3);
        let barrier = Barrier::new(threads);

        thread::scope(|s| {
            for t in 0..threads {
                let sync = &sync;
                let barrier = &barrier;
                s.spawn(move || {
                    let mut accessor = SyncedAccessor::new(Arc::clone(sync), 1).unwrap();
                    barrier.wait();
                    for _ in 0..passes {
                        for band in 0..bands {
                            for r in 0..rows {
                                // 奇数线程倒序扫描，制造交叉竞争
                                let row = if t % 2 == 0 { r } else { rows - 1 - r };
                                for col in 0..cols {
                                    accessor.update(col, row, band, |v| v + 1).unwrap();
                                }
                            }
                        }
                    }
                });
            }
        });

        let raster = unwrap_raster(sync);
        let expected = ramp_i64(rows, cols, bands);
        for (got, want) in raster.as_slice().iter().zip(expected.as_slice()) {
            assert_eq!(*got, want + (threads * passes) as i64);
        }
    }

    #[test]
    fn test_concurrent_byte_raster() {
        let sync = shared(ByteRaster::<u16>::new(6, 6, 2), 3);
        let barrier = Barrier::new(4);

        thread::scope(|s| {
            for _ in 0..4 {
                s.spawn(|| {
                    let mut accessor = SyncedAccessor::new(Arc::clone(&sync), 2).unwrap();
                    barrier.wait();
                    for band in 0..2 {
                        for row in 0..6 {
                            for col in 0..6 {
                                accessor.update(col, row, band, |v| v + 3).unwrap();
                            }
                        }
                    }
                });
            }
        });

        let raster = unwrap_raster(sync);
        assert!(raster.read_count() > 0);
        assert!(raster.write_count() > 0);
        assert!(raster
            .as_bytes()
            .chunks_exact(2)
            .all(|chunk| u16::from_le_bytes([chunk[0], chunk[1]]) == 12));
    }

    #[test]
    fn test_lru_eviction() {
        // 8 行分成 4 块，每块 2 行
        let sync = shared(ramp_i64(8, 2, 1), 4);
        let mut accessor = SyncedAccessor::new(Arc::clone(&sync), 2).unwrap();

        accessor.get_value(0, 0, 0).unwrap(); // 块 0
        accessor.get_value(0, 2, 0).unwrap(); // 块 1
        accessor.get_value(1, 1, 0).unwrap(); // 块 0 命中
        accessor.get_value(0, 4, 0).unwrap(); // 块 2，驱逐块 1

        assert_eq!(accessor.cached_blocks(), vec![BlockId(2), BlockId(0)]);
        assert_eq!(sync.owner_of(BlockId(0)), Some(accessor.id()));
        assert_eq!(sync.owner_of(BlockId(1)), None);
        assert_eq!(sync.owner_of(BlockId(2)), Some(accessor.id()));

        let stats = accessor.stats();
        assert_eq!(stats.total_accesses, 4);
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 3);
        assert_eq!(stats.evictions, 1);
        assert_eq!(stats.writebacks, 0);

        accessor.set_value(1, 5, 0, -5).unwrap();
        assert_eq!(accessor.release_all().unwrap(), 2);
        assert!(accessor.cached_blocks().is_empty());
        assert_eq!(accessor.stats().writebacks, 1);
        assert_eq!(sync.checked_out(), 0);
    }

    #[test]
    fn test_drop_flushes_dirty_blocks() {
        let sync = shared(ramp_i64(4, 4, 1), 2);
        let mut accessor = SyncedAccessor::new(Arc::clone(&sync), 2).unwrap();
        accessor.set_value(1, 0, 0, 100).unwrap();
        accessor.set_value(2, 3, 0, 200).unwrap();

        let me = accessor.id();
        assert_eq!(sync.owner_of(BlockId(0)), Some(me));
        assert_eq!(sync.owner_of(BlockId(1)), Some(me));
        // 修改尚未写回
        assert_eq!(sync.stats().writebacks, 0);

        drop(accessor);
        assert_eq!(sync.owner_of(BlockId(0)), None);
        assert_eq!(sync.owner_of(BlockId(1)), None);
        assert_eq!(sync.stats().writebacks, 2);

        let raster = unwrap_raster(sync);
        assert_eq!(raster.as_slice()[1], 100);
        assert_eq!(raster.as_slice()[14], 200);
    }

    #[test]
    fn test_waiters_are_woken() {
        let sync = shared(ramp_i64(4, 4, 1), 2);
        let mut holder = SyncedAccessor::new(Arc::clone(&sync), 1).unwrap();
        holder.set_value(0, 0, 0, 100).unwrap();

        thread::scope(|s| {
            for _ in 0..2 {
                s.spawn(|| {
                    let mut accessor = SyncedAccessor::new(Arc::clone(&sync), 1).unwrap();
                    accessor.update(0, 0, 0, |v| v + 1).unwrap();
                });
            }
            wait_until(|| sync.waiting_on(BlockId(0)) == 2);
            holder.release_all().unwrap();
        });
        drop(holder);

        let stats = sync.stats();
        assert_eq!(stats.handoffs, 2);
        assert!(stats.contended >= 2);
        assert_eq!(unwrap_raster(sync).as_slice()[0], 102);
    }

    #[test]
    fn test_no_hold_and_wait() {
        // 块 0 = 第 0..2 行，块 1 = 第 2..4 行
        let sync = shared(ramp_i64(4, 4, 1), 2);
        let mut a = SyncedAccessor::new(Arc::clone(&sync), 2).unwrap();
        a.set_value(0, 0, 0, -1).unwrap();

        thread::scope(|s| {
            let b = s.spawn(|| {
                let mut b = SyncedAccessor::new(Arc::clone(&sync), 2).unwrap();
                b.set_value(0, 2, 0, -2).unwrap();
                // 块 0 被 A 持有：B 先归还块 1 再等待
                b.update(1, 0, 0, |v| v * 10).unwrap();
                b.stats()
            });

            wait_until(|| sync.waiting_on(BlockId(0)) == 1);
            assert_eq!(sync.owner_of(BlockId(1)), None);

            // A 可以继续取得块 1，二者不会互相等待
            assert_eq!(a.get_value(0, 2, 0).unwrap(), -2);
            a.release_all().unwrap();

            let stats = b.join().unwrap();
            assert_eq!(stats.misses, 2);
            assert_eq!(stats.writebacks, 1);
        });
        drop(a);

        let raster = unwrap_raster(sync);
        assert_eq!(raster.as_slice()[0], -1);
        assert_eq!(raster.as_slice()[1], 10);
        assert_eq!(raster.as_slice()[8], -2);
    }

    #[test]
    fn test_read_only_access() {
        let (rows, cols, bands) = (6, 5, 2);
        let config = SyncConfig::default()
            .with_policy(AccessPolicy::ReadOnly)
            .with_blocks_per_band(3);
        let sync = Arc::new(Synchronizer::with_config(ramp(rows, cols, bands), config).unwrap());
        let expected: f64 = ramp(rows, cols, bands).as_slice().iter().sum();

        let mut first = SyncedAccessor::new(Arc::clone(&sync), 1).unwrap();
        let mut second = SyncedAccessor::new(Arc::clone(&sync), 1).unwrap();
        first.get_value(0, 0, 0).unwrap();
        second.get_value(1, 1, 0).unwrap();
        // 两个读者同时持有同一块
        assert_eq!(sync.readers_of(BlockId(0)), 2);
        assert_eq!(sync.owner_of(BlockId(0)), None);

        let err = first.set_value(0, 0, 0, 1.0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::PermissionDenied);
        let err = second.update(0, 0, 0, |v| v + 1.0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::PermissionDenied);

        let barrier = Barrier::new(4);
        thread::scope(|s| {
            for _ in 0..4 {
                s.spawn(|| {
                    let mut accessor = SyncedAccessor::new(Arc::clone(&sync), 2).unwrap();
                    barrier.wait();
                    let mut sum = 0.0;
                    for band in 0..bands {
                        for row in 0..rows {
                            for col in 0..cols {
                                sum += accessor.get_value(col, row, band).unwrap();
                            }
                        }
                    }
                    assert_eq!(sum, expected);
                });
            }
        });

        drop(first);
        drop(second);
        assert_eq!(sync.checked_out(), 0);
        assert_eq!(sync.stats().contended, 0);
        assert_eq!(sync.stats().writebacks, 0);
    }

    #[test]
    fn test_disposed() {
        let sync = shared(ramp_i64(4, 4, 1), 4);
        let weak = Arc::downgrade(&sync);
        let mut accessor = SyncedAccessor::from_weak(&weak, 1).unwrap();
        accessor.set_value(0, 0, 0, 5).unwrap();

        sync.close();
        // 已缓存的块仍可读写
        assert_eq!(accessor.get_value(1, 0, 0).unwrap(), 1);
        // 换块时旧块仍能归还，新块检出失败
        let err = accessor.get_value(0, 3, 0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Disposed);
        assert!(accessor.cached_blocks().is_empty());

        let err = SyncedAccessor::new(Arc::clone(&sync), 1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Disposed);

        drop(accessor);
        let raster = unwrap_raster(sync);
        assert_eq!(raster.as_slice()[0], 5);

        let err = SyncedAccessor::from_weak(&weak, 1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Disposed);
    }

    #[test]
    fn test_invalid_arguments() {
        let sync = shared(ramp_i64(4, 3, 2), 2);
        let err = SyncedAccessor::new(Arc::clone(&sync), 0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);

        let mut accessor = SyncedAccessor::new(Arc::clone(&sync), 1).unwrap();
        for (col, row, band) in [(3, 0, 0), (0, 4, 0), (0, 0, 2)] {
            let err = accessor.get_value(col, row, band).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::OutOfBounds);
            assert!(err.is_recoverable());
            let err = accessor.set_value(col, row, band, 0).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::OutOfBounds);
        }
        // 越界访问不检出任何块
        assert!(accessor.cached_blocks().is_empty());
        assert_eq!(accessor.stats().total_accesses, 0);
    }

    #[test]
    fn test_accessor_as_raster() {
        let sync = shared(ramp_i64(4, 3, 2), 2);
        let mut accessor = SyncedAccessor::new(Arc::clone(&sync), 2).unwrap();
        assert_eq!((accessor.rows(), accessor.cols(), accessor.bands()), (4, 3, 2));

        let mut buf = vec![0; 6];
        accessor.read_rows(1, 1..3, &mut buf).unwrap();
        assert_eq!(buf, vec![15, 16, 17, 18, 19, 20]);

        accessor.write_rows(0, 2..4, &[7; 6]).unwrap();
        assert_eq!(Raster::get(&mut accessor, 2, 3, 0).unwrap(), 7);
        drop(accessor);

        let raster = unwrap_raster(sync);
        assert_eq!(&raster.as_slice()[6..12], &[7; 6]);
        assert_eq!(&raster.as_slice()[0..6], &[0, 1, 2, 3, 4, 5]);
    }
}
