//! 检出表
//!
//! 记录每个块当前的持有者和等待队列。表本身只是一个状态机，
//! 加锁和线程挂起由 [`Synchronizer`](super::Synchronizer) 负责。
//!
//! 表项按需创建，块空闲且没有等待者时被删除，所以表的大小只与
//! 当前被检出的块数有关，与栅格大小无关。
//!
//! # 直接移交
//!
//! 归还一个有等待者的块时，持有权直接交给队首的等待者，块不会进入空闲状态。
//! 这样不会出现“唤醒后被别的线程抢先”的竞争，等待者按 FIFO 顺序获得块。

use crate::error::{Error, ErrorKind, Result};
use crate::types::{AccessorId, BlockId};
use parking_lot::Condvar;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

/// 单个块的检出状态
#[derive(Debug, Default)]
struct CheckoutEntry {
    /// 排他持有者
    owner: Option<AccessorId>,
    /// 只读策略下的共享持有者（可重复）
    readers: Vec<AccessorId>,
    /// 等待队列
    waiters: VecDeque<AccessorId>,
    /// 该块的等待者挂起在这个条件变量上
    signal: Arc<Condvar>,
}

impl CheckoutEntry {
    fn is_idle(&self) -> bool {
        self.owner.is_none() && self.readers.is_empty() && self.waiters.is_empty()
    }
}

/// 排他获取的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Acquire {
    /// 已获得
    Granted,
    /// 被其他访问器持有
    Busy(AccessorId),
}

/// 归还的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Release {
    /// 块变为空闲
    Freed,
    /// 直接移交给了等待者
    HandedOff(AccessorId),
}

/// 检出表
#[derive(Debug, Default)]
pub(crate) struct CheckoutTable {
    entries: HashMap<BlockId, CheckoutEntry>,
    closed: bool,
}

impl CheckoutTable {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// 同步器是否已关闭
    pub(crate) fn is_closed(&self) -> bool {
        self.closed
    }

    /// 尝试排他获取块
    pub(crate) fn try_acquire(&mut self, id: BlockId, who: AccessorId) -> Result<Acquire> {
        let entry = self.entries.entry(id).or_default();
        match entry.owner {
            None => {
                entry.owner = Some(who);
                Ok(Acquire::Granted)
            }
            Some(owner) if owner == who => Err(Error::new(
                ErrorKind::OwnershipViolation,
                "Block is already checked out by the requester",
            )),
            Some(owner) => Ok(Acquire::Busy(owner)),
        }
    }

    /// 加入等待队列，返回要挂起的条件变量
    pub(crate) fn enqueue(&mut self, id: BlockId, who: AccessorId) -> Arc<Condvar> {
        let entry = self.entries.entry(id).or_default();
        entry.waiters.push_back(who);
        Arc::clone(&entry.signal)
    }

    /// 放弃等待（同步器关闭时）
    pub(crate) fn cancel_wait(&mut self, id: BlockId, who: AccessorId) {
        if let Some(entry) = self.entries.get_mut(&id) {
            entry.waiters.retain(|w| *w != who);
        }
        self.prune(id);
    }

    /// `who` 是否是块的排他持有者
    pub(crate) fn is_owner(&self, id: BlockId, who: AccessorId) -> bool {
        self.owner_of(id) == Some(who)
    }

    /// 归还排他持有的块
    ///
    /// 有等待者时直接移交给队首；同步器关闭后不再移交，
    /// 而是唤醒所有等待者让它们退出。
    pub(crate) fn release(&mut self, id: BlockId, who: AccessorId) -> Result<Release> {
        let closed = self.closed;
        let entry = match self.entries.get_mut(&id) {
            Some(entry) if entry.owner == Some(who) => entry,
            _ => {
                return Err(Error::new(
                    ErrorKind::OwnershipViolation,
                    "Block is not checked out by the caller",
                ))
            }
        };

        let next = if closed { None } else { entry.waiters.pop_front() };
        entry.owner = next;
        if next.is_some() || closed {
            entry.signal.notify_all();
        }

        self.prune(id);
        Ok(match next {
            Some(next) => Release::HandedOff(next),
            None => Release::Freed,
        })
    }

    /// 登记共享持有者
    pub(crate) fn add_reader(&mut self, id: BlockId, who: AccessorId) {
        self.entries.entry(id).or_default().readers.push(who);
    }

    /// 注销共享持有者
    pub(crate) fn remove_reader(&mut self, id: BlockId, who: AccessorId) -> Result<()> {
        let entry = self.entries.get_mut(&id).ok_or(Error::new(
            ErrorKind::OwnershipViolation,
            "Block is not checked out by the caller",
        ))?;
        let pos = entry.readers.iter().position(|r| *r == who).ok_or(Error::new(
            ErrorKind::OwnershipViolation,
            "Block is not checked out by the caller",
        ))?;
        entry.readers.swap_remove(pos);
        self.prune(id);
        Ok(())
    }

    /// 关闭表，唤醒所有等待者
    pub(crate) fn close(&mut self) {
        self.closed = true;
        for entry in self.entries.values() {
            entry.signal.notify_all();
        }
    }

    /// 块的排他持有者
    pub(crate) fn owner_of(&self, id: BlockId) -> Option<AccessorId> {
        self.entries.get(&id).and_then(|e| e.owner)
    }

    /// 块的共享持有者数量
    pub(crate) fn readers_of(&self, id: BlockId) -> usize {
        self.entries.get(&id).map_or(0, |e| e.readers.len())
    }

    /// 在块上等待的访问器数量
    pub(crate) fn waiting_on(&self, id: BlockId) -> usize {
        self.entries.get(&id).map_or(0, |e| e.waiters.len())
    }

    /// 当前被检出（排他或共享）的块数
    pub(crate) fn checked_out(&self) -> usize {
        self.entries
            .values()
            .filter(|e| e.owner.is_some() || !e.readers.is_empty())
            .count()
    }

    fn prune(&mut self, id: BlockId) {
        if self.entries.get(&id).is_some_and(CheckoutEntry::is_idle) {
            self.entries.remove(&id);
        }
    }
}
