//! 访问器本地块缓存模块
//!
//! 每个 [`SyncedAccessor`](crate::SyncedAccessor) 持有一个容量固定的 [`BlockCache`]，
//! 缓存它当前检出的块。命中缓存的读写不需要任何同步。
//!
//! # 主要组件
//!
//! - [`BlockCache`] - 块缓存，使用 lru crate 提供 LRU 驱逐
//! - [`CacheStats`] - 缓存统计信息
//!
//! # 容量的取舍
//!
//! 容量（blocking factor）为 1 时，每次换块都要完成一次归还/检出，
//! 持有的块最少；更大的容量把协议开销分摊到更多访问上，
//! 但会更长时间地排他持有更多块，扩大竞争窗口。
//!
//! # 性能特性
//!
//! - **查找**: O(1) - HashMap 查找（lru crate 内部）
//! - **插入**: O(1) - HashMap 插入 + LRU 链表更新
//! - **LRU 驱逐**: O(1) - 直接访问 LRU 链表尾部

mod block_cache;

pub use block_cache::{BlockCache, CacheStats};
