//! 同步器模块
//!
//! 每个被包装的栅格对应一个 [`Synchronizer`]，它拥有块分区和检出表，
//! 是唯一可以修改栅格范围内持有关系的组件。
//!
//! # 主要组件
//!
//! - [`Synchronizer`] - 检出/归还协议、直接移交、写回
//! - [`SyncConfig`] - 访问策略与分区粒度
//! - [`SyncStats`] - 协议统计信息
//!
//! # 检出协议
//!
//! ```text
//! checkout(id, A)                 checkin(block)
//!   |                               |
//!   +- 块空闲   -> A 成为持有者      +- 脏块 -> 写回栅格
//!   |            载入数据           |
//!   +- 被 B 持有 -> A 入队挂起       +- 有等待者 -> 持有权直接交给队首
//!                 等待 B 移交        +- 无等待者 -> 块变为空闲
//! ```
//!
//! 只读策略下不存在写者，检出从不阻塞，每个访问器得到一份共享副本。

mod config;
mod table;
mod synchronizer;

pub use config::SyncConfig;
pub use synchronizer::{SyncStats, Synchronizer};
