//! rastersync: 多线程共享栅格的同步访问层
//!
//! 多个工作线程需要并发读写同一个栅格（波段 × 行 × 列 的数值样本），
//! 而栅格本身往往不能被多个线程直接访问（文件句柄、解码器、共享缓冲区）。
//! 这个库提供：
//! - **按块互斥**：栅格按行划分为块，块是互斥的基本单位，互不相交的区域可以并行处理
//! - **检出/归还协议**：同一时刻每个块最多一个持有者，归还时直接移交给等待者
//! - **访问器本地缓存**：命中缓存的读写没有任何同步开销
//! - **读-改-写原子性**：块内的一串读写相对其他线程是原子的
//!
//! # 示例
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use std::thread;
//! use rastersync::{AccessPolicy, MemoryRaster, SyncedAccessor, Synchronizer, Result};
//!
//! fn main() -> Result<()> {
//!     let raster = MemoryRaster::<f64>::new(512, 512, 3);
//!     let sync = Arc::new(Synchronizer::new(raster, AccessPolicy::ReadWrite)?);
//!
//!     thread::scope(|s| {
//!         for _ in 0..8 {
//!             s.spawn(|| -> Result<()> {
//!                 let mut accessor = SyncedAccessor::new(Arc::clone(&sync), 2)?;
//!                 for row in 0..512 {
//!                     for col in 0..512 {
//!                         accessor.update(col, row, 0, |v| v + 1.0)?;
//!                     }
//!                 }
//!                 Ok(())
//!             });
//!         }
//!     });
//!
//!     Ok(())
//! }
//! ```
//!
//! # 模块结构
//!
//! - [`error`] - 错误类型定义
//! - [`consts`] - 常量定义
//! - [`types`] - 基础类型（访问策略、块 ID、访问器 ID）
//! - [`raster`] - 栅格能力 trait 与内存实现
//! - [`block`] - 块分区、块副本与 RAII 块句柄
//! - [`sync`] - 同步器与检出表
//! - [`cache`] - 访问器本地块缓存
//! - [`accessor`] - 同步访问器

#![deny(unsafe_op_in_unsafe_fn)]
#![warn(missing_docs)]

// ===== 核心模块 =====

/// 错误处理
pub mod error;

/// 常量定义
pub mod consts;

/// 基础类型
pub mod types;

/// 栅格抽象
pub mod raster;

/// 块抽象
pub mod block;

/// 同步器
pub mod sync;

/// 块缓存
pub mod cache;

/// 同步访问器
pub mod accessor;

// ===== 公共导出 =====

// 错误处理
pub use error::{Error, ErrorKind, Result};

// 基础类型与常量
pub use types::{AccessPolicy, AccessorId, BlockId};
pub use consts::{DEFAULT_BLOCKS_PER_BAND, DEFAULT_CACHE_CAPACITY};

// 栅格
pub use raster::{ByteRaster, MemoryRaster, Raster, Sample};

// 块
pub use block::{Block, BlockFlags, BlockGuard, BlockLayout};

// 同步器
pub use sync::{SyncConfig, SyncStats, Synchronizer};

// 缓存
pub use cache::{BlockCache, CacheStats};

// 访问器
pub use accessor::SyncedAccessor;
