//! 块抽象
//!
//! 块是互斥的基本单位：一个波段内连续若干行的全部样本。
//!
//! - `layout`: 把 (row, band) 映射到块 ID，以及块 ID 到行范围的反向映射
//! - `buffer`: 块在内存中的副本，带脏标志，只能由同步器创建和回收
//! - `handle`: RAII 风格的块监护，drop 时自动归还

mod layout;
mod buffer;
mod handle;

pub use layout::BlockLayout;
pub use buffer::{Block, BlockFlags};
pub use handle::BlockGuard;
