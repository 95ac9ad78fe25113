//! 同步层常量定义
//!
//! 分区粒度与访问器缓存容量的默认值。两者都只是调优参数，
//! 正确性来自块检出的排他性，而不是具体的数值。

/// 每个波段默认划分的块数
///
/// 实际的块数不会超过栅格行数（每块至少一行）。
pub const DEFAULT_BLOCKS_PER_BAND: usize = 16;

/// 访问器默认缓存的块数（blocking factor）
pub const DEFAULT_CACHE_CAPACITY: usize = 2;
