//! 基础类型定义
//!
//! 访问策略、块标识和访问器标识。

use core::fmt;

/// 访问策略
///
/// 由同步器强制执行的契约。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccessPolicy {
    /// 只读：不存在写者，检出永不阻塞，多个访问器可同时持有同一块的副本
    ReadOnly,
    /// 读写：每个块在任一时刻至多有一个持有者
    #[default]
    ReadWrite,
}

impl AccessPolicy {
    /// 是否允许写入
    pub const fn is_writable(self) -> bool {
        matches!(self, AccessPolicy::ReadWrite)
    }

    /// 是否需要排他检出
    pub const fn is_exclusive(self) -> bool {
        matches!(self, AccessPolicy::ReadWrite)
    }
}

/// 块标识
///
/// 由 `(行, 波段)` 和分区方案确定，编号为
/// `band * blocks_per_band + row / rows_per_block`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId(pub usize);

impl BlockId {
    /// 获取原始编号
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// 访问器标识
///
/// 由同步器在注册时分配，在同一同步器内唯一。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccessorId(pub u64);

impl fmt::Display for AccessorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "A{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_default() {
        assert_eq!(AccessPolicy::default(), AccessPolicy::ReadWrite);
        assert!(AccessPolicy::ReadWrite.is_writable());
        assert!(AccessPolicy::ReadWrite.is_exclusive());
        assert!(!AccessPolicy::ReadOnly.is_writable());
        assert!(!AccessPolicy::ReadOnly.is_exclusive());
    }

    #[test]
    fn test_id_display() {
        assert_eq!(BlockId(7).to_string(), "#7");
        assert_eq!(AccessorId(3).to_string(), "A3");
        assert_eq!(BlockId(7).index(), 7);
    }
}
