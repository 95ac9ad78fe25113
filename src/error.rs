//! 错误类型定义
//!
//! 提供栅格同步层的错误类型。
//!
//! 协议误用类错误（`InvalidBlock`、`OwnershipViolation`、`Disposed`）
//! 必须立即返回给调用者，不能在本地吞掉，否则检出表的不变量会被破坏。

use core::fmt;

/// 同步层操作错误
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    kind: ErrorKind,
    message: &'static str,
}

/// 错误类别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// 构造参数非法（例如零尺寸栅格）
    InvalidConstruction,
    /// 坐标超出栅格范围
    OutOfBounds,
    /// 块 ID 不属于当前分区
    InvalidBlock,
    /// 归还了不属于调用者的块
    OwnershipViolation,
    /// 同步器已关闭或已释放
    Disposed,
    /// 无效参数
    InvalidInput,
    /// 只读策略下的写操作
    PermissionDenied,
    /// 块被其他访问器占用（非阻塞检出）
    Busy,
    /// 底层栅格报告的 I/O 错误
    Io,
}

impl Error {
    /// 创建新错误
    pub const fn new(kind: ErrorKind, message: &'static str) -> Self {
        Self { kind, message }
    }

    /// 获取错误类型
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// 获取错误消息
    pub const fn message(&self) -> &'static str {
        self.message
    }

    /// 调用者能否在本地恢复
    ///
    /// 只有越界、忙和底层 I/O 错误属于正常的调用者错误；
    /// 其余类别表示协议被误用，应终止当前操作。
    pub const fn is_recoverable(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::OutOfBounds | ErrorKind::Busy | ErrorKind::Io
        )
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl std::error::Error for Error {}

/// Result 类型别名
pub type Result<T> = core::result::Result<T, Error>;
