//! 栅格抽象
//!
//! 同步层把被包装的栅格视为一个不透明的能力集合：
//! 几何信息（行、列、波段）加上单个样本的读写。
//!
//! - [`Raster`] - 栅格能力 trait
//! - [`Sample`] - 数值样本类型
//! - [`MemoryRaster`] - 基于 `Vec<T>` 的稠密内存栅格
//! - [`ByteRaster`] - 以小端字节存储样本的栅格

mod device;
mod memory;
mod bytes;

pub use device::{Raster, Sample};
pub use memory::MemoryRaster;
pub use bytes::ByteRaster;

use crate::error::{Error, ErrorKind, Result};

/// 检查坐标是否位于栅格范围内
pub(crate) fn check_bounds(
    rows: usize,
    cols: usize,
    bands: usize,
    col: usize,
    row: usize,
    band: usize,
) -> Result<()> {
    if col >= cols {
        return Err(Error::new(ErrorKind::OutOfBounds, "Column out of raster extent"));
    }
    if row >= rows {
        return Err(Error::new(ErrorKind::OutOfBounds, "Row out of raster extent"));
    }
    if band >= bands {
        return Err(Error::new(ErrorKind::OutOfBounds, "Band out of raster extent"));
    }
    Ok(())
}

/// 检查行范围及缓冲区长度（批量读写用）
pub(crate) fn check_rows(
    rows: usize,
    cols: usize,
    bands: usize,
    band: usize,
    range: &core::ops::Range<usize>,
    buf_len: usize,
) -> Result<()> {
    if band >= bands {
        return Err(Error::new(ErrorKind::OutOfBounds, "Band out of raster extent"));
    }
    if range.start > range.end || range.end > rows {
        return Err(Error::new(ErrorKind::OutOfBounds, "Row range out of raster extent"));
    }
    if buf_len != range.len() * cols {
        return Err(Error::new(
            ErrorKind::InvalidInput,
            "Buffer length does not match row range",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_bounds() {
        assert!(check_bounds(4, 5, 2, 4, 3, 1).is_ok());
        assert_eq!(
            check_bounds(4, 5, 2, 5, 0, 0).unwrap_err().kind(),
            ErrorKind::OutOfBounds
        );
        assert_eq!(
            check_bounds(4, 5, 2, 0, 4, 0).unwrap_err().kind(),
            ErrorKind::OutOfBounds
        );
        assert_eq!(
            check_bounds(4, 5, 2, 0, 0, 2).unwrap_err().kind(),
            ErrorKind::OutOfBounds
        );
    }

    #[test]
    fn test_check_rows() {
        assert!(check_rows(4, 5, 1, 0, &(1..3), 10).is_ok());
        assert_eq!(
            check_rows(4, 5, 1, 0, &(2..5), 15).unwrap_err().kind(),
            ErrorKind::OutOfBounds
        );
        assert_eq!(
            check_rows(4, 5, 1, 0, &(0..2), 9).unwrap_err().kind(),
            ErrorKind::InvalidInput
        );
    }
}
