//! 栅格能力 trait

use crate::error::Result;
use byteorder::{ByteOrder, LittleEndian};
use core::fmt::Debug;
use core::ops::Range;

/// 栅格样本
///
/// 固定大小的数值类型，可以按小端字节序编解码。
pub trait Sample: Copy + Default + PartialEq + Debug + Send + Sync + 'static {
    /// 编码后的字节数
    const SIZE: usize;

    /// 从小端字节读取（`buf.len() >= SIZE`）
    fn read_le(buf: &[u8]) -> Self;

    /// 以小端字节写入（`buf.len() >= SIZE`）
    fn write_le(self, buf: &mut [u8]);
}

impl Sample for u8 {
    const SIZE: usize = 1;

    fn read_le(buf: &[u8]) -> Self {
        buf[0]
    }

    fn write_le(self, buf: &mut [u8]) {
        buf[0] = self;
    }
}

impl Sample for i8 {
    const SIZE: usize = 1;

    fn read_le(buf: &[u8]) -> Self {
        buf[0] as i8
    }

    fn write_le(self, buf: &mut [u8]) {
        buf[0] = self as u8;
    }
}

macro_rules! impl_sample {
    ($($ty:ty => $size:expr, $read:ident, $write:ident;)*) => {
        $(
            impl Sample for $ty {
                const SIZE: usize = $size;

                #[inline]
                fn read_le(buf: &[u8]) -> Self {
                    LittleEndian::$read(buf)
                }

                #[inline]
                fn write_le(self, buf: &mut [u8]) {
                    LittleEndian::$write(buf, self)
                }
            }
        )*
    };
}

impl_sample! {
    u16 => 2, read_u16, write_u16;
    i16 => 2, read_i16, write_i16;
    u32 => 4, read_u32, write_u32;
    i32 => 4, read_i32, write_i32;
    u64 => 8, read_u64, write_u64;
    i64 => 8, read_i64, write_i64;
    f32 => 4, read_f32, write_f32;
    f64 => 8, read_f64, write_f64;
}

/// 栅格接口
///
/// 被同步层包装的栅格。实现者不需要是线程安全的：
/// 同步器保证任一时刻只有一个线程调用这些方法。
///
/// 坐标顺序与 `getValue(col, row, band)` 一致。几何信息在同步会话期间不可变。
///
/// # 示例
///
/// ```rust,ignore
/// use rastersync::{Raster, Result};
///
/// struct Decoder {
///     // ...
/// }
///
/// impl Raster for Decoder {
///     type Sample = f64;
///
///     fn rows(&self) -> usize { 512 }
///     fn cols(&self) -> usize { 512 }
///     fn bands(&self) -> usize { 3 }
///
///     fn get(&mut self, col: usize, row: usize, band: usize) -> Result<f64> {
///         // 从解码器读取
///     }
///
///     fn set(&mut self, col: usize, row: usize, band: usize, value: f64) -> Result<()> {
///         // 写入解码器
///     }
/// }
/// ```
pub trait Raster {
    /// 样本类型
    type Sample: Sample;

    /// 行数
    fn rows(&self) -> usize;

    /// 列数
    fn cols(&self) -> usize;

    /// 波段数
    fn bands(&self) -> usize;

    /// 读取单个样本
    fn get(&mut self, col: usize, row: usize, band: usize) -> Result<Self::Sample>;

    /// 写入单个样本
    fn set(&mut self, col: usize, row: usize, band: usize, value: Self::Sample) -> Result<()>;

    /// 读取一个波段中连续的若干整行
    ///
    /// `out` 按行优先排列，长度必须为 `rows.len() * cols()`。
    /// 默认实现逐样本调用 [`Raster::get`]，存储连续的实现应覆盖此方法。
    fn read_rows(&mut self, band: usize, rows: Range<usize>, out: &mut [Self::Sample]) -> Result<()> {
        let cols = self.cols();
        super::check_rows(self.rows(), cols, self.bands(), band, &rows, out.len())?;
        for (i, row) in rows.enumerate() {
            for col in 0..cols {
                out[i * cols + col] = self.get(col, row, band)?;
            }
        }
        Ok(())
    }

    /// 写入一个波段中连续的若干整行
    ///
    /// `data` 的排列与 [`Raster::read_rows`] 相同。
    fn write_rows(&mut self, band: usize, rows: Range<usize>, data: &[Self::Sample]) -> Result<()> {
        let cols = self.cols();
        super::check_rows(self.rows(), cols, self.bands(), band, &rows, data.len())?;
        for (i, row) in rows.enumerate() {
            for col in 0..cols {
                self.set(col, row, band, data[i * cols + col])?;
            }
        }
        Ok(())
    }
}

/// 借用的栅格同样是栅格，调用者可以保留所有权
impl<R: Raster + ?Sized> Raster for &mut R {
    type Sample = R::Sample;

    fn rows(&self) -> usize {
        (**self).rows()
    }

    fn cols(&self) -> usize {
        (**self).cols()
    }

    fn bands(&self) -> usize {
        (**self).bands()
    }

    fn get(&mut self, col: usize, row: usize, band: usize) -> Result<Self::Sample> {
        (**self).get(col, row, band)
    }

    fn set(&mut self, col: usize, row: usize, band: usize, value: Self::Sample) -> Result<()> {
        (**self).set(col, row, band, value)
    }

    fn read_rows(&mut self, band: usize, rows: Range<usize>, out: &mut [Self::Sample]) -> Result<()> {
        (**self).read_rows(band, rows, out)
    }

    fn write_rows(&mut self, band: usize, rows: Range<usize>, data: &[Self::Sample]) -> Result<()> {
        (**self).write_rows(band, rows, data)
    }
}
