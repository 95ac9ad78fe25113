//! 稠密内存栅格

use super::{check_bounds, check_rows, Raster, Sample};
use crate::error::{Error, ErrorKind, Result};
use core::ops::Range;

/// 内存栅格
///
/// 样本按波段顺序存储：`index = (band * rows + row) * cols + col`。
/// 同一波段中连续的行在内存中也是连续的，因此批量读写只需一次切片拷贝。
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryRaster<T> {
    rows: usize,
    cols: usize,
    bands: usize,
    data: Vec<T>,
}

impl<T: Sample> MemoryRaster<T> {
    /// 创建填充默认值的栅格
    pub fn new(rows: usize, cols: usize, bands: usize) -> Self {
        Self {
            rows,
            cols,
            bands,
            data: vec![T::default(); rows * cols * bands],
        }
    }

    /// 用闭包 `f(col, row, band)` 初始化每个样本
    pub fn from_fn<F>(rows: usize, cols: usize, bands: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize, usize) -> T,
    {
        let mut data = Vec::with_capacity(rows * cols * bands);
        for band in 0..bands {
            for row in 0..rows {
                for col in 0..cols {
                    data.push(f(col, row, band));
                }
            }
        }
        Self { rows, cols, bands, data }
    }

    /// 从已有的样本向量创建
    ///
    /// `data.len()` 必须等于 `rows * cols * bands`。
    pub fn from_vec(rows: usize, cols: usize, bands: usize, data: Vec<T>) -> Result<Self> {
        if data.len() != rows * cols * bands {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                "Sample vector length does not match raster geometry",
            ));
        }
        Ok(Self { rows, cols, bands, data })
    }

    /// 全部样本（波段顺序）
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// 取出样本向量
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    fn index(&self, col: usize, row: usize, band: usize) -> usize {
        (band * self.rows + row) * self.cols + col
    }
}

impl<T: Sample> Raster for MemoryRaster<T> {
    type Sample = T;

    fn rows(&self) -> usize {
        self.rows
    }

    fn cols(&self) -> usize {
        self.cols
    }

    fn bands(&self) -> usize {
        self.bands
    }

    fn get(&mut self, col: usize, row: usize, band: usize) -> Result<T> {
        check_bounds(self.rows, self.cols, self.bands, col, row, band)?;
        Ok(self.data[self.index(col, row, band)])
    }

    fn set(&mut self, col: usize, row: usize, band: usize, value: T) -> Result<()> {
        check_bounds(self.rows, self.cols, self.bands, col, row, band)?;
        let idx = self.index(col, row, band);
        self.data[idx] = value;
        Ok(())
    }

    fn read_rows(&mut self, band: usize, rows: Range<usize>, out: &mut [T]) -> Result<()> {
        check_rows(self.rows, self.cols, self.bands, band, &rows, out.len())?;
        let start = self.index(0, rows.start, band);
        out.copy_from_slice(&self.data[start..start + out.len()]);
        Ok(())
    }

    fn write_rows(&mut self, band: usize, rows: Range<usize>, data: &[T]) -> Result<()> {
        check_rows(self.rows, self.cols, self.bands, band, &rows, data.len())?;
        let start = self.index(0, rows.start, band);
        self.data[start..start + data.len()].copy_from_slice(data);
        Ok(())
    }
}
