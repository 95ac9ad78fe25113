//! 字节缓冲栅格
//!
//! 样本以小端字节序保存在一段原始字节中，每次访问都要经过编解码，
//! 可以看作文件或解码器背后的栅格的内存替身。

use super::{check_bounds, check_rows, Raster, Sample};
use crate::error::{Error, ErrorKind, Result};
use core::marker::PhantomData;
use core::ops::Range;

/// 字节缓冲栅格
///
/// 布局与 [`MemoryRaster`](super::MemoryRaster) 相同（波段顺序、行优先），
/// 每个样本占 `T::SIZE` 字节。
#[derive(Debug, Clone)]
pub struct ByteRaster<T> {
    rows: usize,
    cols: usize,
    bands: usize,
    bytes: Vec<u8>,
    /// 样本读取次数（批量读按样本计）
    read_count: u64,
    /// 样本写入次数（批量写按样本计）
    write_count: u64,
    _sample: PhantomData<T>,
}

impl<T: Sample> ByteRaster<T> {
    /// 创建全零栅格
    pub fn new(rows: usize, cols: usize, bands: usize) -> Self {
        Self {
            rows,
            cols,
            bands,
            bytes: vec![0u8; rows * cols * bands * T::SIZE],
            read_count: 0,
            write_count: 0,
            _sample: PhantomData,
        }
    }

    /// 从原始字节创建
    ///
    /// `bytes.len()` 必须等于 `rows * cols * bands * T::SIZE`。
    pub fn from_bytes(rows: usize, cols: usize, bands: usize, bytes: Vec<u8>) -> Result<Self> {
        if bytes.len() != rows * cols * bands * T::SIZE {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                "Byte length does not match raster geometry",
            ));
        }
        Ok(Self {
            rows,
            cols,
            bands,
            bytes,
            read_count: 0,
            write_count: 0,
            _sample: PhantomData,
        })
    }

    /// 原始字节
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// 取出原始字节
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// 样本读取次数
    pub fn read_count(&self) -> u64 {
        self.read_count
    }

    /// 样本写入次数
    pub fn write_count(&self) -> u64 {
        self.write_count
    }

    fn offset(&self, col: usize, row: usize, band: usize) -> usize {
        ((band * self.rows + row) * self.cols + col) * T::SIZE
    }
}

impl<T: Sample> Raster for ByteRaster<T> {
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
        let off = self.offset(col, row, band);
        self.read_count += 1;
        Ok(T::read_le(&self.bytes[off..off + T::SIZE]))
    }

    fn set(&mut self, col: usize, row: usize, band: usize, value: T) -> Result<()> {
        check_bounds(self.rows, self.cols, self.bands, col, row, band)?;
        let off = self.offset(col, row, band);
        value.write_le(&mut self.bytes[off..off + T::SIZE]);
        self.write_count += 1;
        Ok(())
    }

    fn read_rows(&mut self, band: usize, rows: Range<usize>, out: &mut [T]) -> Result<()> {
        check_rows(self.rows, self.cols, self.bands, band, &rows, out.len())?;
        let start = self.offset(0, rows.start, band);
        let src = &self.bytes[start..start + out.len() * T::SIZE];
        for (sample, chunk) in out.iter_mut().zip(src.chunks_exact(T::SIZE)) {
            *sample = T::read_le(chunk);
        }
        self.read_count += out.len() as u64;
        Ok(())
    }

    fn write_rows(&mut self, band: usize, rows: Range<usize>, data: &[T]) -> Result<()> {
        check_rows(self.rows, self.cols, self.bands, band, &rows, data.len())?;
        let start = self.offset(0, rows.start, band);
        let dst = &mut self.bytes[start..start + data.len() * T::SIZE];
        for (sample, chunk) in data.iter().zip(dst.chunks_exact_mut(T::SIZE)) {
            sample.write_le(chunk);
        }
        self.write_count += data.len() as u64;
        Ok(())
    }
}
