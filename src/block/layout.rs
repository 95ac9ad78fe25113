//! 块分区
//!
//! 把栅格的地址空间按行划分为固定大小的块：每个波段被切成若干段连续的行，
//! 一段行的所有列属于同一个块。
//!
//! ```text
//! rows_per_block  = ceil(R / min(N, R))
//! blocks_per_band = ceil(R / rows_per_block)
//! BlockId         = band * blocks_per_band + row / rows_per_block
//! ```
//!
//! 行优先的划分适合逐行扫描的算法，一次线性扫描涉及的块数很少。

use crate::error::{Error, ErrorKind, Result};
use crate::raster::check_bounds;
use crate::types::BlockId;
use core::ops::Range;

/// 块分区布局
///
/// 由同步器在构造时根据栅格几何确定，之后不可变。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockLayout {
    rows: usize,
    cols: usize,
    bands: usize,
    rows_per_block: usize,
    blocks_per_band: usize,
}

impl BlockLayout {
    /// 创建分区
    ///
    /// # 参数
    ///
    /// * `rows`, `cols`, `bands` - 栅格几何，均不能为零
    /// * `blocks_per_band` - 期望的每波段块数，超过行数时按行数截断
    pub fn new(rows: usize, cols: usize, bands: usize, blocks_per_band: usize) -> Result<Self> {
        if rows == 0 || cols == 0 || bands == 0 {
            return Err(Error::new(
                ErrorKind::InvalidConstruction,
                "Raster has zero rows, columns or bands",
            ));
        }
        if blocks_per_band == 0 {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                "Number of blocks per band must be at least 1",
            ));
        }

        let requested = blocks_per_band.min(rows);
        let rows_per_block = rows.div_ceil(requested);
        // 向上取整后实际块数可能少于请求值（例如 10 行分 4 块 -> 每块 3 行，共 4 块；
        // 10 行分 6 块 -> 每块 2 行，共 5 块）
        let blocks_per_band = rows.div_ceil(rows_per_block);

        Ok(Self {
            rows,
            cols,
            bands,
            rows_per_block,
            blocks_per_band,
        })
    }

    /// 行数
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// 列数
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// 波段数
    pub fn bands(&self) -> usize {
        self.bands
    }

    /// 每块行数（最后一块可能更少）
    pub fn rows_per_block(&self) -> usize {
        self.rows_per_block
    }

    /// 每波段块数
    pub fn blocks_per_band(&self) -> usize {
        self.blocks_per_band
    }

    /// 总块数
    pub fn block_count(&self) -> usize {
        self.blocks_per_band * self.bands
    }

    /// 块 ID 是否属于本分区
    pub fn contains(&self, id: BlockId) -> bool {
        id.index() < self.block_count()
    }

    /// 校验块 ID
    pub fn validate(&self, id: BlockId) -> Result<()> {
        if self.contains(id) {
            Ok(())
        } else {
            Err(Error::new(ErrorKind::InvalidBlock, "Block id outside of the partition"))
        }
    }

    /// 覆盖 `(row, band)` 的块
    ///
    /// 调用者保证坐标在范围内。
    pub fn block_of(&self, row: usize, band: usize) -> BlockId {
        debug_assert!(row < self.rows && band < self.bands);
        BlockId(band * self.blocks_per_band + row / self.rows_per_block)
    }

    /// 定位样本：返回所属块以及样本在块内的偏移
    ///
    /// 坐标越界时返回 `OutOfBounds`。
    pub fn locate(&self, col: usize, row: usize, band: usize) -> Result<(BlockId, usize)> {
        check_bounds(self.rows, self.cols, self.bands, col, row, band)?;
        let id = self.block_of(row, band);
        let offset = (row % self.rows_per_block) * self.cols + col;
        Ok((id, offset))
    }

    /// 块所在的波段
    pub fn band_of(&self, id: BlockId) -> usize {
        id.index() / self.blocks_per_band
    }

    /// 块覆盖的行范围
    pub fn row_range(&self, id: BlockId) -> Range<usize> {
        let start = (id.index() % self.blocks_per_band) * self.rows_per_block;
        let end = (start + self.rows_per_block).min(self.rows);
        start..end
    }

    /// 块内样本数
    pub fn block_len(&self, id: BlockId) -> usize {
        self.row_range(id).len() * self.cols
    }

    /// 遍历全部块
    pub fn iter(&self) -> impl Iterator<Item = BlockId> {
        (0..self.block_count()).map(BlockId)
    }
}
