// src/blocks.rs

//! Block-grid collaborator surface.
//!
//! An external segmentation layer splits an image into fixed-size tiles
//! and pads the symbol stream to whole blocks; this module turns the
//! encoder's per-symbol bit offsets into the per-block table that lets a
//! parallel harness seek each worker straight to its block's first code.

use crate::utils::error::{HuffmanError, Result};

/// Bit offset of each block's first symbol within the packed stream.
pub type BlockBitOffsetTable = Vec<u32>;

/// Tile geometry supplied by the external segmentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockGrid {
    width: u32,
    height: u32,
    block_dim: u32,
}

impl BlockGrid {
    pub fn new(width: u32, height: u32, block_dim: u32) -> Result<Self> {
        if width == 0 || height == 0 || block_dim == 0 {
            return Err(HuffmanError::InvalidArg(format!(
                "block grid {}x{} with block dimension {} is empty",
                width, height, block_dim
            )));
        }
        Ok(Self {
            width,
            height,
            block_dim,
        })
    }

    #[inline]
    pub fn blocks_across(&self) -> u32 {
        self.width.div_ceil(self.block_dim)
    }

    #[inline]
    pub fn blocks_down(&self) -> u32 {
        self.height.div_ceil(self.block_dim)
    }

    /// Number of blocks covering the grid; edge tiles are padded by the
    /// segmentation layer, so partial tiles count whole.
    #[inline]
    pub fn num_blocks(&self) -> usize {
        self.blocks_across() as usize * self.blocks_down() as usize
    }

    /// Symbols carried by every block.
    #[inline]
    pub fn symbols_per_block(&self) -> usize {
        (self.block_dim * self.block_dim) as usize
    }

    /// Symbol count of the padded stream the grid describes.
    #[inline]
    pub fn total_symbols(&self) -> usize {
        self.num_blocks() * self.symbols_per_block()
    }
}

/// Builds the per-block bit offset table for a grid.
///
/// Block `i` starts at symbol `i * block_dim²`; its bit offset comes from
/// the encoder's per-symbol record, since varying code lengths make it
/// impossible to compute from the block size alone. The offsets must
/// cover the grid's padded symbol count.
pub fn block_bit_offsets(symbol_bit_offsets: &[u32], grid: &BlockGrid) -> Result<BlockBitOffsetTable> {
    let symbols_per_block = grid.symbols_per_block();
    let num_blocks = grid.num_blocks();
    let last_start = (num_blocks - 1) * symbols_per_block;
    if symbol_bit_offsets.len() <= last_start {
        return Err(HuffmanError::InvalidArg(format!(
            "{} symbol offsets cannot cover {} blocks of {} symbols",
            symbol_bit_offsets.len(),
            num_blocks,
            symbols_per_block
        )));
    }

    Ok((0..num_blocks)
        .map(|i| symbol_bit_offsets[i * symbols_per_block])
        .collect())
}

/// Offset table for a flat (non-grid) stream cut into runs of
/// `symbols_per_block` symbols; a trailing partial run is ignored.
pub fn block_bit_offsets_linear(
    symbol_bit_offsets: &[u32],
    symbols_per_block: usize,
) -> Result<BlockBitOffsetTable> {
    if symbols_per_block == 0 {
        return Err(HuffmanError::InvalidArg(
            "symbols_per_block must be nonzero".to_string(),
        ));
    }
    let num_blocks = symbol_bit_offsets.len() / symbols_per_block;
    Ok((0..num_blocks)
        .map(|i| symbol_bit_offsets[i * symbols_per_block])
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_offsets_step_by_block_width() {
        // 8 symbols of 2 bits each, 2 symbols per block
        let symbol_offsets: Vec<u32> = (0..8).map(|i| i * 2).collect();
        let table = block_bit_offsets_linear(&symbol_offsets, 2).unwrap();
        assert_eq!(table, vec![0, 4, 8, 12]);
    }

    #[test]
    fn grid_rounds_partial_tiles_up() {
        let grid = BlockGrid::new(5, 3, 2).unwrap();
        assert_eq!(grid.blocks_across(), 3);
        assert_eq!(grid.blocks_down(), 2);
        assert_eq!(grid.num_blocks(), 6);
        assert_eq!(grid.total_symbols(), 24);
    }

    #[test]
    fn grid_offsets_index_block_starts() {
        let grid = BlockGrid::new(4, 2, 2).unwrap();
        // 8 symbols, 3 bits each
        let symbol_offsets: Vec<u32> = (0..8).map(|i| i * 3).collect();
        let table = block_bit_offsets(&symbol_offsets, &grid).unwrap();
        assert_eq!(table, vec![0, 12]);
    }

    #[test]
    fn grid_rejects_short_offset_record() {
        let grid = BlockGrid::new(4, 4, 2).unwrap();
        let symbol_offsets = vec![0u32; 8];
        assert!(block_bit_offsets(&symbol_offsets, &grid).is_err());
    }

    #[test]
    fn rejects_empty_geometry() {
        assert!(BlockGrid::new(0, 4, 2).is_err());
        assert!(BlockGrid::new(4, 4, 0).is_err());
    }
}
