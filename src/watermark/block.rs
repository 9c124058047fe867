//! Block-DCT watermark codec.
//!
//! The blue channel is tiled into 8×8 blocks in row-major scan order. Each
//! transmitted bit goes into one block by parity-quantizing a single
//! mid-frequency DCT coefficient; `redundancy` consecutive blocks carry one
//! logical bit. Pixels in a trailing partial row or column of blocks are never
//! touched.

use log::{debug, trace};
use nalgebra::DMatrix;
use rayon::prelude::*;

use super::channel::{self, BLUE_CHANNEL};
use super::dct::CosTable;
use super::error::{Result, WatermarkError};
use super::packing::{self, Extraction, HEADER_BITS};
use super::params::{DctOptions, validate_redundancy};
use super::qim;

pub const BLOCK_SIZE: usize = 8;

/// (row, column) of the coefficient carrying the bit inside each block's
/// DCT. Far enough from DC to stay invisible, low enough to survive noise.
pub const EMBED_POSITION: (usize, usize) = (4, 3);

/// Mean copy agreement below which an extraction counts as "not detected".
pub const DCT_CONFIDENCE_FLOOR: f64 = 0.85;

/// Capacity of an image under the DCT codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DctCapacity {
    /// Payload bits available after header and redundancy overhead.
    pub capacity_bits: usize,
    pub capacity_bytes: usize,
    /// Number of complete 8×8 blocks.
    pub blocks: usize,
}

/// Output of [`embed_dct`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DctEmbedding {
    /// New RGBA buffer, same length and layout as the input.
    pub embedded_data: Vec<u8>,
    /// Blocks modified (one transmitted bit each).
    pub blocks_used: usize,
    /// Logical frame bits (header plus payload) before repetition.
    pub bits_embedded: usize,
}

// ---------------------------------------------------------------------------
// Block grid
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
struct BlockGrid {
    rows: usize,
    cols: usize,
}

impl BlockGrid {
    fn new(width: u32, height: u32) -> Self {
        Self {
            rows: height as usize / BLOCK_SIZE,
            cols: width as usize / BLOCK_SIZE,
        }
    }

    fn len(&self) -> usize {
        self.rows * self.cols
    }

    /// Top-left pixel of block `index` in row-major scan order.
    #[inline]
    fn origin(&self, index: usize) -> (usize, usize) {
        (
            (index / self.cols) * BLOCK_SIZE,
            (index % self.cols) * BLOCK_SIZE,
        )
    }
}

/// Embed one transmitted bit into the block at `origin`: DCT → QIM → IDCT.
fn block_embed(
    channel: &DMatrix<f64>,
    origin: (usize, usize),
    cos_table: &CosTable,
    bit: u8,
    strength: f64,
) -> DMatrix<f64> {
    let mut coeffs = cos_table.dct2(&channel.view(origin, (BLOCK_SIZE, BLOCK_SIZE)));
    coeffs[EMBED_POSITION] = qim::embed_bit(coeffs[EMBED_POSITION], strength, bit);
    cos_table.idct2(&coeffs)
}

fn block_extract(
    channel: &DMatrix<f64>,
    origin: (usize, usize),
    cos_table: &CosTable,
    strength: f64,
) -> u8 {
    let coeffs = cos_table.dct2(&channel.view(origin, (BLOCK_SIZE, BLOCK_SIZE)));
    qim::quantized_bit(coeffs[EMBED_POSITION], strength)
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// How many payload bytes an image can carry with the given redundancy.
pub fn calculate_dct_capacity(width: u32, height: u32, redundancy: usize) -> Result<DctCapacity> {
    validate_redundancy(redundancy)?;
    let blocks = BlockGrid::new(width, height).len();
    let capacity_bits = (blocks / redundancy).saturating_sub(HEADER_BITS);
    trace!("dct capacity {width}x{height} r={redundancy}: {blocks} blocks, {capacity_bits} bits");
    Ok(DctCapacity {
        capacity_bits,
        capacity_bytes: capacity_bits / 8,
        blocks,
    })
}

/// Embed `payload` into the blue channel of an RGBA buffer.
///
/// Fails with [`WatermarkError::CapacityExceeded`] before any pixel work if
/// the framed payload does not fit.
pub fn embed_dct(
    pixels: &[u8],
    width: u32,
    height: u32,
    payload: &[u8],
    options: &DctOptions,
) -> Result<DctEmbedding> {
    options.validate()?;
    channel::check_buffer(pixels, width, height)?;
    if payload.is_empty() {
        return Err(WatermarkError::EmptyPayload);
    }

    let grid = BlockGrid::new(width, height);
    let frame_bits = packing::frame_bits(payload.len());
    let required = frame_bits.saturating_mul(options.redundancy);
    if u32::try_from(payload.len()).is_err() || required > grid.len() {
        return Err(WatermarkError::CapacityExceeded {
            required_bits: required,
            available_bits: grid.len(),
        });
    }

    let bits = packing::encode(payload, options.redundancy);
    let mut blue = channel::extract_channel(pixels, width, height, BLUE_CHANNEL)?;
    let cos_table = CosTable::new(BLOCK_SIZE);

    // Parallel: compute each block independently
    let new_blocks: Vec<((usize, usize), DMatrix<f64>)> = bits
        .par_iter()
        .enumerate()
        .map(|(bi, &bit)| {
            let origin = grid.origin(bi);
            (origin, block_embed(&blue, origin, &cos_table, bit, options.strength))
        })
        .collect();

    // Write all blocks back
    for (origin, block) in new_blocks {
        blue.view_mut(origin, (BLOCK_SIZE, BLOCK_SIZE)).copy_from(&block);
    }

    let embedded_data = channel::restore_channel(pixels, width, height, BLUE_CHANNEL, &blue)?;
    debug!(
        "dct embed: {} payload bytes, {frame_bits} frame bits, {} of {} blocks",
        payload.len(),
        bits.len(),
        grid.len()
    );

    Ok(DctEmbedding {
        embedded_data,
        blocks_used: bits.len(),
        bits_embedded: frame_bits,
    })
}

/// Recover a payload embedded by [`embed_dct`] with the same options.
///
/// Only malformed input is an error; an image without a readable watermark
/// yields [`Extraction::none`].
pub fn extract_dct(
    pixels: &[u8],
    width: u32,
    height: u32,
    options: &DctOptions,
) -> Result<Extraction> {
    options.validate()?;
    channel::check_buffer(pixels, width, height)?;

    let grid = BlockGrid::new(width, height);
    let usable = (grid.len() / options.redundancy) * options.redundancy;
    if usable < HEADER_BITS * options.redundancy {
        debug!("dct extract: {} blocks cannot hold a header", grid.len());
        return Ok(Extraction::none());
    }

    let blue = channel::extract_channel(pixels, width, height, BLUE_CHANNEL)?;
    let cos_table = CosTable::new(BLOCK_SIZE);

    let bits: Vec<u8> = (0..usable)
        .into_par_iter()
        .map(|bi| block_extract(&blue, grid.origin(bi), &cos_table, options.strength))
        .collect();

    let extraction = packing::decode(&bits, options.redundancy, DCT_CONFIDENCE_FLOOR);
    if extraction.is_detected() {
        debug!("dct extract: watermark found, confidence {:.3}", extraction.confidence);
    }
    Ok(extraction)
}
