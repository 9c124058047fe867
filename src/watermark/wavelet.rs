//! Haar-DWT watermark codec.
//!
//! The blue channel is decomposed `levels` times and the payload is written
//! into the diagonal-detail (HH) subband of the deepest level, one
//! transmitted bit per coefficient in row-major order. Only the top-left
//! region whose sides are multiples of `2^levels` is transformed, so every
//! carrier coefficient is backed by real pixels; the remaining right and
//! bottom strips are left as they are.

use log::{debug, trace};
use nalgebra::DMatrix;
use rayon::prelude::*;

use super::channel::{self, BLUE_CHANNEL};
use super::dwt::{DetailBands, dwt2_multilevel, idwt2_multilevel};
use super::error::{Result, WatermarkError};
use super::packing::{self, Extraction, HEADER_BITS};
use super::params::{DwtOptions, validate_levels, validate_redundancy};
use super::qim;

/// Detail subband selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subband {
    Lh,
    Hl,
    Hh,
}

/// Subband of the deepest level that carries the payload. Shared by embed
/// and extract; nothing in the frame records it.
pub const EMBED_SUBBAND: Subband = Subband::Hh;

/// Mean copy agreement below which an extraction counts as "not detected".
pub const DWT_CONFIDENCE_FLOOR: f64 = 0.8;

/// Capacity of an image under the DWT codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DwtCapacity {
    /// Payload bits available after header and redundancy overhead.
    pub capacity_bits: usize,
    pub capacity_bytes: usize,
    /// Carrier coefficients in the deepest embedding subband.
    pub coefficients: usize,
}

/// Output of [`embed_dwt`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DwtEmbedding {
    /// New RGBA buffer, same length and layout as the input.
    pub embedded_data: Vec<u8>,
    /// Coefficients modified (one transmitted bit each).
    pub coefficients_modified: usize,
    /// Logical frame bits (header plus payload) before repetition.
    pub bits_embedded: usize,
}

impl DetailBands {
    fn band(&self, which: Subband) -> &DMatrix<f64> {
        match which {
            Subband::Lh => &self.lh,
            Subband::Hl => &self.hl,
            Subband::Hh => &self.hh,
        }
    }

    fn band_mut(&mut self, which: Subband) -> &mut DMatrix<f64> {
        match which {
            Subband::Lh => &mut self.lh,
            Subband::Hl => &mut self.hl,
            Subband::Hh => &mut self.hh,
        }
    }
}

/// Region transformed by the codec: sides rounded down to `2^levels`.
#[derive(Debug, Clone, Copy)]
struct Region {
    rows: usize,
    cols: usize,
    levels: usize,
}

impl Region {
    fn new(width: u32, height: u32, levels: usize) -> Self {
        let rows = (height as usize >> levels) << levels;
        let cols = (width as usize >> levels) << levels;
        Self { rows, cols, levels }
    }

    fn band_shape(&self) -> (usize, usize) {
        (self.rows >> self.levels, self.cols >> self.levels)
    }

    fn coefficients(&self) -> usize {
        let (r, c) = self.band_shape();
        r * c
    }
}

/// Row-major position of coefficient `index` in a band with `cols` columns.
#[inline]
fn position(index: usize, cols: usize) -> (usize, usize) {
    (index / cols, index % cols)
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// How many payload bytes an image can carry with the given depth and
/// redundancy.
pub fn calculate_dwt_capacity(
    width: u32,
    height: u32,
    levels: usize,
    redundancy: usize,
) -> Result<DwtCapacity> {
    validate_levels(levels)?;
    validate_redundancy(redundancy)?;
    let coefficients = Region::new(width, height, levels).coefficients();
    let capacity_bits = (coefficients / redundancy).saturating_sub(HEADER_BITS);
    trace!(
        "dwt capacity {width}x{height} l={levels} r={redundancy}: {coefficients} coefficients, \
         {capacity_bits} bits"
    );
    Ok(DwtCapacity {
        capacity_bits,
        capacity_bytes: capacity_bits / 8,
        coefficients,
    })
}

/// Embed `payload` into the blue channel of an RGBA buffer.
///
/// Fails with [`WatermarkError::CapacityExceeded`] before any pixel work if
/// the framed payload does not fit.
pub fn embed_dwt(
    pixels: &[u8],
    width: u32,
    height: u32,
    payload: &[u8],
    options: &DwtOptions,
) -> Result<DwtEmbedding> {
    options.validate()?;
    channel::check_buffer(pixels, width, height)?;
    if payload.is_empty() {
        return Err(WatermarkError::EmptyPayload);
    }

    let region = Region::new(width, height, options.levels);
    let available = region.coefficients();
    let frame_bits = packing::frame_bits(payload.len());
    let required = frame_bits.saturating_mul(options.redundancy);
    if u32::try_from(payload.len()).is_err() || required > available {
        return Err(WatermarkError::CapacityExceeded {
            required_bits: required,
            available_bits: available,
        });
    }

    let bits = packing::encode(payload, options.redundancy);
    let mut blue = channel::extract_channel(pixels, width, height, BLUE_CHANNEL)?;
    let area = blue
        .view((0, 0), (region.rows, region.cols))
        .clone_owned();

    let mut decomposition = dwt2_multilevel(&area, options.levels);
    let (_, band_cols) = region.band_shape();
    let band = decomposition
        .deepest_mut()
        .map(|d| d.band_mut(EMBED_SUBBAND))
        .ok_or(WatermarkError::InvalidOptions("levels must be within 1..=8"))?;

    let current: &DMatrix<f64> = band;
    let updated: Vec<((usize, usize), f64)> = bits
        .par_iter()
        .enumerate()
        .map(|(i, &bit)| {
            let pos = position(i, band_cols);
            (pos, qim::embed_bit(current[pos], options.strength, bit))
        })
        .collect();
    for (pos, value) in updated {
        band[pos] = value;
    }

    let reconstructed = idwt2_multilevel(&decomposition);
    blue.view_mut((0, 0), (region.rows, region.cols))
        .copy_from(&reconstructed);

    let embedded_data = channel::restore_channel(pixels, width, height, BLUE_CHANNEL, &blue)?;
    debug!(
        "dwt embed: {} payload bytes, {frame_bits} frame bits, {} of {available} coefficients \
         at level {}",
        payload.len(),
        bits.len(),
        options.levels
    );

    Ok(DwtEmbedding {
        embedded_data,
        coefficients_modified: bits.len(),
        bits_embedded: frame_bits,
    })
}

/// Recover a payload embedded by [`embed_dwt`] with the same options.
///
/// Only malformed input is an error; an image without a readable watermark
/// yields [`Extraction::none`].
pub fn extract_dwt(
    pixels: &[u8],
    width: u32,
    height: u32,
    options: &DwtOptions,
) -> Result<Extraction> {
    options.validate()?;
    channel::check_buffer(pixels, width, height)?;

    let region = Region::new(width, height, options.levels);
    let usable = (region.coefficients() / options.redundancy) * options.redundancy;
    if usable < HEADER_BITS * options.redundancy {
        debug!(
            "dwt extract: {} coefficients cannot hold a header",
            region.coefficients()
        );
        return Ok(Extraction::none());
    }

    let blue = channel::extract_channel(pixels, width, height, BLUE_CHANNEL)?;
    let area = blue
        .view((0, 0), (region.rows, region.cols))
        .clone_owned();
    let decomposition = dwt2_multilevel(&area, options.levels);
    let (_, band_cols) = region.band_shape();
    let Some(band) = decomposition.deepest().map(|d| d.band(EMBED_SUBBAND)) else {
        return Ok(Extraction::none());
    };

    let bits: Vec<u8> = (0..usable)
        .into_par_iter()
        .map(|i| qim::quantized_bit(band[position(i, band_cols)], options.strength))
        .collect();

    let extraction = packing::decode(&bits, options.redundancy, DWT_CONFIDENCE_FLOOR);
    if extraction.is_detected() {
        debug!(
            "dwt extract: watermark found at level {}, confidence {:.3}",
            options.levels, extraction.confidence
        );
    }
    Ok(extraction)
}
