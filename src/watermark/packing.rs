//! Bit-packing protocol shared by the DCT and DWT codecs.
//!
//! Frame format: `[u32 big-endian byte length] + [payload bytes]`, every byte
//! expanded MSB first into 0/1 bits. Logical bit `i` is XORed with bit `i` of
//! the cycled [`WHITENING`] pattern and then repeated `redundancy` times back
//! to back. Decoding groups the copies, takes a majority vote per group (ties
//! resolve to 0), removes the whitening and reports how strongly the copies
//! agreed.

use log::debug;

/// Width of the byte-length header in bits.
pub const HEADER_BITS: usize = 32;

/// Whitening pattern applied to the logical frame bits, MSB first, repeating
/// every 256 bits.
///
/// Unmarked carriers read mostly as even parity. After de-whitening, an
/// all-zero stream decodes to the header `0x4740_D18C`, and a stream with a
/// few stray ones lands next to it, far beyond what an image can hold.
pub const WHITENING: [u8; 32] = [
    0x47, 0x40, 0xD1, 0x8C, 0x6D, 0x4F, 0x74, 0x09, 0x95, 0x66, 0x4A, 0xC8, 0x59, 0xFA, 0xC7, 0x19,
    0xB2, 0xBE, 0x67, 0xD8, 0x26, 0x96, 0xE4, 0x6C, 0x59, 0xC5, 0x30, 0xA3, 0xD2, 0xC3, 0x0A, 0xFB,
];

#[inline]
fn whitening_bit(index: usize) -> u8 {
    (WHITENING[(index / 8) % WHITENING.len()] >> (7 - index % 8)) & 1
}

/// Result of an extraction attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    /// Recovered payload, `None` when no watermark was detected.
    pub data: Option<Vec<u8>>,
    /// Mean fraction of redundant copies agreeing with the majority.
    pub confidence: f64,
}

impl Extraction {
    pub fn none() -> Self {
        Self {
            data: None,
            confidence: 0.0,
        }
    }

    pub fn is_detected(&self) -> bool {
        self.data.is_some()
    }
}

/// Logical bits needed for a frame carrying `payload_len` bytes.
pub fn frame_bits(payload_len: usize) -> usize {
    HEADER_BITS + payload_len * 8
}

/// Encode `payload` into the transmitted bit stream.
///
/// The caller checks capacity and that the length fits in the header.
pub fn encode(payload: &[u8], redundancy: usize) -> Vec<u8> {
    let header = (payload.len() as u32).to_be_bytes();
    let logical = header
        .iter()
        .chain(payload)
        .flat_map(|&byte| (0..8).rev().map(move |i| (byte >> i) & 1));

    let mut bits = Vec::with_capacity(frame_bits(payload.len()) * redundancy);
    for (index, bit) in logical.enumerate() {
        bits.extend(std::iter::repeat_n(bit ^ whitening_bit(index), redundancy));
    }
    bits
}

/// Majority vote over one group of copies. Returns the bit and how many
/// copies agreed with it.
#[inline]
fn vote(group: &[u8]) -> (u8, usize) {
    let ones = group.iter().filter(|&&b| b & 1 == 1).count();
    let zeros = group.len() - ones;
    if ones > zeros { (1, ones) } else { (0, zeros) }
}

/// Decode a (possibly noisy) transmitted bit stream.
///
/// Anything that does not look like a frame, or whose copies agree less than
/// `floor` on average, is reported as [`Extraction::none`].
pub fn decode(bits: &[u8], redundancy: usize, floor: f64) -> Extraction {
    if redundancy == 0 {
        return Extraction::none();
    }
    let available = bits.len() / redundancy;
    if available < HEADER_BITS {
        debug!("no watermark: {available} logical bits cannot hold a header");
        return Extraction::none();
    }

    let mut groups = bits
        .chunks_exact(redundancy)
        .map(vote)
        .enumerate()
        .map(|(index, (bit, votes))| (bit ^ whitening_bit(index), votes));
    let mut agreed = 0usize;

    let mut length = 0u64;
    for (bit, votes) in groups.by_ref().take(HEADER_BITS) {
        length = (length << 1) | u64::from(bit);
        agreed += votes;
    }

    let length = length as usize;
    if length == 0 {
        debug!("no watermark: zero-length header");
        return Extraction::none();
    }
    let needed = match length.checked_mul(8).and_then(|n| n.checked_add(HEADER_BITS)) {
        Some(n) if n <= available => n,
        _ => {
            debug!("no watermark: header claims {length} bytes, {available} logical bits present");
            return Extraction::none();
        }
    };

    let mut data = Vec::with_capacity(length);
    let mut byte = 0u8;
    for (i, (bit, votes)) in groups.take(needed - HEADER_BITS).enumerate() {
        byte = (byte << 1) | bit;
        agreed += votes;
        if i % 8 == 7 {
            data.push(byte);
            byte = 0;
        }
    }

    let confidence = agreed as f64 / (needed * redundancy) as f64;
    if confidence < floor {
        debug!("no watermark: confidence {confidence:.3} below floor {floor:.3}");
        return Extraction::none();
    }

    Extraction {
        data: Some(data),
        confidence,
    }
}
