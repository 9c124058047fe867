//! # fogmark
//!
//! Blind watermarking of decoded RGBA rasters in the frequency domain.
//!
//! Two codecs share one bit-packing protocol:
//!
//! - **DCT**: parity-quantizes one mid-frequency coefficient of every 8×8
//!   block of the blue channel.
//! - **DWT**: parity-quantizes the diagonal-detail coefficients of the deepest
//!   Haar decomposition level.
//!
//! Each logical bit is repeated `redundancy` times and recovered by majority
//! vote, so extraction survives small per-pixel noise. Extraction of an
//! unmarked image returns `data: None` with zero confidence instead of an
//! error. Image file formats are out of scope: callers decode and encode
//! pixels themselves.
//!
//! # Quick start
//!
//! ```rust
//! use fogmark::{DctOptions, embed_dct, extract_dct};
//!
//! let (w, h) = (128u32, 128u32);
//! let pixels: Vec<u8> = (0..w * h)
//!     .flat_map(|i| [10, 20, (96 + i % 64) as u8, 255])
//!     .collect();
//! let opts = DctOptions::new(24.0, 3);
//!
//! let marked = embed_dct(&pixels, w, h, b"own-17", &opts).unwrap();
//! let found = extract_dct(&marked.embedded_data, w, h, &opts).unwrap();
//! assert_eq!(found.data.as_deref(), Some(&b"own-17"[..]));
//! ```

pub mod watermark;

pub use watermark::channel::{BLUE_CHANNEL, extract_channel, restore_channel};
pub use watermark::metrics::psnr;
pub use watermark::{
    DctCapacity, DctEmbedding, DctOptions, DwtCapacity, DwtEmbedding, DwtOptions, Extraction,
    Result, WatermarkError, calculate_dct_capacity, calculate_dwt_capacity, embed_dct, embed_dwt,
    extract_dct, extract_dwt,
};
