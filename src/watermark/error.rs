//! Error types for the watermarking engine.
//!
//! Only caller mistakes and capacity overruns are errors. An image that
//! carries no readable watermark is a normal outcome and is reported through
//! [`Extraction::none`](super::packing::Extraction::none) instead.

use thiserror::Error;

/// Errors that can occur while embedding or extracting a watermark.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WatermarkError {
    /// Payload frame plus redundancy does not fit into the carrier.
    #[error(
        "payload needs {required_bits} carrier slots but the image offers only \
         {available_bits}"
    )]
    CapacityExceeded {
        required_bits: usize,
        available_bits: usize,
    },

    /// An empty payload cannot be framed.
    #[error("payload is empty")]
    EmptyPayload,

    /// Pixel buffer length does not match `width * height * 4`.
    #[error("pixel buffer size mismatch: expected {expected} bytes, got {got}")]
    InvalidBufferSize { expected: usize, got: usize },

    /// Width or height is zero, or their product overflows.
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// Strength, redundancy or levels out of range.
    #[error("invalid options: {0}")]
    InvalidOptions(&'static str),

    /// Two matrices that must share a shape do not.
    #[error("shape mismatch: {left:?} vs {right:?}")]
    ShapeMismatch {
        left: (usize, usize),
        right: (usize, usize),
    },
}

pub type Result<T> = std::result::Result<T, WatermarkError>;
