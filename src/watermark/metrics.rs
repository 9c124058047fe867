//! Fidelity metrics between channel matrices.
//!
//! Diagnostic only: nothing in the codecs branches on these values.

use nalgebra::DMatrix;

use super::error::{Result, WatermarkError};

/// Mean squared per-cell difference. `0.0` for empty matrices.
pub fn mse(a: &DMatrix<f64>, b: &DMatrix<f64>) -> Result<f64> {
    if a.shape() != b.shape() {
        return Err(WatermarkError::ShapeMismatch {
            left: a.shape(),
            right: b.shape(),
        });
    }
    if a.is_empty() {
        return Ok(0.0);
    }
    Ok((a - b).norm_squared() / a.len() as f64)
}

/// Peak signal-to-noise ratio in dB for 8-bit samples.
///
/// Returns `f64::INFINITY` when the matrices are identical.
pub fn psnr(a: &DMatrix<f64>, b: &DMatrix<f64>) -> Result<f64> {
    let mse_val = mse(a, b)?;
    if mse_val == 0.0 {
        return Ok(f64::INFINITY);
    }
    Ok(10.0 * (255.0_f64 * 255.0 / mse_val).log10())
}
