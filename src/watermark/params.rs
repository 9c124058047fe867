use super::error::{Result, WatermarkError};

/// Deepest Haar decomposition the DWT codec accepts.
pub const MAX_LEVELS: usize = 8;

// ---------------------------------------------------------------------------
// DCT codec options
// ---------------------------------------------------------------------------

/// Options for the block-DCT codec. Must match between embed and extract.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DctOptions {
    /// QIM quantization step applied to the selected DCT coefficient.
    pub strength: f64,
    /// Number of blocks that carry each logical bit.
    pub redundancy: usize,
}

impl DctOptions {
    pub fn new(strength: f64, redundancy: usize) -> Self {
        Self {
            strength,
            redundancy,
        }
    }

    pub fn validate(&self) -> Result<()> {
        validate_strength(self.strength)?;
        validate_redundancy(self.redundancy)
    }
}

// ---------------------------------------------------------------------------
// DWT codec options
// ---------------------------------------------------------------------------

/// Options for the Haar-DWT codec. Must match between embed and extract.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DwtOptions {
    /// Decomposition depth; the payload lives in the deepest level.
    pub levels: usize,
    /// QIM quantization step applied to each detail coefficient.
    pub strength: f64,
    /// Number of coefficients that carry each logical bit.
    pub redundancy: usize,
}

impl DwtOptions {
    pub fn new(levels: usize, strength: f64, redundancy: usize) -> Self {
        Self {
            levels,
            strength,
            redundancy,
        }
    }

    pub fn validate(&self) -> Result<()> {
        validate_levels(self.levels)?;
        validate_strength(self.strength)?;
        validate_redundancy(self.redundancy)
    }
}

pub(crate) fn validate_redundancy(redundancy: usize) -> Result<()> {
    if redundancy == 0 {
        return Err(WatermarkError::InvalidOptions("redundancy must be at least 1"));
    }
    Ok(())
}

pub(crate) fn validate_levels(levels: usize) -> Result<()> {
    if levels == 0 || levels > MAX_LEVELS {
        return Err(WatermarkError::InvalidOptions("levels must be within 1..=8"));
    }
    Ok(())
}

fn validate_strength(strength: f64) -> Result<()> {
    if !strength.is_finite() || strength <= 0.0 {
        return Err(WatermarkError::InvalidOptions(
            "strength must be a positive finite number",
        ));
    }
    Ok(())
}
