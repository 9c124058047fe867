//! Single-channel views of an interleaved RGBA pixel buffer.
//!
//! Both codecs work on one byte channel at a time. The channel is lifted into
//! a `height × width` [`DMatrix`] of `f64` samples and written back after the
//! frequency-domain edit, leaving every other byte untouched.

use image::{ImageBuffer, Rgba, RgbaImage};
use nalgebra::DMatrix;

use super::error::{Result, WatermarkError};

pub const BYTES_PER_PIXEL: usize = 4;

/// Blue carries the watermark: the eye is least sensitive to it.
pub const BLUE_CHANNEL: usize = 2;

/// Check that `pixels` holds exactly `width * height` RGBA pixels.
pub fn check_buffer(pixels: &[u8], width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(WatermarkError::InvalidDimensions { width, height });
    }
    let expected = (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(BYTES_PER_PIXEL))
        .ok_or(WatermarkError::InvalidDimensions { width, height })?;
    if pixels.len() != expected {
        return Err(WatermarkError::InvalidBufferSize {
            expected,
            got: pixels.len(),
        });
    }
    Ok(())
}

fn rgba_view(pixels: &[u8], width: u32, height: u32) -> Result<ImageBuffer<Rgba<u8>, &[u8]>> {
    check_buffer(pixels, width, height)?;
    ImageBuffer::from_raw(width, height, pixels).ok_or(WatermarkError::InvalidBufferSize {
        expected: width as usize * height as usize * BYTES_PER_PIXEL,
        got: pixels.len(),
    })
}

fn check_channel(channel: usize) -> Result<()> {
    if channel >= BYTES_PER_PIXEL {
        return Err(WatermarkError::InvalidOptions("channel index must be within 0..4"));
    }
    Ok(())
}

/// Pull one byte channel out of the buffer into a `height × width` matrix.
pub fn extract_channel(
    pixels: &[u8],
    width: u32,
    height: u32,
    channel: usize,
) -> Result<DMatrix<f64>> {
    check_channel(channel)?;
    let img = rgba_view(pixels, width, height)?;
    Ok(DMatrix::from_fn(height as usize, width as usize, |r, c| {
        f64::from(img.get_pixel(c as u32, r as u32)[channel])
    }))
}

/// Write `matrix` into the `channel` slot of a copy of `pixels`.
///
/// Samples are rounded to the nearest integer and clamped to `[0, 255]`.
pub fn restore_channel(
    pixels: &[u8],
    width: u32,
    height: u32,
    channel: usize,
    matrix: &DMatrix<f64>,
) -> Result<Vec<u8>> {
    check_channel(channel)?;
    check_buffer(pixels, width, height)?;
    let shape = (height as usize, width as usize);
    if matrix.shape() != shape {
        return Err(WatermarkError::ShapeMismatch {
            left: shape,
            right: matrix.shape(),
        });
    }

    let mut img = RgbaImage::from_raw(width, height, pixels.to_vec()).ok_or(
        WatermarkError::InvalidBufferSize {
            expected: shape.0 * shape.1 * BYTES_PER_PIXEL,
            got: pixels.len(),
        },
    )?;
    for (x, y, px) in img.enumerate_pixels_mut() {
        px[channel] = matrix[(y as usize, x as usize)].round().clamp(0.0, 255.0) as u8;
    }
    Ok(img.into_raw())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_pixels(width: u32, height: u32) -> Vec<u8> {
        (0..width * height * 4).map(|i| (i * 7 % 251) as u8).collect()
    }

    #[test]
    fn test_check_buffer_rejects_wrong_length() {
        let pixels = vec![0u8; 15];
        assert_eq!(
            check_buffer(&pixels, 2, 2),
            Err(WatermarkError::InvalidBufferSize {
                expected: 16,
                got: 15
            })
        );
    }

    #[test]
    fn test_check_buffer_rejects_zero_dimension() {
        assert!(matches!(
            check_buffer(&[], 0, 4),
            Err(WatermarkError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_extract_reads_blue_row_major() {
        let (w, h) = (3u32, 2u32);
        let pixels = sample_pixels(w, h);
        let blue = extract_channel(&pixels, w, h, BLUE_CHANNEL).unwrap();
        assert_eq!(blue.shape(), (2, 3));
        for r in 0..2 {
            for c in 0..3 {
                let idx = (r * 3 + c) * 4 + BLUE_CHANNEL;
                assert_eq!(blue[(r, c)], pixels[idx] as f64);
            }
        }
    }

    #[test]
    fn test_restore_rounds_and_clamps() {
        let pixels = vec![100u8; 4 * 4];
        let m = DMatrix::from_row_slice(2, 2, &[-3.0, 12.4, 12.6, 300.0]);
        let out = restore_channel(&pixels, 2, 2, BLUE_CHANNEL, &m).unwrap();
        let blue: Vec<u8> = out.chunks(4).map(|p| p[BLUE_CHANNEL]).collect();
        assert_eq!(blue, vec![0, 12, 13, 255]);
    }

    #[test]
    fn test_restore_leaves_other_channels_untouched() {
        let (w, h) = (5u32, 4u32);
        let pixels = sample_pixels(w, h);
        let mut blue = extract_channel(&pixels, w, h, BLUE_CHANNEL).unwrap();
        blue.iter_mut().for_each(|v| *v = 255.0 - *v);
        let out = restore_channel(&pixels, w, h, BLUE_CHANNEL, &blue).unwrap();

        assert_eq!(out.len(), pixels.len());
        for (i, (a, b)) in pixels.iter().zip(out.iter()).enumerate() {
            if i % 4 != BLUE_CHANNEL {
                assert_eq!(a, b, "byte {i} changed");
            }
        }
    }

    #[test]
    fn test_restore_rejects_wrong_shape() {
        let pixels = vec![0u8; 4 * 4];
        let m = DMatrix::zeros(3, 2);
        assert!(matches!(
            restore_channel(&pixels, 2, 2, BLUE_CHANNEL, &m),
            Err(WatermarkError::ShapeMismatch { .. })
        ));
    }
}
