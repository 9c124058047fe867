//! Synthetic RGBA test images and noise shared by the integration tests.

#![allow(dead_code)]

use fogmark::BLUE_CHANNEL;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Smooth blue gradient with a seeded ±10 texture; values stay well inside
/// 0..=255 so embedding and noise never clip.
pub fn textured_image(width: u32, height: u32, seed: u64) -> Vec<u8> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut pixels = Vec::with_capacity((width * height * 4) as usize);
    for y in 0..height {
        for x in 0..width {
            let base = 128.0 + 50.0 * (x as f64 * 0.05).sin() * (y as f64 * 0.07).cos();
            let blue = (base + rng.random_range(-10.0..=10.0)).round().clamp(0.0, 255.0) as u8;
            pixels.extend([rng.random(), rng.random(), blue, 255]);
        }
    }
    pixels
}

/// Smooth image with no texture at all.
pub fn smooth_image(width: u32, height: u32) -> Vec<u8> {
    let mut pixels = Vec::with_capacity((width * height * 4) as usize);
    for y in 0..height {
        for x in 0..width {
            let blue = 128.0 + 50.0 * (x as f64 * 0.05).sin() * (y as f64 * 0.07).cos();
            pixels.extend([60, 160, blue as u8, 255]);
        }
    }
    pixels
}

/// Every byte uniformly random (alpha kept opaque).
pub fn random_image(width: u32, height: u32, seed: u64) -> Vec<u8> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut pixels = Vec::with_capacity((width * height * 4) as usize);
    for _ in 0..width * height {
        pixels.extend([rng.random(), rng.random(), rng.random(), 255]);
    }
    pixels
}

/// Add independent uniform integer noise in `-amplitude..=amplitude` to the
/// blue byte of every pixel.
pub fn add_blue_noise(pixels: &[u8], amplitude: i32, seed: u64) -> Vec<u8> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut out = pixels.to_vec();
    for px in out.chunks_exact_mut(4) {
        let noisy = i32::from(px[BLUE_CHANNEL]) + rng.random_range(-amplitude..=amplitude);
        px[BLUE_CHANNEL] = noisy.clamp(0, 255) as u8;
    }
    out
}

/// Assert every non-blue byte is unchanged.
pub fn assert_only_blue_changed(original: &[u8], marked: &[u8]) {
    assert_eq!(original.len(), marked.len());
    for (i, (a, b)) in original.iter().zip(marked).enumerate() {
        if i % 4 != BLUE_CHANNEL {
            assert_eq!(a, b, "byte {i} (channel {}) changed", i % 4);
        }
    }
}
