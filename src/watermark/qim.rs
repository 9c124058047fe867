//! Quantization-parity embedding shared by both codecs.
//!
//! A coefficient is snapped to a multiple of `step`; even multiples carry a
//! `0`, odd multiples a `1`. Decoding survives any perturbation smaller than
//! `step / 2`.

/// Parity of the nearest quantization index of `coeff`.
#[inline]
pub fn quantized_bit(coeff: f64, step: f64) -> u8 {
    ((coeff / step).round() as i64).rem_euclid(2) as u8
}

/// Move `coeff` to the nearest multiple of `step` whose parity equals `bit`.
#[inline]
pub fn embed_bit(coeff: f64, step: f64, bit: u8) -> f64 {
    let scaled = coeff / step;
    let q = scaled.round();
    let target = if (q as i64).rem_euclid(2) as u8 == bit & 1 {
        q
    } else if scaled >= q {
        q + 1.0
    } else {
        q - 1.0
    };
    target * step
}
