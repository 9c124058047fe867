//! Orthonormal DCT-II and its inverse (DCT-III), in 1D and 2D.
//!
//! The transform of length N is kept as an N×N basis matrix
//! `C[(k, i)] = a(k) * cos(PI * (2i + 1) * k / 2N)` with `a(0) = sqrt(1/N)` and
//! `a(k) = sqrt(2/N)` otherwise. `C` is orthogonal: the inverse is `Cᵀ`, and a
//! square block `X` transforms as `C X Cᵀ`. A constant input therefore puts all
//! of its energy in the DC term `sqrt(1/N) * sum(x)`.

use std::f64::consts::PI;

use nalgebra::{DMatrix, DVector, Dyn, Matrix, storage::Storage};

/// Precomputed DCT basis for one transform length.
#[derive(Debug, Clone)]
pub struct CosTable {
    basis: DMatrix<f64>,
    basis_t: DMatrix<f64>,
}

impl CosTable {
    pub fn new(n: usize) -> Self {
        let nf = n as f64;
        let dc = (1.0 / nf).sqrt();
        let ac = (2.0 / nf).sqrt();
        let basis = DMatrix::from_fn(n, n, |k, i| {
            let scale = if k == 0 { dc } else { ac };
            scale * (PI * (2 * i + 1) as f64 * k as f64 / (2.0 * nf)).cos()
        });
        let basis_t = basis.transpose();
        Self { basis, basis_t }
    }

    /// 1D DCT-II. `input` must have the table's length.
    pub fn dct1d(&self, input: &[f64]) -> Vec<f64> {
        let x = DVector::from_column_slice(input);
        (&self.basis * x).iter().copied().collect()
    }

    /// 1D DCT-III, the inverse of [`CosTable::dct1d`].
    pub fn idct1d(&self, input: &[f64]) -> Vec<f64> {
        let x = DVector::from_column_slice(input);
        (&self.basis_t * x).iter().copied().collect()
    }

    /// 2D DCT-II of an N×N block.
    ///
    /// Accepts owned matrices and views alike, so a block can be read straight
    /// out of a whole channel with `channel.view(origin, (n, n))`.
    /// Entry `(u, v)` of the result is vertical frequency `u`, horizontal `v`.
    pub fn dct2<S>(&self, block: &Matrix<f64, Dyn, Dyn, S>) -> DMatrix<f64>
    where
        S: Storage<f64, Dyn, Dyn>,
    {
        &self.basis * block * &self.basis_t
    }

    /// 2D DCT-III of an N×N coefficient block.
    pub fn idct2<S>(&self, coeffs: &Matrix<f64, Dyn, Dyn, S>) -> DMatrix<f64>
    where
        S: Storage<f64, Dyn, Dyn>,
    {
        &self.basis_t * coeffs * &self.basis
    }
}

/// One-shot 1D DCT-II of an arbitrary-length sequence.
pub fn dct(input: &[f64]) -> Vec<f64> {
    if input.is_empty() {
        return Vec::new();
    }
    CosTable::new(input.len()).dct1d(input)
}

/// One-shot 1D IDCT (DCT-III); inverse of [`dct`].
pub fn idct(input: &[f64]) -> Vec<f64> {
    if input.is_empty() {
        return Vec::new();
    }
    CosTable::new(input.len()).idct1d(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dct1d_roundtrip() {
        let x = [12.0, -3.5, 200.0, 0.25, 77.0, 64.0, -128.0, 9.0];
        let back = idct(&dct(&x));
        for (a, b) in x.iter().zip(&back) {
            assert!((a - b).abs() < 1e-3, "{a} vs {b}");
        }
    }

    #[test]
    fn test_constant_sequence_is_dc_only() {
        let x = [42.0; 8];
        let coeffs = dct(&x);
        let expected_dc = (1.0f64 / 8.0).sqrt() * 42.0 * 8.0;
        assert!((coeffs[0] - expected_dc).abs() < 1e-9);
        for (k, c) in coeffs.iter().enumerate().skip(1) {
            assert!(c.abs() < 1e-9, "AC coefficient {k} = {c}");
        }
    }

    #[test]
    fn test_basis_is_orthogonal() {
        let table = CosTable::new(8);
        let identity = &table.basis * &table.basis_t;
        assert!((identity - DMatrix::<f64>::identity(8, 8)).amax() < 1e-12);
    }

    #[test]
    fn test_dct2_roundtrip_8x8() {
        let table = CosTable::new(8);
        let block = DMatrix::from_fn(8, 8, |r, c| ((r * 8 + c) * 37 % 256) as f64);
        let back = table.idct2(&table.dct2(&block));
        assert!((&block - &back).amax() < 0.01);
    }

    #[test]
    fn test_dct2_flat_block() {
        let table = CosTable::new(8);
        let coeffs = table.dct2(&DMatrix::from_element(8, 8, 10.0));
        // Orthonormal 2D: DC = 8 * mean.
        assert!((coeffs[(0, 0)] - 80.0).abs() < 1e-9);
        assert!(coeffs.iter().skip(1).all(|c| c.abs() < 1e-9));
    }

    #[test]
    fn test_dct2_separates_directions() {
        // Varies along columns only: energy stays in row 0 of the spectrum.
        let table = CosTable::new(8);
        let block = DMatrix::from_fn(8, 8, |_, c| (c as f64 * 0.9).sin() * 50.0);
        let coeffs = table.dct2(&block);
        for u in 1..8 {
            for v in 0..8 {
                assert!(coeffs[(u, v)].abs() < 1e-9, "({u}, {v}) = {}", coeffs[(u, v)]);
            }
        }
    }

    #[test]
    fn test_dct2_on_view_matches_owned_block() {
        let table = CosTable::new(8);
        let channel = DMatrix::from_fn(24, 32, |r, c| ((r * 13 + c * 7) % 97) as f64);
        let view = channel.view((8, 16), (8, 8));
        let owned = view.clone_owned();
        assert!((table.dct2(&view) - table.dct2(&owned)).amax() < 1e-12);
    }

    #[test]
    fn test_empty_sequence() {
        assert!(dct(&[]).is_empty());
        assert!(idct(&[]).is_empty());
    }
}
