/// 2D Haar Discrete Wavelet Transform over `DMatrix<f64>`.
///
/// Each 2×2 neighbourhood `[a b; c d]` maps to
/// `ll = (a+b+c+d)/2`, `lh = (a-b+c-d)/2`, `hl = (a+b-c-d)/2`,
/// `hh = (a-b-c+d)/2`, which is the `1/√2` Haar pair applied along rows and
/// then along columns. Odd sizes are padded by edge replication, so every
/// subband is `⌈rows/2⌉ × ⌈cols/2⌉`.
use nalgebra::DMatrix;

/// The four sub-bands of one decomposition level.
#[derive(Debug, Clone, PartialEq)]
pub struct Subbands {
    /// Low-low (approximation)
    pub ll: DMatrix<f64>,
    /// Low-high (horizontal difference)
    pub lh: DMatrix<f64>,
    /// High-low (vertical difference)
    pub hl: DMatrix<f64>,
    /// High-high (diagonal difference)
    pub hh: DMatrix<f64>,
}

/// Detail sub-bands kept per level for reconstruction.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailBands {
    pub lh: DMatrix<f64>,
    pub hl: DMatrix<f64>,
    pub hh: DMatrix<f64>,
    /// Shape of the level input, needed to crop the padded reconstruction.
    pub rows: usize,
    pub cols: usize,
}

/// Multi-level decomposition. `details` runs finest to coarsest.
#[derive(Debug, Clone, PartialEq)]
pub struct Decomposition {
    pub ll: DMatrix<f64>,
    pub details: Vec<DetailBands>,
}

impl Decomposition {
    pub fn levels(&self) -> usize {
        self.details.len()
    }

    /// Detail bands of the deepest level, if any level was computed.
    pub fn deepest_mut(&mut self) -> Option<&mut DetailBands> {
        self.details.last_mut()
    }

    pub fn deepest(&self) -> Option<&DetailBands> {
        self.details.last()
    }
}

/// Perform one level of 2D Haar DWT.
pub fn dwt2_haar(data: &DMatrix<f64>) -> Subbands {
    let (rows, cols) = data.shape();
    let hr = rows.div_ceil(2);
    let hc = cols.div_ceil(2);

    let at = |r: usize, c: usize| data[(r.min(rows - 1), c.min(cols - 1))];

    let mut ll = DMatrix::<f64>::zeros(hr, hc);
    let mut lh = DMatrix::<f64>::zeros(hr, hc);
    let mut hl = DMatrix::<f64>::zeros(hr, hc);
    let mut hh = DMatrix::<f64>::zeros(hr, hc);

    for i in 0..hr {
        for j in 0..hc {
            let a = at(2 * i, 2 * j);
            let b = at(2 * i, 2 * j + 1);
            let c = at(2 * i + 1, 2 * j);
            let d = at(2 * i + 1, 2 * j + 1);
            ll[(i, j)] = (a + b + c + d) * 0.5;
            lh[(i, j)] = (a - b + c - d) * 0.5;
            hl[(i, j)] = (a + b - c - d) * 0.5;
            hh[(i, j)] = (a - b - c + d) * 0.5;
        }
    }

    Subbands { ll, lh, hl, hh }
}

/// Perform one level of inverse 2D Haar DWT, cropping to `rows × cols`.
pub fn idwt2_haar(bands: &Subbands, rows: usize, cols: usize) -> DMatrix<f64> {
    let (hr, hc) = bands.ll.shape();
    debug_assert_eq!((hr, hc), (rows.div_ceil(2), cols.div_ceil(2)));

    let mut out = DMatrix::<f64>::zeros(rows, cols);
    let mut put = |r: usize, c: usize, v: f64| {
        if r < rows && c < cols {
            out[(r, c)] = v;
        }
    };

    for r in 0..hr {
        for c in 0..hc {
            let ll = bands.ll[(r, c)];
            let lh = bands.lh[(r, c)];
            let hl = bands.hl[(r, c)];
            let hh = bands.hh[(r, c)];
            put(2 * r, 2 * c, (ll + lh + hl + hh) * 0.5);
            put(2 * r, 2 * c + 1, (ll - lh + hl - hh) * 0.5);
            put(2 * r + 1, 2 * c, (ll + lh - hl - hh) * 0.5);
            put(2 * r + 1, 2 * c + 1, (ll - lh - hl + hh) * 0.5);
        }
    }
    out
}

/// Multi-level 2D Haar DWT, recursing into LL `levels` times.
///
/// Stops early if the approximation shrinks to nothing.
pub fn dwt2_multilevel(data: &DMatrix<f64>, levels: usize) -> Decomposition {
    let mut ll = data.clone();
    let mut details = Vec::with_capacity(levels);

    for _ in 0..levels {
        let (rows, cols) = ll.shape();
        if rows == 0 || cols == 0 {
            break;
        }
        let res = dwt2_haar(&ll);
        details.push(DetailBands {
            lh: res.lh,
            hl: res.hl,
            hh: res.hh,
            rows,
            cols,
        });
        ll = res.ll;
    }

    Decomposition { ll, details }
}

/// Multi-level inverse 2D Haar DWT, coarsest level first.
pub fn idwt2_multilevel(decomposition: &Decomposition) -> DMatrix<f64> {
    let mut current = decomposition.ll.clone();

    for level in decomposition.details.iter().rev() {
        let bands = Subbands {
            ll: current,
            lh: level.lh.clone(),
            hl: level.hl.clone(),
            hh: level.hh.clone(),
        };
        current = idwt2_haar(&bands, level.rows, level.cols);
    }

    current
}
