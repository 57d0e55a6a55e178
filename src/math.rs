use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

/// Dense row-major matrix. Rows are embedding vectors, one per token.
#[derive(Clone, Debug, PartialEq)]
pub struct Matrix {
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<f64>,
}

impl Matrix {
    pub fn zeros(r: usize, c: usize) -> Self {
        Matrix {
            rows: r,
            cols: c,
            data: vec![0.0; r * c],
        }
    }

    pub fn from_vec(r: usize, c: usize, v: Vec<f64>) -> Self {
        assert_eq!(v.len(), r * c);
        Matrix {
            rows: r,
            cols: c,
            data: v,
        }
    }

    /// Build a matrix from equally sized rows.
    pub fn from_rows(rows: &[Vec<f64>]) -> Self {
        let cols = rows.first().map_or(0, |r| r.len());
        let mut data = Vec::with_capacity(rows.len() * cols);
        for (i, row) in rows.iter().enumerate() {
            assert_eq!(row.len(), cols, "row {i} has {} columns, expected {cols}", row.len());
            data.extend_from_slice(row);
        }
        Matrix::from_vec(rows.len(), cols, data)
    }

    /// Fill a matrix with independent standard-normal draws.
    pub fn randn<R: Rng>(r: usize, c: usize, rng: &mut R) -> Self {
        let data = (0..r * c)
            .map(|_| {
                let e: f64 = StandardNormal.sample(&mut *rng);
                e
            })
            .collect();
        Matrix::from_vec(r, c, data)
    }

    pub fn get(&self, r: usize, c: usize) -> f64 {
        self.data[r * self.cols + c]
    }

    pub fn set(&mut self, r: usize, c: usize, v: f64) {
        self.data[r * self.cols + c] = v;
    }

    pub fn row(&self, r: usize) -> &[f64] {
        assert!(r < self.rows, "row index {r} out of range for {} rows", self.rows);
        &self.data[r * self.cols..(r + 1) * self.cols]
    }

    pub fn row_mut(&mut self, r: usize) -> &mut [f64] {
        assert!(r < self.rows, "row index {r} out of range for {} rows", self.rows);
        &mut self.data[r * self.cols..(r + 1) * self.cols]
    }

    /// `self · x`, one dot product per row.
    pub fn matvec(&self, x: &[f64]) -> Vec<f64> {
        assert_eq!(self.cols, x.len());
        self.data.chunks(self.cols).map(|row| dot(row, x)).collect()
    }

    /// `xᵀ · self`, i.e. the rows of `self` weighted by `x` and summed.
    pub fn tmatvec(&self, x: &[f64]) -> Vec<f64> {
        assert_eq!(self.rows, x.len());
        let mut out = vec![0.0; self.cols];
        for (row, &w) in self.data.chunks(self.cols).zip(x) {
            for (o, &v) in out.iter_mut().zip(row) {
                *o += w * v;
            }
        }
        out
    }

    /// Outer product `a bᵀ`.
    pub fn outer(a: &[f64], b: &[f64]) -> Matrix {
        let mut data = Vec::with_capacity(a.len() * b.len());
        for &x in a {
            data.extend(b.iter().map(|&y| x * y));
        }
        Matrix::from_vec(a.len(), b.len(), data)
    }

    pub fn add_assign(&mut self, other: &Matrix) {
        assert_eq!(self.rows, other.rows);
        assert_eq!(self.cols, other.cols);
        for (a, &b) in self.data.iter_mut().zip(&other.data) {
            *a += b;
        }
    }

    /// `row[r] += alpha * x`
    pub fn add_to_row(&mut self, r: usize, alpha: f64, x: &[f64]) {
        assert_eq!(self.cols, x.len());
        for (a, &b) in self.row_mut(r).iter_mut().zip(x) {
            *a += alpha * b;
        }
    }

    pub fn scale(&mut self, s: f64) {
        for v in self.data.iter_mut() {
            *v *= s;
        }
    }

    /// Split into the first `at` rows and the remainder.
    pub fn split_rows(&self, at: usize) -> (Matrix, Matrix) {
        assert!(at <= self.rows);
        let (top, bottom) = self.data.split_at(at * self.cols);
        (
            Matrix::from_vec(at, self.cols, top.to_vec()),
            Matrix::from_vec(self.rows - at, self.cols, bottom.to_vec()),
        )
    }

    /// Stack `top` above `bottom`.
    pub fn vstack(top: &Matrix, bottom: &Matrix) -> Matrix {
        assert_eq!(top.cols, bottom.cols);
        let mut data = Vec::with_capacity(top.data.len() + bottom.data.len());
        data.extend_from_slice(&top.data);
        data.extend_from_slice(&bottom.data);
        Matrix::from_vec(top.rows + bottom.rows, top.cols, data)
    }

    /// Largest absolute element-wise difference to `other`.
    pub fn max_abs_diff(&self, other: &Matrix) -> f64 {
        assert_eq!(self.rows, other.rows);
        assert_eq!(self.cols, other.cols);
        self.data
            .iter()
            .zip(&other.data)
            .fold(0.0, |m, (a, b)| m.max((a - b).abs()))
    }
}

pub fn dot(a: &[f64], b: &[f64]) -> f64 {
    assert_eq!(a.len(), b.len());
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Numerically stable softmax: shift by the maximum before exponentiating.
pub fn softmax(x: &[f64]) -> Vec<f64> {
    let max = x.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = x.iter().map(|v| (v - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}

/// Logistic function. Only ever exponentiates a non-positive number.
pub fn sigmoid(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

/// Derivative of the sigmoid expressed through its output `s = sigmoid(x)`.
pub fn sigmoid_grad(s: f64) -> f64 {
    s * (1.0 - s)
}

/// `ln(sigmoid(x))` without overflow for large `|x|`.
pub fn log_sigmoid(x: f64) -> f64 {
    -((-x).max(0.0) + (-x.abs()).exp().ln_1p())
}

/// Scale every row to unit Euclidean length.
///
/// Panics on a zero row; callers must guarantee nonzero rows.
pub fn normalize_rows(x: &Matrix) -> Matrix {
    let mut out = x.clone();
    for r in 0..out.rows {
        let row = out.row_mut(r);
        let norm = row.iter().map(|v| v * v).sum::<f64>().sqrt();
        assert!(norm > 0.0, "cannot normalize zero row {r}");
        for v in row.iter_mut() {
            *v /= norm;
        }
    }
    out
}
