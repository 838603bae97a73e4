//! Fixed-size vectors and row-major square matrices of reals.

use std::ops::{Add, Mul, Neg, Sub};

/// An N-component vector.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vector<const N: usize>(pub [f64; N]);

impl<const N: usize> Vector<N> {
    pub fn components(&self) -> &[f64; N] {
        &self.0
    }

    pub fn scale(self, k: f64) -> Self {
        Vector(self.0.map(|c| c * k))
    }

    pub fn dot(&self, other: &Self) -> f64 {
        self.0.iter().zip(other.0.iter()).map(|(a, b)| a * b).sum()
    }

    /// Euclidean length.
    pub fn norm(&self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Unit vector in the same direction, or `None` for the zero vector.
    pub fn normalized(self) -> Option<Self> {
        let len = self.norm();
        if len == 0.0 {
            None
        } else {
            Some(self.scale(1.0 / len))
        }
    }
}

impl Vector<3> {
    pub fn cross(&self, other: &Self) -> Self {
        let [ax, ay, az] = self.0;
        let [bx, by, bz] = other.0;
        Vector([ay * bz - az * by, az * bx - ax * bz, ax * by - ay * bx])
    }
}

impl<const N: usize> Add for Vector<N> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        let mut out = self.0;
        for (o, r) in out.iter_mut().zip(rhs.0) {
            *o += r;
        }
        Vector(out)
    }
}

impl<const N: usize> Sub for Vector<N> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self + (-rhs)
    }
}

impl<const N: usize> Neg for Vector<N> {
    type Output = Self;

    fn neg(self) -> Self {
        Vector(self.0.map(|c| -c))
    }
}

/// An N×N matrix stored row by row.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Matrix<const N: usize> {
    rows: [[f64; N]; N],
}

impl<const N: usize> Matrix<N> {
    pub fn new(rows: [[f64; N]; N]) -> Self {
        Self { rows }
    }

    pub fn identity() -> Self {
        let mut rows = [[0.0; N]; N];
        for (i, row) in rows.iter_mut().enumerate() {
            row[i] = 1.0;
        }
        Self { rows }
    }

    /// Build from a slice of rows. Returns `None` unless it is exactly N×N.
    pub fn from_rows(rows: &[Vec<f64>]) -> Option<Self> {
        if rows.len() != N {
            return None;
        }
        let mut out = [[0.0; N]; N];
        for (dst, src) in out.iter_mut().zip(rows) {
            if src.len() != N {
                return None;
            }
            dst.copy_from_slice(src);
        }
        Some(Self { rows: out })
    }

    pub fn rows(&self) -> Vec<&[f64]> {
        self.rows.iter().map(|r| r.as_slice()).collect()
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.rows[row][col]
    }

    pub fn transpose(&self) -> Self {
        let mut out = [[0.0; N]; N];
        for (i, row) in self.rows.iter().enumerate() {
            for (j, value) in row.iter().enumerate() {
                out[j][i] = *value;
            }
        }
        Self { rows: out }
    }

    pub fn scale(self, k: f64) -> Self {
        Self {
            rows: self.rows.map(|row| row.map(|c| c * k)),
        }
    }

    pub fn mul_vector(&self, v: &Vector<N>) -> Vector<N> {
        Vector(self.rows.map(|row| Vector(row).dot(v)))
    }

    pub fn mul_matrix(&self, other: &Self) -> Self {
        let mut out = [[0.0; N]; N];
        for (i, row) in out.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = (0..N).map(|k| self.rows[i][k] * other.rows[k][j]).sum();
            }
        }
        Self { rows: out }
    }

    /// Determinant by Gaussian elimination with partial pivoting.
    pub fn determinant(&self) -> f64 {
        let mut m = self.rows;
        let mut det = 1.0;
        for col in 0..N {
            let Some(pivot) = pivot_row(&m, col, 0.0) else {
                return 0.0;
            };
            if pivot != col {
                m.swap(pivot, col);
                det = -det;
            }
            det *= m[col][col];
            for row in (col + 1)..N {
                let factor = m[row][col] / m[col][col];
                for k in col..N {
                    m[row][k] -= factor * m[col][k];
                }
            }
        }
        det
    }

    /// Inverse by Gauss-Jordan elimination, or `None` if singular.
    pub fn inverse(&self) -> Option<Self> {
        let mut m = self.rows;
        let mut inv = Self::identity().rows;
        let tolerance = self.max_abs() * N as f64 * f64::EPSILON;
        for col in 0..N {
            let pivot = pivot_row(&m, col, tolerance)?;
            m.swap(pivot, col);
            inv.swap(pivot, col);

            let p = m[col][col];
            for k in 0..N {
                m[col][k] /= p;
                inv[col][k] /= p;
            }
            for row in 0..N {
                if row == col {
                    continue;
                }
                let factor = m[row][col];
                for k in 0..N {
                    m[row][k] -= factor * m[col][k];
                    inv[row][k] -= factor * inv[col][k];
                }
            }
        }
        Some(Self { rows: inv })
    }

    /// Largest absolute entry.
    fn max_abs(&self) -> f64 {
        self.rows
            .iter()
            .flatten()
            .fold(0.0, |acc: f64, x| acc.max(x.abs()))
    }
}

/// Row index at or below `col` with the largest magnitude in column `col`,
/// or `None` if that magnitude does not exceed `tolerance`.
fn pivot_row<const N: usize>(m: &[[f64; N]; N], col: usize, tolerance: f64) -> Option<usize> {
    let (idx, best) = (col..N)
        .map(|r| (r, m[r][col].abs()))
        .max_by(|a, b| a.1.total_cmp(&b.1))?;
    if best <= tolerance || best.is_nan() {
        None
    } else {
        Some(idx)
    }
}

impl<const N: usize> Add for Matrix<N> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        let mut rows = self.rows;
        for (row, other) in rows.iter_mut().zip(rhs.rows) {
            for (a, b) in row.iter_mut().zip(other) {
                *a += b;
            }
        }
        Self { rows }
    }
}

impl<const N: usize> Sub for Matrix<N> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self + (-rhs)
    }
}

impl<const N: usize> Neg for Matrix<N> {
    type Output = Self;

    fn neg(self) -> Self {
        self.scale(-1.0)
    }
}

impl<const N: usize> Mul for Matrix<N> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        self.mul_matrix(&rhs)
    }
}
