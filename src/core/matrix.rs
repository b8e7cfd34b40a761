// src/core/matrix.rs

//! Dense square complex matrices.
//!
//! Gate matrices are small (`d x d` for a single qudit), but the full-operator
//! engine grows them to `d^n x d^n` through Kronecker products, so the type is
//! dimension-generic with row-major `Vec` storage rather than fixed-size arrays.

use num_complex::Complex;
use num_traits::Zero;
use std::fmt;

/// A dense square matrix over `Complex<f64>`, stored row-major.
#[derive(Debug, Clone, PartialEq)] // Avoid Eq for floating-point entries
pub struct Matrix {
    dim: usize,
    data: Vec<Complex<f64>>,
}

impl Matrix {
    /// Creates a `dim x dim` matrix of zeros.
    pub fn zeros(dim: usize) -> Self {
        Self {
            dim,
            data: vec![Complex::zero(); dim * dim],
        }
    }

    /// Creates the `dim x dim` identity matrix.
    pub fn identity(dim: usize) -> Self {
        let mut m = Self::zeros(dim);
        for i in 0..dim {
            m.set(i, i, Complex::new(1.0, 0.0));
        }
        m
    }

    /// Creates the rank-one projector |k⟩⟨k| in a `dim`-state basis.
    ///
    /// Panics if `k >= dim`; callers pass basis indices they already validated.
    pub fn projector(dim: usize, k: usize) -> Self {
        assert!(k < dim, "projector basis index {} out of range for dimension {}", k, dim);
        let mut m = Self::zeros(dim);
        m.set(k, k, Complex::new(1.0, 0.0));
        m
    }

    /// Builds a matrix from real-valued rows. Used by the fixed permutation
    /// catalog, whose entries are all 0 or 1.
    ///
    /// Panics if the rows do not form a square matrix; the catalog constructors
    /// only call this with literal arrays.
    pub fn from_real_rows<R: AsRef<[f64]>>(rows: &[R]) -> Self {
        let dim = rows.len();
        let mut m = Self::zeros(dim);
        for (r, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            assert_eq!(row.len(), dim, "matrix rows must all have length {}", dim);
            for (c, value) in row.iter().enumerate() {
                m.set(r, c, Complex::new(*value, 0.0));
            }
        }
        m
    }

    /// Builds a matrix from an explicit row-major element vector.
    ///
    /// Panics if `data.len() != dim * dim`.
    pub fn from_vec(dim: usize, data: Vec<Complex<f64>>) -> Self {
        assert_eq!(
            data.len(),
            dim * dim,
            "expected {} elements for a {1}x{1} matrix",
            dim * dim,
            dim
        );
        Self { dim, data }
    }

    /// The local dimension (number of rows / columns).
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Element at row `r`, column `c`.
    #[inline]
    pub fn get(&self, r: usize, c: usize) -> Complex<f64> {
        self.data[r * self.dim + c]
    }

    #[inline]
    pub(crate) fn set(&mut self, r: usize, c: usize, value: Complex<f64>) {
        self.data[r * self.dim + c] = value;
    }

    /// Kronecker product `self ⊗ other`.
    ///
    /// This is the tensor-extension primitive the full-operator engine uses to
    /// embed a local gate into the register operator.
    pub fn kron(&self, other: &Matrix) -> Matrix {
        let dim = self.dim * other.dim;
        let mut out = Matrix::zeros(dim);
        for ar in 0..self.dim {
            for ac in 0..self.dim {
                let a = self.get(ar, ac);
                if a.is_zero() {
                    continue;
                }
                for br in 0..other.dim {
                    for bc in 0..other.dim {
                        let b = other.get(br, bc);
                        if !b.is_zero() {
                            out.set(ar * other.dim + br, ac * other.dim + bc, a * b);
                        }
                    }
                }
            }
        }
        out
    }

    /// Matrix product `self * other`. Dimensions must match.
    pub fn matmul(&self, other: &Matrix) -> Matrix {
        debug_assert_eq!(self.dim, other.dim);
        let mut out = Matrix::zeros(self.dim);
        for r in 0..self.dim {
            for k in 0..self.dim {
                let a = self.get(r, k);
                if a.is_zero() {
                    continue;
                }
                for c in 0..self.dim {
                    let v = out.get(r, c) + a * other.get(k, c);
                    out.set(r, c, v);
                }
            }
        }
        out
    }

    /// Element-wise sum. Dimensions must match.
    pub fn add(&self, other: &Matrix) -> Matrix {
        debug_assert_eq!(self.dim, other.dim);
        let data = self
            .data
            .iter()
            .zip(other.data.iter())
            .map(|(a, b)| a + b)
            .collect();
        Matrix { dim: self.dim, data }
    }

    /// Element-wise difference. Dimensions must match.
    pub fn sub(&self, other: &Matrix) -> Matrix {
        debug_assert_eq!(self.dim, other.dim);
        let data = self
            .data
            .iter()
            .zip(other.data.iter())
            .map(|(a, b)| a - b)
            .collect();
        Matrix { dim: self.dim, data }
    }

    /// Conjugate transpose.
    pub fn adjoint(&self) -> Matrix {
        let mut out = Matrix::zeros(self.dim);
        for r in 0..self.dim {
            for c in 0..self.dim {
                out.set(c, r, self.get(r, c).conj());
            }
        }
        out
    }

    /// Left-multiplies a column vector: `self * v`. The vector length must
    /// equal the matrix dimension.
    pub fn mul_vec(&self, v: &[Complex<f64>]) -> Vec<Complex<f64>> {
        debug_assert_eq!(v.len(), self.dim);
        let mut out = vec![Complex::zero(); self.dim];
        for r in 0..self.dim {
            let mut acc = Complex::zero();
            for c in 0..self.dim {
                let m = self.get(r, c);
                if !m.is_zero() {
                    acc += m * v[c];
                }
            }
            out[r] = acc;
        }
        out
    }

    /// Sets every element whose magnitude is below `threshold` to exact zero.
    /// Deterministic cleanup of floating-point residue before reporting.
    pub fn clamp_small(&mut self, threshold: f64) {
        for value in self.data.iter_mut() {
            if value.norm() < threshold {
                *value = Complex::zero();
            } else {
                if value.re.abs() < threshold {
                    value.re = 0.0;
                }
                if value.im.abs() < threshold {
                    value.im = 0.0;
                }
            }
        }
    }

    /// The real parts of the diagonal. For a density matrix this is the
    /// basis-state probability distribution.
    pub fn real_diagonal(&self) -> Vec<f64> {
        (0..self.dim).map(|i| self.get(i, i).re).collect()
    }

    /// Component-wise approximate equality within `tolerance`.
    pub fn approx_eq(&self, other: &Matrix, tolerance: f64) -> bool {
        self.dim == other.dim
            && self
                .data
                .iter()
                .zip(other.data.iter())
                .all(|(a, b)| (a - b).norm() < tolerance)
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.dim {
            write!(f, "[")?;
            for c in 0..self.dim {
                let v = self.get(r, c);
                if c > 0 {
                    write!(f, ", ")?;
                }
                if v.im == 0.0 {
                    write!(f, "{:.3}", v.re)?;
                } else {
                    write!(f, "{:.3}{:+.3}i", v.re, v.im)?;
                }
            }
            writeln!(f, "]")?;
        }
        Ok(())
    }
}
