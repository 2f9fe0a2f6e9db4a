//! Nodal field storage for 1D problems.

use std::ops::{Index, IndexMut};

use faer::Mat;

use crate::error::{DgError, Result};

/// Nodal values of a field on a sequence of elements.
///
/// Logically a matrix of shape (n_nodes, n_elements): column k holds the values
/// at the quadrature nodes of element k. Storage is column-major, so
/// `element(k)` is a contiguous slice.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldMatrix {
    /// Nodal values, stored as data[k * n_nodes + i] for element k, node i
    data: Vec<f64>,
    /// Number of nodes per element
    n_nodes: usize,
    /// Number of elements
    n_elements: usize,
}

impl FieldMatrix {
    /// Create a field initialized to zero.
    pub fn zeros(n_nodes: usize, n_elements: usize) -> Self {
        Self {
            data: vec![0.0; n_nodes * n_elements],
            n_nodes,
            n_elements,
        }
    }

    /// Create a field from a function of (node, element).
    pub fn from_fn<F>(n_nodes: usize, n_elements: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> f64,
    {
        let mut data = Vec::with_capacity(n_nodes * n_elements);
        for k in 0..n_elements {
            for i in 0..n_nodes {
                data.push(f(i, k));
            }
        }
        Self {
            data,
            n_nodes,
            n_elements,
        }
    }

    /// Create a field from its columns, one per element.
    ///
    /// # Errors
    /// `InvalidArgument` without columns, with an empty column, or with columns
    /// of different lengths.
    pub fn from_columns(columns: &[Vec<f64>]) -> Result<Self> {
        let n_nodes = columns.first().map_or(0, Vec::len);
        if n_nodes == 0 {
            return Err(DgError::invalid_argument(format!(
                "a field needs at least one node and one element, got {} columns of {} nodes",
                columns.len(),
                n_nodes
            )));
        }
        if columns.iter().any(|c| c.len() != n_nodes) {
            return Err(DgError::invalid_argument(
                "all element columns must have the same number of nodes",
            ));
        }
        Ok(Self {
            data: columns.concat(),
            n_nodes,
            n_elements: columns.len(),
        })
    }

    /// Evaluate `f` pointwise on another field, e.g. on node coordinates.
    pub fn map<F>(&self, f: F) -> Self
    where
        F: Fn(f64) -> f64,
    {
        Self {
            data: self.data.iter().map(|&v| f(v)).collect(),
            n_nodes: self.n_nodes,
            n_elements: self.n_elements,
        }
    }

    /// Join fields side by side (column concatenation).
    ///
    /// # Errors
    /// `InvalidArgument` without fields or if the fields have different node counts.
    pub fn hcat(parts: &[FieldMatrix]) -> Result<Self> {
        if parts.is_empty() {
            return Err(DgError::invalid_argument("no fields to concatenate"));
        }
        let n_nodes = parts[0].n_nodes;
        if parts.iter().any(|p| p.n_nodes != n_nodes) {
            return Err(DgError::invalid_argument(
                "cannot concatenate fields with different node counts",
            ));
        }
        let n_elements = parts.iter().map(|p| p.n_elements).sum();
        let mut data = Vec::with_capacity(n_nodes * n_elements);
        for part in parts {
            data.extend_from_slice(&part.data);
        }
        Ok(Self {
            data,
            n_nodes,
            n_elements,
        })
    }

    /// Number of nodes per element (rows).
    pub fn n_nodes(&self) -> usize {
        self.n_nodes
    }

    /// Number of elements (columns).
    pub fn n_elements(&self) -> usize {
        self.n_elements
    }

    /// Raw values in column-major order.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Get the nodal values for element k.
    pub fn element(&self, k: usize) -> &[f64] {
        let start = k * self.n_nodes;
        &self.data[start..start + self.n_nodes]
    }

    /// Get mutable nodal values for element k.
    pub fn element_mut(&mut self, k: usize) -> &mut [f64] {
        let start = k * self.n_nodes;
        &mut self.data[start..start + self.n_nodes]
    }

    /// Value at the first node of element k.
    pub fn first_node(&self, k: usize) -> f64 {
        self[(0, k)]
    }

    /// Value at the last node of element k.
    pub fn last_node(&self, k: usize) -> f64 {
        self[(self.n_nodes - 1, k)]
    }

    /// Scale all values by a constant.
    pub fn scale(&mut self, c: f64) {
        for v in &mut self.data {
            *v *= c;
        }
    }

    /// Add c * other to self (axpy operation).
    pub fn axpy(&mut self, c: f64, other: &FieldMatrix) {
        assert_eq!(
            (self.n_nodes, self.n_elements),
            (other.n_nodes, other.n_elements),
            "field shapes differ"
        );
        for (a, b) in self.data.iter_mut().zip(other.data.iter()) {
            *a += c * *b;
        }
    }

    /// Get maximum absolute value.
    pub fn max_abs(&self) -> f64 {
        self.data.iter().map(|&x| x.abs()).fold(0.0, f64::max)
    }

    /// Largest absolute difference from an exact solution evaluated at `coords`.
    pub fn linf_error<F>(&self, coords: &FieldMatrix, exact: F) -> f64
    where
        F: Fn(f64) -> f64,
    {
        self.data
            .iter()
            .zip(coords.data.iter())
            .map(|(&u, &x)| (u - exact(x)).abs())
            .fold(0.0, f64::max)
    }

    /// L2 error against an exact solution evaluated at `coords`.
    ///
    /// Integrates the nodal error with the reference mass matrix and the element
    /// Jacobians h_k / 2 = 1 / geo[k]:
    /// ||e||² = Σ_k e_k^T M e_k / g_k
    pub fn l2_error<F>(&self, coords: &FieldMatrix, mass: &Mat<f64>, geo: &[f64], exact: F) -> f64
    where
        F: Fn(f64) -> f64,
    {
        let n = self.n_nodes;
        let mut error_sq = 0.0;
        for k in 0..self.n_elements {
            let err: Vec<f64> = (0..n)
                .map(|i| self[(i, k)] - exact(coords[(i, k)]))
                .collect();
            let mut local = 0.0;
            for i in 0..n {
                for j in 0..n {
                    local += err[i] * mass[(i, j)] * err[j];
                }
            }
            error_sq += local / geo[k];
        }
        error_sq.sqrt()
    }

    /// Copy into a dense `faer` matrix.
    pub fn to_mat(&self) -> Mat<f64> {
        Mat::from_fn(self.n_nodes, self.n_elements, |i, k| self[(i, k)])
    }

    /// Copy from a dense `faer` matrix.
    pub fn from_mat(m: &Mat<f64>) -> Self {
        Self::from_fn(m.nrows(), m.ncols(), |i, k| m[(i, k)])
    }
}

impl Index<(usize, usize)> for FieldMatrix {
    type Output = f64;

    /// Value at (node i, element k).
    fn index(&self, (i, k): (usize, usize)) -> &f64 {
        debug_assert!(i < self.n_nodes && k < self.n_elements);
        &self.data[k * self.n_nodes + i]
    }
}

impl IndexMut<(usize, usize)> for FieldMatrix {
    fn index_mut(&mut self, (i, k): (usize, usize)) -> &mut f64 {
        debug_assert!(i < self.n_nodes && k < self.n_elements);
        &mut self.data[k * self.n_nodes + i]
    }
}
