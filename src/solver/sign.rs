//! Tree sign from the incidence matrix.

use crate::circuit::{EdgeIndex, Graph, VertexId};

/// Square integer incidence matrix of a tree (row-major).
///
/// Rows are the non-reference vertices in id order, columns the selected
/// edges in index order. An edge has `-1` at its source and `+1` at its
/// target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncidenceMatrix {
    a: Vec<i64>,
    size: usize,
}

impl IncidenceMatrix {
    /// Build the reduced incidence matrix of `selected` in `graph`.
    ///
    /// Returns `None` when the selection does not have one edge per
    /// non-reference vertex.
    pub fn reduced(graph: &Graph, selected: &[EdgeIndex], reference: VertexId) -> Option<Self> {
        let n = graph.vertex_count();
        if n == 0 || selected.len() != n - 1 || reference.0 >= n {
            return None;
        }
        let size = n - 1;
        let row = |v: VertexId| match v.0.cmp(&reference.0) {
            std::cmp::Ordering::Less => Some(v.0),
            std::cmp::Ordering::Equal => None,
            std::cmp::Ordering::Greater => Some(v.0 - 1),
        };

        let mut a = vec![0; size * size];
        for (col, &edge) in selected.iter().enumerate() {
            let (source, target) = graph.ends(edge);
            if let Some(r) = row(source) {
                a[r * size + col] -= 1;
            }
            if let Some(r) = row(target) {
                a[r * size + col] += 1;
            }
        }
        Some(Self { a, size })
    }

    /// Wrap a square row-major matrix.
    pub fn from_rows(size: usize, a: Vec<i64>) -> Option<Self> {
        (a.len() == size * size).then_some(Self { a, size })
    }

    /// Swap two columns in place.
    pub fn swap_columns(&mut self, i: usize, j: usize) {
        for r in 0..self.size {
            self.a.swap(r * self.size + i, r * self.size + j);
        }
    }

    /// Sign of the determinant: `1`, `-1`, or `0` when singular.
    ///
    /// Fraction-free (Bareiss) elimination with partial pivoting; every
    /// intermediate value is itself a minor, so no rounding occurs.
    pub fn determinant_sign(&self) -> i32 {
        let n = self.size;
        if n == 0 {
            return 1;
        }
        let mut m = self.a.clone();
        let mut sign = 1;
        let mut previous = 1i64;

        for k in 0..n {
            // Find pivot
            let mut max_row = k;
            for i in (k + 1)..n {
                if m[i * n + k].abs() > m[max_row * n + k].abs() {
                    max_row = i;
                }
            }
            if m[max_row * n + k] == 0 {
                return 0;
            }

            if max_row != k {
                sign = -sign;
                for j in 0..n {
                    m.swap(k * n + j, max_row * n + j);
                }
            }

            let pivot = m[k * n + k];
            for i in (k + 1)..n {
                for j in (k + 1)..n {
                    m[i * n + j] = (m[i * n + j] * pivot - m[i * n + k] * m[k * n + j]) / previous;
                }
                m[i * n + k] = 0;
            }
            previous = pivot;
        }

        sign * m[n * n - 1].signum() as i32
    }
}

/// Sign of a tree in one graph.
pub fn tree_sign(graph: &Graph, selected: &[EdgeIndex], reference: VertexId) -> i32 {
    IncidenceMatrix::reduced(graph, selected, reference)
        .map(|m| m.determinant_sign())
        .unwrap_or(0)
}
