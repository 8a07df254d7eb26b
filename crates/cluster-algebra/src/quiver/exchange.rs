//! Exchange matrix from the current triangulation and laminations.

use std::collections::HashMap;

use tracing::trace;

use crate::matrix::LabeledMatrix;
use crate::topology::Edge;

use super::Quiver;

impl Quiver {
    /// Exchange matrix `B`: rows are the mutable labels then the lamination
    /// labels, columns are the mutable labels.
    ///
    /// Every triangle `a < b < c` contributes along its consecutive side pairs
    /// `((a,b),(b,c))`, `((b,c),(c,a))`, `((c,a),(a,b))`: when both sides are
    /// diagonals in slots `i` and `j`, `B[i][j] -= 1` and `B[j][i] += 1`.
    /// Lamination row `k` takes the shear coordinates of its arcs; a later arc
    /// overwrites an earlier one on the same diagonal.
    pub fn exchange_matrix(&self) -> LabeledMatrix {
        let symbols = self.row_symbols();
        let m = self.clusters().len();
        let rows: Vec<String> = symbols.iter().map(|s| s.label()).collect();
        let cols = rows[..m].to_vec();
        let slots: HashMap<Edge, usize> = self
            .clusters()
            .iter()
            .enumerate()
            .map(|(i, e)| (*e, i))
            .collect();

        let mut b = LabeledMatrix::zeros(rows, cols);
        for t in self.triangles() {
            for (u, v) in t.consecutive_sides() {
                if let (Some(&i), Some(&j)) = (slots.get(&u), slots.get(&v)) {
                    b.add(i, j, -1);
                    b.add(j, i, 1);
                }
            }
        }
        for (k, lam) in self.laminations.iter().enumerate() {
            for arc in &lam.arcs {
                for (e, sign) in self.arc_shears(arc.start, arc.end) {
                    if let Some(&j) = slots.get(&e) {
                        b.set(m + k, j, sign);
                    }
                }
            }
        }
        trace!(rows = b.nrows(), cols = b.ncols(), "exchange matrix");
        b
    }
}
