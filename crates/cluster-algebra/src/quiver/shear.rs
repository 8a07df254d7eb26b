//! Shear coordinates of a lamination arc.
//!
//! The arc runs from the midpoint of frozen edge `start` to that of frozen
//! edge `end` and meets the diagonals returned by `crossing_clusters` in
//! order. A diagonal carries a nonzero coordinate only where the arc passes
//! straight through its quadrilateral (enters and leaves through opposite
//! sides). Along the path `[F_start, crossings.., F_end]` that is exactly the
//! diagonals whose two endpoints each touch at least two path edges.
//!
//! Signs alternate along the retained diagonals. The first one gets `-1`
//! when it touches `start` or `end`, `+1` otherwise.

use crate::error::Result;
use crate::topology::Edge;

use super::Quiver;

impl Quiver {
    /// `(diagonal, ±1)` pairs in crossing order; empty when the arc turns
    /// around a single vertex throughout. `InvalidPath` if either frozen-edge
    /// index is not below `n`.
    pub fn shear_coordinates(&self, start: usize, end: usize) -> Result<Vec<(Edge, i64)>> {
        self.check_arc(start, end)?;
        Ok(self.arc_shears(start, end))
    }

    /// Arcs stored on the quiver were range-checked at construction.
    pub(crate) fn arc_shears(&self, start: usize, end: usize) -> Vec<(Edge, i64)> {
        let topo = &self.topo;
        let crossing = topo.crossing_clusters(start, end);
        let mut degree = vec![0usize; topo.n()];
        let path = std::iter::once(topo.frozen(start))
            .chain(crossing.iter().copied())
            .chain(std::iter::once(topo.frozen(end)));
        for e in path {
            degree[e.lo()] += 1;
            degree[e.hi()] += 1;
        }
        let kept: Vec<Edge> = crossing
            .into_iter()
            .filter(|e| degree[e.lo()] >= 2 && degree[e.hi()] >= 2)
            .collect();
        let Some(lead) = kept.first() else {
            return Vec::new();
        };
        let lead_at_ends = lead.contains(start) || lead.contains(end);
        kept.iter()
            .enumerate()
            .map(|(i, e)| {
                let sign = if (i % 2 == 0) != lead_at_ends { 1 } else { -1 };
                (*e, sign)
            })
            .collect()
    }
}
