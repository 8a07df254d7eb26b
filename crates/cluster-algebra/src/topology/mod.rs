//! Cyclic polygon topology: frozen sides plus a mutable set of diagonals.
//!
//! Purpose
//! - Hold the `n` vertices on a cycle, the fixed boundary edges
//!   `{i, i+1 mod n}`, and the `n-3` diagonals (cluster edges) that together
//!   triangulate the polygon.
//! - Answer membership, adjacency, triangle and crossing queries over the
//!   current edge set.
//!
//! Invariants
//! - `frozens ∪ clusters` triangulates the polygon: exactly `n-3` pairwise
//!   non-crossing diagonals, none coinciding with a side, no duplicates.
//! - The adjacency table mirrors the edge set at all times.
//!
//! Cyclic conventions
//! - Arithmetic on vertex indices is modulo `n`.
//! - An arc between frozen edges `start` and `end` is anchored at positions
//!   `start + 0.5` and `end + 0.5`, which never coincide with a vertex.

mod types;

pub use types::{Arc, Edge, Lamination, Triangle};

use crate::error::{ClusterError, Result};

/// Triangulated convex `n`-gon with positional vertex identity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Topology {
    n: usize,
    clusters: Vec<Edge>,
    adj: Vec<bool>, // n×n, row-major
}

impl Topology {
    /// Diagonals of the fan triangulation at vertex 0: `{0, i}` for `i in [2, n-2]`.
    pub fn fan_edges(n: usize) -> Vec<Edge> {
        (2..n.saturating_sub(1)).map(|i| Edge::new(0, i)).collect()
    }

    /// Fan triangulation of an `n`-gon.
    pub fn fan(n: usize) -> Result<Self> {
        Self::new(n, Self::fan_edges(n))
    }

    /// Validate and build a triangulated `n`-gon from its diagonals.
    ///
    /// Fails with `InvalidTopology` if `n < 3`, if the diagonal count is not
    /// `n-3`, or if any diagonal is out of range, degenerate, a side,
    /// repeated, or crosses another diagonal.
    pub fn new(n: usize, clusters: Vec<Edge>) -> Result<Self> {
        if n < 3 {
            return Err(ClusterError::topology(format!(
                "a polygon needs at least 3 vertices, got {n}"
            )));
        }
        if clusters.len() != n - 3 {
            return Err(ClusterError::topology(format!(
                "a triangulated {n}-gon has {} diagonals, got {}",
                n - 3,
                clusters.len()
            )));
        }
        let mut topo = Self {
            n,
            clusters: Vec::with_capacity(clusters.len()),
            adj: vec![false; n * n],
        };
        for i in 0..n {
            topo.link(topo.frozen(i), true);
        }
        for e in clusters {
            let (p, q) = e.endpoints();
            if q >= n {
                return Err(ClusterError::topology(format!(
                    "edge {e} has an endpoint outside [0, {n})"
                )));
            }
            if p == q {
                return Err(ClusterError::topology(format!("edge {e} is a loop")));
            }
            if topo.is_boundary(e) {
                return Err(ClusterError::topology(format!(
                    "edge {e} coincides with a frozen edge"
                )));
            }
            if topo.is_cluster(e) {
                return Err(ClusterError::topology(format!("edge {e} is repeated")));
            }
            if let Some(other) = topo.clusters.iter().find(|f| edges_cross(n, e, **f)) {
                return Err(ClusterError::topology(format!(
                    "edges {e} and {other} cross"
                )));
            }
            topo.link(e, true);
            topo.clusters.push(e);
        }
        Ok(topo)
    }

    #[inline]
    pub fn n(&self) -> usize {
        self.n
    }

    /// Frozen edge `i`: `{i, i+1 mod n}`.
    #[inline]
    pub fn frozen(&self, i: usize) -> Edge {
        Edge::new(i % self.n, (i + 1) % self.n)
    }

    /// Ordered frozen edges; position `i` holds `{i, i+1 mod n}`.
    pub fn frozens(&self) -> Vec<Edge> {
        (0..self.n).map(|i| self.frozen(i)).collect()
    }

    /// Ordered cluster edges; position is the slot.
    #[inline]
    pub fn clusters(&self) -> &[Edge] {
        &self.clusters
    }

    #[inline]
    pub fn next_vertex(&self, k: usize) -> usize {
        (k + 1) % self.n
    }

    #[inline]
    pub fn previous_vertex(&self, k: usize) -> usize {
        (k + self.n - 1) % self.n
    }

    /// Is `e` one of the polygon's sides?
    #[inline]
    pub fn is_boundary(&self, e: Edge) -> bool {
        let (p, q) = e.endpoints();
        q < self.n && (q - p == 1 || (p == 0 && q == self.n - 1))
    }

    /// Is `e` currently a diagonal of the triangulation?
    #[inline]
    pub fn is_cluster(&self, e: Edge) -> bool {
        self.has(e.lo(), e.hi()) && !self.is_boundary(e)
    }

    /// Is `e` a frozen or cluster edge?
    #[inline]
    pub fn contains(&self, e: Edge) -> bool {
        self.has(e.lo(), e.hi())
    }

    /// 0-based slot of a cluster edge.
    pub fn slot_of(&self, e: Edge) -> Option<usize> {
        self.clusters.iter().position(|c| *c == e)
    }

    #[inline]
    fn has(&self, p: usize, q: usize) -> bool {
        p < self.n && q < self.n && self.adj[p * self.n + q]
    }

    fn link(&mut self, e: Edge, present: bool) {
        let (p, q) = e.endpoints();
        self.adj[p * self.n + q] = present;
        self.adj[q * self.n + p] = present;
    }

    /// Vertices joined by an edge to both endpoints of `e`, ascending.
    ///
    /// For a diagonal of a valid triangulation this is exactly the two apexes
    /// of the triangles sharing `e`.
    pub fn adjacent_third_vertices(&self, e: Edge) -> Vec<usize> {
        let (p, q) = e.endpoints();
        (0..self.n)
            .filter(|&r| r != p && r != q && self.has(p, r) && self.has(q, r))
            .collect()
    }

    /// Lazily enumerate all triangles `(a, b, c)`, `a < b < c`, whose three
    /// sides are present edges. Recomputed on every call.
    pub fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        let n = self.n;
        (0..n).flat_map(move |a| {
            (a + 1..n)
                .filter(move |&b| self.has(a, b))
                .flat_map(move |b| {
                    (b + 1..n)
                        .filter(move |&c| self.has(b, c) && self.has(a, c))
                        .map(move |c| Triangle { a, b, c })
                })
        })
    }

    /// Replace the diagonal in `slot`; caller guarantees validity.
    pub(crate) fn replace(&mut self, slot: usize, e: Edge) {
        let old = self.clusters[slot];
        self.link(old, false);
        self.link(e, true);
        self.clusters[slot] = e;
    }

    /// Does vertex `v` lie on the `start+1 ..= end` side of the arc anchored
    /// at `start + 0.5` and `end + 0.5`?
    ///
    /// Callers keep `start`, `end` and `v` below `n`.
    #[inline]
    pub(crate) fn on_start_side(&self, start: usize, end: usize, v: usize) -> bool {
        let n = self.n;
        let span = (end + n - start) % n;
        (v + n - start - 1 + n) % n < span
    }

    /// Cluster edges separated by the arc between frozen edges `start` and
    /// `end`, in the order the arc meets them.
    ///
    /// Each returned edge has exactly one endpoint on either side. Sorting
    /// orients the edge as `(a, b)` with `a` on the `start+1 ..= end` side and
    /// uses the key `((a - start) mod n, (start - b) mod n)`.
    pub(crate) fn crossing_clusters(&self, start: usize, end: usize) -> Vec<Edge> {
        let n = self.n;
        let mut hits: Vec<((usize, usize), Edge)> = self
            .clusters
            .iter()
            .filter_map(|&e| {
                let (p, q) = e.endpoints();
                let (sp, sq) = (
                    self.on_start_side(start, end, p),
                    self.on_start_side(start, end, q),
                );
                if sp == sq {
                    return None;
                }
                let (a, b) = if sp { (p, q) } else { (q, p) };
                Some((((a + n - start) % n, (start + n - b) % n), e))
            })
            .collect();
        hits.sort_by_key(|(key, _)| *key);
        hits.into_iter().map(|(_, e)| e).collect()
    }
}

/// Do two chords of a convex `n`-gon cross in their interiors?
///
/// Chords sharing an endpoint never cross; otherwise they cross iff their
/// endpoints interleave around the cycle.
pub fn edges_cross(n: usize, e: Edge, f: Edge) -> bool {
    if e.shares_endpoint(&f) {
        return false;
    }
    let (p, q) = e.endpoints();
    let inside = |v: usize| (v + n - p) % n < (q + n - p) % n;
    inside(f.lo()) != inside(f.hi())
}

#[cfg(test)]
mod tests;
