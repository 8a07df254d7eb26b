//! Value types for the cyclic polygon: edges, triangles, lamination arcs.
//!
//! Vertices are plain indices in `[0, n)`; identity is positional.

use serde::{Deserialize, Serialize};

/// Unordered vertex pair, stored with `lo < hi` so equality ignores orientation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "(usize, usize)", into = "(usize, usize)")]
pub struct Edge {
    lo: usize,
    hi: usize,
}

impl Edge {
    #[inline]
    pub fn new(p: usize, q: usize) -> Self {
        if p <= q {
            Self { lo: p, hi: q }
        } else {
            Self { lo: q, hi: p }
        }
    }
    #[inline]
    pub fn lo(&self) -> usize {
        self.lo
    }
    #[inline]
    pub fn hi(&self) -> usize {
        self.hi
    }
    #[inline]
    pub fn endpoints(&self) -> (usize, usize) {
        (self.lo, self.hi)
    }
    #[inline]
    pub fn contains(&self, v: usize) -> bool {
        self.lo == v || self.hi == v
    }
    #[inline]
    pub fn shares_endpoint(&self, other: &Edge) -> bool {
        self.contains(other.lo) || self.contains(other.hi)
    }
}

impl From<(usize, usize)> for Edge {
    fn from((p, q): (usize, usize)) -> Self {
        Edge::new(p, q)
    }
}

impl From<Edge> for (usize, usize) {
    fn from(e: Edge) -> Self {
        (e.lo, e.hi)
    }
}

impl std::fmt::Display for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.lo, self.hi)
    }
}

/// Triangle with sorted corners `a < b < c`; corners in increasing order run
/// counterclockwise around the polygon.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Triangle {
    pub a: usize,
    pub b: usize,
    pub c: usize,
}

impl Triangle {
    pub fn new(p: usize, q: usize, r: usize) -> Self {
        let mut v = [p, q, r];
        v.sort_unstable();
        Self {
            a: v[0],
            b: v[1],
            c: v[2],
        }
    }

    /// Sides in cyclic order: `ab`, `bc`, `ca`.
    pub fn sides(&self) -> [Edge; 3] {
        [
            Edge::new(self.a, self.b),
            Edge::new(self.b, self.c),
            Edge::new(self.c, self.a),
        ]
    }

    /// Consecutive side pairs `(ab, bc)`, `(bc, ca)`, `(ca, ab)`.
    pub fn consecutive_sides(&self) -> [(Edge, Edge); 3] {
        let [ab, bc, ca] = self.sides();
        [(ab, bc), (bc, ca), (ca, ab)]
    }
}

impl std::fmt::Display for Triangle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.a, self.b, self.c)
    }
}

/// Lamination arc between two frozen edges, given by frozen-edge indices.
///
/// Frozen edge `i` is `{i, i+1 mod n}`; the arc runs between the midpoints of
/// its two frozen edges.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "(usize, usize)", into = "(usize, usize)")]
pub struct Arc {
    pub start: usize,
    pub end: usize,
}

impl Arc {
    #[inline]
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

impl From<(usize, usize)> for Arc {
    fn from((start, end): (usize, usize)) -> Self {
        Arc { start, end }
    }
}

impl From<Arc> for (usize, usize) {
    fn from(a: Arc) -> Self {
        (a.start, a.end)
    }
}

/// Ordered list of crossing arcs; contributes one exchange-matrix row.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Lamination {
    pub arcs: Vec<Arc>,
}

impl Lamination {
    pub fn new(arcs: Vec<Arc>) -> Self {
        Self { arcs }
    }
    pub fn single(start: usize, end: usize) -> Self {
        Self {
            arcs: vec![Arc::new(start, end)],
        }
    }
    pub fn len(&self) -> usize {
        self.arcs.len()
    }
    pub fn is_empty(&self) -> bool {
        self.arcs.is_empty()
    }
}

impl FromIterator<(usize, usize)> for Lamination {
    fn from_iter<I: IntoIterator<Item = (usize, usize)>>(iter: I) -> Self {
        Self {
            arcs: iter.into_iter().map(Arc::from).collect(),
        }
    }
}
