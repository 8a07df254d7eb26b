//! Quiver engine: triangulated polygon with per-slot flip history.
//!
//! Purpose
//! - Own the polygon topology, the laminations and one flip counter per
//!   cluster slot; perform diagonal flips; build the exchange matrix with
//!   lamination (shear) rows; run mutation-chain elimination on a private
//!   snapshot (see `crate::elimination`).
//!
//! State model
//! - Slot `k` (0-based internally, 1-based in names) holds `(edge, flips)`.
//!   A flip replaces the edge with the other diagonal of its quadrilateral
//!   and increments `flips`; the slot now denotes `x_{k+1}` with one more
//!   prime. Counters only grow, so a symbol always names the same quantity.
//! - Names are derived from `(slot, flips)`; nothing is stored per name.
//!
//! Concurrency
//! - `Quiver` owns all of its state and is `Send + Sync`. Read-only queries
//!   (including `express_target`, which works on a snapshot) can run from many
//!   threads on a shared reference. `flip` takes `&mut self`; sharing a live
//!   engine between mutating callers requires the caller's own lock.

mod exchange;
pub mod rand;
mod shear;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ClusterError, FlipTarget, Result};
use crate::symbolic::Symbol;
use crate::topology::{Arc, Edge, Lamination, Topology, Triangle};

/// Construction parameters; the serialized form doubles as the CLI config file.
///
/// `clusters: None` selects the fan triangulation at vertex 0. With
/// `principal`, one lamination `[(prev(p), prev(q))]` per initial diagonal
/// `(p, q)` is placed before the listed laminations.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuiverCfg {
    pub n: usize,
    pub clusters: Option<Vec<Edge>>,
    pub laminations: Vec<Lamination>,
    pub principal: bool,
}

impl QuiverCfg {
    pub fn new(n: usize) -> Self {
        Self {
            n,
            ..Self::default()
        }
    }

    pub fn build(&self) -> Result<Quiver> {
        let clusters = self
            .clusters
            .clone()
            .unwrap_or_else(|| Topology::fan_edges(self.n));
        Quiver::from_parts(self.n, clusters, self.laminations.clone(), self.principal)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Quiver {
    topo: Topology,
    flips: Vec<usize>,
    laminations: Vec<Lamination>,
}

impl Quiver {
    /// Fan triangulation, no laminations.
    pub fn new(n: usize) -> Result<Self> {
        Self::from_parts(n, Topology::fan_edges(n), Vec::new(), false)
    }

    pub fn with_clusters(n: usize, clusters: Vec<Edge>) -> Result<Self> {
        Self::from_parts(n, clusters, Vec::new(), false)
    }

    /// Validate topology and lamination arcs, derive principal laminations.
    pub fn from_parts(
        n: usize,
        clusters: Vec<Edge>,
        laminations: Vec<Lamination>,
        principal: bool,
    ) -> Result<Self> {
        let topo = Topology::new(n, clusters)?;
        let mut all = Vec::with_capacity(laminations.len() + topo.clusters().len());
        if principal {
            all.extend(topo.clusters().iter().map(|e| {
                Lamination::single(topo.previous_vertex(e.lo()), topo.previous_vertex(e.hi()))
            }));
        }
        all.extend(laminations);
        for (k, lam) in all.iter().enumerate() {
            if let Some(Arc { start, end }) = lam.arcs.iter().find(|a| a.start >= n || a.end >= n) {
                return Err(ClusterError::topology(format!(
                    "lamination {} arc ({start}, {end}) names a frozen edge outside [0, {n})",
                    k + 1
                )));
            }
        }
        let flips = vec![0; topo.clusters().len()];
        Ok(Self {
            topo,
            flips,
            laminations: all,
        })
    }

    #[inline]
    pub fn n(&self) -> usize {
        self.topo.n()
    }

    pub fn topology(&self) -> &Topology {
        &self.topo
    }

    pub fn frozens(&self) -> Vec<Edge> {
        self.topo.frozens()
    }

    pub fn clusters(&self) -> &[Edge] {
        self.topo.clusters()
    }

    /// Slot names parallel to `clusters()`: `"1"`, `"2'"`, ...
    pub fn cluster_names(&self) -> Vec<String> {
        self.flips
            .iter()
            .enumerate()
            .map(|(k, f)| format!("{}{}", k + 1, "'".repeat(*f)))
            .collect()
    }

    pub fn laminations(&self) -> &[Lamination] {
        &self.laminations
    }

    /// Lamination names parallel to `laminations()`: `"1"`, `"2"`, ...
    pub fn lamination_names(&self) -> Vec<String> {
        (1..=self.laminations.len()).map(|k| k.to_string()).collect()
    }

    /// Flip count of 0-based `slot`.
    pub fn flip_count(&self, slot: usize) -> Option<usize> {
        self.flips.get(slot).copied()
    }

    /// Symbol currently denoted by 0-based `slot`; `None` past the last slot.
    pub fn slot_symbol(&self, slot: usize) -> Option<Symbol> {
        self.flip_count(slot).map(|f| Symbol::mutable(slot + 1, f))
    }

    /// Symbols parallel to the exchange-matrix rows.
    pub fn row_symbols(&self) -> Vec<Symbol> {
        (0..self.flips.len())
            .filter_map(|k| self.slot_symbol(k))
            .chain((1..=self.laminations.len()).map(Symbol::lamination))
            .collect()
    }

    /// Resolve a label or display name to a symbol of this quiver.
    pub fn variable(&self, name: &str) -> Result<Symbol> {
        let s = Symbol::parse(name)?;
        let known = match s {
            Symbol::Mutable { slot, .. } => slot <= self.flips.len(),
            Symbol::Lamination { index } => index <= self.laminations.len(),
        };
        if known {
            Ok(s)
        } else {
            Err(ClusterError::UndefinedVariableName {
                name: name.to_string(),
            })
        }
    }

    /// 0-based slot of a cluster edge (orientation-insensitive).
    pub fn slot_of(&self, e: Edge) -> Result<usize> {
        self.topo
            .slot_of(e)
            .ok_or(ClusterError::NotAClusterEdge {
                target: FlipTarget::Edge(e),
            })
    }

    pub fn is_boundary(&self, e: Edge) -> bool {
        self.topo.is_boundary(e)
    }

    pub fn is_cluster(&self, e: Edge) -> bool {
        self.topo.is_cluster(e)
    }

    pub fn contains(&self, e: Edge) -> bool {
        self.topo.contains(e)
    }

    pub fn adjacent_third_vertices(&self, e: Edge) -> Vec<usize> {
        self.topo.adjacent_third_vertices(e)
    }

    pub fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        self.topo.triangles()
    }

    /// Diagonals met by the arc between frozen edges `start` and `end`, in
    /// order. `InvalidPath` if either index is not below `n`.
    pub fn crossing_clusters(&self, start: usize, end: usize) -> Result<Vec<Edge>> {
        self.check_arc(start, end)?;
        Ok(self.topo.crossing_clusters(start, end))
    }

    pub(crate) fn check_arc(&self, start: usize, end: usize) -> Result<()> {
        let n = self.n();
        if start >= n || end >= n {
            return Err(ClusterError::InvalidPath { start, end, n });
        }
        Ok(())
    }

    /// Config that rebuilds the current triangulation and laminations (flip
    /// counts start over).
    pub fn to_cfg(&self) -> QuiverCfg {
        QuiverCfg {
            n: self.n(),
            clusters: Some(self.clusters().to_vec()),
            laminations: self.laminations.clone(),
            principal: false,
        }
    }

    /// Independent deep copy of the mutable state.
    pub fn snapshot(&self) -> Quiver {
        self.clone()
    }

    /// Flip a diagonal, named by edge or by 1-based slot; returns the new diagonal.
    ///
    /// Nothing changes on error.
    pub fn flip(&mut self, target: impl Into<FlipTarget>) -> Result<Edge> {
        let target = target.into();
        let slot = match target {
            FlipTarget::Edge(e) => self.topo.slot_of(e),
            FlipTarget::Slot(k) => (1..=self.flips.len()).contains(&k).then(|| k - 1),
        }
        .ok_or(ClusterError::NotAClusterEdge { target })?;
        let old = self.topo.clusters()[slot];
        let apex = self.topo.adjacent_third_vertices(old);
        let &[r0, r1] = apex.as_slice() else {
            return Err(ClusterError::DegenerateTriangulation {
                edge: old,
                found: apex.len(),
            });
        };
        let new = Edge::new(r0, r1);
        self.topo.replace(slot, new);
        self.flips[slot] += 1;
        debug!(
            slot = slot + 1,
            old = %old,
            new = %new,
            flips = self.flips[slot],
            "flip"
        );
        Ok(new)
    }

    /// Flip by 1-based slot index.
    pub fn flip_slot(&mut self, slot: usize) -> Result<Edge> {
        self.flip(FlipTarget::Slot(slot))
    }
}
