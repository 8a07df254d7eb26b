//! Curated internal API (UNSTABLE).
//!
//! Convenience surface for the CLI and experiments. Breaking changes are
//! allowed.

// Topology and engine
pub use crate::quiver::{Quiver, QuiverCfg};
pub use crate::topology::{edges_cross, Arc, Edge, Lamination, Topology, Triangle};
// Exchange data
pub use crate::matrix::LabeledMatrix;
// Symbolic elimination
pub use crate::elimination::{Elimination, ExchangeRelation, Expression};
pub use crate::symbolic::{ExchangeAlgebra, LaurentAlgebra, Monomial, Poly, RationalFn, Symbol};
// Random triangulations
pub use crate::quiver::rand::{
    draw_quiver, random_flips, ReplayToken as FlipReplay, VertexCount, WalkCfg,
};
// Presentation
pub use crate::layout::{
    distance, geometric_crossings, scene, segment_intersection, Layout, LayoutCfg, Scene,
};
// Errors
pub use crate::error::{ClusterError, FlipTarget, Result};
