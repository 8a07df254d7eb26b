//! Cluster algebras of triangulated polygons.
//!
//! A convex `n`-gon with a triangulation is a seed: its `n - 3` diagonals are
//! the mutable cluster variables, its laminations are frozen coefficients.
//! Flipping a diagonal is a mutation. This crate keeps the combinatorial
//! state (`Quiver`), derives exchange matrices with lamination rows, and
//! expresses any arc's variable in the initial cluster by running the chain
//! of exchange relations and back-substituting.
//!
//! Layout
//! - `topology`: vertex indices, edges, the triangulation invariant.
//! - `quiver`: the engine (flips, exchange matrix, shear coordinates,
//!   random flip walks).
//! - `matrix`: row/column-labelled integer matrices.
//! - `symbolic`: symbols and the `ExchangeAlgebra` seam, with an exact
//!   Laurent-polynomial engine.
//! - `elimination`: `express_target`.
//! - `layout`: coordinates and labels for drawing.
//!
//! API Policy
//! - Project-internal; `api` is the curated surface and may change.

pub mod api;
pub mod elimination;
pub mod error;
pub mod layout;
pub mod matrix;
pub mod quiver;
pub mod symbolic;
pub mod topology;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::{ClusterError, FlipTarget, Result};
pub use quiver::{Quiver, QuiverCfg};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::elimination::{Elimination, ExchangeRelation, Expression};
    pub use crate::error::{ClusterError, FlipTarget};
    pub use crate::matrix::LabeledMatrix;
    pub use crate::quiver::rand::{random_flips, ReplayToken};
    pub use crate::quiver::{Quiver, QuiverCfg};
    pub use crate::symbolic::{ExchangeAlgebra, LaurentAlgebra, RationalFn, Symbol};
    pub use crate::topology::{Arc, Edge, Lamination, Triangle};
}
