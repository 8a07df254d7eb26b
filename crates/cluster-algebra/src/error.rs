//! Error taxonomy for the quiver engine and the symbolic layer.
//!
//! All errors are raised synchronously by the call that detects them. They
//! signal input or programming errors; nothing here is transient, so callers
//! should not retry.

use thiserror::Error;

use crate::topology::Edge;

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, ClusterError>;

/// How a flip names its target: by edge value or by 1-based slot index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlipTarget {
    Edge(Edge),
    Slot(usize),
}

impl From<Edge> for FlipTarget {
    fn from(e: Edge) -> Self {
        FlipTarget::Edge(e)
    }
}

impl From<(usize, usize)> for FlipTarget {
    fn from((p, q): (usize, usize)) -> Self {
        FlipTarget::Edge(Edge::new(p, q))
    }
}

impl std::fmt::Display for FlipTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FlipTarget::Edge(e) => write!(f, "edge {e}"),
            FlipTarget::Slot(k) => write!(f, "slot {k}"),
        }
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ClusterError {
    /// Construction-time violation of the triangulation invariant.
    #[error("invalid topology: {message}")]
    InvalidTopology { message: String },

    /// Flip target is a frozen edge, absent, or an unknown slot.
    #[error("{target} is not a cluster edge")]
    NotAClusterEdge { target: FlipTarget },

    /// A diagonal did not have exactly two flanking triangles.
    #[error("degenerate triangulation: edge {edge} has {found} adjacent third vertices, expected 2")]
    DegenerateTriangulation { edge: Edge, found: usize },

    /// Path or arc endpoints out of `[0, n)`, or coinciding for `express_target`.
    #[error("invalid path {start} -> {end} on a {n}-gon")]
    InvalidPath { start: usize, end: usize, n: usize },

    /// A string did not name a mutable or lamination symbol.
    #[error("undefined variable name: {name:?}")]
    UndefinedVariableName { name: String },

    /// Division by an expression that is identically zero.
    #[error("singular expression: {context}")]
    SingularExpression { context: String },
}

impl ClusterError {
    pub(crate) fn topology(message: impl Into<String>) -> Self {
        ClusterError::InvalidTopology {
            message: message.into(),
        }
    }
}
