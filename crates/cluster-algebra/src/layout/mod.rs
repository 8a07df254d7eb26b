//! Presentation layer: coordinates and labels for drawing a quiver.
//!
//! Purpose
//! - Map vertex indices of the cyclic polygon to points in the plane (regular
//!   polygon by default), and derive everything a renderer needs: edge
//!   midpoints, lamination arcs between frozen-edge midpoints, labels.
//! - Provide the small amount of planar geometry used for geometric crossing
//!   queries (segment intersection, distance).
//!
//! The algebraic core never depends on this module; it reads the quiver's
//! public accessors only.
//!
//! Conventions
//! - Vertex `i` sits at angle `2πi/n + rotation` on a circle of `radius`.
//! - Labels: vertices `v_i`, frozen edges `e_i`, diagonals `x_<name>`,
//!   laminations `u_<k>`.

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::error::{ClusterError, Result};
use crate::quiver::Quiver;
use crate::topology::Edge;

/// Layout parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutCfg {
    pub radius: f64,
    /// Global rotation in radians.
    pub rotation: f64,
    /// Where along the last arc a lamination label sits, in `[0, 1]`.
    pub label_pos: f64,
}

impl Default for LayoutCfg {
    fn default() -> Self {
        Self {
            radius: 10.0,
            rotation: 0.0,
            label_pos: 0.5,
        }
    }
}

/// Vertex coordinates keyed by vertex index.
#[derive(Clone, Debug, PartialEq)]
pub struct Layout {
    points: Vec<Vector2<f64>>,
}

impl Layout {
    pub fn regular(n: usize, cfg: LayoutCfg) -> Self {
        let step = 2.0 * std::f64::consts::PI / (n.max(1) as f64);
        let points = (0..n)
            .map(|i| {
                let th = step * i as f64 + cfg.rotation;
                Vector2::new(cfg.radius * th.cos(), cfg.radius * th.sin())
            })
            .collect();
        Self { points }
    }

    /// Arbitrary convex position, in cyclic order.
    pub fn from_points(points: Vec<Vector2<f64>>) -> Self {
        Self { points }
    }

    pub fn n(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn vertex(&self, i: usize) -> Vector2<f64> {
        self.points[i]
    }

    /// `t * v_lo + (1 - t) * v_hi`.
    pub fn dividing_point(&self, e: Edge, t: f64) -> Vector2<f64> {
        self.vertex(e.lo()) * t + self.vertex(e.hi()) * (1.0 - t)
    }

    pub fn midpoint(&self, e: Edge) -> Vector2<f64> {
        self.dividing_point(e, 0.5)
    }

    /// Midpoint of frozen edge `i`, i.e. of `{i, i+1 mod n}`.
    pub fn frozen_midpoint(&self, i: usize) -> Vector2<f64> {
        let n = self.n();
        self.midpoint(Edge::new(i % n, (i + 1) % n))
    }
}

#[inline]
pub fn distance(a: Vector2<f64>, b: Vector2<f64>) -> f64 {
    (a - b).norm()
}

/// Intersection point of segments `a1-a2` and `b1-b2`.
///
/// `None` for parallel (including collinear) supports or when the supporting
/// lines meet outside either segment.
pub fn segment_intersection(
    a1: Vector2<f64>,
    a2: Vector2<f64>,
    b1: Vector2<f64>,
    b2: Vector2<f64>,
) -> Option<Vector2<f64>> {
    let da = a2 - a1;
    let db = b2 - b1;
    let den = da.x * db.y - da.y * db.x;
    if den.abs() < 1e-12 {
        return None;
    }
    let w = b1 - a1;
    let t = (w.x * db.y - w.y * db.x) / den;
    let u = (w.x * da.y - w.y * da.x) / den;
    ((0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u)).then(|| a1 + da * t)
}

/// Diagonals crossing the chord `p-q`, nearest to `p` first.
///
/// Diagonals sharing an endpoint with the chord do not count. `InvalidPath`
/// for an endpoint outside `[0, n)`; `InvalidTopology` when the layout has
/// fewer points than the polygon.
pub fn geometric_crossings(
    q: &Quiver,
    layout: &Layout,
    p: usize,
    r: usize,
) -> Result<Vec<Edge>> {
    let n = q.n();
    if layout.n() < n {
        return Err(ClusterError::InvalidTopology {
            message: format!("layout has {} points for a {n}-gon", layout.n()),
        });
    }
    if p >= n || r >= n {
        return Err(ClusterError::InvalidPath { start: p, end: r, n });
    }
    let (a1, a2) = (layout.vertex(p), layout.vertex(r));
    let chord = Edge::new(p, r);
    let mut hits: Vec<(f64, Edge)> = q
        .clusters()
        .iter()
        .filter(|e| !e.shares_endpoint(&chord))
        .filter_map(|&e| {
            let x = segment_intersection(a1, a2, layout.vertex(e.lo()), layout.vertex(e.hi()))?;
            Some((distance(a1, x), e))
        })
        .collect();
    hits.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
    Ok(hits.into_iter().map(|(_, e)| e).collect())
}

/// Text anchored at a point.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Label {
    pub text: String,
    pub at: [f64; 2],
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SceneEdge {
    pub edge: Edge,
    pub from: [f64; 2],
    pub to: [f64; 2],
    pub label: Label,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SceneLamination {
    pub arcs: Vec<[[f64; 2]; 2]>,
    /// On the last arc; absent for an empty lamination.
    pub label: Option<Label>,
}

/// Everything needed to draw a quiver, in plain coordinates.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Scene {
    pub n: usize,
    pub vertices: Vec<Label>,
    pub frozens: Vec<SceneEdge>,
    pub clusters: Vec<SceneEdge>,
    pub laminations: Vec<SceneLamination>,
}

#[inline]
fn xy(v: Vector2<f64>) -> [f64; 2] {
    [v.x, v.y]
}

fn scene_edge(layout: &Layout, e: Edge, text: String) -> SceneEdge {
    SceneEdge {
        edge: e,
        from: xy(layout.vertex(e.lo())),
        to: xy(layout.vertex(e.hi())),
        label: Label {
            text,
            at: xy(layout.midpoint(e)),
        },
    }
}

/// Build the scene for the current state of `q`.
pub fn scene(q: &Quiver, cfg: LayoutCfg) -> Scene {
    let layout = Layout::regular(q.n(), cfg);
    let vertices = (0..q.n())
        .map(|i| Label {
            text: format!("v_{i}"),
            at: xy(layout.vertex(i)),
        })
        .collect();
    let frozens = q
        .frozens()
        .into_iter()
        .enumerate()
        .map(|(i, e)| scene_edge(&layout, e, format!("e_{i}")))
        .collect();
    let clusters = q
        .clusters()
        .iter()
        .zip(q.cluster_names())
        .map(|(&e, name)| scene_edge(&layout, e, format!("x_{name}")))
        .collect();
    let laminations = q
        .laminations()
        .iter()
        .zip(q.lamination_names())
        .map(|(lam, name)| {
            let arcs: Vec<[Vector2<f64>; 2]> = lam
                .arcs
                .iter()
                .map(|a| [layout.frozen_midpoint(a.start), layout.frozen_midpoint(a.end)])
                .collect();
            let label = arcs.last().map(|[x1, x2]| Label {
                text: format!("u_{name}"),
                at: xy(x1 + (x2 - x1) * cfg.label_pos),
            });
            SceneLamination {
                arcs: arcs.iter().map(|[x1, x2]| [xy(*x1), xy(*x2)]).collect(),
                label,
            }
        })
        .collect();
    Scene {
        n: q.n(),
        vertices,
        frozens,
        clusters,
        laminations,
    }
}

#[cfg(test)]
mod tests;
