//! Random triangulations by seeded flip walks (replay tokens).
//!
//! Purpose
//! - Reach arbitrary triangulations of the `n`-gon reproducibly, for property
//!   tests, benches and the `random` CLI subcommand.
//!
//! Model
//! - Start from the fan at vertex 0 and flip uniformly chosen slots. Every
//!   diagonal of a triangulation is flippable, so each step succeeds; the walk
//!   reaches every triangulation because the flip graph is connected.
//! - Determinism uses a replay token `(seed, index)` mixed into a single RNG.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::Result;

use super::Quiver;

/// Polygon size distribution.
#[derive(Clone, Copy, Debug)]
pub enum VertexCount {
    Fixed(usize),
    Uniform { min: usize, max: usize },
}
impl VertexCount {
    fn sample<R: Rng>(&self, rng: &mut R) -> usize {
        match *self {
            VertexCount::Fixed(n) => n.max(3),
            VertexCount::Uniform { min, max } => {
                let lo = min.max(3);
                let hi = max.max(lo);
                rng.gen_range(lo..=hi)
            }
        }
    }
}

/// Flip-walk sampler configuration.
#[derive(Clone, Copy, Debug)]
pub struct WalkCfg {
    pub vertex_count: VertexCount,
    /// Number of flips applied to the starting fan.
    pub steps: usize,
}
impl Default for WalkCfg {
    fn default() -> Self {
        Self {
            vertex_count: VertexCount::Fixed(8),
            steps: 32,
        }
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}
impl ReplayToken {
    pub fn new(seed: u64, index: u64) -> Self {
        Self { seed, index }
    }

    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64 finalizer.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        StdRng::seed_from_u64(mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15))))
    }
}

/// Apply `steps` uniformly random slot flips; returns the 1-based slots flipped.
pub fn random_flips(q: &mut Quiver, steps: usize, tok: ReplayToken) -> Result<Vec<usize>> {
    walk(q, steps, &mut tok.to_std_rng())
}

fn walk<R: Rng>(q: &mut Quiver, steps: usize, rng: &mut R) -> Result<Vec<usize>> {
    let m = q.clusters().len();
    if m == 0 {
        return Ok(Vec::new());
    }
    let mut slots = Vec::with_capacity(steps);
    for _ in 0..steps {
        let slot = rng.gen_range(1..=m);
        q.flip_slot(slot)?;
        slots.push(slot);
    }
    Ok(slots)
}

/// Fan quiver of a sampled size after a random flip walk.
pub fn draw_quiver(cfg: WalkCfg, tok: ReplayToken) -> Result<Quiver> {
    let mut rng = tok.to_std_rng();
    let n = cfg.vertex_count.sample(&mut rng);
    let mut q = Quiver::new(n)?;
    walk(&mut q, cfg.steps, &mut rng)?;
    Ok(q)
}
