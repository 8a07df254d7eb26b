//! Quiver selection shared by every subcommand: a JSON config file and/or
//! inline flags, followed by a list of slot flips.

use anyhow::{bail, Context, Result};
use clap::Args;
use cluster_algebra::api::{Edge, Lamination, Quiver, QuiverCfg};
use std::path::PathBuf;

#[derive(Args, Debug, Clone, Default)]
pub struct QuiverArgs {
    /// JSON file holding a serialized quiver config
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Number of polygon vertices (overrides the config)
    #[arg(long, global = true)]
    pub n: Option<usize>,
    /// Diagonal `p-q`; repeat for a full triangulation (default: fan at 0)
    #[arg(long = "cluster", value_parser = parse_edge, global = true)]
    pub clusters: Vec<Edge>,
    /// Lamination as `x:y,x:y` frozen-edge pairs; repeatable
    #[arg(long = "lamination", value_parser = parse_lamination, global = true)]
    pub laminations: Vec<Lamination>,
    /// Prepend one principal lamination per initial diagonal
    #[arg(long, global = true)]
    pub principal: bool,
    /// 1-based slot to flip before running the command; repeatable, in order
    #[arg(long = "flip", global = true)]
    pub flips: Vec<usize>,
}

impl QuiverArgs {
    /// Merge config file and flags; flags win, laminations append.
    pub fn cfg(&self) -> Result<QuiverCfg> {
        let mut cfg = match &self.config {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("reading config {}", path.display()))?;
                serde_json::from_str::<QuiverCfg>(&text)
                    .with_context(|| format!("parsing config {}", path.display()))?
            }
            None => QuiverCfg::default(),
        };
        if let Some(n) = self.n {
            cfg.n = n;
        }
        if cfg.n == 0 {
            bail!("either --n or --config with a vertex count is required");
        }
        if !self.clusters.is_empty() {
            cfg.clusters = Some(self.clusters.clone());
        }
        cfg.laminations.extend(self.laminations.iter().cloned());
        cfg.principal |= self.principal;
        Ok(cfg)
    }

    pub fn build(&self) -> Result<Quiver> {
        let cfg = self.cfg()?;
        let mut q = cfg.build()?;
        for &slot in &self.flips {
            let new = q.flip_slot(slot)?;
            tracing::info!(slot, new = %new, "flip");
        }
        Ok(q)
    }
}

pub fn parse_edge(s: &str) -> Result<Edge, String> {
    let (p, q) = s
        .split_once('-')
        .ok_or_else(|| format!("expected `p-q`, got {s:?}"))?;
    let p = p.trim().parse::<usize>().map_err(|e| format!("{p:?}: {e}"))?;
    let q = q.trim().parse::<usize>().map_err(|e| format!("{q:?}: {e}"))?;
    Ok(Edge::new(p, q))
}

pub fn parse_lamination(s: &str) -> Result<Lamination, String> {
    s.split(',')
        .map(|arc| -> Result<(usize, usize), String> {
            let (x, y) = arc
                .split_once(':')
                .ok_or_else(|| format!("expected `x:y`, got {arc:?}"))?;
            let x = x.trim().parse::<usize>().map_err(|e| format!("{x:?}: {e}"))?;
            let y = y.trim().parse::<usize>().map_err(|e| format!("{y:?}: {e}"))?;
            Ok((x, y))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cluster_algebra::api::Arc;
    use tempfile::tempdir;

    #[test]
    fn edges_and_laminations_parse() {
        assert_eq!(parse_edge("3-1").unwrap(), Edge::new(1, 3));
        assert!(parse_edge("3").is_err());
        let lam = parse_lamination("1:4, 2:0").unwrap();
        assert_eq!(lam.arcs, vec![Arc::new(1, 4), Arc::new(2, 0)]);
        assert!(parse_lamination("1;4").is_err());
    }

    #[test]
    fn flags_override_the_config_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("q.json");
        std::fs::write(&path, r#"{"n": 6, "laminations": [[[0, 3]]]}"#).unwrap();
        let args = QuiverArgs {
            config: Some(path),
            clusters: vec![Edge::new(1, 3), Edge::new(1, 4), Edge::new(1, 5)],
            laminations: vec![Lamination::single(2, 5)],
            flips: vec![2],
            ..QuiverArgs::default()
        };
        let q = args.build().unwrap();
        assert_eq!(q.n(), 6);
        assert_eq!(q.laminations().len(), 2);
        assert_eq!(q.cluster_names(), vec!["1", "2'", "3"]);
    }

    #[test]
    fn a_vertex_count_is_required() {
        assert!(QuiverArgs::default().build().is_err());
    }
}
