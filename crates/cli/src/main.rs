mod args;
mod export;
mod provenance;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use cluster_algebra::api::{
    draw_quiver, scene, FlipReplay, LayoutCfg, Quiver, QuiverCfg, VertexCount, WalkCfg,
};
use serde::Serialize;
use serde_json::json;
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;

use crate::args::QuiverArgs;
use crate::provenance::Payload;

#[derive(Parser)]
#[command(name = "cluster-cli")]
#[command(about = "Flips, exchange matrices and cluster variables of triangulated polygons")]
struct Cmd {
    #[command(flatten)]
    quiver: QuiverArgs,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Print the exchange matrix; optionally write it as CSV
    Matrix {
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Express the variable of the arc between two frozen edges
    Express {
        #[arg(long)]
        start: usize,
        #[arg(long)]
        end: usize,
        /// Emit relations and expressions as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the triangles of the current triangulation
    Triangles,
    /// Write coordinates and labels for drawing
    Layout {
        #[arg(long)]
        out: PathBuf,
        #[arg(long, default_value_t = 10.0)]
        radius: f64,
        #[arg(long, default_value_t = 0.0)]
        rotation: f64,
    },
    /// Print a random `--n`-gon triangulation (seeded flip walk) as a config
    Random {
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long, default_value_t = 0)]
        index: u64,
        #[arg(long, default_value_t = 32)]
        steps: usize,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    SubscriberBuilder::default()
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Matrix { out } => matrix(&cmd.quiver, out.as_deref()),
        Action::Express { start, end, json } => express(&cmd.quiver, start, end, json),
        Action::Triangles => triangles(&cmd.quiver),
        Action::Layout {
            out,
            radius,
            rotation,
        } => write_layout(&cmd.quiver, &out, radius, rotation),
        Action::Random { seed, index, steps } => random(&cmd.quiver, seed, index, steps),
        Action::Report => report(&cmd.quiver),
    }
}

fn quiver_json(q: &Quiver) -> Result<serde_json::Value> {
    Ok(serde_json::to_value(q.to_cfg())?)
}

fn matrix(args: &QuiverArgs, out: Option<&Path>) -> Result<()> {
    let q = args.build()?;
    let b = q.exchange_matrix();
    tracing::info!(n = q.n(), rows = b.nrows(), cols = b.ncols(), "matrix");
    print!("{b}");
    if let Some(out) = out {
        export::write_matrix_csv(&b, out)?;
        let payload = Payload::new("matrix", json!({ "flips": args.flips }))
            .with_quiver(quiver_json(&q)?);
        let sidecar = provenance::write_sidecar(out, payload)?;
        tracing::info!(out = %out.display(), sidecar = %sidecar.display(), "wrote matrix csv");
    }
    Ok(())
}

#[derive(Serialize)]
struct ExpressionRow {
    lhs: String,
    rhs: String,
}

#[derive(Serialize)]
struct ExpressReport {
    start: usize,
    end: usize,
    relations: Vec<String>,
    expressions: Vec<ExpressionRow>,
    target: Option<String>,
    #[serde(rename = "final")]
    final_quiver: QuiverCfg,
}

fn express(args: &QuiverArgs, start: usize, end: usize, as_json: bool) -> Result<()> {
    let q = args.build()?;
    tracing::info!(n = q.n(), start, end, "express");
    let elim = q
        .express_target(start, end)
        .with_context(|| format!("expressing arc {start} -> {end}"))?;
    if as_json {
        let doc = ExpressReport {
            start,
            end,
            relations: elim.relations.iter().map(|r| r.to_string()).collect(),
            expressions: elim
                .expressions
                .iter()
                .map(|e| ExpressionRow {
                    lhs: e.lhs.to_string(),
                    rhs: e.rhs.to_string(),
                })
                .collect(),
            target: elim.target().map(|e| e.rhs.to_string()),
            final_quiver: elim.quiver.to_cfg(),
        };
        println!("{}", serde_json::to_string_pretty(&doc)?);
    } else {
        for r in &elim.relations {
            println!("{r}");
        }
        for e in &elim.expressions {
            println!("{e}");
        }
    }
    Ok(())
}

fn triangles(args: &QuiverArgs) -> Result<()> {
    let q = args.build()?;
    tracing::info!(n = q.n(), "triangles");
    for t in q.triangles() {
        println!("{t}");
    }
    Ok(())
}

fn write_layout(args: &QuiverArgs, out: &Path, radius: f64, rotation: f64) -> Result<()> {
    let q = args.build()?;
    let cfg = LayoutCfg {
        radius,
        rotation,
        ..LayoutCfg::default()
    };
    tracing::info!(n = q.n(), radius, rotation, out = %out.display(), "layout");
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    let drawn = scene(&q, cfg);
    std::fs::write(out, serde_json::to_vec_pretty(&drawn)?)
        .with_context(|| format!("writing {}", out.display()))?;
    let payload = Payload::new("layout", serde_json::to_value(cfg)?).with_quiver(quiver_json(&q)?);
    provenance::write_sidecar(out, payload)?;
    Ok(())
}

fn random(args: &QuiverArgs, seed: u64, index: u64, steps: usize) -> Result<()> {
    let Some(n) = args.n else {
        bail!("random needs --n");
    };
    tracing::info!(n, seed, index, steps, "random");
    let cfg = WalkCfg {
        vertex_count: VertexCount::Fixed(n),
        steps,
    };
    let q = draw_quiver(cfg, FlipReplay { seed, index })?;
    println!("{}", serde_json::to_string_pretty(&q.to_cfg())?);
    Ok(())
}

/// Quiver state for the report; `null` (with a warning) when none can be built.
fn report_quiver(args: &QuiverArgs) -> Result<serde_json::Value> {
    match args.build() {
        Ok(q) => quiver_json(&q),
        Err(err) => {
            tracing::warn!("report without quiver: {err:#}");
            Ok(serde_json::Value::Null)
        }
    }
}

fn report(args: &QuiverArgs) -> Result<()> {
    let quiver = report_quiver(args)?;
    let doc = provenance::document(Payload::new("report", json!({})).with_quiver(quiver), &[]);
    println!("{}", serde_json::to_string_pretty(&doc)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn report_survives_a_bad_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();
        let args = QuiverArgs {
            config: Some(path),
            ..QuiverArgs::default()
        };
        assert_eq!(report_quiver(&args).unwrap(), serde_json::Value::Null);

        let ok = QuiverArgs {
            n: Some(5),
            ..QuiverArgs::default()
        };
        assert_eq!(report_quiver(&ok).unwrap()["n"], json!(5));
    }
}
