//! CSV export of exchange matrices via Polars.

use anyhow::{Context, Result};
use cluster_algebra::api::LabeledMatrix;
use polars::prelude::*;
use std::fs::File;
use std::path::Path;

/// One `row` label column, then one `i64` column per mutable label.
pub fn matrix_frame(b: &LabeledMatrix) -> Result<DataFrame> {
    let mut columns = Vec::with_capacity(b.ncols() + 1);
    columns.push(Series::new("row".into(), b.row_labels()));
    for (j, label) in b.col_labels().iter().enumerate() {
        let values: Vec<i64> = b.column(j).map(|(_, v)| v).collect();
        columns.push(Series::new(label.as_str().into(), values));
    }
    Ok(DataFrame::new(columns)?)
}

pub fn write_matrix_csv(b: &LabeledMatrix, out: &Path) -> Result<()> {
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    let mut df = matrix_frame(b)?;
    let mut file = File::create(out).with_context(|| format!("creating {}", out.display()))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut df)
        .with_context(|| format!("writing {}", out.display()))?;
    Ok(())
}
