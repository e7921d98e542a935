//! JSON interchange for spline tables.
//!
//! The document mirrors the column layout produced by the database reader:
//!
//! ```json
//! { "deryd": [0.95], "ttype": [2], "c": [1.0],
//!   "splom": [[0.1], [0.2], [0.3], [0.4], [0.5]] }
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::splom::{SplomError, SplomTable};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SplomColumns {
    pub deryd: Vec<f64>,
    pub ttype: Vec<i64>,
    pub c: Vec<f64>,
    pub splom: Vec<Vec<f64>>,
}

impl SplomColumns {
    pub fn into_table(self) -> Result<SplomTable, SplomError> {
        SplomTable::from_columns(&self.deryd, &self.ttype, &self.c, &self.splom)
    }
}

impl From<&SplomTable> for SplomColumns {
    fn from(table: &SplomTable) -> Self {
        let rows = table.rows();
        let node_count = rows.first().map_or(0, |row| row.ordinates().len());
        Self {
            deryd: rows.iter().map(|row| row.threshold_ryd()).collect(),
            ttype: rows.iter().map(|row| row.transform().code()).collect(),
            c: rows.iter().map(|row| row.scale_parameter()).collect(),
            splom: (0..node_count)
                .map(|node| rows.iter().map(|row| row.ordinates()[node]).collect())
                .collect(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SplomTableLoadError {
    #[error("failed to read spline table '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse spline table '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("invalid spline table '{}': {source}", path.display())]
    Invalid { path: PathBuf, source: SplomError },
}

pub fn load_splom_table(path: impl AsRef<Path>) -> Result<SplomTable, SplomTableLoadError> {
    let path = path.as_ref();
    let source = fs::read_to_string(path).map_err(|source| SplomTableLoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let table = parse_splom_table(&source, path)?;
    debug!(path = %path.display(), rows = table.len(), "loaded spline table");
    Ok(table)
}

/// Parse a JSON document; `origin` only labels errors.
pub fn parse_splom_table(
    source: &str,
    origin: impl AsRef<Path>,
) -> Result<SplomTable, SplomTableLoadError> {
    let origin = origin.as_ref();
    let columns: SplomColumns =
        serde_json::from_str(source).map_err(|source| SplomTableLoadError::Parse {
            path: origin.to_path_buf(),
            source,
        })?;
    columns
        .into_table()
        .map_err(|source| SplomTableLoadError::Invalid {
            path: origin.to_path_buf(),
            source,
        })
}
