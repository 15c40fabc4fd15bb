//! CLI command implementations
//!
//! Each submodule implements a specific CLI command.

pub mod check;
pub mod price;

use std::path::Path;

use tabula_models::dataset::Dataset;
use tabula_models::timetable::Timetable;
use tracing::info;

use crate::{CliError, Result};

fn read_input(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(CliError::FileNotFound(path.display().to_string()));
    }
    std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Load a dataset; `.json` files are read as JSON, anything else as TOML.
pub fn load_dataset(path: &Path) -> Result<Dataset> {
    let source = read_input(path)?;
    let dataset = match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => Dataset::from_json_str(&source)?,
        _ => Dataset::from_toml_str(&source)?,
    };
    info!(
        path = %path.display(),
        paths = dataset.paths(),
        base = dataset.base(),
        "dataset loaded"
    );
    Ok(dataset)
}

/// Load a JSON timetable.
pub fn load_timetable(path: &Path) -> Result<Timetable> {
    let source = read_input(path)?;
    let timetable = Timetable::from_json_str(&source)?;
    info!(path = %path.display(), events = timetable.len(), "timetable loaded");
    Ok(timetable)
}

#[cfg(test)]
pub(crate) mod fixtures {
    use std::path::PathBuf;

    pub const DATASET_TOML: &str = r#"
PATHS = 2000
TIMESTEP = 0.05
SEED = 3
BASE = "USD"

[ASSETS.USD]
kind = "cash"
rate = 0.02

[ASSETS.SPX]
kind = "asset"
spot = 100.0
growth = 0.01

[PARAMS]
VOLATILITY = 0.2
"#;

    pub const TIMETABLE_JSON: &str = r#"[
  {"track": "", "time": 1.0, "op": "+", "quantity": 1.0, "unit": "SPX"},
  {"track": "", "time": 1.0, "op": "+", "quantity": -95.0, "unit": "USD"},
  {"track": "", "time": 1.0, "op": ">", "quantity": 0.0, "unit": "USD"}
]"#;

    /// Write `contents` to a fresh file under the system temp directory.
    pub fn write_temp(name: &str, contents: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("tabula_cli_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }
}
