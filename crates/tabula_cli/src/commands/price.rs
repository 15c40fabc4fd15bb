//! Price command implementation
//!
//! Loads a dataset and a timetable, applies command line overrides and
//! prices the timetable with the lognormal model.

use std::path::{Path, PathBuf};

use tabula_models::dataset::Flag;
use tabula_pricing::{LognormalModel, PricingResult};
use tracing::info;

use super::{load_dataset, load_timetable};
use crate::config::OutputFormat;
use crate::Result;

/// Arguments of `tabula price`.
#[derive(Debug, Clone)]
pub struct PriceArgs {
    pub dataset: PathBuf,
    pub timetable: PathBuf,
    pub paths: Option<usize>,
    pub seed: Option<u64>,
    pub format: OutputFormat,
    pub raw_out: Option<PathBuf>,
}

/// Run the price command
pub fn run(args: &PriceArgs) -> Result<()> {
    let result = price(args)?;
    println!("{}", render(&result, args.format)?);
    Ok(())
}

/// Price without printing; writes the raw CSV when requested.
pub fn price(args: &PriceArgs) -> Result<PricingResult> {
    let mut dataset = load_dataset(&args.dataset)?;
    if let Some(paths) = args.paths {
        dataset = dataset.with_paths(paths)?;
    }
    if let Some(seed) = args.seed {
        dataset = dataset.with_seed(seed);
    }
    if args.raw_out.is_some() {
        dataset = dataset.with_flag(Flag::RawPv);
    }
    let timetable = load_timetable(&args.timetable)?;

    info!(
        paths = dataset.paths(),
        seed = dataset.seed(),
        "pricing timetable"
    );
    let mut result = LognormalModel::price(&timetable, &dataset)?;

    if let Some(out) = &args.raw_out {
        if let Some(pv) = result.stats.pv_vec.take() {
            write_raw_pv(out, &pv)?;
            info!(path = %out.display(), rows = pv.len(), "raw present values written");
        }
    }

    Ok(result)
}

fn write_raw_pv(path: &Path, pv: &[f64]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["path", "pv"])?;
    for (index, value) in pv.iter().enumerate() {
        writer.write_record([index.to_string(), value.to_string()])?;
    }
    writer.flush().map_err(|source| crate::CliError::Io {
        path: path.display().to_string(),
        source,
    })?;
    Ok(())
}

/// Render a result in the requested format.
pub fn render(result: &PricingResult, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(result)?),
        OutputFormat::Table => Ok(render_table(result)),
    }
}

fn render_table(result: &PricingResult) -> String {
    let rows = [
        ("Price", format!("{:.6}", result.price)),
        ("Std error", format!("{:.6}", result.std_error)),
        ("95% CI", format!("± {:.6}", result.confidence_95())),
        ("Std dev", format!("{:.6}", result.stats.std_dev)),
        ("Paths", result.stats.n_paths.to_string()),
        ("Grid points", result.stats.n_grid_points.to_string()),
        ("Events", result.stats.n_events.to_string()),
    ];

    let mut out = String::new();
    out.push_str("┌─────────────┬──────────────────────┐\n");
    for (label, value) in rows {
        out.push_str(&format!("│ {:<11} │ {:>20} │\n", label, value));
    }
    out.push_str("└─────────────┴──────────────────────┘");
    out
}
