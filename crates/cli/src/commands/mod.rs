//! CLI command implementations

pub mod analyze;
pub mod status;

use anyhow::{bail, Context, Result};

/// Resolve the input series from positional values or a file
///
/// A file holds one reading per line; blank lines are skipped.
pub fn load_series(values: Vec<f64>, file: Option<&str>) -> Result<Vec<f64>> {
    let series = match file {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read series file {}", path))?;
            content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(|line| {
                    line.parse::<f64>()
                        .with_context(|| format!("Invalid reading: {}", line))
                })
                .collect::<Result<Vec<f64>>>()?
        }
        None => values,
    };

    if series.is_empty() {
        bail!("No readings supplied; pass values or --file");
    }
    Ok(series)
}
