use serde::Serialize;
use tracing::{info, warn};

use super::utility::percentile;
use crate::error::{DataQualityError, Result};
use crate::table::Table;

pub const LOWER_PERCENTILE: f64 = 0.5;
pub const UPPER_PERCENTILE: f64 = 99.5;

/// Percentile cut-offs computed for a trim. Both are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrimBounds {
    pub lower: f64,
    pub upper: f64,
}

impl TrimBounds {
    pub fn contains(&self, value: f64) -> bool {
        value > self.lower && value < self.upper
    }
}

/// Keeps rows whose `column` value lies strictly between its
/// `lower_pct` and `upper_pct` percentiles.
///
/// Returns the bounds used, or `None` (and leaves the table alone) when the
/// table is empty.
pub fn remove_outliers(
    table: &mut Table,
    column: &str,
    lower_pct: f64,
    upper_pct: f64,
) -> Result<Option<TrimBounds>> {
    let values = table
        .require_column(column)?
        .map(|v| {
            v.as_f64().ok_or_else(|| DataQualityError::NonNumeric {
                column: column.to_string(),
                value: v.to_string(),
            })
        })
        .collect::<std::result::Result<Vec<f64>, _>>()?;

    let (Some(lower), Some(upper)) = (
        percentile(&values, lower_pct),
        percentile(&values, upper_pct),
    ) else {
        warn!(column, "No rows to trim");
        return Ok(None);
    };

    let bounds = TrimBounds { lower, upper };
    info!(column, lower, upper, "Trimming outliers");

    let mask: Vec<bool> = values.iter().map(|v| bounds.contains(*v)).collect();
    table.retain_mask(&mask);
    Ok(Some(bounds))
}
