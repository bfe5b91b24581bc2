use tracing::debug;

use super::{DISCHARGE_YEAR, LENGTH_OF_STAY, TOTAL_CHARGES, TOTAL_COSTS};
use crate::error::{DataQualityError, Result};
use crate::table::{Table, Value};

/// Top-coded length of stay. The service publishes stays of 120 days or
/// more as this literal, which has no numeric reading.
pub const LOS_TOP_CODE: &str = "120 +";

pub const NUMERIC_COLUMNS: [&str; 4] = [TOTAL_COSTS, TOTAL_CHARGES, LENGTH_OF_STAY, DISCHARGE_YEAR];

/// Drops rows whose length of stay is top-coded. Returns how many were
/// dropped.
pub fn drop_top_coded_stays(table: &mut Table) -> Result<usize> {
    let mask: Vec<bool> = table
        .require_column(LENGTH_OF_STAY)?
        .map(|los| los.as_str() != Some(LOS_TOP_CODE))
        .collect();
    let before = table.len();
    table.retain_mask(&mask);
    Ok(before - table.len())
}

/// Converts one column to `Int`/`Float` cells.
pub fn coerce_column(table: &mut Table, column: &str) -> Result<()> {
    let coerced = table
        .require_column(column)?
        .map(|value| {
            value.to_numeric().ok_or_else(|| DataQualityError::NonNumeric {
                column: column.to_string(),
                value: value.to_string(),
            })
        })
        .collect::<std::result::Result<Vec<Value>, _>>()?;
    table.set_column(column, coerced);
    Ok(())
}

/// Removes top-coded stays, then coerces costs, charges, length of stay
/// and discharge year to numbers. Any other non-numeric value fails the
/// run. Returns the number of rows dropped.
pub fn assign_numeric(table: &mut Table) -> Result<usize> {
    let dropped = drop_top_coded_stays(table)?;
    debug!(dropped, "Dropped top-coded lengths of stay");
    for column in NUMERIC_COLUMNS {
        coerce_column(table, column)?;
    }
    Ok(dropped)
}
