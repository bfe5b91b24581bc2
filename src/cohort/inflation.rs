//! Rescaling monetary columns to 2009 dollars.

use super::DISCHARGE_YEAR;
use crate::error::{DataQualityError, Result};
use crate::table::{Table, Value};

/// Multiplicative CPI adjustment per discharge year, relative to 2009
/// (BLS CPI calculator, January of each year).
pub const INFLATION_FACTORS: [(&str, f64); 8] = [
    ("2016", 0.89),
    ("2015", 0.90),
    ("2014", 0.90),
    ("2013", 0.92),
    ("2012", 0.93),
    ("2011", 0.96),
    ("2010", 0.97),
    ("2009", 1.00),
];

pub fn inflation_factor(year: &str) -> Option<f64> {
    INFLATION_FACTORS
        .iter()
        .find(|(y, _)| *y == year)
        .map(|(_, factor)| *factor)
}

/// Text form of a discharge year as used for factor lookup.
fn year_key(value: &Value) -> String {
    match value {
        Value::Str(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Name of the derived column written by [`adjust_for_inflation`].
pub fn adjusted_column(column: &str) -> String {
    format!("{column}_inflation_adjusted")
}

/// Adds `<column>_inflation_adjusted = float(column) * factor[discharge_year]`.
///
/// # Errors
///
/// Fails on the first row whose discharge year has no factor or whose
/// value is not numeric. Nothing is written to the table in that case.
pub fn adjust_for_inflation(table: &mut Table, column: &str) -> Result<()> {
    let adjusted = table
        .require_column(column)?
        .zip(table.require_column(DISCHARGE_YEAR)?)
        .map(|(value, year)| -> Result<Value> {
            let amount = value.as_f64().ok_or_else(|| DataQualityError::NonNumeric {
                column: column.to_string(),
                value: value.to_string(),
            })?;
            let key = year_key(year);
            let factor =
                inflation_factor(&key).ok_or(DataQualityError::UnsupportedYear(key))?;
            Ok(Value::Float(amount * factor))
        })
        .collect::<Result<Vec<_>>>()?;

    table.set_column(&adjusted_column(column), adjusted);
    Ok(())
}
