use tracing::debug;

use super::MEDICARE;
use crate::table::{Table, Value};

/// Ranked payer columns. Later years may publish fewer than three.
pub const PAYER_COLUMNS: [&str; 3] = [
    "source_of_payment_1",
    "source_of_payment_2",
    "source_of_payment_3",
];

pub fn is_medicare(value: &Value) -> bool {
    value
        .as_str()
        .is_some_and(|payer| payer.eq_ignore_ascii_case(MEDICARE))
}

/// Per-row medicare flags: true when any payer column names Medicare.
///
/// An absent payer column or a non-text cell counts as "not medicare"; this
/// is the one stage that never fails on a missing column.
pub fn medicare_flags(table: &Table) -> Vec<bool> {
    let mut flags = vec![false; table.len()];
    for column in PAYER_COLUMNS {
        match table.column(column) {
            Some(values) => {
                for (flag, value) in flags.iter_mut().zip(values) {
                    *flag |= is_medicare(value);
                }
            }
            None => debug!(column, "Payer column absent, treated as not medicare"),
        }
    }
    flags
}

/// Adds the boolean `medicare` column.
pub fn classify_payer(table: &mut Table) {
    let flags = medicare_flags(table);
    table.set_column(MEDICARE, flags.into_iter().map(Value::Bool).collect());
}

/// Number of rows whose `medicare` flag is set.
pub fn count_medicare(table: &Table) -> usize {
    table
        .column(MEDICARE)
        .map(|values| values.filter(|v| **v == Value::Bool(true)).count())
        .unwrap_or(0)
}

/// Rows whose `medicare` flag is set. Without the column the subset is empty.
pub fn subset_medicare(table: &Table) -> Table {
    let mask: Vec<bool> = match table.column(MEDICARE) {
        Some(values) => values.map(|v| v.as_bool() == Some(true)).collect(),
        None => vec![false; table.len()],
    };
    table.filter_mask(&mask)
}
