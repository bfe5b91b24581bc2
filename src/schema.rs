//! Canonical column naming across reporting years.
//!
//! The query service renamed (and occasionally misspelled) columns between
//! years. [`reconcile`] maps every year's names onto one schema.

use crate::fetch::YearTable;
use crate::table::Table;

/// Ordered rename rules. A column is run through every rule in turn, so a
/// later rule sees the output of an earlier one: the 2011 typo
/// `payment_topology_2` is first corrected, then renamed with the other
/// payer columns.
pub const RENAME_RULES: &[(&str, &str)] = &[
    ("payment_topology_2", "payment_typology_2"),
    ("payment_typology_1", "source_of_payment_1"),
    ("payment_typology_2", "source_of_payment_2"),
    ("payment_typology_3", "source_of_payment_3"),
    (
        "apr_severity_of_illness_descript",
        "apr_severity_of_illness_description",
    ),
    ("apr_drg_description_and_code", "apr_drg_code"),
    ("age", "age_group"),
    ("apr_severity_of_illness", "apr_severity_of_illness_code"),
    ("sex", "gender"),
    (
        "operating_provider_license_numbe",
        "operating_provider_license_number",
    ),
    (
        "attending_provider_license_numbe",
        "attending_provider_license_number",
    ),
];

/// Returns the canonical name for one source column.
pub fn canonical_name(column: &str) -> String {
    RENAME_RULES
        .iter()
        .fold(column.to_string(), |name, (from, to)| {
            if name == *from { to.to_string() } else { name }
        })
}

/// Renames `table`'s columns onto the canonical schema. Rows are untouched
/// and columns no rule matches keep their name.
pub fn reconcile(table: Table) -> Table {
    table.rename_columns(canonical_name)
}

/// Reconciles every downloaded year.
pub fn reconcile_years(tables: Vec<YearTable>) -> Vec<YearTable> {
    tables
        .into_iter()
        .map(|year| YearTable {
            table: reconcile(year.table),
            ..year
        })
        .collect()
}
