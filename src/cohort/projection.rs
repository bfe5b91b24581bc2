use crate::error::Result;
use crate::table::Table;

/// Columns kept in the `*_column_subset` outputs, in output order.
pub const OUTPUT_COLUMNS: [&str; 15] = [
    "apr_risk_of_mortality",
    "apr_severity_of_illness_code",
    "age_group",
    "ccs_diagnosis_code",
    "discharge_year",
    "ethnicity",
    "gender",
    "length_of_stay",
    "patient_disposition",
    "source_of_payment_1",
    "race",
    "total_costs",
    "total_costs_inflation_adjusted",
    "type_of_admission",
    "apr_drg_code",
];

/// Projects a cohort onto [`OUTPUT_COLUMNS`]. A missing column is an error.
pub fn project(table: &Table) -> Result<Table> {
    table.select(&OUTPUT_COLUMNS)
}
