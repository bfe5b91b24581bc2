//! Pipeline results and the run summary written next to them.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::outliers::TrimBounds;
use crate::table::Table;

/// Row count of one downloaded year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearCount {
    pub year: u16,
    pub dataset_id: String,
    pub rows: usize,
}

/// Row counts after each stage, plus the cost trim bounds.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub generated_at: DateTime<Utc>,
    pub years: Vec<YearCount>,
    pub combined_rows: usize,
    pub medicare_flagged: usize,
    pub dropped_top_coded: usize,
    pub all_patients: usize,
    pub medicare_subset: usize,
    pub dropped_dispositions: usize,
    pub trim_bounds: Option<TrimBounds>,
    pub medicare_cohort: usize,
    pub mean_total_costs_inflation_adjusted: f64,
}

/// The two cohorts and their column-subset projections.
#[derive(Debug)]
pub struct Cohorts {
    pub all_patients: Table,
    pub all_patients_subset: Table,
    pub medicare: Table,
    pub medicare_subset: Table,
    pub summary: RunSummary,
}
