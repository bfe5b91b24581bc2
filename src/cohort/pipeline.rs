use chrono::Utc;
use tracing::info;

use super::combine::combine;
use super::exclusion::exclude_dispositions;
use super::inflation::adjust_for_inflation;
use super::numeric::assign_numeric;
use super::outliers::{LOWER_PERCENTILE, UPPER_PERCENTILE, remove_outliers};
use super::payer::{classify_payer, count_medicare, subset_medicare};
use super::projection::project;
use super::types::{Cohorts, RunSummary, YearCount};
use super::utility::mean;
use super::{TOTAL_CHARGES, TOTAL_COSTS, TOTAL_COSTS_INFLATION_ADJUSTED};
use crate::error::Result;
use crate::fetch::YearTable;

/// Runs every cohort stage over the reconciled year tables.
///
/// The combined table is owned here and moved through the stages in order;
/// the first fatal error aborts and nothing is returned.
#[tracing::instrument(skip_all, fields(years = tables.len()))]
pub fn build_cohorts(tables: Vec<YearTable>) -> Result<Cohorts> {
    let years: Vec<YearCount> = tables
        .iter()
        .map(|t| YearCount {
            year: t.year,
            dataset_id: t.dataset_id.clone(),
            rows: t.table.len(),
        })
        .collect();

    let mut all = combine(tables.into_iter().map(|t| t.table).collect());
    let combined_rows = all.len();
    info!(rows = combined_rows, columns = all.width(), "Combined year tables");

    classify_payer(&mut all);
    let medicare_flagged = count_medicare(&all);
    info!(rows = all.len(), medicare = medicare_flagged, "Coded medicare");

    adjust_for_inflation(&mut all, TOTAL_COSTS)?;
    adjust_for_inflation(&mut all, TOTAL_CHARGES)?;
    info!(rows = all.len(), "Adjusted for inflation");

    let dropped_top_coded = assign_numeric(&mut all)?;
    info!(rows = all.len(), dropped = dropped_top_coded, "Assigned numeric");

    let all_subset = project(&all)?;

    let mut medicare = subset_medicare(&all);
    let medicare_subset_rows = medicare.len();
    info!(
        all = all.len(),
        medicare = medicare_subset_rows,
        "Subsetted medicare"
    );

    let dropped_dispositions = exclude_dispositions(&mut medicare);
    info!(
        rows = medicare.len(),
        dropped = dropped_dispositions,
        "Excluded dispositions"
    );

    let trim_bounds = remove_outliers(
        &mut medicare,
        TOTAL_COSTS_INFLATION_ADJUSTED,
        LOWER_PERCENTILE,
        UPPER_PERCENTILE,
    )?;
    info!(rows = medicare.len(), "Removed cost outliers");

    let medicare_subset = project(&medicare)?;

    let costs: Vec<f64> = medicare
        .require_column(TOTAL_COSTS_INFLATION_ADJUSTED)?
        .filter_map(|v| v.as_f64())
        .collect();

    let summary = RunSummary {
        generated_at: Utc::now(),
        years,
        combined_rows,
        medicare_flagged,
        dropped_top_coded,
        all_patients: all.len(),
        medicare_subset: medicare_subset_rows,
        dropped_dispositions,
        trim_bounds,
        medicare_cohort: medicare.len(),
        mean_total_costs_inflation_adjusted: mean(&costs),
    };

    Ok(Cohorts {
        all_patients: all,
        all_patients_subset: all_subset,
        medicare,
        medicare_subset,
        summary,
    })
}
