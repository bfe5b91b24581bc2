//! Cohort derivation over the combined discharge table.
//!
//! Stages run in a fixed order (see [`pipeline::build_cohorts`]): combine,
//! payer classification, inflation adjustment, numeric coercion, payer
//! restriction, disposition exclusion and outlier trimming. The last two
//! apply to the medicare cohort only.

pub mod combine;
pub mod exclusion;
pub mod inflation;
pub mod numeric;
pub mod outliers;
pub mod payer;
pub mod pipeline;
pub mod projection;
pub mod types;
pub mod utility;

pub const TOTAL_COSTS: &str = "total_costs";
pub const TOTAL_CHARGES: &str = "total_charges";
pub const TOTAL_COSTS_INFLATION_ADJUSTED: &str = "total_costs_inflation_adjusted";
pub const LENGTH_OF_STAY: &str = "length_of_stay";
pub const DISCHARGE_YEAR: &str = "discharge_year";
pub const PATIENT_DISPOSITION: &str = "patient_disposition";
pub const MEDICARE: &str = "medicare";
