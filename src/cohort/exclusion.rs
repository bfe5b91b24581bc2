use super::PATIENT_DISPOSITION;
use crate::table::Table;

/// Dispositions removed from the medicare cohort.
pub const EXCLUDED_DISPOSITIONS: [&str; 3] = [
    "Left Against Medical Advice",
    "Expired",
    "Another Type Not Listed",
];

/// Drops rows with an excluded patient disposition. A table without the
/// disposition column is left as is. Returns the number of rows dropped.
pub fn exclude_dispositions(table: &mut Table) -> usize {
    let Some(values) = table.column(PATIENT_DISPOSITION) else {
        return 0;
    };
    let mask: Vec<bool> = values
        .map(|v| {
            v.as_str()
                .is_none_or(|disposition| !EXCLUDED_DISPOSITIONS.contains(&disposition))
        })
        .collect();

    let before = table.len();
    table.retain_mask(&mask);
    before - table.len()
}
