//! `$where` filter expressions for the SPARCS query service.
//!
//! The service's column naming and value typing drifted across reporting
//! years, so the expression depends on which [`YearBucket`] a dataset
//! falls into.

pub const DIAGNOSIS_FIELD: &str = "ccs_diagnosis_code";
pub const PROCEDURE_FIELD: &str = "ccs_procedure_code";

/// Query-grammar behavior shared by a group of reporting years.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YearBucket {
    /// 2011 publishes the DRG as `apr_drg_description_and_code`.
    Y2011,
    /// 2015 and 2016 store codes as integers, so values are unquoted.
    Y2015Or2016,
    Default,
}

impl YearBucket {
    pub fn for_year(year: u16) -> Self {
        match year {
            2011 => YearBucket::Y2011,
            2015 | 2016 => YearBucket::Y2015Or2016,
            _ => YearBucket::Default,
        }
    }

    pub fn drg_field(self) -> &'static str {
        match self {
            YearBucket::Y2011 => "apr_drg_description_and_code",
            YearBucket::Y2015Or2016 | YearBucket::Default => "apr_drg_code",
        }
    }

    pub fn quotes_values(self) -> bool {
        !matches!(self, YearBucket::Y2015Or2016)
    }
}

/// Classification codes to restrict each query to. An empty list means no
/// restriction on that dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeSets {
    pub diagnosis: Vec<String>,
    pub procedure: Vec<String>,
    pub drg: Vec<String>,
}

impl CodeSets {
    pub fn is_empty(&self) -> bool {
        self.diagnosis.is_empty() && self.procedure.is_empty() && self.drg.is_empty()
    }
}

/// Builds the filter expression for `bucket`.
///
/// Each non-empty code list becomes `(field=value OR ...)`; groups are
/// joined with `AND` in diagnosis, procedure, DRG order. With no codes at
/// all the result is the empty string.
pub fn build_filter(bucket: YearBucket, codes: &CodeSets) -> String {
    let groups = [
        (DIAGNOSIS_FIELD, &codes.diagnosis),
        (PROCEDURE_FIELD, &codes.procedure),
        (bucket.drg_field(), &codes.drg),
    ];

    groups
        .iter()
        .filter(|(_, values)| !values.is_empty())
        .map(|(field, values)| or_group(field, values, bucket.quotes_values()))
        .collect::<Vec<_>>()
        .join(" AND ")
}

fn or_group(field: &str, values: &[String], quoted: bool) -> String {
    let terms = values
        .iter()
        .map(|v| {
            if quoted {
                format!("{field}='{v}'")
            } else {
                format!("{field}={v}")
            }
        })
        .collect::<Vec<_>>()
        .join(" OR ");
    format!("({terms})")
}
