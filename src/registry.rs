//! Published SPARCS inpatient discharge datasets, one per reporting year.

/// Open-data host serving the SPARCS de-identified discharge datasets.
pub const SPARCS_DOMAIN: &str = "health.data.ny.gov";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dataset {
    pub year: u16,
    pub id: &'static str,
}

/// Hospital Inpatient Discharges (SPARCS De-Identified), newest first.
pub const DATASETS: &[Dataset] = &[
    Dataset { year: 2016, id: "y93g-4rqn" },
    Dataset { year: 2015, id: "p3tf-wrj8" },
    Dataset { year: 2014, id: "pzzw-8zdv" },
    Dataset { year: 2013, id: "tdf6-7fpk" },
    Dataset { year: 2012, id: "rv8x-4fm3" },
    Dataset { year: 2011, id: "n5y9-zanf" },
    Dataset { year: 2010, id: "dpew-wqcg" },
    Dataset { year: 2009, id: "s8d9-z734" },
];
