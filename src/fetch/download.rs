use tracing::info;

use crate::error::Result;
use crate::filter::{CodeSets, YearBucket, build_filter};
use crate::registry::Dataset;
use crate::services::dataset_api::DatasetApi;
use crate::table::Table;

/// One reporting year's result set.
#[derive(Debug, Clone, PartialEq)]
pub struct YearTable {
    pub year: u16,
    pub dataset_id: String,
    pub table: Table,
}

/// Queries every dataset in `datasets`, one at a time and in order.
///
/// The filter for each query is built from the dataset's year bucket. The
/// first failure aborts the whole download.
#[tracing::instrument(skip_all, fields(datasets = datasets.len()))]
pub async fn fetch_all_years<A>(
    api: &A,
    datasets: &[Dataset],
    codes: &CodeSets,
) -> Result<Vec<YearTable>>
where
    A: DatasetApi + ?Sized,
{
    let mut tables = Vec::with_capacity(datasets.len());

    for dataset in datasets {
        let filter = build_filter(YearBucket::for_year(dataset.year), codes);
        info!(year = dataset.year, dataset_id = dataset.id, filter = %filter, "Downloading dataset");

        let table = api.query(dataset.id, &filter).await?;
        info!(
            year = dataset.year,
            rows = table.len(),
            columns = table.width(),
            "Dataset downloaded"
        );

        tables.push(YearTable {
            year: dataset.year,
            dataset_id: dataset.id.to_string(),
            table,
        });
    }

    Ok(tables)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{PipelineError, TransportError};
    use crate::table::Value;
    use std::sync::Mutex;

    /// Records every query and fails on a chosen dataset.
    struct RecordingApi {
        calls: Mutex<Vec<(String, String)>>,
        fail_on: Option<&'static str>,
    }

    #[async_trait::async_trait]
    impl DatasetApi for RecordingApi {
        async fn query(&self, dataset_id: &str, filter: &str) -> Result<Table> {
            self.calls
                .lock()
                .unwrap()
                .push((dataset_id.to_string(), filter.to_string()));
            if self.fail_on == Some(dataset_id) {
                return Err(TransportError::Status {
                    status: 403,
                    body: "forbidden".into(),
                }
                .into());
            }
            let mut table = Table::new(vec!["id".to_string()]);
            table.push_row(vec![Value::from(dataset_id)]);
            Ok(table)
        }
    }

    const DATASETS: &[Dataset] = &[
        Dataset { year: 2016, id: "a" },
        Dataset { year: 2011, id: "b" },
        Dataset { year: 2009, id: "c" },
    ];

    #[tokio::test]
    async fn test_filters_follow_year_bucket() {
        let api = RecordingApi {
            calls: Mutex::new(Vec::new()),
            fail_on: None,
        };
        let codes = CodeSets {
            drg: vec!["194".to_string()],
            ..Default::default()
        };

        let tables = fetch_all_years(&api, DATASETS, &codes).await.unwrap();

        assert_eq!(tables.len(), 3);
        assert_eq!(tables[1].year, 2011);
        assert_eq!(tables[1].table.get(0, "id"), Some(&Value::from("b")));

        let calls = api.calls.lock().unwrap();
        assert_eq!(
            *calls,
            vec![
                ("a".to_string(), "(apr_drg_code=194)".to_string()),
                ("b".to_string(), "(apr_drg_description_and_code='194')".to_string()),
                ("c".to_string(), "(apr_drg_code='194')".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_failure_aborts_remaining_fetches() {
        let api = RecordingApi {
            calls: Mutex::new(Vec::new()),
            fail_on: Some("b"),
        };

        let err = fetch_all_years(&api, DATASETS, &CodeSets::default())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            PipelineError::Transport(TransportError::Status { status: 403, .. })
        ));
        assert_eq!(api.calls.lock().unwrap().len(), 2);
    }
}
