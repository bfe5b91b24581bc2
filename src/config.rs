//! Run configuration, validated before anything touches the network.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{PipelineError, Result};
use crate::filter::CodeSets;
use crate::infra::socrata::DEFAULT_PAGE_SIZE;
use crate::registry::SPARCS_DOMAIN;

/// Where the access token travels on each request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum TokenPlacement {
    /// `X-App-Token` request header
    #[default]
    Header,
    /// `$$app_token` query parameter
    Query,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub token: String,
    pub output_dir: PathBuf,
    pub codes: CodeSets,
    pub token_placement: TokenPlacement,
    pub domain: String,
    pub page_size: usize,
    pub max_rows: Option<usize>,
}

impl Config {
    /// A config with the required values and defaults for everything else.
    pub fn new(token: impl Into<String>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            token: token.into(),
            output_dir: output_dir.into(),
            codes: CodeSets::default(),
            token_placement: TokenPlacement::default(),
            domain: SPARCS_DOMAIN.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            max_rows: None,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.token.trim().is_empty() {
            return Err(PipelineError::Configuration(
                "access token must be a non-empty string".to_string(),
            ));
        }
        if self.output_dir.as_os_str().is_empty() {
            return Err(PipelineError::Configuration(
                "output directory must be set".to_string(),
            ));
        }
        if self.domain.trim().is_empty() {
            return Err(PipelineError::Configuration("domain must be set".to_string()));
        }
        if self.page_size == 0 {
            return Err(PipelineError::Configuration(
                "page size must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Creates the output directory if needed and returns its absolute path.
    pub fn prepare_output_dir(&self) -> Result<PathBuf> {
        create_output_dir(&self.output_dir)
    }
}

fn create_output_dir(dir: &Path) -> Result<PathBuf> {
    if !dir.exists() {
        info!(dir = %dir.display(), "Making directory");
    }
    std::fs::create_dir_all(dir).map_err(|e| {
        PipelineError::Configuration(format!(
            "cannot create output directory {}: {e}",
            dir.display()
        ))
    })?;
    dir.canonicalize().map_err(|e| {
        PipelineError::Configuration(format!(
            "cannot resolve output directory {}: {e}",
            dir.display()
        ))
    })
}
