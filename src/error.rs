use thiserror::Error;

/// Startup-time failures. Per-request dispatch failures are not errors;
/// they are counted in the batch report and the run continues.
#[derive(Debug, Error)]
pub enum SpamError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[from] reqwest::Error),
}
