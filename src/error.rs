use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScrapeError {
    /// Connection failures, timeouts and non-2xx statuses. Fatal for the run.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("output file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to write CSV line: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
