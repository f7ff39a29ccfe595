use std::ops::RangeInclusive;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use url::Url;

use crate::crawler::{FIRST_YEAR, LAST_YEAR};
use crate::error::{Result, ScrapeError};
use crate::finder::DEFAULT_ENDPOINT;
use crate::output::FieldQuoting;

/// Crawl the findmywipers.com blade size finder for every year, make and model
/// and append the blade sizes to a CSV file.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct Cli {
    /// File the CSV lines are appended to.
    #[clap(short, long, default_value = "data.csv")]
    pub output: PathBuf,
    /// First model year to crawl.
    #[clap(long, default_value_t = FIRST_YEAR)]
    pub start_year: u16,
    /// Last model year to crawl (inclusive).
    #[clap(long, default_value_t = LAST_YEAR)]
    pub end_year: u16,
    /// Blade size finder form endpoint.
    #[clap(long, default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,
    /// Request timeout in seconds
    #[clap(long)]
    pub timeout: Option<u64>,
    /// Quote fields containing commas or quotes instead of writing them raw.
    #[clap(long)]
    pub quote_fields: bool,
    /// Log every request.
    #[clap(short, long)]
    pub verbose: bool,
}

/// Validated settings for one run.
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    pub output: PathBuf,
    pub years: RangeInclusive<u16>,
    pub endpoint: Url,
    pub timeout: Option<Duration>,
    pub quoting: FieldQuoting,
    pub verbose: bool,
}

impl TryFrom<Cli> for ScrapeConfig {
    type Error = ScrapeError;

    fn try_from(cli: Cli) -> Result<Self> {
        if cli.start_year > cli.end_year {
            return Err(ScrapeError::Config(format!(
                "start year {} is after end year {}",
                cli.start_year, cli.end_year
            )));
        }

        let endpoint = Url::parse(&cli.endpoint)
            .map_err(|e| ScrapeError::Config(format!("endpoint '{}': {}", cli.endpoint, e)))?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(ScrapeError::Config(format!("endpoint '{}' is not http(s)", cli.endpoint)));
        }

        if cli.timeout == Some(0) {
            return Err(ScrapeError::Config("timeout must be at least one second".to_string()));
        }

        Ok(ScrapeConfig {
            output: cli.output,
            years: cli.start_year..=cli.end_year,
            endpoint,
            timeout: cli.timeout.map(Duration::from_secs),
            quoting: if cli.quote_fields { FieldQuoting::Escaped } else { FieldQuoting::Raw },
            verbose: cli.verbose,
        })
    }
}
