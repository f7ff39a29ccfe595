use std::ops::RangeInclusive;
use std::time::{Duration, Instant};

use log::{debug, info};

use crate::error::Result;
use crate::extractor::Extractor;
use crate::finder::PageSource;
use crate::model::{BladeSizeRecord, Query};
use crate::output::OutputSink;

pub const FIRST_YEAR: u16 = 1953;
pub const LAST_YEAR: u16 = 2024;

/// Counters for one finished year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct YearSummary {
    pub year: u16,
    pub makes: usize,
    pub records: usize,
    pub degraded_pages: usize,
}

/// Walks year -> make -> model against a `PageSource`.
pub struct Crawler<S: PageSource> {
    source: S,
    extractor: Extractor,
}

impl<S: PageSource> Crawler<S> {
    pub fn new(source: S) -> Self {
        Crawler {
            source,
            extractor: Extractor::new(),
        }
    }

    /// Scrapes every vehicle of `year`. Nothing is written here; a network
    /// error drops whatever was collected for the year.
    pub fn crawl_year(&self, year: u16) -> Result<(Vec<BladeSizeRecord>, YearSummary)> {
        let mut summary = YearSummary { year, ..Default::default() };
        let mut records = Vec::new();

        let query = Query::makes(year);
        let makes = self.extractor.extract_makes(&self.source.fetch(&query)?);
        if makes.is_malformed() {
            summary.degraded_pages += 1;
        }
        let makes = makes.into_value(&format!("makes of {}", year));
        summary.makes = makes.len();
        debug!("{}: {} makes", year, makes.len());

        for make in &makes {
            let query = Query::models(year, make);
            let models = self.extractor.extract_models(&self.source.fetch(&query)?);
            if models.is_malformed() {
                summary.degraded_pages += 1;
            }
            let models = models.into_value(&format!("models of {} {}", year, make));

            for model in &models {
                let query = Query::vehicle(year, make, model);
                let sizes = self.extractor.extract_blade_sizes(&self.source.fetch(&query)?);
                if sizes.is_malformed() {
                    summary.degraded_pages += 1;
                }
                records.push(BladeSizeRecord {
                    year,
                    make: make.clone(),
                    model: model.clone(),
                    blade_sizes: sizes.into_value(&format!("{} {} {}", year, make, model)),
                });
            }
        }

        summary.records = records.len();
        Ok((records, summary))
    }

    /// Crawls `years` in order, appending each completed year to `sink`
    /// before moving on.
    pub fn run(&self, years: RangeInclusive<u16>, sink: &OutputSink) -> Result<Vec<YearSummary>> {
        let start = Instant::now();
        let mut summaries = Vec::new();

        for year in years {
            let (records, summary) = self.crawl_year(year)?;
            sink.append_year(&records)?;

            info!("Finished year {} in\t{}", year, format_elapsed(start.elapsed()));
            debug!(
                "{}: {} makes, {} records, {} degraded pages",
                year, summary.makes, summary.records, summary.degraded_pages
            );
            summaries.push(summary);
        }

        Ok(summaries)
    }
}

pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!("{} minutes and {} seconds", secs / 60, secs % 60)
}
