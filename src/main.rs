use std::error::Error;
use std::process::ExitCode;

use clap::Parser;
use log::{error, info};

use wiper_scraper_lib::config::{Cli, ScrapeConfig};
use wiper_scraper_lib::{logger, Crawler, FinderClient, OutputSink};

fn main() -> ExitCode {
    let config = match ScrapeConfig::try_from(Cli::parse()) {
        Ok(config) => config,
        Err(e) => {
            // logger is not up yet
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    logger::init(config.verbose);

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Aborting run: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(config: &ScrapeConfig) -> Result<(), Box<dyn Error>> {
    info!(
        "Scraping {} for years {}-{} into {}",
        config.endpoint,
        config.years.start(),
        config.years.end(),
        config.output.display()
    );

    let client = FinderClient::new(config.endpoint.clone(), config.timeout)?;
    let sink = OutputSink::new(&config.output, config.quoting);
    let crawler = Crawler::new(client);

    let summaries = crawler.run(config.years.clone(), &sink)?;
    let records: usize = summaries.iter().map(|s| s.records).sum();
    let degraded: usize = summaries.iter().map(|s| s.degraded_pages).sum();
    info!("Scraping completed. Wrote {} lines to {} ({} degraded pages).", records, sink.path().display(), degraded);
    Ok(())
}
