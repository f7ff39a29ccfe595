pub mod config;
pub mod crawler;
pub mod error;
pub mod extractor;
pub mod finder;
pub mod logger;
pub mod model;
pub mod output;

// Exporting types for convenience
pub use crawler::{Crawler, YearSummary};
pub use error::ScrapeError;
pub use extractor::{Extraction, Extractor};
pub use finder::{FinderClient, PageSource};
pub use model::{BladeSizeRecord, BladeSizes, Query};
pub use output::{FieldQuoting, OutputSink};
