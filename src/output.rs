use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use csv::{QuoteStyle, Terminator, WriterBuilder};
use log::debug;

use crate::error::Result;
use crate::model::BladeSizeRecord;

/// How fields are escaped in the output lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldQuoting {
    /// Fields are written verbatim. A comma inside a make or model shifts
    /// the columns of that line.
    #[default]
    Raw,
    /// RFC 4180 quoting for fields holding commas, quotes or newlines.
    Escaped,
}

impl FieldQuoting {
    fn quote_style(self) -> QuoteStyle {
        match self {
            FieldQuoting::Raw => QuoteStyle::Never,
            FieldQuoting::Escaped => QuoteStyle::Necessary,
        }
    }
}

/// Append-only CSV output without a header row. The file is opened for
/// every line and closed right after it.
pub struct OutputSink {
    path: PathBuf,
    quoting: FieldQuoting,
}

impl OutputSink {
    pub fn new<P: AsRef<Path>>(path: P, quoting: FieldQuoting) -> Self {
        OutputSink {
            path: path.as_ref().to_path_buf(),
            quoting,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append_record(&self, record: &BladeSizeRecord) -> Result<()> {
        let file = OpenOptions::new().create(true).append(true).open(&self.path)?;

        let mut csv_writer = WriterBuilder::new()
            .has_headers(false)
            .quote_style(self.quoting.quote_style())
            .terminator(Terminator::Any(b'\n'))
            .from_writer(file);

        csv_writer.write_record(record.fields())?;
        csv_writer.flush()?;
        Ok(())
    }

    /// Writes a finished year, one line per record, in the given order.
    pub fn append_year(&self, records: &[BladeSizeRecord]) -> Result<()> {
        for record in records {
            self.append_record(record)?;
        }
        debug!("Appended {} lines to {}", records.len(), self.path.display());
        Ok(())
    }
}
