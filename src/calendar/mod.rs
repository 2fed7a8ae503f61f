//! Campaign calendar domain: events, categories and the CSV importer.

mod calendar_dates;
mod calendar_import;
mod calendar_types;
mod calendar_validation;

pub use calendar_dates::*;
pub use calendar_import::*;
pub use calendar_types::*;
pub use calendar_validation::*;

/// Custom error type for calendar imports
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("Import file has no header row")]
    MissingHeader,
    #[error("Malformed CSV at line {line}: {source}")]
    Csv {
        line: u64,
        #[source]
        source: csv::Error,
    },
    #[error("Could not read import file: {0}")]
    Io(#[from] std::io::Error),
}

impl ImportError {
    fn from_csv(error: csv::Error, fallback_line: u64) -> Self {
        let line = error.position().map(|p| p.line()).unwrap_or(fallback_line);
        ImportError::Csv { line, source: error }
    }
}
