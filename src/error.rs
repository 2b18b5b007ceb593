use thiserror::Error;

/// Fatal failures while building the cleaned listing table.
///
/// Per-record data problems are not errors; those rows are excluded and
/// counted in the [`LoadReport`](crate::loader::LoadReport).
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("I/O error reading listings: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error reading listings: {0}")]
    Csv(#[from] csv::Error),

    #[error("Listing source is missing required column '{0}'")]
    MissingColumn(String),

    #[error("Listing source contains no records")]
    Empty,

    #[error("None of the {rows_read} listing records survived cleaning")]
    NoUsableRecords { rows_read: usize },
}

pub type Result<T> = std::result::Result<T, LoadError>;
