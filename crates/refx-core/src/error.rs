use thiserror::Error;

/// Identifier validation errors exposed by `refx-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("cusip cannot be empty")]
    EmptyCusip,
    #[error("cusip '{value}' is longer than 9 characters")]
    CusipTooLong { value: String },
}

/// Errors raised while decoding a feed file.
///
/// Structural errors in the NSCC flat file reject the whole file: the
/// positional layout leaves no safe way to resynchronize after a corrupt
/// record, and a mis-parented component must never be attached by guess.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("line {line}: component record precedes any basket header")]
    OrphanComponent { line: u64 },

    #[error("line {line}: record type {record_type} is {len} bytes, expected at least {min}")]
    TruncatedRecord {
        line: u64,
        record_type: &'static str,
        len: usize,
        min: usize,
    },

    #[error("line {line}: {source}")]
    InvalidCusip { line: u64, source: ValidationError },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

/// Non-fatal anomalies observed during a parse, reported alongside the data.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FeedWarning {
    #[error("trailer declared {declared} records, consumed {actual}")]
    RecordCountMismatch { declared: u64, actual: u64 },
}

/// A basket whose creation unit count is zero has no defined NAV or leg
/// ratios; renders that need them fail with the basket named.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("basket '{basket}' has zero creation units, ratio is undefined")]
pub struct UndefinedRatioError {
    pub basket: String,
}

/// Errors raised while writing a downstream document.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    UndefinedRatio(#[from] UndefinedRatioError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("xml write error: {0}")]
    Xml(#[from] quick_xml::Error),
}
