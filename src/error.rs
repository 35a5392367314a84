//! Error types shared across the crate.
//!
//! The rendering core reports [`ChartError`]; the acquisition side reports
//! [`DataError`] (bad input) and [`FetchError`] (remote backend). The CLI wraps
//! all of them in `anyhow` with context.

use thiserror::Error;

/// Failure of the rendering core. Raised synchronously, never logged-only.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChartError {
    /// Extremes or bar layout were asked to work on zero entries.
    #[error("dataset is empty: nothing to chart")]
    EmptyDataset,
    /// Every value is exactly zero, so no value scale exists.
    #[error("all values are zero: the value range is degenerate")]
    DegenerateRange,
    /// Surface size or bar spacing leaves no room for bars.
    #[error("invalid chart layout: {0}")]
    InvalidLayout(String),
    #[error(transparent)]
    Surface(#[from] SurfaceError),
}

/// Failure reported by a drawing surface implementation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SurfaceError {
    #[error("drawing backend error: {0}")]
    Backend(String),
    #[error("font error: {0}")]
    Font(String),
}

/// Invalid input at the acquisition boundary.
///
/// The renderer only ever sees validated, finite values; everything that cannot
/// be turned into one ends up here.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("entry {row}: cannot parse {field} from {value:?}")]
    UnparsableValue {
        row: usize,
        field: String,
        value: String,
    },
    #[error("duplicate label {0:?}")]
    DuplicateLabel(String),
    #[error("column {0:?} not found in header")]
    MissingColumn(String),
    #[error("input has no header row")]
    MissingHeader,
    #[error("csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("reading input: {0}")]
    Io(#[from] std::io::Error),
}

impl DataError {
    pub(crate) fn unparsable(row: usize, field: &str, value: impl Into<String>) -> Self {
        DataError::UnparsableValue {
            row,
            field: field.to_string(),
            value: value.into(),
        }
    }
}

/// Failure while fetching expense records from the backend API.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("GET {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("GET {url}: request failed with HTTP {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
    #[error("GET {url}: cannot decode response: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("building http client: {0}")]
    Client(#[source] reqwest::Error),
    #[error(transparent)]
    Data(#[from] DataError),
}
