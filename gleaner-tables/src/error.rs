use gleaner_http::HttpError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TableError {
    #[error("could not download {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: HttpError,
    },
    #[error("no tables matching /{pattern}/ found at {url}")]
    NoTables { url: String, pattern: String },
    #[error("invalid table match pattern: {0}")]
    Pattern(#[from] regex::Error),
    #[error("column '{0}' not found")]
    MissingColumn(String),
    #[error("column index {index} out of range (table has {width} columns)")]
    ColumnOutOfRange { index: usize, width: usize },
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write {}: {source} (is the file open elsewhere?)", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("failed to write {}: {source}", .path.display())]
    Xlsx {
        path: PathBuf,
        #[source]
        source: rust_xlsxwriter::XlsxError,
    },
}
