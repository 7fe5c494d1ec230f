use thiserror::Error;

/// Crate-level error type, aggregating errors from every module.
#[derive(Error, Debug)]
pub enum TimegridError {
    #[error("{0}")]
    DecodeError(#[from] crate::spreadsheet::DecodeError),

    #[error("{0}")]
    IngestError(#[from] crate::ingest::IngestError),

    #[error("{0}")]
    XlsxWriteError(#[from] rust_xlsxwriter::XlsxError),
}
