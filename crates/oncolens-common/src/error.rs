use thiserror::Error;

use crate::prediction::ErrorBody;

#[derive(Debug, Error)]
pub enum OncolensError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV import error: {0}")]
    Csv(#[from] CsvImportError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, OncolensError>;

/// Why a single prediction attempt produced no label.
///
/// Every variant is terminal for the attempt only; the user re-triggers
/// submission to try again.
#[derive(Debug, Error)]
pub enum PredictionError {
    /// No feature vector could be derived from the form.
    #[error("Please enter data manually or upload a CSV first.")]
    MissingFeatures,

    /// The service answered with a status other than 200.
    #[error("Prediction service returned HTTP {status}")]
    Rejected { status: u16, body: ErrorBody },

    /// Timeout, DNS failure, refused connection, broken body stream.
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// A 200 response that does not carry a usable `prediction`.
    #[error("Request failed: {0}")]
    MalformedResponse(String),
}

#[derive(Debug, Error)]
pub enum CsvImportError {
    #[error("could not read CSV: {0}")]
    Parse(#[from] csv::Error),

    #[error("CSV file has no header row")]
    MissingHeader,

    #[error("CSV file contains no data rows")]
    NoRows,
}
