//! Error types for the eAIP plugin.

use thiserror::Error;

/// Result type alias for eAIP plugin operations.
pub type Result<T> = std::result::Result<T, EaipError>;

/// Errors that can occur in eAIP plugin operations.
#[derive(Error, Debug)]
pub enum EaipError {
    /// File or directory error.
    #[error("File error: {0}")]
    File(#[from] std::io::Error),

    /// PDF parsing or merging error.
    #[error("Failed to process PDF: {0}")]
    Pdf(String),

    /// Chart rasterization error.
    #[error("PDF to image conversion failed: {0}")]
    Render(String),

    /// Malformed index or manifest data.
    #[error("Invalid chart data: {0}")]
    Json(#[from] serde_json::Error),

    /// AIRAC period is not a 4-digit cycle id.
    #[error("Invalid period format: {0}")]
    InvalidPeriod(String),

    /// No data directory for the requested cycle.
    #[error("Data directory for period {0} does not exist")]
    CycleNotFound(u32),

    /// Airport directory is absent.
    #[error("No charts found for airport {0}")]
    AirportNotFound(String),

    /// Airport directory exists but has no index.
    #[error("Index file not found for airport {0}")]
    IndexNotFound(String),

    /// No chart matched the query.
    #[error("No chart matching {query} for airport {icao}")]
    ChartNotFound { icao: String, query: String },

    /// A chart is indexed but its file is gone.
    #[error("Chart file does not exist: {0}")]
    MissingFile(String),

    /// Selection reply was not a valid entry number.
    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    /// Command text could not be parsed.
    #[error("Invalid command: {0}")]
    Command(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<lopdf::Error> for EaipError {
    fn from(err: lopdf::Error) -> Self {
        EaipError::Pdf(err.to_string())
    }
}

impl From<pdfium_render::prelude::PdfiumError> for EaipError {
    fn from(err: pdfium_render::prelude::PdfiumError) -> Self {
        EaipError::Render(format!("{err:?}"))
    }
}

impl From<image::ImageError> for EaipError {
    fn from(err: image::ImageError) -> Self {
        EaipError::Render(err.to_string())
    }
}
