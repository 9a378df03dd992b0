//! Error taxonomy for preprocessing and queries.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Missing or invalid source files or profile. Aborts initialization.
    #[error("configuration error: {0}")]
    Config(String),

    /// Unexpected geometry during merge/split/flatten, or a corrupt cached
    /// artifact. Aborts initialization.
    #[error("format error: {0}")]
    Format(String),

    /// The query window produced no candidate, or the winning chord failed
    /// the window post-condition. The window half-width is too small for the
    /// dataset's edge density; aborts only the offending query.
    #[error("index assumption violated: {0}")]
    IndexAssumption(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),
}
