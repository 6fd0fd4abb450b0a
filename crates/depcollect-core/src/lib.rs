// Everything around the collector: config, errors, output formats
pub mod config;
pub mod error;
pub mod export;

pub use config::{CollectConfig, Config, OutputConfig};
pub use error::Error;
pub use export::{ExportFormat, Exporter};

/// Result type alias because typing Result<T, Error> everywhere is tedious
pub type Result<T> = std::result::Result<T, Error>;
