use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("I/O error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    #[error("Serialization error: {source}")]
    SerdeError {
        #[from]
        source: serde_json::Error,
    },

    // The key exists but does not hold a sequence of the expected records.
    #[error("Malformed collection under key '{key}': {source}")]
    MalformedCollection {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid storage key '{0}'")]
    InvalidKey(String),

    #[error("CSV export error: {source}")]
    CsvError {
        #[from]
        source: csv::Error,
    },
}
