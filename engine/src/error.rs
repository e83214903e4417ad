use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("CSV parsing system error: {source}")]
    CsvSystemError {
        #[from]
        source: csv::Error,
    },

    #[error("I/O error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    #[error("Table not found: {0}")]
    TableNotFound(String),

    #[error("Unknown column '{column}' on table {table}")]
    UnknownColumn { table: String, column: String },

    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Invalid row payload: {source}")]
    InvalidRowPayload {
        #[from]
        source: serde_json::Error,
    },

    #[error(transparent)]
    AnyhowError(#[from] anyhow::Error),
}

impl From<EngineError> for tonic::Status {
    fn from(err: EngineError) -> Self {
        tracing::error!("Mapping EngineError to tonic::Status: {:?}", err);
        match err {
            EngineError::ConfigError(msg) => tonic::Status::failed_precondition(format!("Configuration error: {}", msg)),
            EngineError::CsvSystemError { source } => tonic::Status::invalid_argument(format!("CSV parsing system error: {}", source)),
            EngineError::IoError { source } => tonic::Status::internal(format!("I/O error: {}", source)),
            EngineError::TableNotFound(table) => tonic::Status::not_found(format!("Table not found: {}", table)),
            EngineError::UnknownColumn { table, column } => {
                tonic::Status::invalid_argument(format!("Unknown column '{}' on table {}", column, table))
            }
            EngineError::InvalidFilter(msg) => tonic::Status::invalid_argument(format!("Invalid filter: {}", msg)),
            EngineError::InvalidRequest(msg) => tonic::Status::invalid_argument(msg),
            EngineError::InvalidRowPayload { source } => tonic::Status::invalid_argument(format!("Invalid row payload: {}", source)),
            EngineError::AnyhowError(source) => tonic::Status::internal(format!("An internal error occurred: {}", source)),
        }
    }
}
