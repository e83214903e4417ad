use table_engine::error::EngineError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GridError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Remote call failed ({}): {}", .0.code(), .0.message())]
    Remote(#[from] tonic::Status),

    #[error("Could not reach the table engine: {0}")]
    Transport(#[from] tonic::transport::Error),

    #[error("Invalid row payload: {0}")]
    Payload(String),

    #[error("CSV export failed: {0}")]
    Csv(String),

    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("No download directory available")]
    NoDownloadDir,
}

// Conversion failures on the client side are payload problems, not engine faults
impl From<EngineError> for GridError {
    fn from(err: EngineError) -> Self {
        GridError::Payload(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_error_message_keeps_status_text() {
        let err = GridError::from(tonic::Status::permission_denied("must be owner of table users"));
        let text = err.to_string();
        assert!(text.contains("must be owner of table users"));
        assert!(text.starts_with("Remote call failed"));
    }
}
