// Engine Errors
// The engine is total over text; errors exist only at the byte boundary and for setup.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid input: expected UTF-8 text ({0})")]
    InvalidInput(#[from] std::str::Utf8Error),
    #[error("Pattern signature failed to compile: {signature}")]
    Pattern {
        signature: String,
        #[source]
        source: regex::Error,
    },
    #[error("Configuration rejected: {0}")]
    Config(String),
}

impl From<serde_json::Error> for EngineError {
    fn from(err: serde_json::Error) -> Self {
        EngineError::Config(format!("Failed to parse config: {}", err))
    }
}
