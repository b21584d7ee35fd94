use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RefDiffError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Parsing error: {0}")]
    Parsing(String),
    #[error("Relationship must have at least one side")]
    EmptyRelationship,
    #[error("No token index registered for {}", file.display())]
    MissingTokens { file: PathBuf },
    #[error("No contents provided for {}", file.display())]
    MissingContents { file: PathBuf },
    #[error("Token {start}..{end} is outside of {} ({len} bytes)", file.display())]
    TokenOutOfBounds {
        file: PathBuf,
        start: usize,
        end: usize,
        len: usize,
    },
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, RefDiffError>;
