/// Shared error type used across all Threadline crates.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("IO: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("transcript: {0}")]
    Transcript(String),

    #[error("skill not found: {0}")]
    SkillNotFound(String),

    #[error("config: {0}")]
    Config(String),

    #[error("chunking: {0}")]
    Chunk(String),

    #[error("sandbox: {0}")]
    Sandbox(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, Error>;
