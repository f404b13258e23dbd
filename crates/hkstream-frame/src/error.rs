/// Errors that can occur while building or parsing housekeeping frames.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// A block was appended to a frame that is not of kind `data`.
    #[error("cannot append block to a {0} frame")]
    NotADataFrame(&'static str),

    /// A record carried a recognized kind tag but failed to parse.
    #[error("malformed frame record: {0}")]
    Json(#[from] serde_json::Error),

    /// A record was structurally unusable (not a flat key-value object,
    /// or its kind tag was not a string).
    #[error("malformed frame record: {0}")]
    Malformed(String),
}

pub type Result<T> = std::result::Result<T, FrameError>;
