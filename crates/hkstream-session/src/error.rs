/// Errors from the session builder.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The provider id was never registered, or was already removed.
    #[error("unknown provider id {0}")]
    UnknownProvider(u32),
}

pub type Result<T> = std::result::Result<T, SessionError>;
