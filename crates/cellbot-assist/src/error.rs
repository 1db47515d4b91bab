use thiserror::Error;

/// Failures at the assistant boundary
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssistError {
    /// The upstream model API rejected or failed the call
    #[error("assistant API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// The transport payload did not contain a usable reply
    #[error("assistant response was malformed")]
    MalformedResponse,

    /// The assistant produced no text at all
    #[error("assistant returned an empty reply")]
    Empty,
}

impl AssistError {
    pub fn api<S: Into<String>>(status: u16, message: S) -> Self {
        AssistError::Api {
            status,
            message: message.into(),
        }
    }
}

pub type AssistResult<T> = std::result::Result<T, AssistError>;
