use thiserror::Error;

/// Errors reported by the subsequence engines and the input adapter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A precondition on the arguments does not hold, e.g. a mask whose
    /// length differs from its sequence.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The text handed to the input adapter is not a list of integers.
    #[error("malformed list literal {input:?}: {reason}")]
    MalformedList { input: String, reason: String },
}

impl Error {
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        Error::InvalidArgument(msg.into())
    }

    pub fn malformed_list<S: Into<String>, R: Into<String>>(input: S, reason: R) -> Self {
        Error::MalformedList {
            input: input.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
