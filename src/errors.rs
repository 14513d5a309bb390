// Error types shared by the daemon client, the Central client and the state layer

use thiserror::Error;

pub type Result<T, E = ZeroTierError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum ZeroTierError {
    /// A required identifier or key was not supplied. Raised before any
    /// external call is made.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The daemon or the Central API reported a failure.
    #[error("{}", remote_message(.status, .message))]
    Remote {
        /// HTTP status code, or `None` for daemon (CLI) failures.
        status: Option<u16>,
        message: String,
    },

    /// Output from the daemon or Central could not be decoded.
    #[error("failed to decode {what}: {source}")]
    Decode {
        what: String,
        #[source]
        source: serde_json::Error,
    },

    /// The daemon CLI could not be executed at all.
    #[error("cannot execute {program}: {source}")]
    CommandUnavailable {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The HTTP request could not be completed.
    #[error("request to Central failed: {0}")]
    Transport(#[from] reqwest::Error),
}

fn remote_message(status: &Option<u16>, message: &str) -> String {
    match status {
        Some(code) => format!("remote error ({}): {}", code, message),
        None => format!("remote error: {}", message),
    }
}

impl ZeroTierError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn remote(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Remote {
            status,
            message: message.into(),
        }
    }

    pub fn decode(what: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Decode {
            what: what.into(),
            source,
        }
    }

    /// True for errors caused by the caller rather than by a collaborator.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }
}

/// Decode a JSON document, tagging failures with what was being decoded.
pub(crate) fn decode_json<T: serde::de::DeserializeOwned>(what: &str, text: &str) -> Result<T> {
    serde_json::from_str(text).map_err(|e| ZeroTierError::decode(what, e))
}
