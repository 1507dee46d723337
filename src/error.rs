use reqwest::StatusCode;
use thiserror::Error;

/// Errors produced while building or dispatching a request.
///
/// Builder and caller-side failures never touch the network. Everything
/// under [`Error::is_transport`] comes from the transport and is passed
/// through unchanged.
#[derive(Debug, Error)]
pub enum Error {
    /// The verb is not one of `GET`, `POST`, `PUT` or `DELETE`.
    #[error("unsupported verb `{0}`")]
    InvalidVerb(String),

    /// The path template has an identifier slot but no identifier was given.
    #[error("path `{0}` requires an identifier")]
    MissingIdentifier(String),

    /// The path template was empty.
    #[error("path template is empty")]
    EmptyPath,

    /// A grouping discriminator outside the modes the endpoint accepts.
    #[error("unknown grouping mode `{0}`")]
    InvalidGroupingMode(String),

    /// An upload was requested with neither a file nor a source URL.
    #[error("an upload needs either a file or a source url")]
    MissingUploadSource,

    /// The endpoint requires login but no credentials are configured.
    #[error("endpoint requires authentication but no credentials are configured")]
    AuthenticationRequired,

    /// The configured site URL could not be parsed or joined.
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    /// Network failure reported by `reqwest`.
    #[error("{0}")]
    Reqwest(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("unexpected status {status}: {message}")]
    UnexpectedStatus {
        /// Status code returned by the server.
        status: StatusCode,
        /// Server supplied reason, or the raw body.
        message: String,
    },

    /// The response body was not valid JSON.
    #[error("{0}")]
    Json(#[from] serde_json::Error),

    /// Reading a file payload failed.
    #[error("{0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Returns `true` if the error was raised by the transport rather than
    /// while assembling the request.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Error::Reqwest(_) | Error::UnexpectedStatus { .. } | Error::Json(_) | Error::Io(_)
        )
    }
}
