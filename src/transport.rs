use async_trait::async_trait;
use serde_json::Value;

use crate::{request::ResolvedRequest, result::Result};

/// Performs the network side of a [`ResolvedRequest`].
///
/// [`HttpTransport`](crate::http::HttpTransport) is the production
/// implementation. Tests substitute their own.
#[async_trait]
pub trait Transport {
    /// Returns `true` if credentials are available for authenticated endpoints.
    fn has_credentials(&self) -> bool;

    /// Sends the request and decodes the JSON reply.
    ///
    /// Implementations attach credentials when
    /// [`ResolvedRequest::requires_auth`] is set and must fail with
    /// [`Error::AuthenticationRequired`](crate::error::Error::AuthenticationRequired)
    /// when they have none.
    ///
    /// # Errors
    ///
    /// Network, status and decoding failures, plus the missing-credentials
    /// case above.
    async fn dispatch(&self, request: ResolvedRequest) -> Result<Value>;
}

