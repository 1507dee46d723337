use serde_json::Value;

use crate::{
    config::Config, http::HttpTransport, request::ResolvedRequest, result::Result,
    transport::Transport,
};

/// Entry point for every endpoint method.
///
/// The client owns its [`Transport`]. Endpoint methods are implemented in
/// the per-resource modules under [`endpoints`](crate::endpoints); each one
/// resolves a request and hands it to [`Client::send`].
#[derive(Debug)]
pub struct Client<T = HttpTransport> {
    transport: T,
}

impl Client<HttpTransport> {
    /// Creates a client talking HTTP to the site described by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the transport cannot be constructed. See
    /// [`HttpTransport::new`].
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self::with_transport(HttpTransport::new(config)?))
    }
}

impl<T: Transport> Client<T> {
    /// Creates a client over an existing transport.
    pub fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    /// Returns the underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Returns `true` if the transport can serve authenticated endpoints.
    pub fn is_authenticated(&self) -> bool {
        self.transport.has_credentials()
    }

    /// Dispatches an already resolved request.
    ///
    /// # Errors
    ///
    /// Transport errors are returned unchanged.
    pub async fn send(&self, request: ResolvedRequest) -> Result<Value> {
        log::debug!("sending {} {}", request.verb(), request.path());
        self.transport.dispatch(request).await
    }
}
