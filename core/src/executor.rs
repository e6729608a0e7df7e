//! The request executor and its callback calling convention.
//!
//! # Design
//! `RequestExecutor` is an explicit value handed to whoever needs it; there
//! is no process-wide instance. It owns three collaborators: a `Transport`
//! for the round-trip, a `Connectivity` check, and a `JsonCodec`. Each call
//! builds its own request and classifies its own response, so concurrent
//! calls share nothing mutable.
//!
//! The callback convention reports a missing network as a warning and then
//! sends the request anyway. Callers of `execute_with_callback` therefore see
//! the warning first and the terminal outcome second; callers of `execute`
//! only see the terminal outcome and the warning goes to the log.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use tokio::task::JoinHandle;
use tracing::{debug, instrument, warn, Span};

use crate::classify::{classify, NO_RESPONSE_STATUS};
use crate::codec::{JsonCodec, SerdeJson};
use crate::connectivity::{Connectivity, Static};
use crate::error::{NetworkError, TransportError};
use crate::http::{parse_endpoint, HttpMethod, HttpRequest, HttpResponse};
use crate::transport::{HttpTransport, Transport};

/// Result of one callback-convention call.
pub type Outcome<T> = Result<T, NetworkError>;

const DEFAULT_USER_AGENT: &str = concat!("pixsearch/", env!("CARGO_PKG_VERSION"));

/// Settings applied to the default `reqwest` transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutorConfig {
    /// `None` leaves the transport's own default in place.
    pub timeout: Option<Duration>,
    pub user_agent: String,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            timeout: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Builder for a `RequestExecutor` over the default transport and codec.
pub struct ExecutorBuilder {
    config: ExecutorConfig,
    connectivity: Arc<dyn Connectivity>,
}

impl ExecutorBuilder {
    fn new() -> Self {
        Self {
            config: ExecutorConfig::default(),
            connectivity: Arc::new(Static(true)),
        }
    }

    pub fn config(mut self, config: ExecutorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = Some(timeout);
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    pub fn connectivity(mut self, connectivity: impl Connectivity + 'static) -> Self {
        self.connectivity = Arc::new(connectivity);
        self
    }

    pub fn build(self) -> Result<RequestExecutor, TransportError> {
        let transport = HttpTransport::new(self.config.timeout, &self.config.user_agent)?;
        Ok(RequestExecutor {
            transport,
            connectivity: self.connectivity,
            codec: SerdeJson,
        })
    }
}

/// Performs typed HTTP calls and classifies their outcome.
pub struct RequestExecutor<X = HttpTransport, J = SerdeJson> {
    pub(crate) transport: X,
    pub(crate) connectivity: Arc<dyn Connectivity>,
    pub(crate) codec: J,
}

impl RequestExecutor {
    /// An executor with default settings that assumes the network is up.
    pub fn new() -> Result<Self, TransportError> {
        Self::builder().build()
    }

    pub fn builder() -> ExecutorBuilder {
        ExecutorBuilder::new()
    }
}

impl<X, J> RequestExecutor<X, J>
where
    X: Transport,
    J: JsonCodec,
{
    /// Assemble an executor from arbitrary collaborators.
    pub fn with_parts(transport: X, connectivity: impl Connectivity + 'static, codec: J) -> Self {
        Self {
            transport,
            connectivity: Arc::new(connectivity),
            codec,
        }
    }

    pub fn transport(&self) -> &X {
        &self.transport
    }

    pub fn codec(&self) -> &J {
        &self.codec
    }

    /// Call `endpoint` with `method` and decode a 2xx body into `T`.
    pub async fn execute<T>(&self, endpoint: &str, method: HttpMethod) -> Outcome<T>
    where
        T: DeserializeOwned,
    {
        self.run(endpoint, method, |warning| {
            warn!(warning = %warning, "no internet connectivity, sending request anyway");
        })
        .await
    }

    /// Spawn the call onto the tokio runtime and report through `callback`.
    ///
    /// `callback` receives at most one non-terminal `NoConnectivity` error
    /// followed by exactly one terminal outcome.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime, since the call is spawned
    /// with `tokio::spawn`.
    pub fn execute_with_callback<T, F>(
        &self,
        endpoint: &str,
        method: HttpMethod,
        mut callback: F,
    ) -> JoinHandle<()>
    where
        X: Clone + 'static,
        J: Clone + 'static,
        T: DeserializeOwned + Send + 'static,
        F: FnMut(Outcome<T>) + Send + 'static,
    {
        let executor = self.clone();
        let endpoint = endpoint.to_string();
        tokio::spawn(async move {
            let outcome = executor
                .run(&endpoint, method, |warning| callback(Err(warning)))
                .await;
            callback(outcome);
        })
    }

    #[instrument(
        name = "execute",
        skip(self, on_warning),
        fields(
            http.method = %method,
            http.url = tracing::field::Empty,
            http.status_code = tracing::field::Empty,
        )
    )]
    async fn run<T, W>(&self, endpoint: &str, method: HttpMethod, mut on_warning: W) -> Outcome<T>
    where
        T: DeserializeOwned,
        W: FnMut(NetworkError),
    {
        let Some(url) = parse_endpoint(endpoint) else {
            warn!("rejecting malformed endpoint");
            return Err(NetworkError::MalformedUrl);
        };
        Span::current().record("http.url", url.as_str());

        if !self.connectivity.is_connected() {
            on_warning(NetworkError::NoConnectivity);
        }

        let response = match self.transport.send(HttpRequest::new(method, url)).await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "no response received");
                HttpResponse::new(NO_RESPONSE_STATUS, Vec::new())
            }
        };
        Span::current().record("http.status_code", response.status);
        debug!(body_len = response.body.len(), "response received");

        let outcome = classify(&self.codec, &response);
        if let Err(err) = &outcome {
            warn!(error = %err, status = ?err.status_code(), "request failed");
        }
        outcome
    }
}

impl<X: Clone, J: Clone> Clone for RequestExecutor<X, J> {
    fn clone(&self) -> Self {
        Self {
            transport: self.transport.clone(),
            connectivity: Arc::clone(&self.connectivity),
            codec: self.codec.clone(),
        }
    }
}

impl<X: fmt::Debug, J: fmt::Debug> fmt::Debug for RequestExecutor<X, J> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestExecutor")
            .field("transport", &self.transport)
            .field("codec", &self.codec)
            .finish_non_exhaustive()
    }
}
