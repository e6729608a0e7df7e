//! The awaitable calling convention.
//!
//! Shares the executor's transport and codec but nothing else: it does not
//! consult the connectivity check, it only accepts status 200, and it reports
//! failures as `DataError`.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::classify::expect_ok;
use crate::codec::JsonCodec;
use crate::error::DataError;
use crate::executor::RequestExecutor;
use crate::http::{parse_endpoint, HttpMethod, HttpRequest};
use crate::transport::Transport;

impl<X, J> RequestExecutor<X, J>
where
    X: Transport,
    J: JsonCodec,
{
    /// GET `endpoint` and decode a 200 body into `T`.
    #[instrument(skip(self))]
    pub async fn request<T>(&self, endpoint: &str) -> Result<T, DataError>
    where
        T: DeserializeOwned,
    {
        let url = parse_endpoint(endpoint).ok_or(DataError::InvalidUrl)?;
        let response = self
            .transport
            .send(HttpRequest::new(HttpMethod::Get, url))
            .await?;
        debug!(status = response.status, "response received");
        expect_ok(&self.codec, &response)
    }

    /// POST `body` as JSON to `endpoint` and decode a 200 body into `R`.
    #[instrument(skip(self, body))]
    pub async fn post_request<B, R>(&self, endpoint: &str, body: &B) -> Result<R, DataError>
    where
        B: Serialize + ?Sized + Sync,
        R: DeserializeOwned,
    {
        let url = parse_endpoint(endpoint).ok_or(DataError::InvalidUrl)?;
        let payload = self
            .codec
            .encode(body)
            .map_err(|e| DataError::Encoding(e.0))?;
        let request = HttpRequest::new(HttpMethod::Post, url).with_json_body(payload);

        let response = self.transport.send(request).await?;
        debug!(status = response.status, "response received");
        expect_ok(&self.codec, &response)
    }
}
