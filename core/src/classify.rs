//! Status-code classification for both calling conventions.
//!
//! # Design
//! Pure functions over `HttpResponse`, so every status-code rule can be
//! checked without a network. The callback convention accepts any 2xx and
//! names a few specific failures. The awaitable convention accepts exactly
//! 200 and nothing else.

use serde::de::DeserializeOwned;

use crate::codec::JsonCodec;
use crate::error::{DataError, NetworkError};
use crate::http::HttpResponse;

/// Status used when the transport produced no response at all.
pub const NO_RESPONSE_STATUS: u16 = 404;

/// Classify a response for the callback convention.
pub fn classify<T, J>(codec: &J, response: &HttpResponse) -> Result<T, NetworkError>
where
    T: DeserializeOwned,
    J: JsonCodec,
{
    match response.status {
        200..=299 => codec
            .decode(&response.body)
            .map_err(|e| NetworkError::Decode {
                message: e.0,
                status: response.status,
            }),
        403 => Err(NetworkError::Forbidden),
        405 => Err(NetworkError::WrongUrl),
        status => Err(NetworkError::Server { status }),
    }
}

/// Classify a response for the awaitable convention.
pub fn expect_ok<T, J>(codec: &J, response: &HttpResponse) -> Result<T, DataError>
where
    T: DeserializeOwned,
    J: JsonCodec,
{
    if response.status != 200 {
        return Err(DataError::InvalidResponse {
            status: response.status,
        });
    }
    codec
        .decode(&response.body)
        .map_err(|e| DataError::InvalidData(e.0))
}
