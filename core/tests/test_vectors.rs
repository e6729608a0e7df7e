//! Verify status classification against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector describes a simulated response and the outcome each calling
//! convention must report for it. Responses are served by an in-memory
//! transport, so these run without a socket.

use std::sync::{Arc, Mutex};

use pixsearch_core::connectivity::Static;
use pixsearch_core::{
    DataError, HttpMethod, HttpRequest, HttpResponse, NetworkError, RequestExecutor, SerdeJson,
    Transport, TransportError,
};
use serde::Deserialize;

#[derive(Debug, PartialEq, Deserialize)]
struct Shape {
    id: u64,
    tags: String,
}

/// Replies with one canned response and remembers the last request.
#[derive(Clone)]
struct Canned {
    response: HttpResponse,
    last: Arc<Mutex<Option<HttpRequest>>>,
}

impl Canned {
    fn new(status: u16, body: &str) -> Self {
        Self {
            response: HttpResponse::new(status, body),
            last: Arc::default(),
        }
    }
}

impl Transport for Canned {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        *self.last.lock().unwrap() = Some(request);
        Ok(self.response.clone())
    }
}

fn executor(case: &serde_json::Value) -> RequestExecutor<Canned> {
    let status = case["status"].as_u64().unwrap() as u16;
    let body = case["body"].as_str().unwrap();
    RequestExecutor::with_parts(Canned::new(status, body), Static(true), SerdeJson)
}

// ---------------------------------------------------------------------------
// Callback convention
// ---------------------------------------------------------------------------

#[tokio::test]
async fn execute_test_vectors() {
    let raw = include_str!("../../test-vectors/execute.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let executor = executor(case);
        let outcome = executor
            .execute::<Shape>("http://localhost:3000/vector", HttpMethod::Get)
            .await;

        let sent = executor.transport().last.lock().unwrap().take();
        assert!(sent.is_some(), "{name}: request was not sent");

        let expected_status = case["expected_status"].as_u64().map(|s| s as u16);
        match case["expected"].as_str().unwrap() {
            "ok" => {
                let expected: Shape = serde_json::from_value(case["expected_result"].clone()).unwrap();
                assert_eq!(outcome.unwrap(), expected, "{name}: decoded value");
            }
            "decode" => {
                let err = outcome.unwrap_err();
                assert!(matches!(err, NetworkError::Decode { .. }), "{name}: {err:?}");
                assert_eq!(err.status_code(), expected_status, "{name}: status");
            }
            "forbidden" => {
                let err = outcome.unwrap_err();
                assert_eq!(err, NetworkError::Forbidden, "{name}");
                assert_eq!(err.status_code(), expected_status, "{name}: status");
            }
            "wrong_url" => {
                let err = outcome.unwrap_err();
                assert_eq!(err, NetworkError::WrongUrl, "{name}");
                assert_eq!(err.status_code(), expected_status, "{name}: status");
            }
            "server" => {
                let err = outcome.unwrap_err();
                assert!(matches!(err, NetworkError::Server { .. }), "{name}: {err:?}");
                assert_eq!(err.status_code(), expected_status, "{name}: status");
            }
            other => panic!("{name}: unknown expectation: {other}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Awaitable convention
// ---------------------------------------------------------------------------

#[tokio::test]
async fn request_test_vectors() {
    let raw = include_str!("../../test-vectors/request.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let status = case["status"].as_u64().unwrap() as u16;
        let result = executor(case)
            .request::<Shape>("http://localhost:3000/vector")
            .await;

        match case["expected"].as_str().unwrap() {
            "ok" => {
                let expected: Shape = serde_json::from_value(case["expected_result"].clone()).unwrap();
                assert_eq!(result.unwrap(), expected, "{name}: decoded value");
            }
            "invalid_response" => {
                let err = result.unwrap_err();
                assert!(
                    matches!(err, DataError::InvalidResponse { status: s } if s == status),
                    "{name}: {err:?}"
                );
            }
            "invalid_data" => {
                let err = result.unwrap_err();
                assert!(matches!(err, DataError::InvalidData(_)), "{name}: {err:?}");
            }
            other => panic!("{name}: unknown expectation: {other}"),
        }
    }
}
