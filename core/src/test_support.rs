//! Shared fixtures for unit tests.

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use crate::error::TransportError;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::Transport;

/// Transport that answers every request the same way and records what it
/// was asked to send.
#[derive(Debug, Clone)]
pub struct Scripted {
    reply: Result<HttpResponse, TransportError>,
    sent: Arc<Mutex<Vec<HttpRequest>>>,
}

impl Scripted {
    pub fn reply(status: u16, body: &str) -> Self {
        Self {
            reply: Ok(HttpResponse::new(status, body)),
            sent: Arc::default(),
        }
    }

    pub fn fail(message: &str) -> Self {
        Self {
            reply: Err(TransportError::new(message)),
            sent: Arc::default(),
        }
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.sent.lock().unwrap().clone()
    }
}

impl Transport for Scripted {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.sent.lock().unwrap().push(request);
        self.reply.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub id: u64,
    pub tags: String,
}

impl Shape {
    pub fn new(id: u64, tags: &str) -> Self {
        Self {
            id,
            tags: tags.to_string(),
        }
    }
}
