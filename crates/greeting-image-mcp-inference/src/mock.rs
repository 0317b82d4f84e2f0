//! Mock backend for testing purposes.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::backend::{TextToImageBackend, TextToImageRequest, UpstreamResponse};
use crate::error::{InferenceError, Result};

#[derive(Debug, Clone)]
enum Reply {
    Respond(UpstreamResponse),
    Fail { status: u16, body: String },
}

/// A backend that returns predefined responses and records what it was asked.
#[derive(Debug)]
pub struct MockBackend {
    reply: Mutex<Reply>,
    hosted: Mutex<HashMap<String, UpstreamResponse>>,
    last_request: Mutex<Option<TextToImageRequest>>,
    calls: AtomicUsize,
}

impl MockBackend {
    /// Create a mock that answers with an empty octet-stream body.
    pub fn new() -> Self {
        Self {
            reply: Mutex::new(Reply::Respond(UpstreamResponse::new(
                "application/octet-stream",
                Vec::new(),
            ))),
            hosted: Mutex::new(HashMap::new()),
            last_request: Mutex::new(None),
            calls: AtomicUsize::new(0),
        }
    }

    /// Create a mock that answers every generation with `response`.
    pub fn responding(response: UpstreamResponse) -> Self {
        let mock = Self::new();
        mock.set_response(response);
        mock
    }

    /// Create a mock whose generations fail with an HTTP status.
    pub fn failing(status: u16, body: impl Into<String>) -> Self {
        let mock = Self::new();
        *mock.reply.lock().unwrap_or_else(|e| e.into_inner()) = Reply::Fail {
            status,
            body: body.into(),
        };
        mock
    }

    /// Serve `response` when `url` is fetched.
    pub fn with_hosted(self, url: impl Into<String>, response: UpstreamResponse) -> Self {
        self.hosted
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(url.into(), response);
        self
    }

    /// Set the generation response to return.
    pub fn set_response(&self, response: UpstreamResponse) {
        *self.reply.lock().unwrap_or_else(|e| e.into_inner()) = Reply::Respond(response);
    }

    /// Number of generation calls received.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// The most recent generation request.
    pub fn last_request(&self) -> Option<TextToImageRequest> {
        self.last_request
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextToImageBackend for MockBackend {
    fn name(&self) -> &str {
        "mock"
    }

    async fn text_to_image(
        &self,
        _token: &str,
        request: &TextToImageRequest,
    ) -> Result<UpstreamResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap_or_else(|e| e.into_inner()) = Some(request.clone());

        let reply = self.reply.lock().unwrap_or_else(|e| e.into_inner()).clone();
        match reply {
            Reply::Respond(response) => Ok(response),
            Reply::Fail { status, body } => Err(InferenceError::Status { status, body }),
        }
    }

    async fn fetch(&self, _token: &str, url: &str) -> Result<UpstreamResponse> {
        self.hosted
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(url)
            .cloned()
            .ok_or_else(|| InferenceError::Status {
                status: 404,
                body: format!("no hosted image at {url}"),
            })
    }
}
