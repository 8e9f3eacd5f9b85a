//! The JSON envelope. Every body carries `ok`; failures carry `error`.

use serde::{Deserialize, Serialize};

/// Standard successful response wrapper: `{ok: true, data}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self { ok: true, data }
    }
}

/// `{ok: true, total}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountResponse {
    pub ok: bool,
    pub total: u64,
}

impl CountResponse {
    pub fn new(total: u64) -> Self {
        Self { ok: true, total }
    }
}

/// Acknowledgement without a resource body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl MessageResponse {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            message: Some(message.into()),
            id: None,
            note: None,
        }
    }

    pub fn deleted() -> Self {
        Self::message("Deleted")
    }

    /// Contact submission stored under `id`.
    pub fn received(id: impl ToString) -> Self {
        Self {
            id: Some(id.to_string()),
            ..Self::message("Received")
        }
    }

    /// Honeypot answer. Looks like success to the sender.
    pub fn spam() -> Self {
        Self {
            ok: true,
            message: None,
            id: None,
            note: Some("spam detected".to_string()),
        }
    }
}

/// One page of a listing: `{ok, page, limit, total, pages, data}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse<T> {
    pub ok: bool,
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub pages: u64,
    pub data: Vec<T>,
}

/// `{ok: true, url}` for a stored upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub ok: bool,
    pub url: String,
}

impl UploadResponse {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            ok: true,
            url: url.into(),
        }
    }
}

/// Liveness probe body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub ok: bool,
    /// Seconds since the process started.
    pub uptime: f64,
    pub version: String,
    pub timestamp: String,
}

/// Failure envelope: `{ok: false, error, errors?, stack?}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub ok: bool,
    pub error: String,

    /// One entry per violated validation rule.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,

    /// Debug rendering of the failure. Never set in production.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: error.into(),
            errors: None,
            stack: None,
        }
    }

    pub fn with_errors(mut self, errors: Vec<String>) -> Self {
        self.errors = Some(errors);
        self
    }

    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }

    pub fn route_not_found() -> Self {
        Self::new("Route not found")
    }

    pub fn server_error() -> Self {
        Self::new("Server error")
    }
}
