//! Error handling - every failure leaves the server as a JSON envelope.

use actix_web::{
    HttpRequest, HttpResponse, ResponseError,
    body::MessageBody,
    dev::ServiceResponse,
    error::{JsonPayloadError, QueryPayloadError},
    http::{StatusCode, header},
    middleware::{ErrorHandlerResponse, ErrorHandlers},
    web,
};
use cms_core::DomainError;
use cms_core::ports::{AuthError, StorageError};
use cms_shared::ErrorResponse;

use crate::config::RunMode;

/// Largest JSON body accepted.
pub const JSON_LIMIT: usize = 1024 * 1024;

/// Application-level error type rendered as `{ok: false, error}`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    /// Every violated rule; rendered joined in `error` and listed in `errors`.
    #[error("{}", .0.join(", "))]
    Validation(Vec<String>),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    PayloadTooLarge(String),

    #[error("{0}")]
    TooManyRequests(String),

    /// Diagnostic detail for the logs. Clients only see "Server error".
    #[error("{0}")]
    Internal(String),
}

impl AppError {
    /// The message a client is allowed to see.
    pub fn public_message(&self) -> String {
        match self {
            AppError::Internal(_) => ErrorResponse::server_error().error,
            other => other.to_string(),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::TooManyRequests(_) => StatusCode::TOO_MANY_REQUESTS,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            AppError::Validation(errors) => {
                ErrorResponse::new(self.to_string()).with_errors(errors.clone())
            }
            AppError::Internal(detail) => {
                tracing::error!(%detail, "Internal error");
                ErrorResponse::server_error()
            }
            other => ErrorResponse::new(other.to_string()),
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound { entity_type, .. } => {
                AppError::NotFound(format!("{entity_type} not found"))
            }
            DomainError::Validation(errors) => AppError::Validation(errors),
            DomainError::Duplicate(msg) => AppError::Conflict(msg),
            DomainError::Unauthorized => AppError::Unauthorized("Authentication required".into()),
            DomainError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingAuth => AppError::Unauthorized("Authentication required".into()),
            AuthError::TokenExpired => AppError::Unauthorized("Token expired".into()),
            AuthError::InvalidToken(_) => AppError::Unauthorized("Invalid token".into()),
            AuthError::InvalidCredentials => AppError::Unauthorized("Invalid credentials".into()),
            AuthError::InsufficientPermissions => {
                AppError::Forbidden("Admin access required".into())
            }
            AuthError::HashingError(detail) => AppError::Internal(detail),
        }
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::UnsupportedFormat(ext) if ext.is_empty() => {
                AppError::BadRequest("Unsupported image format".into())
            }
            StorageError::UnsupportedFormat(ext) => {
                AppError::BadRequest(format!("Unsupported image format: {ext}"))
            }
            StorageError::Upstream(detail) => AppError::Internal(format!("Upload failed: {detail}")),
            StorageError::NotConfigured => AppError::Internal(err.to_string()),
        }
    }
}

impl From<JsonPayloadError> for AppError {
    fn from(err: JsonPayloadError) -> Self {
        match err {
            JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => {
                AppError::PayloadTooLarge("Request body too large".into())
            }
            JsonPayloadError::ContentType => {
                AppError::BadRequest("Expected a JSON request body".into())
            }
            JsonPayloadError::Deserialize(e) => AppError::BadRequest(format!("Invalid JSON: {e}")),
            other => AppError::BadRequest(other.to_string()),
        }
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;

/// JSON extractor settings: size ceiling and envelope-shaped rejections.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(JSON_LIMIT)
        .error_handler(|err, _req: &HttpRequest| AppError::from(err).into())
}

/// Query extractor settings.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err: QueryPayloadError, _req: &HttpRequest| {
        AppError::BadRequest(format!("Invalid query string: {err}")).into()
    })
}

/// Catch-all for failures that did not come out as an envelope: framework
/// rejections, plain-text errors and, outside production, 5xx responses that
/// should carry a `stack`.
pub fn envelope_errors<B: MessageBody + 'static>(mode: RunMode) -> ErrorHandlers<B> {
    ErrorHandlers::new().default_handler(move |res| rewrite_error(res, mode))
}

fn rewrite_error<B: MessageBody + 'static>(
    res: ServiceResponse<B>,
    mode: RunMode,
) -> actix_web::Result<ErrorHandlerResponse<B>> {
    let status = res.status();
    let is_json = res
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"));
    let wants_stack = status.is_server_error() && !mode.is_production();

    if is_json && !wants_stack {
        return Ok(ErrorHandlerResponse::Response(res.map_into_left_body()));
    }

    let mut body = match res.response().error() {
        Some(err) => {
            let message = match err.as_error::<AppError>() {
                Some(app) => app.public_message(),
                None if status.is_server_error() => ErrorResponse::server_error().error,
                None => err.to_string(),
            };
            let mut body = ErrorResponse::new(message);
            if let Some(AppError::Validation(errors)) = err.as_error::<AppError>() {
                body = body.with_errors(errors.clone());
            }
            if wants_stack {
                body = body.with_stack(format!("{err:?}"));
            }
            body
        }
        None => ErrorResponse::new(
            status
                .canonical_reason()
                .unwrap_or(if status.is_server_error() {
                    "Server error"
                } else {
                    "Request failed"
                }),
        ),
    };
    if status.is_server_error() && body.error.is_empty() {
        body.error = ErrorResponse::server_error().error;
    }

    let (req, _) = res.into_parts();
    let response = HttpResponse::build(status).json(body);
    Ok(ErrorHandlerResponse::Response(
        ServiceResponse::new(req, response).map_into_right_body(),
    ))
}
