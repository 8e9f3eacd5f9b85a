//! Admin authentication extractor.

use std::future::{Ready, ready};

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header, web};

use cms_core::ports::{ADMIN_ROLE, AuthError, TokenClaims};

use crate::middleware::error::AppError;
use crate::state::AuthState;

/// An authenticated operator holding the admin role.
///
/// Put it first in a handler's arguments so the token is checked before the
/// body is read:
/// ```ignore
/// async fn create(_admin: Identity, body: web::Json<NewPost>) -> AppResult<HttpResponse> { .. }
/// ```
#[derive(Debug, Clone)]
pub struct Identity {
    pub subject: String,
    pub roles: Vec<String>,
    /// Token expiry as a unix timestamp.
    pub expires_at: i64,
}

impl From<TokenClaims> for Identity {
    fn from(claims: TokenClaims) -> Self {
        Self {
            subject: claims.subject,
            roles: claims.roles,
            expires_at: claims.exp,
        }
    }
}

impl FromRequest for Identity {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

fn authenticate(req: &HttpRequest) -> Result<Identity, AppError> {
    let Some(auth) = req.app_data::<web::Data<AuthState>>() else {
        return Err(AppError::Internal("AuthState not registered".to_string()));
    };

    let value = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingAuth)?;

    let token = value
        .to_str()
        .ok()
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AuthError::InvalidToken("Expected Bearer token".to_string()))?;

    let claims = auth.tokens.validate_token(token).inspect_err(|e| {
        tracing::warn!(error = %e, path = %req.path(), "Rejected bearer token");
    })?;

    if !claims.has_role(ADMIN_ROLE) {
        tracing::warn!(subject = %claims.subject, path = %req.path(), "Admin role required");
        return Err(AuthError::InsufficientPermissions.into());
    }

    Ok(Identity::from(claims))
}
