//! Admin login and token introspection.

use actix_web::{HttpResponse, web};
use chrono::DateTime;

use cms_core::ports::{ADMIN_ROLE, AuthError};
use cms_shared::{AdminProfile, ApiResponse, AuthResponse, LoginRequest};

use crate::middleware::{AppResult, Identity};
use crate::state::AuthState;

/// POST /api/auth/login
pub async fn login(
    auth: web::Data<AuthState>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let Some(admin) = auth.admin.as_ref() else {
        tracing::warn!("Login attempted but no admin account is configured");
        return Err(AuthError::InvalidCredentials.into());
    };

    let email_matches = admin.email.eq_ignore_ascii_case(req.email.trim());
    if !email_matches || !auth.passwords.verify(&req.password, &admin.password_hash)? {
        tracing::warn!(email = %req.email, "Failed admin login");
        return Err(AuthError::InvalidCredentials.into());
    }

    let token = auth
        .tokens
        .generate_token(&admin.email, vec![ADMIN_ROLE.to_string()])?;
    tracing::info!(email = %admin.email, "Admin logged in");

    let expires_in = u64::try_from(auth.tokens.expiration_seconds()).unwrap_or_default();
    Ok(HttpResponse::Ok().json(ApiResponse::ok(AuthResponse::bearer(token, expires_in))))
}

/// GET /api/auth/me
pub async fn me(identity: Identity) -> AppResult<HttpResponse> {
    let expires_at = DateTime::from_timestamp(identity.expires_at, 0)
        .map(|at| at.to_rfc3339())
        .unwrap_or_default();

    Ok(HttpResponse::Ok().json(ApiResponse::ok(AdminProfile {
        email: identity.subject,
        roles: identity.roles,
        expires_at,
    })))
}
