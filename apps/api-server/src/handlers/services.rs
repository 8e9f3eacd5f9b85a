//! Service page handlers. Pages are addressed by slug.

use actix_multipart::Multipart;
use actix_web::{HttpResponse, web};

use cms_core::domain::{NewServicePage, ServicePatch};
use cms_shared::{ApiResponse, CountResponse, MessageResponse};

use super::uploads;
use crate::middleware::{AppResult, Identity};
use crate::state::AppState;

const UPLOAD_FOLDER: &str = "services";

/// GET /api/services - summaries only, no detail block.
pub async fn list(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let summaries = state.services.list().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(summaries)))
}

/// GET /api/services/count
pub async fn count(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let total = state.services.count().await?;
    Ok(HttpResponse::Ok().json(CountResponse::new(total)))
}

/// GET /api/services/{slug}
pub async fn get(state: web::Data<AppState>, slug: web::Path<String>) -> AppResult<HttpResponse> {
    let page = state.services.get(&slug).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(page)))
}

/// POST /api/services
pub async fn create(
    _admin: Identity,
    state: web::Data<AppState>,
    body: web::Json<NewServicePage>,
) -> AppResult<HttpResponse> {
    let page = state.services.create(body.into_inner()).await?;
    Ok(HttpResponse::Created().json(ApiResponse::ok(page)))
}

/// PUT /api/services/{slug}
pub async fn update(
    _admin: Identity,
    state: web::Data<AppState>,
    slug: web::Path<String>,
    body: web::Json<ServicePatch>,
) -> AppResult<HttpResponse> {
    let page = state.services.update(&slug, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(page)))
}

/// DELETE /api/services/{slug}
pub async fn delete(
    _admin: Identity,
    state: web::Data<AppState>,
    slug: web::Path<String>,
) -> AppResult<HttpResponse> {
    state.services.delete(&slug).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::deleted()))
}

/// POST /api/services/upload
pub async fn upload(
    _admin: Identity,
    state: web::Data<AppState>,
    payload: Multipart,
) -> AppResult<HttpResponse> {
    uploads::store_single_file(state.uploads.as_ref(), payload, UPLOAD_FOLDER).await
}
