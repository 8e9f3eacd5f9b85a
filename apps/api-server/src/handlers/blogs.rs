//! Blog post handlers.

use actix_multipart::Multipart;
use actix_web::{HttpResponse, web};

use cms_core::domain::{NewPost, PostPatch};
use cms_shared::{ApiResponse, CountResponse, MessageResponse};

use super::uploads;
use crate::middleware::{AppResult, Identity};
use crate::state::AppState;

const UPLOAD_FOLDER: &str = "blogs";

/// GET /api/blogs
pub async fn list(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.blogs.list().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(posts)))
}

/// GET /api/blogs/count
pub async fn count(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let total = state.blogs.count().await?;
    Ok(HttpResponse::Ok().json(CountResponse::new(total)))
}

/// GET /api/blogs/{id}
pub async fn get(state: web::Data<AppState>, id: web::Path<String>) -> AppResult<HttpResponse> {
    let post = state.blogs.get(&id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(post)))
}

/// POST /api/blogs
pub async fn create(
    _admin: Identity,
    state: web::Data<AppState>,
    body: web::Json<NewPost>,
) -> AppResult<HttpResponse> {
    let post = state.blogs.create(body.into_inner()).await?;
    Ok(HttpResponse::Created().json(ApiResponse::ok(post)))
}

/// PUT /api/blogs/{id}
pub async fn update(
    _admin: Identity,
    state: web::Data<AppState>,
    id: web::Path<String>,
    body: web::Json<PostPatch>,
) -> AppResult<HttpResponse> {
    let post = state.blogs.update(&id, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(post)))
}

/// DELETE /api/blogs/{id}
pub async fn delete(
    _admin: Identity,
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> AppResult<HttpResponse> {
    state.blogs.delete(&id).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::deleted()))
}

/// POST /api/blogs/upload
pub async fn upload(
    _admin: Identity,
    state: web::Data<AppState>,
    payload: Multipart,
) -> AppResult<HttpResponse> {
    uploads::store_single_file(state.uploads.as_ref(), payload, UPLOAD_FOLDER).await
}
