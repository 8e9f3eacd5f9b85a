//! Contact form and inbox handlers.

use actix_web::{HttpRequest, HttpResponse, http::header, web};

use cms_core::domain::{ClientInfo, ContactFilter, ContactPatch, ContactSubmission, PageRequest};
use cms_core::services::Submission;
use cms_shared::{ApiResponse, ContactListQuery, CountResponse, MessageResponse, PageResponse};

use crate::middleware::{AppResult, ClientAddr, Identity};
use crate::state::AppState;

/// POST /api/contact - public. Honeypot hits get a quiet 200.
pub async fn submit(
    req: HttpRequest,
    state: web::Data<AppState>,
    client_addr: web::Data<ClientAddr>,
    body: web::Json<ContactSubmission>,
) -> AppResult<HttpResponse> {
    let client = client_info(&req, **client_addr);

    match state.contacts.submit(body.into_inner(), client).await? {
        Submission::Accepted(id) => Ok(HttpResponse::Created().json(MessageResponse::received(id))),
        Submission::Spam => Ok(HttpResponse::Ok().json(MessageResponse::spam())),
    }
}

/// GET /api/contact?page&limit&q&handled
pub async fn list(
    _admin: Identity,
    state: web::Data<AppState>,
    query: web::Query<ContactListQuery>,
) -> AppResult<HttpResponse> {
    let filter = ContactFilter::new(query.handled(), query.query());
    let request = PageRequest::new(query.page(), query.limit());

    let page = state.contacts.list(&filter, request).await?;
    let pages = page.pages();
    Ok(HttpResponse::Ok().json(PageResponse {
        ok: true,
        page: page.page,
        limit: page.limit,
        total: page.total,
        pages,
        data: page.items,
    }))
}

/// GET /api/contact/count
pub async fn count(_admin: Identity, state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let total = state.contacts.count().await?;
    Ok(HttpResponse::Ok().json(CountResponse::new(total)))
}

/// GET /api/contact/{id}
pub async fn get(
    _admin: Identity,
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> AppResult<HttpResponse> {
    let message = state.contacts.get(&id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(message)))
}

/// PATCH /api/contact/{id} - `{handled?, note?}`
pub async fn update(
    _admin: Identity,
    state: web::Data<AppState>,
    id: web::Path<String>,
    body: web::Json<ContactPatch>,
) -> AppResult<HttpResponse> {
    let message = state.contacts.update(&id, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(message)))
}

/// DELETE /api/contact/{id}
pub async fn delete(
    _admin: Identity,
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> AppResult<HttpResponse> {
    state.contacts.delete(&id).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::deleted()))
}

fn client_info(req: &HttpRequest, client_addr: ClientAddr) -> ClientInfo {
    let ip = client_addr.resolve(req).unwrap_or_default();
    let user_agent = req
        .headers()
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    ClientInfo { ip, user_agent }
}
