//! Rate limiting middleware.

use std::future::{Ready, ready};
use std::rc::Rc;
use std::sync::Arc;

use actix_web::{
    Error, HttpResponse,
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    http::header::{self, HeaderMap, HeaderName, HeaderValue},
};
use cms_shared::ErrorResponse;
use futures::future::LocalBoxFuture;

use cms_core::ports::{RateLimitResult, RateLimiter};

use crate::middleware::client_addr::ClientAddr;

pub const GLOBAL_MESSAGE: &str = "Too many requests, please try again later.";
pub const CONTACT_MESSAGE: &str = "Too many contact requests from this IP, please try later.";

const LIMIT_HEADER: &str = "x-ratelimit-limit";
const REMAINING_HEADER: &str = "x-ratelimit-remaining";

/// Rate limiting middleware factory. Counts per client address as resolved
/// by [`ClientAddr`].
pub struct RateLimit {
    limiter: Arc<dyn RateLimiter>,
    client_addr: ClientAddr,
    message: &'static str,
}

impl RateLimit {
    /// Applied to every request.
    pub fn global(limiter: Arc<dyn RateLimiter>, client_addr: ClientAddr) -> Self {
        Self {
            limiter,
            client_addr,
            message: GLOBAL_MESSAGE,
        }
    }

    /// Applied to the contact scope on top of the global limit.
    pub fn contact(limiter: Arc<dyn RateLimiter>, client_addr: ClientAddr) -> Self {
        Self {
            limiter,
            client_addr,
            message: CONTACT_MESSAGE,
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RateLimit
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = RateLimitService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitService {
            service: Rc::new(service),
            limiter: self.limiter.clone(),
            client_addr: self.client_addr,
            message: self.message,
        }))
    }
}

pub struct RateLimitService<S> {
    service: Rc<S>,
    limiter: Arc<dyn RateLimiter>,
    client_addr: ClientAddr,
    message: &'static str,
}

impl<S, B> Service<ServiceRequest> for RateLimitService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let limiter = self.limiter.clone();
        let message = self.message;
        let key = self.client_addr.key(req.request());

        Box::pin(async move {

            let result = match limiter.check(&key).await {
                Ok(result) => result,
                Err(e) => {
                    tracing::error!(error = %e, "Rate limiter unavailable, failing open");
                    let res = service.call(req).await?;
                    return Ok(res.map_into_left_body());
                }
            };

            if !result.allowed {
                tracing::warn!(%key, path = %req.path(), limit = result.limit, "Rate limit exceeded");

                let retry_after = result.retry_after_secs();
                let response = HttpResponse::TooManyRequests()
                    .insert_header((header::RETRY_AFTER, retry_after.to_string()))
                    .insert_header((LIMIT_HEADER, result.limit.to_string()))
                    .insert_header((REMAINING_HEADER, "0"))
                    .json(ErrorResponse::new(message));

                let (http_req, _payload) = req.into_parts();
                return Ok(ServiceResponse::new(http_req, response).map_into_right_body());
            }

            let mut res = service.call(req).await?;
            annotate(res.headers_mut(), &result);
            Ok(res.map_into_left_body())
        })
    }
}

// The innermost limiter wins when scopes nest.
fn annotate(headers: &mut HeaderMap, result: &RateLimitResult) {
    if headers.contains_key(LIMIT_HEADER) {
        return;
    }
    if let Ok(limit) = HeaderValue::from_str(&result.limit.to_string()) {
        headers.insert(HeaderName::from_static(LIMIT_HEADER), limit);
    }
    if let Ok(remaining) = HeaderValue::from_str(&result.remaining.to_string()) {
        headers.insert(HeaderName::from_static(REMAINING_HEADER), remaining);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use actix_web::{App, http::StatusCode, test, web};
    use async_trait::async_trait;
    use cms_core::ports::RateLimitError;
    use cms_infra::{InMemoryRateLimiter, RateLimitConfig};

    use super::*;

    struct Broken;

    #[async_trait]
    impl RateLimiter for Broken {
        async fn check(&self, _key: &str) -> Result<RateLimitResult, RateLimitError> {
            Err(RateLimitError::Backend("connection refused".into()))
        }

        fn limit(&self) -> u32 {
            1
        }
    }

    fn limiter(max_requests: u32) -> Arc<dyn RateLimiter> {
        Arc::new(InMemoryRateLimiter::new(RateLimitConfig {
            max_requests,
            window: Duration::from_secs(60),
        }))
    }

    fn from(addr: &str) -> test::TestRequest {
        test::TestRequest::get()
            .uri("/")
            .peer_addr(format!("{addr}:40000").parse().unwrap())
    }

    #[actix_web::test]
    async fn rejects_after_the_ceiling_per_client() {
        let app = test::init_service(
            App::new()
                .wrap(RateLimit::global(limiter(2), ClientAddr::direct()))
                .route("/", web::get().to(HttpResponse::Ok)),
        )
        .await;

        for remaining in ["1", "0"] {
            let res = test::call_service(&app, from("10.0.0.1").to_request()).await;
            assert_eq!(res.status(), StatusCode::OK);
            assert_eq!(res.headers().get(REMAINING_HEADER).unwrap(), remaining);
        }

        let res = test::call_service(&app, from("10.0.0.1").to_request()).await;
        assert_eq!(res.status(), StatusCode::TOO_MANY_REQUESTS);
        assert!(res.headers().contains_key(header::RETRY_AFTER));
        assert_eq!(res.headers().get(LIMIT_HEADER).unwrap(), "2");
        let body: serde_json::Value = test::read_body_json(res).await;
        assert_eq!(body["ok"], false);
        assert_eq!(body["error"], GLOBAL_MESSAGE);

        // Another client still has its own budget.
        let res = test::call_service(&app, from("10.0.0.2").to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn backend_failure_fails_open() {
        let app = test::init_service(
            App::new()
                .wrap(RateLimit::contact(Arc::new(Broken), ClientAddr::direct()))
                .route("/", web::get().to(HttpResponse::Ok)),
        )
        .await;

        let res = test::call_service(&app, from("10.0.0.1").to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn spoofed_forwarding_headers_share_the_peer_budget() {
        let app = test::init_service(
            App::new()
                .wrap(RateLimit::global(limiter(3), ClientAddr::direct()))
                .route("/", web::get().to(HttpResponse::Ok)),
        )
        .await;

        let mut statuses = Vec::new();
        for i in 0..5 {
            let req = from("198.51.100.9")
                .insert_header(("x-forwarded-for", format!("203.0.113.{i}")))
                .to_request();
            statuses.push(test::call_service(&app, req).await.status());
        }

        assert_eq!(&statuses[..3], &[StatusCode::OK; 3]);
        assert_eq!(&statuses[3..], &[StatusCode::TOO_MANY_REQUESTS; 2]);
    }

    #[actix_web::test]
    async fn trusted_proxy_counts_the_forwarded_client() {
        let app = test::init_service(
            App::new()
                .wrap(RateLimit::global(limiter(1), ClientAddr::behind_proxy()))
                .route("/", web::get().to(HttpResponse::Ok)),
        )
        .await;

        for client in ["203.0.113.1", "203.0.113.2"] {
            let req = from("10.0.0.2")
                .insert_header(("x-forwarded-for", client))
                .to_request();
            assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
        }
    }
}
