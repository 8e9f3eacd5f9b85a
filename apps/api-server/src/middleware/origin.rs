//! Origin gate - browser requests must come from an allow-listed origin.

use std::collections::HashSet;
use std::future::{Ready, ready};
use std::sync::Arc;

use actix_web::{
    Error, HttpResponse,
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    http::{
        Method,
        header::{self, HeaderMap, HeaderValue},
    },
};
use cms_shared::ErrorResponse;
use futures::future::LocalBoxFuture;

pub const REJECTED_MESSAGE: &str = "CORS policy: This origin is not allowed";

const ALLOWED_METHODS: &str = "GET, POST, PUT, PATCH, DELETE, OPTIONS";
const EXPOSED_HEADERS: &str = "Content-Range, X-Total-Count";

/// The set of origins allowed to call the API from a browser.
#[derive(Debug, Clone, Default)]
pub struct OriginPolicy {
    allowed: Arc<HashSet<String>>,
}

impl OriginPolicy {
    pub fn new<I, S>(origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let allowed = origins
            .into_iter()
            .map(|o| o.into().trim_end_matches('/').to_string())
            .collect();
        Self {
            allowed: Arc::new(allowed),
        }
    }

    pub fn allows(&self, origin: &str) -> bool {
        self.allowed.contains(origin.trim_end_matches('/'))
    }
}

/// Middleware factory enforcing an [`OriginPolicy`].
///
/// Requests without an `Origin` header (curl, server-to-server) pass through.
pub struct OriginGate {
    policy: OriginPolicy,
}

impl OriginGate {
    pub fn new(policy: OriginPolicy) -> Self {
        Self { policy }
    }
}

impl<S, B> Transform<S, ServiceRequest> for OriginGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = OriginGateService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(OriginGateService {
            service,
            policy: self.policy.clone(),
        }))
    }
}

pub struct OriginGateService<S> {
    service: S,
    policy: OriginPolicy,
}

impl<S, B> Service<ServiceRequest> for OriginGateService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let Some(origin) = req.headers().get(header::ORIGIN).cloned() else {
            let fut = self.service.call(req);
            return Box::pin(async move { Ok(fut.await?.map_into_left_body()) });
        };

        let declared = String::from_utf8_lossy(origin.as_bytes()).into_owned();
        if !self.policy.allows(&declared) {
            tracing::warn!(origin = %declared, path = %req.path(), "Blocked by CORS policy");
            let response = HttpResponse::Forbidden().json(ErrorResponse::new(REJECTED_MESSAGE));
            let (http_req, _payload) = req.into_parts();
            let res = ServiceResponse::new(http_req, response);
            return Box::pin(async move { Ok(res.map_into_right_body()) });
        }

        let preflight = req.method() == Method::OPTIONS
            && req
                .headers()
                .contains_key(header::ACCESS_CONTROL_REQUEST_METHOD);
        if preflight {
            let mut response = HttpResponse::NoContent();
            response.insert_header((header::ACCESS_CONTROL_ALLOW_METHODS, ALLOWED_METHODS));
            if let Some(requested) = req.headers().get(header::ACCESS_CONTROL_REQUEST_HEADERS) {
                response.insert_header((header::ACCESS_CONTROL_ALLOW_HEADERS, requested.clone()));
            }
            let mut response = response.finish();
            apply_cors(response.headers_mut(), origin);

            let (http_req, _payload) = req.into_parts();
            let res = ServiceResponse::new(http_req, response);
            return Box::pin(async move { Ok(res.map_into_right_body()) });
        }

        let fut = self.service.call(req);
        Box::pin(async move {
            let mut res = fut.await?;
            apply_cors(res.headers_mut(), origin);
            Ok(res.map_into_left_body())
        })
    }
}

fn apply_cors(headers: &mut HeaderMap, origin: HeaderValue) {
    headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin);
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_CREDENTIALS,
        HeaderValue::from_static("true"),
    );
    headers.insert(
        header::ACCESS_CONTROL_EXPOSE_HEADERS,
        HeaderValue::from_static(EXPOSED_HEADERS),
    );
    headers.append(header::VARY, HeaderValue::from_static("Origin"));
}
