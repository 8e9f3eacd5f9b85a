//! Client address resolution for rate limiting and contact metadata.

use actix_web::HttpRequest;

/// Key used when no address can be determined.
pub const UNKNOWN_CLIENT: &str = "unknown";

/// Where the client's address comes from.
///
/// By default only the socket peer counts: `Forwarded` and `X-Forwarded-For`
/// are client-controlled and would let one caller pose as many. Behind a
/// reverse proxy that rewrites those headers, [`ClientAddr::behind_proxy`]
/// reads the first hop from them instead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClientAddr {
    trust_proxy: bool,
}

impl ClientAddr {
    pub fn new(trust_proxy: bool) -> Self {
        Self { trust_proxy }
    }

    pub fn direct() -> Self {
        Self::new(false)
    }

    pub fn behind_proxy() -> Self {
        Self::new(true)
    }

    /// IP of the client, without the port.
    pub fn resolve(self, req: &HttpRequest) -> Option<String> {
        if self.trust_proxy {
            return req
                .connection_info()
                .realip_remote_addr()
                .map(str::to_string);
        }
        req.peer_addr().map(|addr| addr.ip().to_string())
    }

    /// [`ClientAddr::resolve`], or [`UNKNOWN_CLIENT`].
    pub fn key(self, req: &HttpRequest) -> String {
        self.resolve(req)
            .unwrap_or_else(|| UNKNOWN_CLIENT.to_string())
    }
}

#[cfg(test)]
mod tests {
    use actix_web::test::TestRequest;

    use super::*;

    #[test]
    fn direct_ignores_forwarding_headers() {
        let req = TestRequest::default()
            .peer_addr("198.51.100.9:41234".parse().unwrap())
            .insert_header(("x-forwarded-for", "203.0.113.1"))
            .insert_header(("forwarded", "for=203.0.113.2"))
            .to_http_request();

        assert_eq!(ClientAddr::direct().key(&req), "198.51.100.9");
    }

    #[test]
    fn behind_proxy_uses_the_forwarded_client() {
        let req = TestRequest::default()
            .peer_addr("10.0.0.2:41234".parse().unwrap())
            .insert_header(("x-forwarded-for", "203.0.113.1, 10.0.0.2"))
            .to_http_request();

        assert_eq!(ClientAddr::behind_proxy().key(&req), "203.0.113.1");
    }

    #[test]
    fn behind_proxy_without_headers_falls_back_to_the_peer() {
        let req = TestRequest::default()
            .peer_addr("10.0.0.2:41234".parse().unwrap())
            .to_http_request();

        assert_eq!(ClientAddr::behind_proxy().key(&req), "10.0.0.2");
    }

    #[test]
    fn missing_peer_is_unknown() {
        let req = TestRequest::default().to_http_request();

        assert_eq!(ClientAddr::direct().key(&req), UNKNOWN_CLIENT);
    }
}
