//! Application assembly, shared by `main` and the integration tests.

use actix_web::{
    App, Error,
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    middleware::NormalizePath,
    web,
};
use tracing_actix_web::TracingLogger;

use crate::handlers;
use crate::middleware::error::{envelope_errors, json_config, query_config};
use crate::middleware::{OriginGate, RateLimit};
use crate::state::AppContext;

/// Build the app for one worker.
///
/// Request flow: tracing span, path normalisation, origin gate, global rate
/// limit, router (contact limit and admin gate per route), then handlers.
/// The error envelope sits closest to the handlers so everything they and
/// the framework produce leaves as JSON.
pub fn build_app(
    ctx: AppContext,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    let contact_limit = RateLimit::contact(ctx.contact_limiter.clone(), ctx.client_addr);

    App::new()
        .app_data(web::Data::new(ctx.state.clone()))
        .app_data(web::Data::new(ctx.auth.clone()))
        .app_data(web::Data::new(ctx.client_addr))
        .app_data(json_config())
        .app_data(query_config())
        .configure(|cfg| handlers::configure_routes(cfg, contact_limit))
        .default_service(web::to(handlers::route_not_found))
        .wrap(envelope_errors(ctx.mode))
        .wrap(RateLimit::global(ctx.global_limiter.clone(), ctx.client_addr))
        .wrap(OriginGate::new(ctx.origins.clone()))
        .wrap(NormalizePath::trim())
        .wrap(TracingLogger::default())
}
