//! Application assembly shared by the server binary and tests.

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, Error, web};

use super::error::{json_error_handler, path_error_handler, route_not_found};
use super::events::{create_event, delete_event, get_event, list_events, update_event};
use super::health::{HealthState, live, ready};
use super::state::HttpState;
use crate::middleware::Trace;
#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

/// Build the events application.
///
/// Every response, including framework failures and unmatched routes, is
/// written as a success or error envelope.
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use actix_web::web;
/// use events_backend::inbound::http::app::build_app;
/// use events_backend::inbound::http::health::HealthState;
/// use events_backend::inbound::http::state::HttpState;
/// use events_backend::outbound::memory::InMemoryEventRepository;
///
/// let state = web::Data::new(HttpState::new(Arc::new(InMemoryEventRepository::new())));
/// let _app = build_app(web::Data::new(HealthState::new()), state);
/// ```
pub fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        InitError = (),
        Error = Error,
    >,
> {
    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .wrap(Trace)
        .service(create_event)
        .service(list_events)
        .service(get_event)
        .service(update_event)
        .service(delete_event)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(
        SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    );

    app.default_service(web::to(route_not_found))
}
