//! Cross-origin policy for browser clients.
//!
//! When a frontend URL is configured only that origin may call the API;
//! without one any origin is accepted. Allowed methods match the events
//! routes, and the `trace-id` header is exposed so browser code can read it.

use actix_cors::Cors;
use actix_web::http::Method;
use url::Url;

use crate::middleware::trace::TRACE_ID_HEADER;

const MAX_AGE_SECS: usize = 3600;

/// Build the CORS middleware for `frontend_url`.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use events_backend::inbound::http::cors::cors_policy;
/// use url::Url;
///
/// let frontend = Url::parse("http://localhost:3000").expect("url");
/// let _app = App::new().wrap(cors_policy(Some(&frontend)));
/// ```
pub fn cors_policy(frontend_url: Option<&Url>) -> Cors {
    let cors = match frontend_url {
        Some(url) => Cors::default().allowed_origin(&url.origin().ascii_serialization()),
        None => Cors::default().allow_any_origin(),
    };
    cors.allowed_methods([
        Method::GET,
        Method::HEAD,
        Method::POST,
        Method::PUT,
        Method::PATCH,
        Method::DELETE,
    ])
    .allow_any_header()
    .expose_headers([TRACE_ID_HEADER])
    .max_age(MAX_AGE_SECS)
}
