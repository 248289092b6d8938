//! Permissive CORS for browser clients served from another origin.
//!
//! Any origin may read the API and send the `POST /update` form. Preflights
//! are answered by the middleware without reaching the routed handlers.

use actix_cors::Cors;
use actix_web::http::{Method, header};

/// CORS policy shared by every route.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use backend::middleware::cors;
///
/// let app = App::new().wrap(cors());
/// ```
pub fn cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .send_wildcard()
        .allowed_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allowed_header(header::CONTENT_TYPE)
}
