use actix_cors::Cors;
use actix_web::http::header::{self, HeaderName};
use actix_web::web;

mod health;
pub mod mcp;
mod outages;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::init_routes)
        .configure(mcp::init_routes)
        .service(web::scope("/api").configure(outages::init_routes));
}

pub fn cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .send_wildcard()
        .allowed_methods(vec!["GET", "POST", "DELETE", "OPTIONS"])
        .allowed_headers(vec![
            header::CONTENT_TYPE,
            HeaderName::from_static(mcp::SESSION_HEADER),
        ])
        .expose_headers(vec![HeaderName::from_static(mcp::SESSION_HEADER)])
}
