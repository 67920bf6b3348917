use crate::app_container::Application;
use crate::errors::ApiError;
use actix_web::{web, HttpResponse};

#[tracing::instrument(err, skip(app), level = "info")]
async fn get_outage_status(app: web::Data<Application>) -> Result<HttpResponse, ApiError> {
    let status = app.query.current_status().await?;
    Ok(HttpResponse::Ok().json(status))
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/outages").route(web::get().to(get_outage_status)));
}
