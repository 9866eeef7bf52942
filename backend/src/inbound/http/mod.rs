//! HTTP inbound adapter exposing REST endpoints.

pub mod auth;
pub mod cakes;
pub mod error;
pub mod health;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;

use actix_web::web;

pub use error::ApiResult;

/// Register the versioned cake API together with the extractor
/// configuration that turns malformed input into `400 invalid_request`.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use cake_manager::inbound::http::configure_api;
///
/// let _app = App::new().service(web::scope("/api/v1").configure(configure_api));
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(error::json_error_handler))
        .app_data(web::PathConfig::default().error_handler(error::path_error_handler))
        .service(cakes::create_cake)
        .service(cakes::list_cakes)
        .service(cakes::get_cake)
        .service(cakes::update_cake)
        .service(cakes::delete_cake);
}
