use actix_web::web;

pub mod health;

/// Register every route. Used by `main.rs` and by route tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(health::root));
    health::configure_routes(cfg);
}
