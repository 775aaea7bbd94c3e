mod actions;
mod auth;
mod views;

use actix_web::web;

pub use actions::*;
pub use auth::*;
pub use views::*;

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index_page))
        .route("/dashboard", web::get().to(dashboard_page))
        .route("/login", web::post().to(login))
        .route("/register", web::post().to(register))
        .route("/logout", web::post().to(logout))
        .route("/theme", web::post().to(toggle_theme))
        .route("/forms/{form}", web::post().to(submit_form))
        .route("/delete/{kind}/{id}", web::post().to(delete_record));
}
