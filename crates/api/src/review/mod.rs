mod create_review;
pub mod send_review_notifications;

use actix_web::web;
use create_review::create_review_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/reviews", web::post().to(create_review_controller));
}
