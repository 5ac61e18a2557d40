mod auth_device;
mod create_member;
mod delete_device;
mod get_member_devices;
mod subscribers;

use actix_web::web;
use auth_device::auth_device_controller;
use create_member::create_member_controller;
use delete_device::delete_device_controller;
use get_member_devices::get_member_devices_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/members", web::post().to(create_member_controller));
    cfg.route("/device/auth", web::get().to(auth_device_controller));
    cfg.route(
        "/members/devices",
        web::get().to(get_member_devices_controller),
    );
    cfg.route("/members/devices", web::delete().to(delete_device_controller));
}
