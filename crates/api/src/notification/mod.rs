mod get_due_notifications;
mod get_notifications;

pub use get_due_notifications::GetDueNotificationsUseCase;

use actix_web::web;
use get_notifications::get_notifications_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/notifications", web::get().to(get_notifications_controller));
}
