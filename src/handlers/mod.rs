pub mod health_handler;
pub mod quiz_handler;

use actix_web::web;

pub use health_handler::{health_check, home};
pub use quiz_handler::{generate_quiz, generate_quiz_legacy};

/// Registers every route of the service.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(home)
        .service(health_check)
        .service(generate_quiz)
        .service(generate_quiz_legacy);
}
