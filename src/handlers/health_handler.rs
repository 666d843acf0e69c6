use actix_web::{get, web, HttpResponse};

use crate::app_state::AppState;

#[get("/")]
pub async fn home() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body("Quiz backend is running. POST a document to /api/quiz.")
}

#[get("/health")]
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "completion_configured": state.config.has_api_key()
    }))
}
