//! HTTP handlers, grouped by resource.

pub mod auth_handlers;
pub mod console_handlers;
pub mod job_handlers;
pub mod node_handlers;
pub mod view_handlers;

use actix_web::HttpResponse;

/// Catch-all for unknown routes.
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({ "msg": "404" }))
}
