//! Login and health-check handlers.
//!
//! Login is a static mock: the dashboard shell only needs a user object
//! and a token to unlock its routes. There is no user store behind it.

use actix_web::{post, web, HttpResponse};

use crate::errors::{AppError, AppResult};
use crate::middleware::BearerAuth;
use crate::models::{LoginRequest, LoginResponse, UserData};

/// Configure auth routes. /ping sits behind the bearer guard.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(login).service(
        web::resource("/ping")
            .wrap(BearerAuth)
            .route(web::get().to(ping)),
    );
}

/// Mock login: any non-empty credentials get the admin profile.
#[post("/login")]
async fn login(body: web::Json<LoginRequest>) -> AppResult<HttpResponse> {
    if body.username.is_empty() || body.password.is_empty() {
        return Err(AppError::AuthenticationError);
    }

    Ok(HttpResponse::Ok().json(LoginResponse {
        success: true,
        data: UserData {
            avatar: "https://avatars.githubusercontent.com/u/52823142".to_string(),
            username: "admin".to_string(),
            nickname: "Administrator".to_string(),
            roles: vec!["admin".to_string()],
            permissions: vec!["*:*:*".to_string()],
            access_token: "token".to_string(),
            refresh_token: "token".to_string(),
            expires: "2030/10/30 00:00:00".to_string(),
        },
    }))
}

/// Token-gated health check.
async fn ping() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "msg": "ok" }))
}
