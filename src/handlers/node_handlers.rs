//! Server node CRUD handlers.

use actix_web::{delete, get, post, put, web, HttpResponse};
use serde::Deserialize;

use crate::errors::{AppError, AppResult, RepositoryError};
use crate::models::{ApiResponse, CreateNodeRequest, UpdateNodeRequest};
use crate::repository::NodeRepository;

/// Configure node routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/server/node")
            .service(create_node)
            .service(list_nodes)
            .service(update_node)
            .service(delete_node),
    );
}

#[derive(Debug, Deserialize)]
struct NameFilter {
    name: Option<String>,
}

/// Create a new node.
#[post("")]
async fn create_node(
    repo: web::Data<NodeRepository>,
    body: web::Json<CreateNodeRequest>,
) -> AppResult<HttpResponse> {
    validate_node_fields(&body.name, &body.host, &body.port, &body.account, &body.password)?;

    let node = repo.create(&body).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok("node created", node)))
}

/// List nodes, optionally filtered by a fuzzy name match.
#[get("")]
async fn list_nodes(
    repo: web::Data<NodeRepository>,
    query: web::Query<NameFilter>,
) -> AppResult<HttpResponse> {
    let nodes = match query.name.as_deref() {
        Some(name) if !name.is_empty() => repo.find_by_name(name).await?,
        _ => repo.list_all().await?,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::ok("query ok", nodes)))
}

/// Update a node. The id rides in the body, as the dashboard sends it.
#[put("")]
async fn update_node(
    repo: web::Data<NodeRepository>,
    body: web::Json<UpdateNodeRequest>,
) -> AppResult<HttpResponse> {
    validate_node_fields(&body.name, &body.host, &body.port, &body.account, &body.password)?;

    let node = repo.update(&body).await.map_err(|err| match err {
        RepositoryError::NotFound => AppError::NodeNotFound(body.id),
        other => other.into(),
    })?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok("node updated", node)))
}

/// Delete a node by id.
#[delete("/{id}")]
async fn delete_node(
    repo: web::Data<NodeRepository>,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    repo.delete(id).await.map_err(|err| match err {
        RepositoryError::NotFound => AppError::NodeNotFound(id),
        other => other.into(),
    })?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok("node deleted", ())))
}

fn validate_node_fields(
    name: &str,
    host: &str,
    port: &str,
    account: &str,
    password: &str,
) -> AppResult<()> {
    if name.trim().is_empty() {
        return Err(AppError::ValidationError("name is required".to_string()));
    }
    if host.trim().is_empty() {
        return Err(AppError::ValidationError("host is required".to_string()));
    }
    if account.trim().is_empty() {
        return Err(AppError::ValidationError("account is required".to_string()));
    }
    if password.is_empty() {
        return Err(AppError::ValidationError("password is required".to_string()));
    }
    if !port.is_empty() && port.parse::<u16>().is_err() {
        return Err(AppError::ValidationError(format!("invalid port: {port}")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_rejects_blank_required_fields() {
        assert!(validate_node_fields("", "h", "", "a", "p").is_err());
        assert!(validate_node_fields("n", " ", "", "a", "p").is_err());
        assert!(validate_node_fields("n", "h", "", "", "p").is_err());
        assert!(validate_node_fields("n", "h", "", "a", "").is_err());
        assert!(validate_node_fields("n", "h", "", "a", "p").is_ok());
    }

    #[test]
    fn validation_checks_port_is_numeric() {
        assert!(validate_node_fields("n", "h", "8080", "a", "p").is_ok());
        assert!(validate_node_fields("n", "h", "80 80", "a", "p").is_err());
        assert!(validate_node_fields("n", "h", "99999", "a", "p").is_err());
    }
}
