//! Node view handlers: top-level Jenkins jobs and folders for one node.

use actix_web::{post, web, HttpResponse};
use tracing::info;

use crate::errors::AppResult;
use crate::jenkins::JenkinsClient;
use crate::models::{ApiResponse, JenkinsTarget};

/// Configure view routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/server/node_view").service(list_node_views));
}

/// List the top-level jobs and folders on the node's Jenkins server.
/// The body carries the node's connection credentials.
#[post("/{node_id}/view")]
async fn list_node_views(
    http: web::Data<reqwest::Client>,
    path: web::Path<String>,
    body: web::Json<JenkinsTarget>,
) -> AppResult<HttpResponse> {
    let node_id = path.into_inner();
    info!(node_id = %node_id, host = %body.host, "listing node views");

    let client = JenkinsClient::new(http.get_ref().clone(), &body);
    let views = client.list_views(&node_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok("query ok", views)))
}
