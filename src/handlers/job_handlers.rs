//! Job handlers: folder listings, build trigger and stop.

use actix_web::{get, post, web, HttpResponse};
use tracing::info;

use crate::errors::AppResult;
use crate::jenkins::JenkinsClient;
use crate::models::{ApiResponse, BuildRequest, JenkinsTarget, JobQuery};

/// Configure job routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/server/job")
            .service(list_folder_jobs)
            .service(start_build)
            .service(stop_build),
    );
}

/// List the jobs inside a folder, with build history highlights.
#[get("")]
async fn list_folder_jobs(
    http: web::Data<reqwest::Client>,
    query: web::Query<JobQuery>,
) -> AppResult<HttpResponse> {
    let target = JenkinsTarget {
        host: query.host.clone(),
        port: query.port.clone(),
        account: query.account.clone(),
        password: query.password.clone(),
    };
    let client = JenkinsClient::new(http.get_ref().clone(), &target);
    let jobs = client.folder_jobs(&query.view_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok("query ok", jobs)))
}

/// Trigger a build. `view_id` names the job, or the folder when
/// `view_name` carries the nested job.
#[post("/start")]
async fn start_build(
    http: web::Data<reqwest::Client>,
    body: web::Json<BuildRequest>,
) -> AppResult<HttpResponse> {
    info!(view_id = %body.view_id, view_name = ?body.view_name, "triggering build");

    let client = JenkinsClient::new(http.get_ref().clone(), &body.target());
    client
        .trigger_build(&body.view_id, body.view_name.as_deref())
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok("build triggered", ())))
}

/// Cancel the latest build of a job.
#[post("/stop")]
async fn stop_build(
    http: web::Data<reqwest::Client>,
    body: web::Json<BuildRequest>,
) -> AppResult<HttpResponse> {
    info!(view_id = %body.view_id, view_name = ?body.view_name, "stopping latest build");

    let client = JenkinsClient::new(http.get_ref().clone(), &body.target());
    let number = client
        .stop_last_build(&body.view_id, body.view_name.as_deref())
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(format!("build #{number} stopped"), ())))
}
