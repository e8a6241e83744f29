//! Console handlers: build logs, pipeline output, build deletion.

use actix_web::{post, web, HttpResponse};
use tracing::info;

use crate::errors::AppResult;
use crate::jenkins::JenkinsClient;
use crate::models::{ApiResponse, JenkinsTarget, JobQuery};

/// Configure console routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/server/console")
            .service(console_text)
            .service(pipeline_steps)
            .service(pipeline_graph)
            .service(delete_build),
    );
}

fn client_for(http: &reqwest::Client, query: &JobQuery) -> JenkinsClient {
    let target = JenkinsTarget {
        host: query.host.clone(),
        port: query.port.clone(),
        account: query.account.clone(),
        password: query.password.clone(),
    };
    JenkinsClient::new(http.clone(), &target)
}

/// Raw console text of the latest build.
#[post("/text")]
async fn console_text(
    http: web::Data<reqwest::Client>,
    body: web::Json<JobQuery>,
) -> AppResult<HttpResponse> {
    let client = client_for(http.get_ref(), &body);
    let text = client
        .console_text(&body.view_id, body.job_name.as_deref())
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok("query ok", text)))
}

/// Pipeline step log of the last successful build.
#[post("/steps")]
async fn pipeline_steps(
    http: web::Data<reqwest::Client>,
    body: web::Json<JobQuery>,
) -> AppResult<HttpResponse> {
    let client = client_for(http.get_ref(), &body);
    let steps = client
        .pipeline_steps(&body.view_id, body.job_name.as_deref())
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok("query ok", steps)))
}

/// Pipeline stage graph of the latest build.
#[post("/graph")]
async fn pipeline_graph(
    http: web::Data<reqwest::Client>,
    body: web::Json<JobQuery>,
) -> AppResult<HttpResponse> {
    let client = client_for(http.get_ref(), &body);
    let graph = client
        .pipeline_graph(&body.view_id, body.job_name.as_deref())
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok("query ok", graph)))
}

/// Delete the latest build of a job.
#[post("/delete")]
async fn delete_build(
    http: web::Data<reqwest::Client>,
    body: web::Json<JobQuery>,
) -> AppResult<HttpResponse> {
    info!(view_id = %body.view_id, job_name = ?body.job_name, "deleting latest build");

    let client = client_for(http.get_ref(), &body);
    let number = client
        .delete_last_build(&body.view_id, body.job_name.as_deref())
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(format!("build #{number} deleted"), ())))
}
