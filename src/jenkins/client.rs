//! Thin Jenkins REST client.
//!
//! Built per-request from the credentials the dashboard sends; the
//! underlying `reqwest::Client` is shared so connections pool across
//! requests. Every call carries basic auth and the configured timeout.

use tracing::debug;

use crate::errors::{JenkinsError, JenkinsResult};
use crate::jenkins::weather::{
    format_duration_ms, format_timestamp_ms, weather_by_color, weather_by_health, NOT_AVAILABLE,
};
use crate::models::{JenkinsTarget, JobSummary, RawBuildNumber, RawJob, RawJobList, ViewSummary};

/// Tree query for top-level view listings.
const VIEW_TREE: &str =
    "jobs[name,url,color,lastSuccessfulBuild[timestamp],lastFailedBuild[timestamp],lastBuild[duration]]";

/// Tree query for jobs inside a folder.
const FOLDER_TREE: &str = "jobs[name,url,color,healthReport[score],lastSuccessfulBuild[number,duration],lastFailedBuild[number,duration],lastBuild[duration]]";

pub struct JenkinsClient {
    http: reqwest::Client,
    base: String,
    account: String,
    password: String,
}

impl JenkinsClient {
    pub fn new(http: reqwest::Client, target: &JenkinsTarget) -> Self {
        Self {
            http,
            base: format!("http://{}:{}", target.host, target.port),
            account: target.account.clone(),
            password: target.password.clone(),
        }
    }

    /// Top-level jobs and folders, shaped for the dashboard view list.
    pub async fn list_views(&self, node_id: &str) -> JenkinsResult<Vec<ViewSummary>> {
        let url = format!("{}/api/json?tree={}", self.base, VIEW_TREE);
        let body = self.get_text(&url).await?;
        let list: RawJobList = serde_json::from_str(&body)?;

        Ok(list
            .jobs
            .iter()
            .map(|job| view_from_raw(job, node_id))
            .collect())
    }

    /// Jobs inside a folder, with build history highlights.
    pub async fn folder_jobs(&self, folder: &str) -> JenkinsResult<Vec<JobSummary>> {
        let url = format!(
            "{}{}/api/json?tree={}",
            self.base,
            job_path(folder, None),
            FOLDER_TREE
        );
        let body = self.get_text(&url).await?;
        let list: RawJobList = serde_json::from_str(&body)?;

        Ok(list.jobs.iter().map(job_summary_from_raw).collect())
    }

    /// Triggers a build and returns once Jenkins has accepted the request.
    pub async fn trigger_build(&self, view_id: &str, job_name: Option<&str>) -> JenkinsResult<()> {
        let url = format!("{}{}/build", self.base, job_path(view_id, job_name));
        self.post(&url).await?;
        Ok(())
    }

    /// Stops the latest build of a job.
    pub async fn stop_last_build(&self, view_id: &str, job_name: Option<&str>) -> JenkinsResult<i64> {
        let path = job_path(view_id, job_name);
        let number = self.last_build_number(&path, view_id).await?;
        let url = format!("{}{path}/{number}/stop", self.base);
        self.post(&url).await?;
        Ok(number)
    }

    /// Deletes the latest build of a job.
    pub async fn delete_last_build(&self, view_id: &str, job_name: Option<&str>) -> JenkinsResult<i64> {
        let path = job_path(view_id, job_name);
        let number = self.last_build_number(&path, view_id).await?;
        let url = format!("{}{path}/{number}/doDelete", self.base);
        self.post(&url).await?;
        Ok(number)
    }

    /// Raw console text of the latest build.
    pub async fn console_text(&self, view_id: &str, job_name: Option<&str>) -> JenkinsResult<String> {
        let url = format!(
            "{}{}/lastBuild/consoleText",
            self.base,
            job_path(view_id, job_name)
        );
        self.get_text(&url).await
    }

    /// Pipeline step log of the last successful build.
    pub async fn pipeline_steps(&self, view_id: &str, job_name: Option<&str>) -> JenkinsResult<String> {
        let url = format!(
            "{}{}/lastSuccessfulBuild/pipeline-console/allSteps",
            self.base,
            job_path(view_id, job_name)
        );
        self.get_text(&url).await
    }

    /// Pipeline stage graph of the latest build.
    pub async fn pipeline_graph(&self, view_id: &str, job_name: Option<&str>) -> JenkinsResult<String> {
        let url = format!(
            "{}{}/lastBuild/pipeline-graph/tree",
            self.base,
            job_path(view_id, job_name)
        );
        self.get_text(&url).await
    }

    async fn last_build_number(&self, path: &str, job: &str) -> JenkinsResult<i64> {
        let url = format!("{}{path}/lastBuild/api/json?tree=number", self.base);
        let resp = self
            .http
            .get(&url)
            .basic_auth(&self.account, Some(&self.password))
            .send()
            .await?;

        if resp.status().as_u16() == 404 {
            return Err(JenkinsError::NoBuilds(job.to_string()));
        }
        if !resp.status().is_success() {
            return Err(JenkinsError::UpstreamStatus(resp.status().as_u16()));
        }

        let parsed: RawBuildNumber = serde_json::from_str(&resp.text().await?)?;
        Ok(parsed.number)
    }

    async fn get_text(&self, url: &str) -> JenkinsResult<String> {
        let resp = self
            .http
            .get(url)
            .basic_auth(&self.account, Some(&self.password))
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(JenkinsError::UpstreamStatus(resp.status().as_u16()));
        }

        let body = resp.text().await?;
        debug!(url, bytes = body.len(), "jenkins response");
        Ok(body)
    }

    async fn post(&self, url: &str) -> JenkinsResult<()> {
        let resp = self
            .http
            .post(url)
            .basic_auth(&self.account, Some(&self.password))
            .send()
            .await?;

        // build triggers answer 201; stop/doDelete answer 302, which the
        // client follows to a 200 before we see the status
        if !resp.status().is_success() {
            return Err(JenkinsError::UpstreamStatus(resp.status().as_u16()));
        }
        Ok(())
    }
}

/// `/job/{view}` or `/job/{view}/job/{name}` for folder-nested jobs.
fn job_path(view_id: &str, job_name: Option<&str>) -> String {
    match job_name {
        Some(name) if !name.is_empty() => format!("/job/{view_id}/job/{name}"),
        _ => format!("/job/{view_id}"),
    }
}

fn view_from_raw(job: &RawJob, node_id: &str) -> ViewSummary {
    let kind = if job.class.contains("Folder") {
        "folder"
    } else {
        "job"
    };

    ViewSummary {
        id: job.name.clone(),
        node_id: node_id.to_string(),
        name: job.name.clone(),
        kind: kind.to_string(),
        weather: weather_by_color(&job.color).to_string(),
        last_success: format_timestamp_ms(
            job.last_successful_build
                .as_ref()
                .map_or(0, |b| b.timestamp),
        ),
        last_failure: format_timestamp_ms(job.last_failed_build.as_ref().map_or(0, |b| b.timestamp)),
        last_duration: job
            .last_build
            .as_ref()
            .map_or_else(|| NOT_AVAILABLE.to_string(), |b| format_duration_ms(b.duration)),
        create_time: job.url.clone(),
    }
}

fn job_summary_from_raw(job: &RawJob) -> JobSummary {
    let health = job.health_report.first().map_or(0, |r| r.score);

    let (last_success, last_success_duration) = match &job.last_successful_build {
        Some(b) => (format!("#{}", b.number), format_duration_ms(b.duration)),
        None => (NOT_AVAILABLE.to_string(), NOT_AVAILABLE.to_string()),
    };
    let (last_failure, last_failure_duration) = match &job.last_failed_build {
        Some(b) => (format!("#{}", b.number), format_duration_ms(b.duration)),
        None => (NOT_AVAILABLE.to_string(), NOT_AVAILABLE.to_string()),
    };
    let last_duration = job
        .last_build
        .as_ref()
        .map_or_else(|| NOT_AVAILABLE.to_string(), |b| format_duration_ms(b.duration));

    JobSummary {
        name: job.name.clone(),
        url: job.url.clone(),
        color: job.color.clone(),
        weather: weather_by_health(health).to_string(),
        last_success,
        last_success_duration,
        last_failure,
        last_failure_duration,
        last_duration,
        create_time: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::JenkinsTarget;

    /// Answers exactly one connection with a canned HTTP response.
    async fn spawn_stub(response: &'static str) -> std::net::SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            if let Ok((mut sock, _)) = listener.accept().await {
                use tokio::io::{AsyncReadExt, AsyncWriteExt};
                let mut buf = [0u8; 2048];
                let _ = sock.read(&mut buf).await;
                let _ = sock.write_all(response.as_bytes()).await;
            }
        });
        addr
    }

    fn client_for(addr: std::net::SocketAddr) -> JenkinsClient {
        let target = JenkinsTarget {
            host: "127.0.0.1".to_string(),
            port: addr.port().to_string(),
            account: "jenkins".to_string(),
            password: "secret".to_string(),
        };
        JenkinsClient::new(reqwest::Client::new(), &target)
    }

    #[tokio::test]
    async fn trigger_build_accepts_created_status() {
        let addr = spawn_stub(
            "HTTP/1.1 201 Created\r\ncontent-length: 0\r\nconnection: close\r\n\r\n",
        )
        .await;
        assert!(client_for(addr).trigger_build("deploy", None).await.is_ok());
    }

    #[tokio::test]
    async fn trigger_build_propagates_upstream_failure() {
        let addr = spawn_stub(
            "HTTP/1.1 500 Internal Server Error\r\ncontent-length: 0\r\nconnection: close\r\n\r\n",
        )
        .await;
        let err = client_for(addr)
            .trigger_build("deploy", None)
            .await
            .unwrap_err();
        assert!(matches!(err, JenkinsError::UpstreamStatus(500)));
    }

    #[tokio::test]
    async fn missing_last_build_reads_as_no_builds() {
        let addr = spawn_stub(
            "HTTP/1.1 404 Not Found\r\ncontent-length: 0\r\nconnection: close\r\n\r\n",
        )
        .await;
        let err = client_for(addr)
            .stop_last_build("fresh", None)
            .await
            .unwrap_err();
        assert!(matches!(err, JenkinsError::NoBuilds(job) if job == "fresh"));
    }

    #[test]
    fn job_path_nesting() {
        assert_eq!(job_path("deploy", None), "/job/deploy");
        assert_eq!(job_path("deploy", Some("")), "/job/deploy");
        assert_eq!(job_path("gmb", Some("client")), "/job/gmb/job/client");
    }

    #[test]
    fn view_mapping_detects_folders() {
        let list: RawJobList = serde_json::from_str(
            r#"{"jobs": [
                {"_class": "com.cloudbees.hudson.plugins.folder.Folder",
                 "name": "platform", "url": "http://j/job/platform/", "color": ""},
                {"_class": "hudson.model.FreeStyleProject",
                 "name": "deploy", "url": "http://j/job/deploy/", "color": "blue",
                 "lastSuccessfulBuild": {"timestamp": 1742290000000},
                 "lastBuild": {"duration": 61500}}
            ]}"#,
        )
        .unwrap();

        let views: Vec<ViewSummary> = list.jobs.iter().map(|j| view_from_raw(j, "7")).collect();

        assert_eq!(views[0].kind, "folder");
        assert_eq!(views[0].weather, "unknown");
        assert_eq!(views[0].last_success, NOT_AVAILABLE);

        assert_eq!(views[1].kind, "job");
        assert_eq!(views[1].node_id, "7");
        assert_eq!(views[1].weather, "sunny");
        assert_eq!(views[1].last_duration, "1 min 1 sec");
        assert_eq!(views[1].create_time, "http://j/job/deploy/");
    }

    #[test]
    fn job_summary_mapping_uses_health_and_build_numbers() {
        let raw: RawJob = serde_json::from_str(
            r#"{"_class": "hudson.model.FreeStyleProject",
                "name": "client", "url": "http://j/job/gmb/job/client/",
                "color": "red",
                "healthReport": [{"score": 65}],
                "lastSuccessfulBuild": {"number": 18, "duration": 120000},
                "lastFailedBuild": {"number": 20, "duration": 4500},
                "lastBuild": {"duration": 4500}}"#,
        )
        .unwrap();

        let summary = job_summary_from_raw(&raw);
        assert_eq!(summary.weather, "partly-sunny");
        assert_eq!(summary.last_success, "#18");
        assert_eq!(summary.last_success_duration, "2 min 0 sec");
        assert_eq!(summary.last_failure, "#20");
        assert_eq!(summary.last_failure_duration, "4.5 sec");
    }

    #[test]
    fn job_summary_without_builds_is_not_available() {
        let raw: RawJob = serde_json::from_str(
            r#"{"_class": "hudson.model.FreeStyleProject",
                "name": "fresh", "url": "http://j/job/fresh/", "color": "notbuilt"}"#,
        )
        .unwrap();

        let summary = job_summary_from_raw(&raw);
        assert_eq!(summary.weather, "storm"); // no health report reads as 0
        assert_eq!(summary.last_success, NOT_AVAILABLE);
        assert_eq!(summary.last_failure_duration, NOT_AVAILABLE);
        assert_eq!(summary.last_duration, NOT_AVAILABLE);
    }
}
