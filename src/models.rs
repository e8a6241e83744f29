//! Domain models: node rows, request bodies, Jenkins wire DTOs and the
//! UI-facing summary shapes the dashboard consumes.

use serde::{Deserialize, Serialize};

/// A server node row: connection credentials for one remote CI server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerNode {
    pub id: i64,
    pub name: String,
    pub host: String,
    pub port: String,
    pub account: String,
    pub password: String,
    pub status: bool,
    pub remark: String,
    pub create_time: String,
    pub update_time: String,
}

/// Create node request.
#[derive(Debug, Deserialize)]
pub struct CreateNodeRequest {
    pub name: String,
    pub host: String,
    #[serde(default)]
    pub port: String,
    pub account: String,
    pub password: String,
    #[serde(default)]
    pub status: bool,
    #[serde(default)]
    pub remark: String,
}

/// Update node request. The id rides in the body, as the dashboard sends it.
#[derive(Debug, Deserialize)]
pub struct UpdateNodeRequest {
    pub id: i64,
    pub name: String,
    pub host: String,
    #[serde(default)]
    pub port: String,
    pub account: String,
    pub password: String,
    #[serde(default)]
    pub status: bool,
    #[serde(default)]
    pub remark: String,
}

/// The credentials quartet every Jenkins proxy endpoint receives.
#[derive(Debug, Clone, Deserialize)]
pub struct JenkinsTarget {
    pub host: String,
    pub port: String,
    pub account: String,
    pub password: String,
}

/// Query parameters for folder-scoped job operations.
#[derive(Debug, Deserialize)]
pub struct JobQuery {
    #[serde(rename = "nodeId")]
    pub node_id: String,
    #[serde(rename = "viewId")]
    pub view_id: String,
    pub host: String,
    pub port: String,
    pub account: String,
    pub password: String,
    #[serde(default, rename = "jobname")]
    pub job_name: Option<String>,
}

/// Body for build trigger / stop / console operations. `view_id` is the
/// top-level job or folder; `view_name` the nested job inside a folder.
#[derive(Debug, Deserialize)]
pub struct BuildRequest {
    #[serde(rename = "viewId")]
    pub view_id: String,
    #[serde(default, rename = "viewName")]
    pub view_name: Option<String>,
    #[serde(default, rename = "nodeId")]
    pub node_id: Option<String>,
    pub host: String,
    pub port: String,
    pub account: String,
    pub password: String,
}

impl BuildRequest {
    pub fn target(&self) -> JenkinsTarget {
        JenkinsTarget {
            host: self.host.clone(),
            port: self.port.clone(),
            account: self.account.clone(),
            password: self.password.clone(),
        }
    }
}

/// One top-level Jenkins item as the dashboard's view list renders it.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ViewSummary {
    pub id: String,
    pub node_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub weather: String,
    #[serde(rename = "lastSuccess")]
    pub last_success: String,
    #[serde(rename = "lastFailure")]
    pub last_failure: String,
    #[serde(rename = "lastDuration")]
    pub last_duration: String,
    #[serde(rename = "createTime")]
    pub create_time: String,
}

/// One job inside a folder, with build history highlights.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct JobSummary {
    pub name: String,
    pub url: String,
    pub color: String,
    pub weather: String,
    #[serde(rename = "lastSuccess")]
    pub last_success: String,
    #[serde(rename = "lastSuccessDuration")]
    pub last_success_duration: String,
    #[serde(rename = "lastFailure")]
    pub last_failure: String,
    #[serde(rename = "lastFailureDuration")]
    pub last_failure_duration: String,
    #[serde(rename = "lastDuration")]
    pub last_duration: String,
    #[serde(rename = "createTime")]
    pub create_time: String,
}

/// Uniform response envelope.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub message: String,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data,
        }
    }
}

/// Login response shape expected by the dashboard shell.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub data: UserData,
}

#[derive(Debug, Serialize)]
pub struct UserData {
    pub avatar: String,
    pub username: String,
    pub nickname: String,
    pub roles: Vec<String>,
    pub permissions: Vec<String>,
    #[serde(rename = "accessToken")]
    pub access_token: String,
    #[serde(rename = "refreshToken")]
    pub refresh_token: String,
    pub expires: String,
}

/// Login request parameters.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

// --- Raw Jenkins wire shapes (deserialize only) ---

/// Response of `api/json?tree=jobs[...]` at the server root or a folder.
#[derive(Debug, Deserialize)]
pub struct RawJobList {
    #[serde(default)]
    pub jobs: Vec<RawJob>,
}

/// One job entry in a Jenkins tree response. Absent builds come back as
/// JSON null, hence the Options.
#[derive(Debug, Deserialize)]
pub struct RawJob {
    #[serde(rename = "_class", default)]
    pub class: String,
    pub name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub color: String,
    #[serde(default, rename = "healthReport")]
    pub health_report: Vec<RawHealthReport>,
    #[serde(default, rename = "lastSuccessfulBuild")]
    pub last_successful_build: Option<RawBuildRef>,
    #[serde(default, rename = "lastFailedBuild")]
    pub last_failed_build: Option<RawBuildRef>,
    #[serde(default, rename = "lastBuild")]
    pub last_build: Option<RawBuildRef>,
}

#[derive(Debug, Deserialize)]
pub struct RawHealthReport {
    pub score: i64,
}

/// Build reference: only the fields our tree queries ask for are present.
#[derive(Debug, Default, Deserialize)]
pub struct RawBuildRef {
    #[serde(default)]
    pub number: i64,
    #[serde(default)]
    pub timestamp: i64,
    #[serde(default)]
    pub duration: i64,
}

/// Response of `lastBuild/api/json?tree=number`.
#[derive(Debug, Deserialize)]
pub struct RawBuildNumber {
    pub number: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_job_tolerates_null_builds() {
        let raw = r#"{
            "_class": "hudson.model.FreeStyleProject",
            "name": "deploy",
            "color": "blue",
            "lastSuccessfulBuild": {"timestamp": 1742290000000},
            "lastFailedBuild": null,
            "lastBuild": {"duration": 61500}
        }"#;
        let job: RawJob = serde_json::from_str(raw).unwrap();
        assert_eq!(job.name, "deploy");
        assert!(job.last_failed_build.is_none());
        assert_eq!(job.last_build.unwrap().duration, 61500);
    }

    #[test]
    fn view_summary_serializes_dashboard_field_names() {
        let view = ViewSummary {
            id: "deploy".into(),
            node_id: "deploy".into(),
            name: "deploy".into(),
            kind: "job".into(),
            weather: "sunny".into(),
            last_success: "2025-03-18 10:00:00".into(),
            last_failure: "N/A".into(),
            last_duration: "1 min 1 sec".into(),
            create_time: "2025-03-18 10:00:00".into(),
        };
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["type"], "job");
        assert_eq!(json["lastSuccess"], "2025-03-18 10:00:00");
        assert_eq!(json["createTime"], "2025-03-18 10:00:00");
    }
}
