//! Freya Endpoints
//!
//! Ideas, tasks, PRD documents, images, diagrams and task metrics.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{accepted, post, Backend, Endpoint, Method};
use crate::error::ApiError;
use crate::models::{
    ApiResponse, Diagram, FilePreview, Idea, ImageAsset, PrdDocument, Task, TaskMetrics, TaskStatus,
};

// ========================
// Envelopes
// ========================

/// `/api/prd` answers with a plain list or `{success, documents}`
#[derive(Deserialize)]
#[serde(untagged)]
enum PrdListing {
    Plain(Vec<PrdDocument>),
    Envelope {
        #[serde(default)]
        success: bool,
        #[serde(default)]
        documents: Vec<PrdDocument>,
        #[serde(default)]
        error: Option<String>,
    },
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct MetricsEnvelope {
    success: bool,
    data: Option<TaskMetrics>,
    error: Option<String>,
}

#[derive(Serialize)]
struct StatusArgs<'a> {
    status: &'a str,
}

// Path segments keep their slashes
const PATH_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'?')
    .add(b'{')
    .add(b'}');

const SEGMENT_ENCODE_SET: &AsciiSet = &PATH_ENCODE_SET.add(b'/');

/// Route for `/api/file/{path}`: absolute paths are cut after `/docs/`
pub fn file_route(file_path: &str) -> String {
    let relative = match file_path.split_once("/docs/") {
        Some((_, rest)) => rest,
        None => file_path.trim_start_matches('/'),
    };
    let encoded = relative.replace('\\', "/");
    format!("/api/file/{}", utf8_percent_encode(&encoded, PATH_ENCODE_SET))
}

// ========================
// Ideas
// ========================

pub async fn list_ideas<B: Backend>(api: &B) -> Result<Vec<Idea>, ApiError> {
    api.get(&Endpoint::freya("/api/ideas")).await
}

/// Create or update (payload carries `id`) an idea
pub async fn save_idea<B: Backend>(api: &B, payload: &Value) -> Result<ApiResponse, ApiError> {
    post(api, Endpoint::freya("/api/ideas"), payload).await
}

// ========================
// Tasks
// ========================

pub async fn list_tasks<B: Backend>(api: &B) -> Result<Vec<Task>, ApiError> {
    api.get(&Endpoint::freya("/api/tasks")).await
}

pub async fn save_task<B: Backend>(api: &B, payload: &Value) -> Result<ApiResponse, ApiError> {
    post(api, Endpoint::freya("/api/tasks"), payload).await
}

pub async fn update_task_status<B: Backend>(
    api: &B,
    task_id: &str,
    status: TaskStatus,
) -> Result<ApiResponse, ApiError> {
    let endpoint = Endpoint::freya(format!(
        "/api/tasks/{}/status",
        utf8_percent_encode(task_id, SEGMENT_ENCODE_SET)
    ));
    let response: ApiResponse = api
        .send(Method::Put, &endpoint, &StatusArgs { status: status.as_str() })
        .await?;
    accepted(response)
}

pub async fn task_metrics<B: Backend>(api: &B) -> Result<TaskMetrics, ApiError> {
    let envelope: MetricsEnvelope = api.get(&Endpoint::freya("/api/metrics/tasks")).await?;
    match envelope {
        MetricsEnvelope { success: true, data: Some(data), .. } => Ok(data),
        MetricsEnvelope { error, .. } => Err(ApiError::Rejected(error.unwrap_or_default())),
    }
}

// ========================
// Documents
// ========================

pub async fn list_prd_docs<B: Backend>(api: &B) -> Result<Vec<PrdDocument>, ApiError> {
    match api.get(&Endpoint::freya("/api/prd")).await? {
        PrdListing::Plain(docs) => Ok(docs),
        PrdListing::Envelope { success: true, documents, .. } => Ok(documents),
        PrdListing::Envelope { error, .. } => Err(ApiError::Rejected(error.unwrap_or_default())),
    }
}

pub async fn file_preview<B: Backend>(api: &B, file_path: &str) -> Result<FilePreview, ApiError> {
    let preview: FilePreview = api.get(&Endpoint::freya(file_route(file_path))).await?;
    if preview.success {
        Ok(preview)
    } else {
        Err(ApiError::Rejected(preview.error.unwrap_or_default()))
    }
}

// ========================
// Images & Diagrams
// ========================

pub async fn list_images<B: Backend>(api: &B) -> Result<Vec<ImageAsset>, ApiError> {
    api.get(&Endpoint::freya("/api/images")).await
}

pub async fn list_diagrams<B: Backend>(api: &B) -> Result<Vec<Diagram>, ApiError> {
    api.get(&Endpoint::freya("/api/diagrams")).await
}

pub async fn create_diagram<B: Backend>(api: &B, payload: &Value) -> Result<ApiResponse, ApiError> {
    post(api, Endpoint::freya("/api/diagram/create"), payload).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockBackend;
    use futures::executor::block_on;
    use serde_json::json;

    #[test]
    fn file_route_cuts_absolute_docs_path() {
        assert_eq!(file_route("/home/me/game/docs/PRD/combat.md"), "/api/file/PRD/combat.md");
        assert_eq!(file_route("PRD/open world.md"), "/api/file/PRD/open%20world.md");
    }

    #[test]
    fn prd_listing_accepts_envelope_and_plain_list() {
        let api = MockBackend::new();
        api.respond_get("/api/prd", json!({"success": true, "documents": [{"title": "Combat", "path": "c.md"}]}));
        let docs = block_on(list_prd_docs(&api)).unwrap();
        assert_eq!(docs[0].file_path, "c.md");

        api.respond_get("/api/prd", json!([{"title": "Story", "file_path": "s.md"}]));
        let docs = block_on(list_prd_docs(&api)).unwrap();
        assert_eq!(docs[0].title, "Story");
    }

    #[test]
    fn prd_listing_failure_is_rejected() {
        let api = MockBackend::new();
        api.respond_get("/api/prd", json!({"success": false, "error": "PRD directory not found"}));
        let err = block_on(list_prd_docs(&api)).unwrap_err();
        assert_eq!(err, ApiError::Rejected("PRD directory not found".into()));
    }

    #[test]
    fn status_update_puts_wire_status() {
        let api = MockBackend::new();
        api.respond_send(Method::Put, "/api/tasks/t-1/status", json!({"success": true}));
        block_on(update_task_status(&api, "t-1", TaskStatus::InProgress)).unwrap();

        let calls = api.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].method, Some(Method::Put));
        assert_eq!(calls[0].payload, Some(json!({"status": "InProgress"})));
    }

    #[test]
    fn metrics_unwrap_data() {
        let api = MockBackend::new();
        api.respond_get(
            "/api/metrics/tasks",
            json!({"success": true, "data": {"status_counts": {"Done": 2}, "timeline_data": [{"date": "2024-01-01", "count": 2}]}}),
        );
        let metrics = block_on(task_metrics(&api)).unwrap();
        assert_eq!(metrics.status_counts.get("Done"), Some(&2));
        assert_eq!(metrics.timeline_data.len(), 1);
    }

    #[test]
    fn rejected_save_carries_server_error() {
        let api = MockBackend::new();
        api.respond_send(Method::Post, "/api/ideas", json!({"success": false, "error": "disk full"}));
        let err = block_on(save_idea(&api, &json!({"title": "x"}))).unwrap_err();
        assert_eq!(err.server_message(), Some("disk full"));
    }
}
