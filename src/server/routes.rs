//! HTTP routes for task creation, listing, and result retrieval.

use super::{response::ApiError, state::AppState};
use crate::task::{
    domain::{Task, TaskId, TaskPayload},
    services::CreateTaskRequest,
};
use axum::{
    Json, Router,
    body::Bytes,
    extract::{Query, State, rejection::QueryRejection},
    http::{HeaderName, header},
    response::IntoResponse,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Response header naming where a result body was read from.
pub const RESULT_SOURCE_HEADER: HeaderName = HeaderName::from_static("x-result-source");

/// Builds the API router.
#[must_use]
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/tasks/create", post(create_task))
        .route("/api/tasks/list", get(list_tasks))
        .route("/api/results", get(get_result))
        .route("/api/health", get(health))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct CreateTaskQuery {
    #[serde(rename = "type")]
    mode: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ListTasksQuery {
    task_id: Option<TaskId>,
    limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct ResultQuery {
    task_id: Option<TaskId>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum TaskListing {
    Single(Task),
    Many(Vec<Task>),
}

fn query_error(rejection: &QueryRejection) -> ApiError {
    ApiError::bad_request(rejection.body_text())
}

async fn create_task(
    State(state): State<AppState>,
    query: Result<Query<CreateTaskQuery>, QueryRejection>,
    body: Bytes,
) -> Result<Json<Task>, ApiError> {
    let Query(CreateTaskQuery { mode }) = query.map_err(|rejection| query_error(&rejection))?;
    let document: Value = serde_json::from_slice(&body)
        .map_err(|err| ApiError::bad_request(format!("invalid JSON body: {err}")))?;
    let payload =
        TaskPayload::new(document).map_err(|err| ApiError::bad_request(err.to_string()))?;

    let mut request = CreateTaskRequest::new(payload);
    if let Some(raw_mode) = mode {
        request = request.with_mode(raw_mode);
    }
    let task = state
        .dispatcher()
        .create(request)
        .await
        .map_err(|err| ApiError::from_service("task creating", &err))?;
    Ok(Json(task))
}

async fn list_tasks(
    State(state): State<AppState>,
    query: Result<Query<ListTasksQuery>, QueryRejection>,
) -> Result<Json<TaskListing>, ApiError> {
    let Query(ListTasksQuery { task_id, limit }) =
        query.map_err(|rejection| query_error(&rejection))?;
    let lifecycle = state.lifecycle();

    let listing = if let Some(id) = task_id {
        lifecycle.find(id).await.map(TaskListing::Single)
    } else {
        lifecycle.list(limit).await.map(TaskListing::Many)
    }
    .map_err(|err| ApiError::from_service("tasks listing", &err))?;
    Ok(Json(listing))
}

async fn get_result(
    State(state): State<AppState>,
    query: Result<Query<ResultQuery>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(ResultQuery { task_id }) = query.map_err(|rejection| query_error(&rejection))?;
    let id = task_id.ok_or_else(|| ApiError::bad_request("missing parameter 'task_id'"))?;

    let resolved = state
        .resolver()
        .resolve(id)
        .await
        .map_err(|err| ApiError::from_service("getting results", &err))?;
    let source = resolved.source().as_str();
    Ok((
        [
            (header::CONTENT_TYPE, "application/json"),
            (RESULT_SOURCE_HEADER, source),
        ],
        resolved.into_body(),
    ))
}

async fn health() -> Json<Value> {
    Json(json!({"status": "up"}))
}
