//! Task API endpoints
//!
//! Each handler parses its raw input into typed fields, calls the task
//! service, and maps domain errors to HTTP responses via [`ApiError`].

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::Value;

use tt_core::id::{TaskId, UserId};
use tt_core::task::TaskStatus;

use crate::error::ApiError;
use crate::router::{PathParams, QueryParams};
use crate::state::AppState;

const MAX_TITLE_CHARS: usize = 255;
const MAX_DESCRIPTION_CHARS: usize = 1000;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateTaskRequest {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    assignee_id: Option<String>,
}

/// GET /tasks - list tasks, optionally filtered by `status` / `assigneeId`
pub async fn list_tasks(state: &AppState, query: &QueryParams) -> Result<Response, ApiError> {
    let status = query
        .get("status")
        .map(|raw| {
            raw.parse::<TaskStatus>()
                .map_err(|_| ApiError::Validation(format!("Invalid status value provided: '{raw}'.")))
        })
        .transpose()?;

    let assignee_id = query
        .get("assigneeId")
        .map(|raw| {
            raw.parse::<UserId>().map_err(|_| {
                ApiError::Validation(format!("Invalid assignee UUID format provided: '{raw}'."))
            })
        })
        .transpose()?;

    let tasks = state
        .service()
        .list_tasks(status, assignee_id)
        .await
        .map_err(|err| ApiError::Internal(err.to_string()))?;

    Ok(Json(tasks).into_response())
}

/// POST /tasks - create a task
pub async fn create_task(state: &AppState, body: &[u8]) -> Result<Response, ApiError> {
    let request: CreateTaskRequest = serde_json::from_slice(body)
        .map_err(|err| ApiError::Validation(format!("Invalid JSON payload: {err}")))?;

    let mut errors = std::collections::BTreeMap::new();
    let mut push = |field: &str, message: &str| {
        errors
            .entry(field.to_string())
            .or_insert_with(Vec::new)
            .push(message.to_string());
    };

    let title = request.title.unwrap_or_default();
    if title.trim().is_empty() {
        push("title", "This value should not be blank.");
    } else if title.chars().count() > MAX_TITLE_CHARS {
        push(
            "title",
            "This value is too long. It should have 255 characters or less.",
        );
    }

    if let Some(description) = &request.description {
        if description.chars().count() > MAX_DESCRIPTION_CHARS {
            push(
                "description",
                "This value is too long. It should have 1000 characters or less.",
            );
        }
    }

    let status_text = request.status.unwrap_or_default();
    if status_text.trim().is_empty() {
        push("status", "This value should not be blank.");
    } else if status_text.parse::<TaskStatus>().is_err() {
        push(
            "status",
            "Invalid status value. Allowed values are: todo, in_progress, done",
        );
    }

    let mut assignee_id = None;
    if let Some(raw) = &request.assignee_id {
        match raw.parse::<UserId>() {
            Ok(id) => assignee_id = Some(id),
            Err(_) => push("assigneeId", "This is not a valid UUID."),
        }
    }

    if !errors.is_empty() {
        return Err(ApiError::ValidationErrors(errors));
    }

    let view = state
        .service()
        .create_task(title, request.description, &status_text, assignee_id)
        .await
        .map_err(|err| ApiError::from_domain(err, "Creation rejected"))?;

    Ok((StatusCode::CREATED, Json(view)).into_response())
}

/// PATCH /tasks/{id} - change a task's status
pub async fn update_status(
    state: &AppState,
    params: &PathParams,
    body: &[u8],
) -> Result<Response, ApiError> {
    let id = parse_task_id(params)?;
    let payload = parse_json_object(body)?;

    let status_text = match payload.get("status") {
        Some(Value::String(text)) if !text.trim().is_empty() => text,
        _ => {
            return Err(ApiError::Validation(
                "Missing or invalid required field: status (must be non-empty string)".to_string(),
            ))
        }
    };

    let status: TaskStatus = status_text
        .parse()
        .map_err(|err: tt_core::Error| ApiError::Validation(format!("Invalid input: {err}")))?;

    let view = state
        .service()
        .update_status(id, status)
        .await
        .map_err(|err| ApiError::from_domain(err, "Update rejected"))?;

    Ok(Json(view).into_response())
}

/// PATCH /tasks/{id}/assign - assign or unassign a task
pub async fn assign_task(
    state: &AppState,
    params: &PathParams,
    body: &[u8],
) -> Result<Response, ApiError> {
    let id = parse_task_id(params)?;
    let payload = parse_json_object(body)?;

    // The key must be present; null is the explicit unassign value
    let Some(raw_assignee) = payload.get("assigneeId") else {
        return Err(ApiError::Validation(
            "Missing required field: assigneeId (can be null to unassign)".to_string(),
        ));
    };

    let assignee_id = match raw_assignee {
        Value::Null => None,
        Value::String(text) => Some(text.parse::<UserId>().map_err(|_| {
            ApiError::Validation(format!(
                "Invalid input: Invalid assignee UUID format provided: '{text}'."
            ))
        })?),
        _ => {
            return Err(ApiError::Validation(
                "Invalid assigneeId field: must be null or a string UUID".to_string(),
            ))
        }
    };

    let view = state
        .service()
        .assign(id, assignee_id)
        .await
        .map_err(|err| ApiError::from_domain(err, "Assignment rejected"))?;

    Ok(Json(view).into_response())
}

fn parse_task_id(params: &PathParams) -> Result<TaskId, ApiError> {
    let raw = params.get("id").map(String::as_str).unwrap_or_default();
    raw.parse()
        .map_err(|err: tt_core::Error| ApiError::Validation(format!("Invalid input: {err}")))
}

fn parse_json_object(body: &[u8]) -> Result<Value, ApiError> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|err| ApiError::Validation(format!("Invalid JSON payload: {err}")))?;
    if !value.is_object() {
        return Err(ApiError::Validation(
            "Invalid JSON payload: expected a JSON object".to_string(),
        ));
    }
    Ok(value)
}
