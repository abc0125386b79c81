use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use service::tasks::domain::{TaskInput, TaskView};

use super::auth::AuthenticatedAccount;
use crate::errors::ApiError;
use crate::state::ServerState;

#[utoipa::path(get, path = "/tasks", tag = "tasks", responses((status = 200, description = "Tasks of the caller", body = [crate::openapi::TaskResponse]), (status = 401, description = "Unauthorized")))]
pub async fn list(State(state): State<ServerState>, AuthenticatedAccount(account): AuthenticatedAccount) -> Result<Json<Vec<TaskView>>, ApiError> {
    let tasks = state.tasks.get_user_tasks(account.id).await?;
    Ok(Json(tasks.into_iter().map(TaskView::from).collect()))
}

#[utoipa::path(post, path = "/tasks", tag = "tasks", request_body = crate::openapi::TaskRequest, responses((status = 201, description = "Created", body = crate::openapi::TaskResponse), (status = 401, description = "Unauthorized")))]
pub async fn create(
    State(state): State<ServerState>,
    AuthenticatedAccount(account): AuthenticatedAccount,
    Json(input): Json<TaskInput>,
) -> Result<(StatusCode, Json<TaskView>), ApiError> {
    let task = state.tasks.add_task(account.id, &input.content).await?;
    Ok((StatusCode::CREATED, Json(task.into())))
}

#[utoipa::path(post, path = "/tasks/{id}/toggle", tag = "tasks", params(("id" = Uuid, Path, description = "Task id")), responses((status = 200, description = "Task with flipped completion", body = crate::openapi::TaskResponse), (status = 404, description = "Not found")))]
pub async fn toggle(
    State(state): State<ServerState>,
    AuthenticatedAccount(account): AuthenticatedAccount,
    Path(id): Path<Uuid>,
) -> Result<Json<TaskView>, ApiError> {
    let task = state.tasks.change_complete_status(account.id, id).await?;
    Ok(Json(task.into()))
}

#[utoipa::path(delete, path = "/tasks/{id}", tag = "tasks", params(("id" = Uuid, Path, description = "Task id")), responses((status = 204, description = "Deleted"), (status = 404, description = "Not found")))]
pub async fn delete(
    State(state): State<ServerState>,
    AuthenticatedAccount(account): AuthenticatedAccount,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.tasks.delete_task(account.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
