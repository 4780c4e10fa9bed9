//! Todo API handlers: list, get, create, update, delete.

use crate::error::AppError;
use crate::response::{ApiInfoBody, DeletedBody, TodoListBody};
use crate::service::todos::{NewTodo, TodoPatch, TodoService};
use crate::state::TodoState;
use crate::store::ensure_todos_table;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

pub async fn list(State(state): State<TodoState>) -> Result<impl axum::response::IntoResponse, AppError> {
    ensure_todos_table(&state.pool).await?;
    let todos = TodoService::list(&state.pool).await?;
    Ok((StatusCode::OK, Json(TodoListBody { todos })))
}

pub async fn read(
    State(state): State<TodoState>,
    Path(id): Path<i32>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    ensure_todos_table(&state.pool).await?;
    let todo = TodoService::get(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("todo {id}")))?;
    Ok((StatusCode::OK, Json(todo)))
}

/// A missing or malformed body creates an untitled todo.
pub async fn create(
    State(state): State<TodoState>,
    body: Option<Json<NewTodo>>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    ensure_todos_table(&state.pool).await?;
    let new = body.map(|Json(b)| b).unwrap_or_default();
    let todo = TodoService::create(&state.pool, &new).await?;
    Ok((StatusCode::CREATED, Json(todo)))
}

pub async fn update(
    State(state): State<TodoState>,
    Path(id): Path<i32>,
    body: Option<Json<TodoPatch>>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    ensure_todos_table(&state.pool).await?;
    let patch = body.map(|Json(b)| b).unwrap_or_default();
    let todo = TodoService::update(&state.pool, id, &patch)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("todo {id}")))?;
    Ok((StatusCode::OK, Json(todo)))
}

pub async fn delete(
    State(state): State<TodoState>,
    Path(id): Path<i32>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    ensure_todos_table(&state.pool).await?;
    let deleted = TodoService::delete(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("todo {id}")))?;
    Ok((StatusCode::OK, Json(DeletedBody { deleted })))
}

/// Default response for any unmatched route.
pub async fn api_info() -> (StatusCode, Json<ApiInfoBody>) {
    (
        StatusCode::OK,
        Json(ApiInfoBody {
            message: "TODO API",
            database: std::env::var("DB_HOST").unwrap_or_default(),
            endpoints: vec![
                "GET /todos - List all todos",
                "GET /todos/{id} - Get a todo",
                "POST /todos - Create a todo",
                "PUT /todos/{id} - Update a todo",
                "DELETE /todos/{id} - Delete a todo",
            ],
        }),
    )
}
