//! Todo CRUD against PostgreSQL.

use crate::error::AppError;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

#[derive(Clone, Debug, Serialize, sqlx::FromRow)]
pub struct Todo {
    pub id: i32,
    pub title: String,
    pub completed: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct NewTodo {
    pub title: Option<String>,
}

/// Partial update: absent fields retain the stored value.
#[derive(Debug, Default, Deserialize)]
pub struct TodoPatch {
    pub title: Option<String>,
    pub completed: Option<bool>,
}

const DEFAULT_TITLE: &str = "Untitled";

pub struct TodoService;

impl TodoService {
    pub async fn list(pool: &PgPool) -> Result<Vec<Todo>, AppError> {
        let todos = sqlx::query_as("SELECT id, title, completed FROM todos ORDER BY id")
            .fetch_all(pool)
            .await?;
        Ok(todos)
    }

    pub async fn get(pool: &PgPool, id: i32) -> Result<Option<Todo>, AppError> {
        let todo = sqlx::query_as("SELECT id, title, completed FROM todos WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(todo)
    }

    pub async fn create(pool: &PgPool, new: &NewTodo) -> Result<Todo, AppError> {
        let title = new.title.as_deref().unwrap_or(DEFAULT_TITLE);
        let todo = sqlx::query_as(
            "INSERT INTO todos (title) VALUES ($1) RETURNING id, title, completed",
        )
        .bind(title)
        .fetch_one(pool)
        .await?;
        Ok(todo)
    }

    /// COALESCE keeps the stored value for any field the patch leaves unset.
    pub async fn update(pool: &PgPool, id: i32, patch: &TodoPatch) -> Result<Option<Todo>, AppError> {
        let todo = sqlx::query_as(
            "UPDATE todos SET title = COALESCE($1, title), completed = COALESCE($2, completed) \
             WHERE id = $3 RETURNING id, title, completed",
        )
        .bind(patch.title.as_deref())
        .bind(patch.completed)
        .bind(id)
        .fetch_optional(pool)
        .await?;
        Ok(todo)
    }

    pub async fn delete(pool: &PgPool, id: i32) -> Result<Option<Todo>, AppError> {
        let todo = sqlx::query_as(
            "DELETE FROM todos WHERE id = $1 RETURNING id, title, completed",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;
        Ok(todo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_todo_tolerates_missing_and_extra_fields() {
        let new: NewTodo = serde_json::from_str("{}").unwrap();
        assert!(new.title.is_none());
        let new: NewTodo = serde_json::from_str(r#"{"title":"x","junk":1}"#).unwrap();
        assert_eq!(new.title.as_deref(), Some("x"));
    }

    #[test]
    fn patch_distinguishes_absent_from_false() {
        let patch: TodoPatch = serde_json::from_str(r#"{"completed":false}"#).unwrap();
        assert_eq!(patch.completed, Some(false));
        assert!(patch.title.is_none());
        let patch: TodoPatch = serde_json::from_str("{}").unwrap();
        assert!(patch.completed.is_none());
    }

    #[test]
    fn todo_serializes_the_api_shape() {
        let todo = Todo {
            id: 7,
            title: "walk the dog".into(),
            completed: false,
        };
        let value = serde_json::to_value(&todo).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"id": 7, "title": "walk the dog", "completed": false})
        );
    }
}
