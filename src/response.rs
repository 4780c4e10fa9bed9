//! Response bodies for the demo services.

use crate::service::blobs::BlobEntry;
use crate::service::todos::Todo;
use serde::Serialize;

#[derive(Serialize)]
pub struct TodoListBody {
    pub todos: Vec<Todo>,
}

#[derive(Serialize)]
pub struct DeletedBody {
    pub deleted: Todo,
}

/// Default response for unmatched todo-api routes.
#[derive(Serialize)]
pub struct ApiInfoBody {
    pub message: &'static str,
    pub database: String,
    pub endpoints: Vec<&'static str>,
}

#[derive(Serialize)]
pub struct HealthBody {
    pub status: &'static str,
    pub container: String,
    pub policy: String,
    pub timestamp: String,
}

#[derive(Serialize)]
pub struct BlobListBody {
    pub blobs: Vec<BlobEntry>,
    pub count: usize,
}

#[derive(Serialize)]
pub struct BlobContentBody {
    pub name: String,
    pub content: String,
}

#[derive(Serialize)]
pub struct BlobChangedBody {
    pub message: &'static str,
    pub name: String,
}

pub fn error_body(message: String) -> serde_json::Value {
    serde_json::json!({ "error": message })
}
