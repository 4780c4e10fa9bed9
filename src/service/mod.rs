pub mod blobs;
pub mod todos;

pub use blobs::{BlobEntry, BlobStore, StoragePolicy};
pub use todos::{NewTodo, Todo, TodoPatch, TodoService};
