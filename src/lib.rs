//! Platform definition compiler and demo CRUD services.

pub mod build;
pub mod config;
pub mod error;
pub mod handlers;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use build::{build_platforms, BuildOptions, BuildSummary};
pub use config::{load_platform_config, PlatformConfig, PLATFORM_CONFIG_FILE};
pub use error::{AppError, BuildError};
pub use routes::{blob_routes, todo_routes};
pub use service::{BlobStore, StoragePolicy, TodoService};
pub use state::{BlobState, TodoState};
pub use store::{ensure_todos_table, pg_pool_from_env};
