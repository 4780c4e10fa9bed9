//! Shared application state, constructed by the hosting process and injected
//! into handlers.

use crate::service::blobs::{BlobStore, StoragePolicy};
use sqlx::PgPool;

#[derive(Clone)]
pub struct TodoState {
    pub pool: PgPool,
}

#[derive(Clone)]
pub struct BlobState {
    pub store: BlobStore,
    pub policy: StoragePolicy,
}
