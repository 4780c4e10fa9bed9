pub mod blobs;
pub mod todos;
