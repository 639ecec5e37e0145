//! HTTP handlers for entity CRUD and image upload.

pub mod entity;
pub mod upload;
pub use entity::*;
pub use upload::*;
