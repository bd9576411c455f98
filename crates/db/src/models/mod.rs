//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO for edits

pub mod account;
pub mod collaborator;
pub mod link;
pub mod media;
pub mod project;
pub mod request;
pub mod tag;
pub mod template;
