//! Business rules between the HTTP handlers and the repositories.
//!
//! Each module is a set of free async functions taking the pool (and the
//! file store where media content is involved). They perform existence
//! checks, uniqueness checks and cascading cleanup, and return
//! [`AppResult`](crate::error::AppResult) so handlers can use `?` directly.
//! Publishing change notifications is left to the handlers.

pub mod account;
pub mod collaborator;
pub mod link;
pub mod media;
pub mod project;
pub mod request;
pub mod tag;
pub mod template;
