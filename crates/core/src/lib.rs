//! Domain core for the portfolio backend.
//!
//! Holds everything that has no database or HTTP dependency: the error
//! taxonomy, id types, role enums, change-request planning, media path rules
//! and the file store abstraction.

pub mod error;
pub mod media;
pub mod requests;
pub mod roles;
pub mod storage;
pub mod types;
