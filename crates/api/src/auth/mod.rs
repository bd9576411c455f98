//! Password handling for accounts.

pub mod password;
