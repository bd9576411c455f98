pub mod account;
pub mod collaborator;
pub mod link;
pub mod media;
pub mod project;
pub mod request;
pub mod tags;
pub mod template;
