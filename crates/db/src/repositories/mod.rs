//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Operations touching more
//! than one table run in a single transaction inside the repository.

pub mod account_repo;
pub mod collaborator_repo;
pub mod link_repo;
pub mod media_repo;
pub mod project_account_repo;
pub mod project_repo;
pub mod request_repo;
pub mod tag_repo;
pub mod template_repo;

pub use account_repo::AccountRepo;
pub use collaborator_repo::CollaboratorRepo;
pub use link_repo::LinkRepo;
pub use media_repo::MediaRepo;
pub use project_account_repo::ProjectAccountRepo;
pub use project_repo::ProjectRepo;
pub use request_repo::RequestRepo;
pub use tag_repo::TagRepo;
pub use template_repo::TemplateRepo;
