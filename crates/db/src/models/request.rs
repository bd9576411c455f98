//! Change-request model, delta rows and DTOs.

use portfolio_core::requests::{Delta, DeltaPlan, FieldEdits, ProjectFields};
use portfolio_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `requests` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Request {
    pub id: DbId,
    pub project_id: DbId,
    pub username: String,
    pub new_title: Option<String>,
    pub new_description: Option<String>,
    pub new_bibtex: Option<String>,
    pub is_counteroffer: bool,
    pub created_at: Timestamp,
}

impl Request {
    pub fn field_edits(&self) -> FieldEdits {
        FieldEdits {
            new_title: self.new_title.clone(),
            new_description: self.new_description.clone(),
            new_bibtex: self.new_bibtex.clone(),
        }
    }
}

/// One row of any of the four `request_*` delta tables.
///
/// `target_id` is the tag, media, link or collaborator the delta refers to.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RequestChange {
    pub id: DbId,
    pub request_id: DbId,
    pub target_id: DbId,
    pub is_remove: bool,
}

impl RequestChange {
    pub fn as_delta(&self) -> Delta {
        Delta {
            target: self.target_id,
            is_remove: self.is_remove,
        }
    }
}

/// A media delta joined with the media it refers to.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RequestMediaEntry {
    pub id: DbId,
    pub request_id: DbId,
    pub is_remove: bool,
    pub media_id: DbId,
    pub name: String,
    pub path: String,
}

/// A request together with all of its delta rows.
#[derive(Debug, Clone, Serialize)]
pub struct RequestDetail {
    #[serde(flatten)]
    pub request: Request,
    pub tags: Vec<RequestChange>,
    pub media: Vec<RequestChange>,
    pub links: Vec<RequestChange>,
    pub collaborators: Vec<RequestChange>,
}

/// The four delta tables, with their target column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Tag,
    Media,
    Link,
    Collaborator,
}

impl ChangeKind {
    pub fn table(self) -> &'static str {
        match self {
            ChangeKind::Tag => "request_tag_projects",
            ChangeKind::Media => "request_media_projects",
            ChangeKind::Link => "request_link_projects",
            ChangeKind::Collaborator => "request_collaborators_projects",
        }
    }

    pub fn target_column(self) -> &'static str {
        match self {
            ChangeKind::Tag => "tag_id",
            ChangeKind::Media => "media_id",
            ChangeKind::Link => "link_id",
            ChangeKind::Collaborator => "collaborator_id",
        }
    }
}

// ---------------------------------------------------------------------------
// DTOs (request payloads)
// ---------------------------------------------------------------------------

/// An add/remove entry in a request payload.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct DeltaInput {
    pub id: DbId,
    #[serde(default)]
    pub is_remove: bool,
}

impl From<DeltaInput> for Delta {
    fn from(input: DeltaInput) -> Self {
        Delta {
            target: input.id,
            is_remove: input.is_remove,
        }
    }
}

/// Body of `POST /request/project/{project_id}` and of counter-offers.
///
/// Media and links can only be proposed for removal here; proposed additions
/// are uploaded through the media and link endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateRequest {
    pub new_title: Option<String>,
    pub new_description: Option<String>,
    pub new_bibtex: Option<String>,
    #[serde(default)]
    pub tags: Vec<DeltaInput>,
    #[serde(default)]
    pub collaborators: Vec<DeltaInput>,
    #[serde(default)]
    pub removed_media: Vec<DbId>,
    #[serde(default)]
    pub removed_links: Vec<DbId>,
}

impl CreateRequest {
    pub fn field_edits(&self) -> FieldEdits {
        FieldEdits {
            new_title: self.new_title.clone(),
            new_description: self.new_description.clone(),
            new_bibtex: self.new_bibtex.clone(),
        }
    }
}

/// Body of `POST /tags/request/...` and `POST /collaborator/request/...`.
#[derive(Debug, Clone, Deserialize)]
pub struct ProposeChange {
    #[serde(default)]
    pub is_remove: bool,
}

// ---------------------------------------------------------------------------
// Acceptance plan
// ---------------------------------------------------------------------------

/// Everything needed to apply an accepted request in one transaction.
#[derive(Debug, Clone)]
pub struct AcceptPlan {
    pub request_id: DbId,
    pub project_id: DbId,
    /// New project fields; `None` when the request proposes no field edits.
    pub fields: Option<ProjectFields>,
    pub tags: DeltaPlan,
    pub collaborators: DeltaPlan,
    pub media: DeltaPlan,
    pub links: DeltaPlan,
}
