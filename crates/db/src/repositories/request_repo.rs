//! Repository for change requests and their four delta tables.
//!
//! A request is created, extended and resolved here. Resolution (accept,
//! reject, counter-offer) always runs in one transaction so a request is
//! either fully applied or not at all.

use portfolio_core::requests::{plan_deltas, Delta, ProjectFields};
use portfolio_core::types::DbId;
use sqlx::{PgPool, Postgres, Transaction};

use crate::models::link::{CreateLink, Link};
use crate::models::media::{Media, NewMedia};
use crate::models::request::{
    AcceptPlan, ChangeKind, CreateRequest, Request, RequestChange, RequestDetail,
    RequestMediaEntry,
};

const COLUMNS: &str = "id, project_id, username, new_title, new_description, new_bibtex, \
                       is_counteroffer, created_at";

/// Provides persistence for change requests.
pub struct RequestRepo;

impl RequestRepo {
    /// Insert a request together with its tag, collaborator, media-removal and
    /// link-removal deltas.
    pub async fn create(
        pool: &PgPool,
        project_id: DbId,
        username: &str,
        input: &CreateRequest,
        is_counteroffer: bool,
    ) -> Result<Request, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let request = create_inner(&mut tx, project_id, username, input, is_counteroffer).await?;
        tx.commit().await?;
        Ok(request)
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Request>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM requests WHERE id = $1");
        sqlx::query_as::<_, Request>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<Request>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM requests ORDER BY created_at, id");
        sqlx::query_as::<_, Request>(&query).fetch_all(pool).await
    }

    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<Request>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM requests WHERE project_id = $1 ORDER BY created_at, id"
        );
        sqlx::query_as::<_, Request>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    pub async fn list_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Vec<Request>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM requests WHERE username = $1 ORDER BY created_at, id");
        sqlx::query_as::<_, Request>(&query)
            .bind(username)
            .fetch_all(pool)
            .await
    }

    /// Delta rows of one kind for a request.
    pub async fn changes(
        pool: &PgPool,
        request_id: DbId,
        kind: ChangeKind,
    ) -> Result<Vec<RequestChange>, sqlx::Error> {
        let query = format!(
            "SELECT id, request_id, {target} AS target_id, is_remove
             FROM {table}
             WHERE request_id = $1
             ORDER BY id",
            target = kind.target_column(),
            table = kind.table(),
        );
        sqlx::query_as::<_, RequestChange>(&query)
            .bind(request_id)
            .fetch_all(pool)
            .await
    }

    /// A request with all of its delta rows, or `None` if it does not exist.
    pub async fn detail(pool: &PgPool, id: DbId) -> Result<Option<RequestDetail>, sqlx::Error> {
        let Some(request) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        Ok(Some(RequestDetail {
            tags: Self::changes(pool, id, ChangeKind::Tag).await?,
            media: Self::changes(pool, id, ChangeKind::Media).await?,
            links: Self::changes(pool, id, ChangeKind::Link).await?,
            collaborators: Self::changes(pool, id, ChangeKind::Collaborator).await?,
            request,
        }))
    }

    /// Media deltas of a request joined with the media they refer to.
    pub async fn media_entries(
        pool: &PgPool,
        request_id: DbId,
    ) -> Result<Vec<RequestMediaEntry>, sqlx::Error> {
        sqlx::query_as::<_, RequestMediaEntry>(
            "SELECT rm.id, rm.request_id, rm.is_remove, m.id AS media_id, m.name, m.path
             FROM request_media_projects rm
             JOIN media m ON m.id = rm.media_id
             WHERE rm.request_id = $1
             ORDER BY m.created_at",
        )
        .bind(request_id)
        .fetch_all(pool)
        .await
    }

    /// Record a delta on an existing request. Proposing the same target twice
    /// replaces the earlier delta.
    pub async fn add_change(
        pool: &PgPool,
        request_id: DbId,
        kind: ChangeKind,
        target_id: DbId,
        is_remove: bool,
    ) -> Result<RequestChange, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let change = insert_change(&mut tx, request_id, kind, target_id, is_remove).await?;
        tx.commit().await?;
        Ok(change)
    }

    /// Insert a pending media row and the delta that proposes adding it.
    pub async fn add_pending_media(
        pool: &PgPool,
        request_id: DbId,
        input: &NewMedia,
    ) -> Result<Media, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO media (project_id, name, path, pending)
             VALUES ($1, $2, $3, true)
             RETURNING {}",
            super::media_repo::COLUMNS
        );
        let media = sqlx::query_as::<_, Media>(&query)
            .bind(input.project_id)
            .bind(&input.name)
            .bind(&input.path)
            .fetch_one(&mut *tx)
            .await?;

        insert_change(&mut tx, request_id, ChangeKind::Media, media.id, false).await?;
        tx.commit().await?;
        Ok(media)
    }

    /// Insert a pending link and the delta that proposes adding it.
    pub async fn add_pending_link(
        pool: &PgPool,
        request_id: DbId,
        project_id: DbId,
        input: &CreateLink,
    ) -> Result<Link, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO links (project_id, name, url, pending)
             VALUES ($1, $2, $3, true)
             RETURNING {}",
            super::link_repo::COLUMNS
        );
        let link = sqlx::query_as::<_, Link>(&query)
            .bind(project_id)
            .bind(&input.name)
            .bind(&input.url)
            .fetch_one(&mut *tx)
            .await?;

        insert_change(&mut tx, request_id, ChangeKind::Link, link.id, false).await?;
        tx.commit().await?;
        Ok(link)
    }

    /// Apply a request to its project and delete it.
    ///
    /// The request and project rows are locked and the deltas are read inside
    /// the transaction, so a concurrent reject or project edit is never
    /// overwritten. Returns `None` if the request no longer exists, otherwise
    /// the request and the storage paths of media removed from the project
    /// (the caller deletes their content after commit).
    pub async fn accept(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<(Request, Vec<String>)>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!("SELECT {COLUMNS} FROM requests WHERE id = $1 FOR UPDATE");
        let Some(request) = sqlx::query_as::<_, Request>(&query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        let current: Option<(String, String, Option<String>)> = sqlx::query_as(
            "SELECT title, description, bibtex FROM projects WHERE id = $1 FOR UPDATE",
        )
        .bind(request.project_id)
        .fetch_optional(&mut *tx)
        .await?;
        let Some((title, description, bibtex)) = current else {
            return Ok(None);
        };

        let edits = request.field_edits();
        let plan = AcceptPlan {
            request_id: id,
            project_id: request.project_id,
            fields: (!edits.is_empty()).then(|| {
                edits.apply_to(ProjectFields {
                    title,
                    description,
                    bibtex,
                })
            }),
            tags: plan_deltas(&load_deltas(&mut tx, id, ChangeKind::Tag).await?),
            collaborators: plan_deltas(
                &load_deltas(&mut tx, id, ChangeKind::Collaborator).await?,
            ),
            media: plan_deltas(&load_deltas(&mut tx, id, ChangeKind::Media).await?),
            links: plan_deltas(&load_deltas(&mut tx, id, ChangeKind::Link).await?),
        };

        let removed_paths = apply_plan(&mut tx, &plan).await?;

        sqlx::query("DELETE FROM requests WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some((request, removed_paths)))
    }

    /// Delete a request and the pending media and links it proposed.
    ///
    /// Returns `None` if the request does not exist, otherwise the storage
    /// paths of the discarded pending media.
    pub async fn reject(pool: &PgPool, id: DbId) -> Result<Option<Vec<String>>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let paths = reject_inner(&mut tx, id).await?;
        if paths.is_some() {
            tx.commit().await?;
        }
        Ok(paths)
    }

    /// Replace request `old_id` with a counter-offer from `username`.
    ///
    /// Returns `None` if `old_id` does not exist. Otherwise returns the new
    /// request and the storage paths of pending media discarded with the old one.
    pub async fn counter_offer(
        pool: &PgPool,
        old_id: DbId,
        project_id: DbId,
        username: &str,
        input: &CreateRequest,
    ) -> Result<Option<(Request, Vec<String>)>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let Some(paths) = reject_inner(&mut tx, old_id).await? else {
            return Ok(None);
        };
        let request = create_inner(&mut tx, project_id, username, input, true).await?;
        tx.commit().await?;
        Ok(Some((request, paths)))
    }
}

async fn create_inner(
    tx: &mut Transaction<'_, Postgres>,
    project_id: DbId,
    username: &str,
    input: &CreateRequest,
    is_counteroffer: bool,
) -> Result<Request, sqlx::Error> {
    let query = format!(
        "INSERT INTO requests
            (project_id, username, new_title, new_description, new_bibtex, is_counteroffer)
         VALUES ($1, $2, $3, $4, $5, $6)
         RETURNING {COLUMNS}"
    );
    let request = sqlx::query_as::<_, Request>(&query)
        .bind(project_id)
        .bind(username)
        .bind(&input.new_title)
        .bind(&input.new_description)
        .bind(&input.new_bibtex)
        .bind(is_counteroffer)
        .fetch_one(&mut **tx)
        .await?;

    for delta in &input.tags {
        insert_change(tx, request.id, ChangeKind::Tag, delta.id, delta.is_remove).await?;
    }
    for delta in &input.collaborators {
        insert_change(tx, request.id, ChangeKind::Collaborator, delta.id, delta.is_remove).await?;
    }
    for media_id in &input.removed_media {
        insert_change(tx, request.id, ChangeKind::Media, *media_id, true).await?;
    }
    for link_id in &input.removed_links {
        insert_change(tx, request.id, ChangeKind::Link, *link_id, true).await?;
    }

    Ok(request)
}

async fn insert_change(
    tx: &mut Transaction<'_, Postgres>,
    request_id: DbId,
    kind: ChangeKind,
    target_id: DbId,
    is_remove: bool,
) -> Result<RequestChange, sqlx::Error> {
    let query = format!(
        "INSERT INTO {table} (request_id, {target}, is_remove)
         VALUES ($1, $2, $3)
         ON CONFLICT (request_id, {target}) DO UPDATE SET is_remove = EXCLUDED.is_remove
         RETURNING id, request_id, {target} AS target_id, is_remove",
        table = kind.table(),
        target = kind.target_column(),
    );
    sqlx::query_as::<_, RequestChange>(&query)
        .bind(request_id)
        .bind(target_id)
        .bind(is_remove)
        .fetch_one(&mut **tx)
        .await
}

async fn reject_inner(
    tx: &mut Transaction<'_, Postgres>,
    id: DbId,
) -> Result<Option<Vec<String>>, sqlx::Error> {
    let exists: Option<(DbId,)> = sqlx::query_as("SELECT id FROM requests WHERE id = $1 FOR UPDATE")
        .bind(id)
        .fetch_optional(&mut **tx)
        .await?;
    if exists.is_none() {
        return Ok(None);
    }

    let paths: Vec<(String,)> = sqlx::query_as(
        "DELETE FROM media
         WHERE pending AND id IN (
             SELECT media_id FROM request_media_projects WHERE request_id = $1
         )
         RETURNING path",
    )
    .bind(id)
    .fetch_all(&mut **tx)
    .await?;

    sqlx::query(
        "DELETE FROM links
         WHERE pending AND id IN (
             SELECT link_id FROM request_link_projects WHERE request_id = $1
         )",
    )
    .bind(id)
    .execute(&mut **tx)
    .await?;

    sqlx::query("DELETE FROM requests WHERE id = $1")
        .bind(id)
        .execute(&mut **tx)
        .await?;

    Ok(Some(paths.into_iter().map(|(p,)| p).collect()))
}

/// Execute an acceptance plan against the locked project.
async fn apply_plan(
    tx: &mut Transaction<'_, Postgres>,
    plan: &AcceptPlan,
) -> Result<Vec<String>, sqlx::Error> {
    let project_id = plan.project_id;

    if let Some(fields) = &plan.fields {
        sqlx::query("UPDATE projects SET title = $2, description = $3, bibtex = $4 WHERE id = $1")
            .bind(project_id)
            .bind(&fields.title)
            .bind(&fields.description)
            .bind(&fields.bibtex)
            .execute(&mut **tx)
            .await?;
    }

    for tag_id in &plan.tags.attach {
        sqlx::query(
            "INSERT INTO projects_to_tags (project_id, tag_id) VALUES ($1, $2)
             ON CONFLICT DO NOTHING",
        )
        .bind(project_id)
        .bind(tag_id)
        .execute(&mut **tx)
        .await?;
    }
    for tag_id in &plan.tags.detach {
        sqlx::query("DELETE FROM projects_to_tags WHERE project_id = $1 AND tag_id = $2")
            .bind(project_id)
            .bind(tag_id)
            .execute(&mut **tx)
            .await?;
    }

    for collaborator_id in &plan.collaborators.attach {
        sqlx::query(
            "INSERT INTO projects_to_collaborators (project_id, collaborator_id)
             VALUES ($1, $2)
             ON CONFLICT ON CONSTRAINT uq_projects_to_collaborators DO NOTHING",
        )
        .bind(project_id)
        .bind(collaborator_id)
        .execute(&mut **tx)
        .await?;
    }
    for collaborator_id in &plan.collaborators.detach {
        sqlx::query(
            "DELETE FROM projects_to_collaborators
             WHERE project_id = $1 AND collaborator_id = $2",
        )
        .bind(project_id)
        .bind(collaborator_id)
        .execute(&mut **tx)
        .await?;
    }

    for media_id in &plan.media.attach {
        sqlx::query("UPDATE media SET pending = false WHERE id = $1 AND project_id = $2")
            .bind(media_id)
            .bind(project_id)
            .execute(&mut **tx)
            .await?;
    }
    let mut removed_paths = Vec::new();
    for media_id in &plan.media.detach {
        let row: Option<(String,)> = sqlx::query_as(
            "DELETE FROM media WHERE id = $1 AND project_id = $2 RETURNING path",
        )
        .bind(media_id)
        .bind(project_id)
        .fetch_optional(&mut **tx)
        .await?;
        if let Some((path,)) = row {
            removed_paths.push(path);
        }
    }

    for link_id in &plan.links.attach {
        sqlx::query("UPDATE links SET pending = false WHERE id = $1 AND project_id = $2")
            .bind(link_id)
            .bind(project_id)
            .execute(&mut **tx)
            .await?;
    }
    for link_id in &plan.links.detach {
        sqlx::query("DELETE FROM links WHERE id = $1 AND project_id = $2")
            .bind(link_id)
            .bind(project_id)
            .execute(&mut **tx)
            .await?;
    }

    Ok(removed_paths)
}

async fn load_deltas(
    tx: &mut Transaction<'_, Postgres>,
    request_id: DbId,
    kind: ChangeKind,
) -> Result<Vec<Delta>, sqlx::Error> {
    let query = format!(
        "SELECT id, request_id, {target} AS target_id, is_remove
         FROM {table}
         WHERE request_id = $1
         ORDER BY id",
        target = kind.target_column(),
        table = kind.table(),
    );
    let rows = sqlx::query_as::<_, RequestChange>(&query)
        .bind(request_id)
        .fetch_all(&mut **tx)
        .await?;
    Ok(rows.iter().map(RequestChange::as_delta).collect())
}
