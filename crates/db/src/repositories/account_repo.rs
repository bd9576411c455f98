//! Repository for the `accounts` table.

use sqlx::PgPool;

use crate::models::account::{Account, AccountSummary};

const COLUMNS: &str = "username, name, password_hash, role, created_at, updated_at";

const SUMMARY_COLUMNS: &str = "username, \
     role = 'ROLE_ADMIN' AS is_administrator, \
     role = 'ROLE_PM' AS is_pm";

/// Provides CRUD operations for accounts.
pub struct AccountRepo;

impl AccountRepo {
    /// Insert an account. `password_hash` must already be hashed.
    ///
    /// A taken username violates the primary key `accounts_pkey`.
    pub async fn create(
        pool: &PgPool,
        username: &str,
        name: &str,
        password_hash: &str,
        role: &str,
    ) -> Result<Account, sqlx::Error> {
        let query = format!(
            "INSERT INTO accounts (username, name, password_hash, role)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Account>(&query)
            .bind(username)
            .bind(name)
            .bind(password_hash)
            .bind(role)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<Account>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM accounts WHERE username = $1");
        sqlx::query_as::<_, Account>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    pub async fn exists(pool: &PgPool, username: &str) -> Result<bool, sqlx::Error> {
        let row: (bool,) =
            sqlx::query_as("SELECT EXISTS (SELECT 1 FROM accounts WHERE username = $1)")
                .bind(username)
                .fetch_one(pool)
                .await?;
        Ok(row.0)
    }

    /// All accounts as summaries, ordered by username.
    pub async fn list_summaries(pool: &PgPool) -> Result<Vec<AccountSummary>, sqlx::Error> {
        let query = format!("SELECT {SUMMARY_COLUMNS} FROM accounts ORDER BY username");
        sqlx::query_as::<_, AccountSummary>(&query)
            .fetch_all(pool)
            .await
    }

    pub async fn list_usernames(pool: &PgPool) -> Result<Vec<String>, sqlx::Error> {
        let rows: Vec<(String,)> = sqlx::query_as("SELECT username FROM accounts ORDER BY username")
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(|(u,)| u).collect())
    }

    /// Usernames of accounts whose display name contains `fragment`,
    /// case-insensitively.
    pub async fn search_usernames_by_name(
        pool: &PgPool,
        fragment: &str,
    ) -> Result<Vec<String>, sqlx::Error> {
        let rows: Vec<(String,)> = sqlx::query_as(
            "SELECT username FROM accounts
             WHERE name ILIKE '%' || $1 || '%' ESCAPE '\\'
             ORDER BY username",
        )
        .bind(escape_like(fragment))
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(|(u,)| u).collect())
    }

    /// Update an account. Only non-`None` arguments are applied.
    pub async fn update(
        pool: &PgPool,
        username: &str,
        name: Option<&str>,
        password_hash: Option<&str>,
        role: Option<&str>,
    ) -> Result<Option<Account>, sqlx::Error> {
        let query = format!(
            "UPDATE accounts SET
                name = COALESCE($2, name),
                password_hash = COALESCE($3, password_hash),
                role = COALESCE($4, role)
             WHERE username = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Account>(&query)
            .bind(username)
            .bind(name)
            .bind(password_hash)
            .bind(role)
            .fetch_optional(pool)
            .await
    }

    /// Set the account-wide role. Returns the new summary, or `None` if the
    /// account does not exist.
    pub async fn set_role(
        pool: &PgPool,
        username: &str,
        role: &str,
    ) -> Result<Option<AccountSummary>, sqlx::Error> {
        let query = format!(
            "UPDATE accounts SET role = $2 WHERE username = $1 RETURNING {SUMMARY_COLUMNS}"
        );
        sqlx::query_as::<_, AccountSummary>(&query)
            .bind(username)
            .bind(role)
            .fetch_optional(pool)
            .await
    }

    /// Delete an account. Memberships and requests cascade.
    pub async fn delete(pool: &PgPool, username: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM accounts WHERE username = $1")
            .bind(username)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Escape `LIKE` wildcards so `fragment` matches literally.
fn escape_like(fragment: &str) -> String {
    fragment
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}
