/// All entity primary keys are PostgreSQL UUIDs (accounts are keyed by username).
pub type DbId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
