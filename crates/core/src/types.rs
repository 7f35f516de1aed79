/// Places and dishes use PostgreSQL BIGSERIAL primary keys.
pub type DbId = i64;

/// Users are identified by the id issued by the identity provider.
pub type UserId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
