use sqlx::FromRow;
use time::OffsetDateTime;

/// Bookmarked learning resource.
#[derive(Debug, Clone, FromRow)]
pub struct Resource {
    pub id: i64,
    pub title: String,
    pub resource_type: String,
    pub url: String,
    pub created_at: OffsetDateTime,
}
