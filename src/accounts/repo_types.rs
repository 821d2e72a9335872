use serde::{de::DeserializeOwned, Serialize};
use sqlx::{sqlite::SqliteRow, FromRow};
use time::OffsetDateTime;

use crate::validation::Validate;

/// User record in the database.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub password_hash: String, // Argon2 hash, never exposed in JSON
    pub full_name: String,
    pub created_at: OffsetDateTime,
}

/// Tutor record in the database.
#[derive(Debug, Clone, FromRow)]
pub struct Tutor {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub full_name: String,
    pub subject: String,
    pub created_at: OffsetDateTime,
}

/// One kind of account table. Everything the generic repository and
/// handlers need to know about `users` vs `tutors` lives here.
pub trait AccountKind: Send + Sync + 'static {
    /// Table name, also the route prefix.
    const TABLE: &'static str;
    /// Singular noun for logs and error messages.
    const RESOURCE: &'static str;
    /// Capitalised noun for confirmation messages.
    const LABEL: &'static str;
    /// Writable columns, in the order `new_row`/`changes` return them.
    /// `id` and `created_at` are owned by the store.
    const COLUMNS: &'static [&'static str];

    type Record: for<'r> FromRow<'r, SqliteRow> + Send + Unpin + 'static;
    type Create: DeserializeOwned + Validate + Send + 'static;
    type Update: DeserializeOwned + Validate + Send + 'static;
    type Response: Serialize + From<Self::Record> + Send + 'static;

    /// Column values for a new row. The password is hashed here.
    fn new_row(input: Self::Create) -> anyhow::Result<Vec<String>>;

    /// One entry per column: `Some` overwrites the stored value, `None`
    /// keeps it. A supplied password is hashed here.
    fn changes(patch: Self::Update) -> anyhow::Result<Vec<Option<String>>>;

    fn id(record: &Self::Record) -> i64;

    fn password_hash(record: &Self::Record) -> &str;

    fn select_list() -> String {
        format!("id, {}, created_at", Self::COLUMNS.join(", "))
    }
}
