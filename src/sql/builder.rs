//! Builds parameterized statements. Identifiers are compile-time constants, values are always bound.

use crate::model::PostChanges;

pub const POSTS_TABLE: &str = "posts";

/// Columns in response order.
pub const POST_COLUMNS: &str = "id, title, content, created_at, last_modified";

pub const CREATE_POSTS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS posts (
        id TEXT PRIMARY KEY,
        title TEXT NOT NULL,
        content TEXT NOT NULL,
        created_at DATETIME NOT NULL,
        last_modified DATETIME NOT NULL
    )
"#;

pub const CREATE_CREATED_AT_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_posts_created_at ON posts (created_at)";

pub struct QueryBuf {
    pub sql: String,
    /// Text values in placeholder order.
    pub params: Vec<String>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: &str) -> usize {
        self.params.push(v.to_string());
        self.params.len()
    }
}

/// Newest first; rowid breaks ties between posts created in the same instant.
pub fn select_list() -> String {
    format!(
        "SELECT {} FROM {} ORDER BY created_at DESC, rowid DESC",
        POST_COLUMNS, POSTS_TABLE
    )
}

/// SELECT by primary key. Caller binds the id as `?1`.
pub fn select_by_id() -> String {
    format!("SELECT {} FROM {} WHERE id = ?1", POST_COLUMNS, POSTS_TABLE)
}

/// INSERT of a complete row. Caller binds id, title, content, created_at, last_modified.
pub fn insert() -> String {
    format!(
        "INSERT INTO {} ({}) VALUES (?1, ?2, ?3, ?4, ?5) RETURNING {}",
        POSTS_TABLE, POST_COLUMNS, POST_COLUMNS
    )
}

/// UPDATE by id: SET exactly the columns present in `changes`, plus `last_modified`.
///
/// One statement, so concurrent writers queue on SQLite's write lock instead of
/// failing a read-to-write upgrade. `last_modified` takes the later of the bound
/// time and the stored value. Text params come first in column order. The caller then binds `last_modified`
/// at `?{params.len() + 1}` and the id at `?{params.len() + 2}`.
pub fn update_post(changes: &PostChanges) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut sets = Vec::new();
    for (col, value) in changes.columns() {
        let n = q.push_param(value);
        sets.push(format!("{} = ?{}", col, n));
    }
    let modified_param = q.params.len() + 1;
    let id_param = modified_param + 1;
    sets.push(format!("last_modified = MAX(?{}, last_modified)", modified_param));
    q.sql = format!(
        "UPDATE {} SET {} WHERE id = ?{} RETURNING {}",
        POSTS_TABLE,
        sets.join(", "),
        id_param,
        POST_COLUMNS
    );
    q
}

/// DELETE by id, returning the removed row. Caller binds the id as `?1`.
pub fn delete() -> String {
    format!(
        "DELETE FROM {} WHERE id = ?1 RETURNING {}",
        POSTS_TABLE, POST_COLUMNS
    )
}
