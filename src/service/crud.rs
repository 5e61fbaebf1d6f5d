//! CRUD execution against SQLite.

use crate::error::AppError;
use crate::model::{now, Post, PostChanges};
use crate::sql::{delete, insert, select_by_id, select_list, update_post};
use sqlx::SqlitePool;

pub struct PostService;

impl PostService {
    /// All posts, newest first.
    pub async fn list(pool: &SqlitePool) -> Result<Vec<Post>, AppError> {
        let sql = select_list();
        tracing::debug!(sql = %sql, "query");
        let rows = sqlx::query_as::<_, Post>(&sql).fetch_all(pool).await?;
        Ok(rows)
    }

    pub async fn read(pool: &SqlitePool, id: &str) -> Result<Option<Post>, AppError> {
        let sql = select_by_id();
        tracing::debug!(sql = %sql, id = %id, "query");
        let row = sqlx::query_as::<_, Post>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row)
    }

    /// Insert a post whose id and timestamps were assigned by the caller. Returns the stored row.
    pub async fn create(pool: &SqlitePool, post: &Post) -> Result<Post, AppError> {
        let sql = insert();
        tracing::debug!(sql = %sql, id = %post.id, "query");
        let row = sqlx::query_as::<_, Post>(&sql)
            .bind(&post.id)
            .bind(&post.title)
            .bind(&post.content)
            .bind(post.created_at)
            .bind(post.last_modified)
            .fetch_one(pool)
            .await?;
        Ok(row)
    }

    /// Write only the columns in `changes` and refresh `last_modified`. Returns the updated row or None.
    ///
    /// `last_modified` never moves backwards, even if the clock does.
    pub async fn update(
        pool: &SqlitePool,
        id: &str,
        changes: &PostChanges,
    ) -> Result<Option<Post>, AppError> {
        let q = update_post(changes);
        tracing::debug!(sql = %q.sql, params = ?q.params, id = %id, "query");
        let mut query = sqlx::query_as::<_, Post>(&q.sql);
        for p in &q.params {
            query = query.bind(p.as_str());
        }
        let row = query.bind(now()).bind(id).fetch_optional(pool).await?;
        Ok(row)
    }

    /// Delete by id. Returns the row as it was before deletion, or None.
    pub async fn delete(pool: &SqlitePool, id: &str) -> Result<Option<Post>, AppError> {
        let sql = delete();
        tracing::debug!(sql = %sql, id = %id, "query");
        let row = sqlx::query_as::<_, Post>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::store::{connect, ensure_schema};
    use chrono::TimeDelta;

    async fn file_pool(dir: &tempfile::TempDir, max_connections: u32) -> SqlitePool {
        let settings = Settings {
            database_url: format!("sqlite://{}", dir.path().join("posts.db").display()),
            max_connections,
            ..Settings::default()
        };
        let pool = connect(&settings).await.unwrap();
        ensure_schema(&pool).await.unwrap();
        pool
    }

    async fn pool() -> SqlitePool {
        let settings = Settings {
            database_url: "sqlite::memory:".into(),
            ..Settings::default()
        };
        let pool = connect(&settings).await.unwrap();
        ensure_schema(&pool).await.unwrap();
        pool
    }

    #[tokio::test]
    async fn create_then_read_round_trips_the_row() {
        let pool = pool().await;
        let post = Post::new("A".into(), "B".into());
        let stored = PostService::create(&pool, &post).await.unwrap();
        assert_eq!(stored, post);
        let read = PostService::read(&pool, &post.id).await.unwrap();
        assert_eq!(read, Some(post));
    }

    #[tokio::test]
    async fn read_missing_is_none() {
        let pool = pool().await;
        assert_eq!(PostService::read(&pool, "nope").await.unwrap(), None);
    }

    #[tokio::test]
    async fn list_is_newest_first() {
        let pool = pool().await;
        let mut older = Post::new("old".into(), "x".into());
        older.created_at = older.created_at - TimeDelta::seconds(60);
        older.last_modified = older.created_at;
        let newer = Post::new("new".into(), "y".into());
        PostService::create(&pool, &newer).await.unwrap();
        PostService::create(&pool, &older).await.unwrap();

        let ids: Vec<String> = PostService::list(&pool)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec![newer.id, older.id]);
    }

    #[tokio::test]
    async fn same_instant_posts_list_in_reverse_insertion_order() {
        let pool = pool().await;
        let first = Post::new("1".into(), "x".into());
        let mut second = Post::new("2".into(), "y".into());
        second.created_at = first.created_at;
        second.last_modified = first.created_at;
        PostService::create(&pool, &first).await.unwrap();
        PostService::create(&pool, &second).await.unwrap();

        let list = PostService::list(&pool).await.unwrap();
        assert_eq!(list[0].id, second.id);
        assert_eq!(list[1].id, first.id);
    }

    #[tokio::test]
    async fn update_writes_only_supplied_columns() {
        let pool = pool().await;
        let post = PostService::create(&pool, &Post::new("title".into(), "body".into()))
            .await
            .unwrap();
        let changes = PostChanges {
            title: None,
            content: Some("edited".into()),
        };
        let updated = PostService::update(&pool, &post.id, &changes)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.title, "title");
        assert_eq!(updated.content, "edited");
        assert_eq!(updated.created_at, post.created_at);
        assert!(updated.last_modified >= post.last_modified);
    }

    #[tokio::test]
    async fn update_never_moves_last_modified_backwards() {
        let pool = pool().await;
        let mut post = Post::new("t".into(), "c".into());
        post.last_modified = post.created_at + TimeDelta::hours(1);
        PostService::create(&pool, &post).await.unwrap();
        let changes = PostChanges {
            title: Some("t2".into()),
            content: None,
        };
        let updated = PostService::update(&pool, &post.id, &changes)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.last_modified, post.last_modified);
    }

    #[tokio::test]
    async fn update_missing_is_none() {
        let pool = pool().await;
        let changes = PostChanges {
            title: Some("t".into()),
            content: None,
        };
        assert_eq!(PostService::update(&pool, "nope", &changes).await.unwrap(), None);
    }

    #[tokio::test]
    async fn delete_returns_snapshot_and_removes_row() {
        let pool = pool().await;
        let post = PostService::create(&pool, &Post::new("t".into(), "c".into()))
            .await
            .unwrap();
        let deleted = PostService::delete(&pool, &post.id).await.unwrap();
        assert_eq!(deleted, Some(post.clone()));
        assert_eq!(PostService::read(&pool, &post.id).await.unwrap(), None);
        assert_eq!(PostService::delete(&pool, &post.id).await.unwrap(), None);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_updates_on_a_file_database_all_succeed() {
        let dir = tempfile::tempdir().unwrap();
        let pool = file_pool(&dir, 8).await;
        let post = PostService::create(&pool, &Post::new("t".into(), "c".into()))
            .await
            .unwrap();

        for round in 0..10 {
            let mut handles = Vec::new();
            for writer in 0..8 {
                let pool = pool.clone();
                let id = post.id.clone();
                handles.push(tokio::spawn(async move {
                    let changes = PostChanges {
                        title: None,
                        content: Some(format!("round {round} writer {writer}")),
                    };
                    PostService::update(&pool, &id, &changes).await
                }));
            }
            for handle in handles {
                let updated = handle.await.unwrap().unwrap().unwrap();
                assert_eq!(updated.title, "t");
                assert!(updated.last_modified >= post.last_modified);
            }
        }

        let stored = PostService::read(&pool, &post.id).await.unwrap().unwrap();
        assert!(stored.content.starts_with("round 9 writer "));
        assert_eq!(stored.created_at, post.created_at);
    }
}
