use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use tempfile::TempDir;
use uuid::Uuid;

use crate::database::{connect, migrate};

/// Fresh in-memory database with all migrations applied.
///
/// The in-memory database lives only as long as its connection, so the pool
/// keeps exactly one connection that is never recycled.
pub async fn test_db_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .unwrap();

    migrate(&pool).await.unwrap();
    pool
}

/// Database file in a temporary directory, opened the way the server opens it.
///
/// The directory is removed when the returned [`TempDir`] is dropped.
pub async fn test_db_file_pool(max_connections: u32) -> (TempDir, SqlitePool) {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite:{}", dir.path().join("playlists.db").display());
    let pool = connect(&url, max_connections).await.unwrap();

    (dir, pool)
}

pub async fn store_test_media_item(pool: &SqlitePool, title: &str) -> Uuid {
    let id = Uuid::new_v4();

    sqlx::query(
        "INSERT INTO media_item
        (id, title, media_type, link) VALUES (?, ?, 'Music', ?)",
    )
    .bind(id.to_string())
    .bind(title)
    .bind(format!("https://example.com/{id}"))
    .execute(pool)
    .await
    .unwrap();

    id
}
