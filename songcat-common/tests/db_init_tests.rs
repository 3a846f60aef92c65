//! Tests for database initialization
//!
//! - Database file is created on first run
//! - Re-opening an existing database keeps its rows
//! - Every pooled connection gets the busy timeout and WAL mode
//! - In-memory databases carry the same schema

use songcat_common::db::{init_database, open_in_memory, BUSY_TIMEOUT, DEFAULT_MAX_CONNECTIONS};

#[tokio::test]
async fn test_database_creation_when_missing() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("nested").join("songcat.db");

    let result = init_database(&db_path, DEFAULT_MAX_CONNECTIONS).await;

    assert!(result.is_ok(), "Database initialization failed: {:?}", result.err());
    assert!(db_path.exists(), "Database file was not created");
}

#[tokio::test]
async fn test_database_opens_existing() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("songcat.db");

    let pool1 = init_database(&db_path, DEFAULT_MAX_CONNECTIONS).await.unwrap();
    sqlx::query("INSERT INTO songs (group_name, song_name) VALUES ('Muse', 'Uprising')")
        .execute(&pool1)
        .await
        .unwrap();
    pool1.close().await;

    let pool2 = init_database(&db_path, DEFAULT_MAX_CONNECTIONS).await;
    assert!(pool2.is_ok(), "Failed to open existing database: {:?}", pool2.err());

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM songs")
        .fetch_one(&pool2.unwrap())
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn test_in_memory_schema_defaults() {
    let pool = open_in_memory().await.unwrap();

    sqlx::query("INSERT INTO songs (group_name, song_name) VALUES ('Muse', 'Uprising')")
        .execute(&pool)
        .await
        .unwrap();

    let (id, release_date, lyrics, link): (i64, String, String, String) =
        sqlx::query_as("SELECT id, release_date, lyrics, link FROM songs")
            .fetch_one(&pool)
            .await
            .unwrap();

    assert_eq!(id, 1);
    assert_eq!(release_date, "");
    assert_eq!(lyrics, "");
    assert_eq!(link, "");
}

#[tokio::test]
async fn test_busy_timeout_applies_to_every_connection() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("songcat.db");
    let pool = init_database(&db_path, 3).await.unwrap();

    // Hold three connections at once so each one is a distinct handle
    let mut held = Vec::new();
    for _ in 0..3 {
        held.push(pool.acquire().await.unwrap());
    }

    for conn in held.iter_mut() {
        let busy_ms: i64 = sqlx::query_scalar("PRAGMA busy_timeout")
            .fetch_one(&mut **conn)
            .await
            .unwrap();
        assert_eq!(busy_ms, BUSY_TIMEOUT.as_millis() as i64);

        let journal: String = sqlx::query_scalar("PRAGMA journal_mode")
            .fetch_one(&mut **conn)
            .await
            .unwrap();
        assert_eq!(journal.to_lowercase(), "wal");
    }
}

#[tokio::test]
async fn test_schema_has_folded_name_columns() {
    let pool = open_in_memory().await.unwrap();

    sqlx::query(
        "INSERT INTO songs (group_name, song_name, group_name_folded, song_name_folded)
         VALUES ('Кино', 'Группа крови', 'кино', 'группа крови')",
    )
    .execute(&pool)
    .await
    .unwrap();

    let folded: String = sqlx::query_scalar("SELECT group_name_folded FROM songs")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(folded, "кино");
}
