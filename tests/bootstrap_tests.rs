use atrium::config::{Config, DatabaseProfile};
use atrium::db::Store;
use atrium::server::{prepare, sync_schema};
use axum::{
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::fs;
use tower::ServiceExt;

fn temp_database_url(tag: &str) -> (std::path::PathBuf, String) {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before UNIX_EPOCH")
        .as_nanos();

    let mut temp_path = std::env::temp_dir();
    temp_path.push(format!("atrium-{}-{}-{}.sqlite", tag, std::process::id(), nanos));

    let database_url = format!("sqlite:{}", temp_path.display());
    (temp_path, database_url)
}

async fn cleanup(db_path: &std::path::Path) {
    let wal_path = std::path::PathBuf::from(format!("{}-wal", db_path.to_string_lossy()));
    let shm_path = std::path::PathBuf::from(format!("{}-shm", db_path.to_string_lossy()));
    let _ = fs::remove_file(&wal_path).await;
    let _ = fs::remove_file(&shm_path).await;
    let _ = fs::remove_file(db_path).await;
}

#[tokio::test]
async fn prepare_serves_correctly_on_the_first_request() {
    let (db_path, database_url) = temp_database_url("boot-first");
    let mut cfg = Config::default();
    cfg.profiles.insert(
        "development".to_string(),
        DatabaseProfile {
            database: database_url,
            ..DatabaseProfile::default()
        },
    );

    // prepare() only returns once schema sync and registry build are done, so
    // the very first request must already see a synced database.
    let (app, registry) = prepare(&cfg).await.unwrap();

    let resp = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/graphql")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"query":"{ users { id } }"}"#))
                .expect("failed to build request"),
        )
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::OK);

    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let v: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert!(v.get("errors").is_none(), "unexpected errors: {v}");
    assert_eq!(v["data"]["users"], serde_json::json!([]));

    registry.store().close().await;
    cleanup(&db_path).await;
}

#[tokio::test]
async fn schema_sync_is_idempotent() {
    let (db_path, database_url) = temp_database_url("boot-idempotent");
    let store = Store::connect(&database_url).await.unwrap();

    sync_schema(&store).await.unwrap();
    sync_schema(&store).await.unwrap();

    // Data written between syncs survives a re-sync.
    store.create_user("Ada Lovelace", "ada@example.com").await.unwrap();
    sync_schema(&store).await.unwrap();
    let users = store.list_users().await.unwrap();
    assert_eq!(users.len(), 1);

    store.close().await;
    cleanup(&db_path).await;
}

#[tokio::test]
async fn schema_sync_fails_after_bounded_retries_on_a_dead_connection() {
    let (db_path, database_url) = temp_database_url("boot-deadpool");
    let store = Store::connect(&database_url).await.unwrap();
    store.close().await;

    // The pool is closed; every attempt fails, the bounded retry budget runs
    // out, and the error surfaces instead of hanging forever.
    let err = sync_schema(&store).await.unwrap_err();
    assert!(matches!(err, atrium::AtriumError::Database(_)));

    cleanup(&db_path).await;
}

#[tokio::test]
async fn unknown_profile_aborts_before_touching_the_database() {
    let cfg = Config {
        env: "staging".to_string(),
        ..Config::default()
    };
    let err = prepare(&cfg).await.unwrap_err();
    assert!(matches!(
        err,
        atrium::AtriumError::UnknownProfile(name) if name == "staging"
    ));
}

#[tokio::test]
async fn exported_sdl_preserves_the_public_surface() {
    let (db_path, database_url) = temp_database_url("boot-sdl");
    let mut cfg = Config::default();
    cfg.profiles.insert(
        "development".to_string(),
        DatabaseProfile {
            database: database_url,
            ..DatabaseProfile::default()
        },
    );

    let (_app, registry) = prepare(&cfg).await.unwrap();
    let sdl = atrium::graphql::export_sdl(registry.clone());

    assert!(sdl.contains("type User"), "missing User type: {sdl}");
    assert!(sdl.contains("users: [User!]!"), "missing users query: {sdl}");
    assert!(
        sdl.contains("createUser(name: String!, email: String!): User!"),
        "missing createUser mutation: {sdl}"
    );

    registry.store().close().await;
    cleanup(&db_path).await;
}
