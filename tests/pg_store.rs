//! Runs against a real Postgres when `DATABASE_URL` is set; otherwise each
//! test returns early.

use std::sync::Arc;

use passgate::auth::repo::{PgUserStore, StoreError, UserStore};
use sqlx::{postgres::PgPoolOptions, PgPool};
use uuid::Uuid;

async fn connect() -> Option<PgPool> {
    let Ok(url) = std::env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set; skipping postgres store test");
        return None;
    };
    let pool = PgPoolOptions::new()
        .max_connections(4)
        .connect(&url)
        .await
        .expect("Failed to connect to Postgres");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to migrate the database.");
    Some(pool)
}

fn unique_email() -> String {
    format!("{}@pg.test", Uuid::new_v4())
}

async fn rows_for(pool: &PgPool, email: &str) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE email = $1")
        .bind(email)
        .fetch_one(pool)
        .await
        .expect("count users")
}

#[tokio::test]
async fn duplicate_email_maps_to_duplicate_error() {
    let Some(pool) = connect().await else { return };
    let store = PgUserStore::new(pool.clone());
    let email = unique_email();

    let first = store.insert(&email, "hash-1").await.expect("first insert");
    let err = store.insert(&email, "hash-2").await.unwrap_err();
    assert!(matches!(err, StoreError::Duplicate), "got {err:?}");

    assert_eq!(rows_for(&pool, &email).await, 1);
    let stored = store.find_by_email(&email).await.unwrap().expect("row exists");
    assert_eq!(stored.id, first.id);
    assert_eq!(stored.password_hash, "hash-1");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_duplicate_inserts_have_one_winner() {
    let Some(pool) = connect().await else { return };
    let store = Arc::new(PgUserStore::new(pool.clone()));
    let email = unique_email();

    let mut handles = Vec::new();
    for i in 0..8 {
        let store = store.clone();
        let email = email.clone();
        handles.push(tokio::spawn(async move {
            store.insert(&email, &format!("hash-{i}")).await
        }));
    }
    let mut ok = 0;
    for h in handles {
        match h.await.expect("task") {
            Ok(_) => ok += 1,
            Err(StoreError::Duplicate) => {}
            Err(e) => panic!("unexpected store error: {e:?}"),
        }
    }
    assert_eq!(ok, 1);
    assert_eq!(rows_for(&pool, &email).await, 1);
}

#[tokio::test]
async fn find_by_id_round_trips_and_misses() {
    let Some(pool) = connect().await else { return };
    let store = PgUserStore::new(pool);
    let user = store.insert(&unique_email(), "hash").await.unwrap();
    assert_eq!(store.find_by_id(user.id).await.unwrap().unwrap().email, user.email);
    assert!(store.find_by_id(Uuid::new_v4()).await.unwrap().is_none());
}
