//! Per-test PostgreSQL databases on a shared embedded cluster.
//!
//! - The cluster is started once per test binary and reused.
//! - Every test gets its own temporary database, so suites can run in
//!   parallel without sharing rows.
//! - Schema setup goes through the backend's embedded migrations, the same
//!   path `main` takes at startup.

use std::future::Future;

use diesel_async::{AsyncPgConnection, RunQueryDsl};
use lesson_backend::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use pg_embedded_setup_unpriv::TemporaryDatabase;
use pg_embedded_setup_unpriv::test_support::shared_cluster_handle;

use super::cluster_skip::handle_cluster_setup_failure;

const TEST_POOL_SIZE: u32 = 4;

/// Create an empty temporary database, or `None` when the cluster is
/// unavailable and skipping is enabled.
pub fn provision_database() -> Option<TemporaryDatabase> {
    let cluster = match shared_cluster_handle() {
        Ok(cluster) => cluster,
        Err(err) => return handle_cluster_setup_failure(format!("{err:?}")),
    };
    match cluster.temporary_database(format!("lessons_{}", uuid::Uuid::new_v4().simple())) {
        Ok(database) => Some(database),
        Err(err) => handle_cluster_setup_failure(format!("create database: {err:?}")),
    }
}

/// Drive `future` to completion on a fresh runtime.
///
/// Pools and their connections must be created inside `future`; they are
/// bound to this runtime and die with it.
pub fn run_async<T>(future: impl Future<Output = T>) -> T {
    tokio::runtime::Runtime::new()
        .expect("runtime")
        .block_on(future)
}

/// Apply migrations to `database_url` and connect a small pool to it.
pub async fn migrated_pool(database_url: &str) -> DbPool {
    run_pending_migrations(database_url)
        .await
        .expect("migrations apply");
    DbPool::new(PoolConfig::new(database_url).with_max_size(TEST_POOL_SIZE))
        .await
        .expect("pool connects")
}

/// Insert a user row. Users are owned elsewhere, so the adapters only read them.
pub async fn seed_user(pool: &DbPool, id: i64, display_name: &str) {
    let mut pooled = pool.get().await.expect("connection");
    let conn: &mut AsyncPgConnection = &mut pooled;
    diesel::sql_query("INSERT INTO users (id, display_name) VALUES ($1, $2)")
        .bind::<diesel::sql_types::BigInt, _>(id)
        .bind::<diesel::sql_types::Text, _>(display_name)
        .execute(conn)
        .await
        .expect("seed user");
}

/// Insert a teacher row.
pub async fn seed_teacher(pool: &DbPool, id: i64, display_name: &str) {
    let mut pooled = pool.get().await.expect("connection");
    let conn: &mut AsyncPgConnection = &mut pooled;
    diesel::sql_query("INSERT INTO teachers (id, display_name) VALUES ($1, $2)")
        .bind::<diesel::sql_types::BigInt, _>(id)
        .bind::<diesel::sql_types::Text, _>(display_name)
        .execute(conn)
        .await
        .expect("seed teacher");
}
