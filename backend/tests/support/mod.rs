//! Shared helpers for backend integration tests.
//!
//! Integration tests compile as separate crates under `backend/tests/`; suites
//! that need them declare `mod support;`.

pub mod cluster_skip;
pub mod embedded_postgres;

pub use embedded_postgres::{
    migrated_pool, provision_database, run_async, seed_teacher, seed_user,
};
