//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the lesson driven ports backed by PostgreSQL
//! via `diesel-async` and a `bb8` connection pool.
//!
//! - **Thin adapters**: repositories translate between Diesel rows and domain
//!   types. Temporal rules and identifier checks live in the domain service.
//! - **Internal models**: row structs (`models.rs`) and table definitions
//!   (`schema.rs`) never leave this module.
//! - **Typed errors**: pool and Diesel failures map to
//!   [`crate::domain::ports::LessonRepositoryError`].
//!
//! # Example
//!
//! ```ignore
//! use lesson_backend::outbound::persistence::{
//!     DbPool, DieselLessonRepository, DieselLessonUnitOfWork, PoolConfig,
//! };
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/lessons")).await?;
//! let lessons = DieselLessonRepository::new(pool.clone());
//! let unit_of_work = DieselLessonUnitOfWork::new(pool);
//! ```

mod diesel_basic_error_mapping;
mod diesel_lesson_repository;
mod diesel_lesson_unit_of_work;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_lesson_repository::DieselLessonRepository;
pub use diesel_lesson_unit_of_work::DieselLessonUnitOfWork;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
