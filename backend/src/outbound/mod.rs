//! Outbound adapters implementing the lesson driven ports.
//!
//! - **persistence**: PostgreSQL-backed adapters using Diesel ORM.
//! - **memory**: in-process adapters used without a database and in tests.
//!
//! Adapters translate between domain types and storage representations and
//! contain no business logic.

pub mod memory;
pub mod persistence;
