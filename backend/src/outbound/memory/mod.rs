//! In-process adapters for the lesson driven ports.
//!
//! Used when the server runs without a database and by tests that need real
//! store behaviour rather than mocks.

mod in_memory_lesson_store;

pub use in_memory_lesson_store::InMemoryLessonStore;
