//! Driven port for non-transactional lesson reads and lesson creation.

use async_trait::async_trait;
use pagination::{Page, PageRequest, SortDirection};

use crate::domain::{Lesson, LessonDetails, LessonId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by lesson persistence adapters.
    pub enum LessonRepositoryError {
        /// The store could not be reached.
        Connection { message: String } => "lesson store connection failed: {message}",
        /// A query or write failed once connected.
        Query { message: String } => "lesson store query failed: {message}",
    }
}

/// Title search over lessons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonSearch {
    /// Case-insensitive substring; empty matches every lesson.
    pub title_fragment: String,
    /// Direction applied to the title keys and to the id tie-breaker.
    pub direction: SortDirection,
    /// Page to return.
    pub page: PageRequest,
}

/// Reads and inserts that do not need a unit of work.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LessonRepository: Send + Sync {
    /// Look a lesson up by id.
    async fn find_by_id(&self, id: LessonId) -> Result<Option<Lesson>, LessonRepositoryError>;

    /// Return one page of lessons whose title contains the fragment, ordered by
    /// case-folded title, then exact title, then id.
    async fn search_by_title(
        &self,
        search: &LessonSearch,
    ) -> Result<Page<Lesson>, LessonRepositoryError>;

    /// Insert a lesson with no teacher and no enrollments, assigning its id.
    async fn create(&self, details: &LessonDetails) -> Result<Lesson, LessonRepositoryError>;
}
