//! Driven port for atomic lesson mutations.
//!
//! A [`LessonTransaction`] spans the lesson, user, and teacher stores. Work is
//! published only by [`LessonTransaction::commit`]; dropping the transaction
//! or calling [`LessonTransaction::rollback`] discards it.

use async_trait::async_trait;

use crate::domain::{Lesson, LessonId, Teacher, TeacherId, User, UserId};

use super::LessonRepositoryError;

/// Opens transactions against the lesson stores.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LessonUnitOfWork: Send + Sync {
    /// Start a new transaction.
    async fn begin(&self) -> Result<Box<dyn LessonTransaction>, LessonRepositoryError>;
}

/// One open transaction.
#[async_trait]
pub trait LessonTransaction: Send {
    /// Load a lesson and lock it against concurrent mutation until the
    /// transaction ends.
    async fn find_lesson(&mut self, id: LessonId) -> Result<Option<Lesson>, LessonRepositoryError>;

    /// Load a user with their current enrollments.
    async fn find_user(&mut self, id: UserId) -> Result<Option<User>, LessonRepositoryError>;

    /// Load a teacher.
    async fn find_teacher(&mut self, id: TeacherId)
    -> Result<Option<Teacher>, LessonRepositoryError>;

    /// Load and lock every lesson.
    async fn list_lessons(&mut self) -> Result<Vec<Lesson>, LessonRepositoryError>;

    /// Persist the lesson's details, teacher reference, and enrollment set.
    ///
    /// The lesson must already exist.
    async fn save_lesson(&mut self, lesson: &Lesson) -> Result<(), LessonRepositoryError>;

    /// Remove lessons and their enrollment links. Unknown ids are ignored.
    async fn delete_lessons(&mut self, ids: &[LessonId]) -> Result<(), LessonRepositoryError>;

    /// Publish every change made in this transaction.
    async fn commit(self: Box<Self>) -> Result<(), LessonRepositoryError>;

    /// Discard every change made in this transaction.
    async fn rollback(self: Box<Self>) -> Result<(), LessonRepositoryError>;
}
