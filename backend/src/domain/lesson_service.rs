//! Lesson service implementing the lesson driving ports.
//!
//! Reads go straight to [`LessonRepository`]. Every mutation runs inside one
//! [`LessonTransaction`] opened from [`LessonUnitOfWork`] and committed only
//! once all lookups and guards have passed. Early returns caused by domain
//! rejections roll the transaction back explicitly; early returns caused by
//! port failures drop it, which rolls back as well.
//!
//! The only business rules are temporal. "Now" is read from the injected
//! [`Clock`] each time a guard is evaluated:
//! - editing a lesson that has started is a silent no-op;
//! - deleting a lesson that has started fails with `WrongTime`;
//! - bulk deletion removes exactly the lessons starting after now.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use pagination::{Page, PageRequest};
use serde_json::json;
use tracing::{debug, info, warn};

use crate::domain::ports::{
    AssignTeacherRequest, EditLessonRequest, EnrollUserRequest, LessonCommand, LessonPayload,
    LessonQuery, LessonRegistration, LessonRepository, LessonRepositoryError, LessonSearch,
    LessonTransaction, LessonUnitOfWork, ListLessonsRequest,
};
use crate::domain::{Error, LessonDetails, LessonId, LessonValidationError};

/// Number of lessons on every listing page.
pub const LESSON_PAGE_SIZE: u32 = 20;

fn map_repository_error(error: LessonRepositoryError) -> Error {
    match error {
        LessonRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("lesson store unavailable: {message}"))
        }
        LessonRepositoryError::Query { message } => {
            Error::internal(format!("lesson store error: {message}"))
        }
    }
}

fn map_validation_error(error: &LessonValidationError) -> Error {
    Error::invalid_request(error.to_string()).with_details(json!({
        "field": error.field(),
        "code": "invalid_lesson",
    }))
}

fn lesson_not_found(id: LessonId) -> Error {
    Error::invalid_identifier(format!("lesson {id} does not exist"))
}

/// Roll back after a domain rejection and hand the rejection back.
///
/// A failed rollback is logged, not reported: the caller's error is the one
/// that matters and the adapter discards the transaction either way.
async fn abort(tx: Box<dyn LessonTransaction>, error: Error) -> Error {
    if let Err(rollback_error) = tx.rollback().await {
        warn!(error = %rollback_error, "lesson transaction rollback failed");
    }
    error
}

/// Lesson service backed by a lesson repository and a unit of work.
#[derive(Clone)]
pub struct LessonService<R, U> {
    lessons: Arc<R>,
    unit_of_work: Arc<U>,
    clock: Arc<dyn Clock>,
}

impl<R, U> LessonService<R, U> {
    /// Create a service over the given ports and clock.
    pub fn new(lessons: Arc<R>, unit_of_work: Arc<U>, clock: Arc<dyn Clock>) -> Self {
        Self {
            lessons,
            unit_of_work,
            clock,
        }
    }
}

impl<R, U> LessonService<R, U>
where
    U: LessonUnitOfWork,
{
    async fn begin(&self) -> Result<Box<dyn LessonTransaction>, Error> {
        self.unit_of_work.begin().await.map_err(map_repository_error)
    }
}

#[async_trait]
impl<R, U> LessonQuery for LessonService<R, U>
where
    R: LessonRepository,
    U: LessonUnitOfWork,
{
    async fn list_lessons(
        &self,
        request: ListLessonsRequest,
    ) -> Result<Page<LessonPayload>, Error> {
        let page = PageRequest::new(request.page, LESSON_PAGE_SIZE)
            .map_err(|err| Error::internal(err.to_string()))?;
        let search = LessonSearch {
            title_fragment: request.title,
            direction: request.direction,
            page,
        };
        let lessons = self
            .lessons
            .search_by_title(&search)
            .await
            .map_err(map_repository_error)?;
        debug!(
            page = search.page.number(),
            direction = search.direction.as_param(),
            total = lessons.total_items(),
            "listed lessons"
        );
        Ok(lessons.map(LessonPayload::from))
    }

    async fn get_lesson(&self, id: LessonId) -> Result<LessonPayload, Error> {
        self.find_lesson(id).await?.ok_or_else(|| lesson_not_found(id))
    }

    async fn find_lesson(&self, id: LessonId) -> Result<Option<LessonPayload>, Error> {
        let lesson = self
            .lessons
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?;
        Ok(lesson.map(LessonPayload::from))
    }
}

#[async_trait]
impl<R, U> LessonCommand for LessonService<R, U>
where
    R: LessonRepository,
    U: LessonUnitOfWork,
{
    async fn enroll_user(&self, request: EnrollUserRequest) -> Result<LessonPayload, Error> {
        let mut tx = self.begin().await?;
        let lesson = tx
            .find_lesson(request.lesson_id)
            .await
            .map_err(map_repository_error)?;
        let Some(mut lesson) = lesson else {
            return Err(abort(tx, lesson_not_found(request.lesson_id)).await);
        };
        let Some(user_id) = request.user_id else {
            let error = Error::invalid_identifier("a user id is required to enroll")
                .with_details(json!({ "field": "userId", "code": "missing_user_id" }));
            return Err(abort(tx, error).await);
        };
        let user = tx.find_user(user_id).await.map_err(map_repository_error)?;
        let Some(mut user) = user else {
            let error = Error::invalid_identifier(format!("user {user_id} does not exist"));
            return Err(abort(tx, error).await);
        };

        let newly_enrolled = lesson.enroll(&mut user);
        tx.save_lesson(&lesson)
            .await
            .map_err(map_repository_error)?;
        tx.commit().await.map_err(map_repository_error)?;

        info!(
            lesson_id = %lesson.id(),
            user_id = %user_id,
            newly_enrolled,
            "user enrolled in lesson"
        );
        Ok(LessonPayload::from(lesson))
    }

    async fn assign_teacher(
        &self,
        request: AssignTeacherRequest,
    ) -> Result<LessonPayload, Error> {
        let mut tx = self.begin().await?;
        let lesson = tx
            .find_lesson(request.lesson_id)
            .await
            .map_err(map_repository_error)?;
        let Some(mut lesson) = lesson else {
            return Err(abort(tx, lesson_not_found(request.lesson_id)).await);
        };
        let teacher = tx
            .find_teacher(request.teacher_id)
            .await
            .map_err(map_repository_error)?;
        let Some(teacher) = teacher else {
            let error =
                Error::invalid_identifier(format!("teacher {} does not exist", request.teacher_id));
            return Err(abort(tx, error).await);
        };

        lesson.assign_teacher(&teacher);
        tx.save_lesson(&lesson)
            .await
            .map_err(map_repository_error)?;
        tx.commit().await.map_err(map_repository_error)?;

        info!(
            lesson_id = %lesson.id(),
            teacher_id = %teacher.id(),
            "teacher assigned to lesson"
        );
        Ok(LessonPayload::from(lesson))
    }

    async fn create_lesson(
        &self,
        registration: LessonRegistration,
    ) -> Result<LessonPayload, Error> {
        if let Some(ignored) = registration.id {
            debug!(lesson_id = %ignored, "ignoring caller-supplied id on create");
        }
        let details =
            LessonDetails::try_from(registration).map_err(|err| map_validation_error(&err))?;
        let lesson = self
            .lessons
            .create(&details)
            .await
            .map_err(map_repository_error)?;

        info!(lesson_id = %lesson.id(), "lesson created");
        Ok(LessonPayload::from(lesson))
    }

    async fn edit_lesson(&self, request: EditLessonRequest) -> Result<LessonPayload, Error> {
        let EditLessonRequest { lesson_id, lesson: registration } = request;
        if registration.id != Some(lesson_id) {
            return Err(Error::conflicting_identifier(format!(
                "path id {lesson_id} does not match payload id"
            ))
            .with_details(json!({
                "pathId": lesson_id.get(),
                "payloadId": registration.id.map(LessonId::get),
            })));
        }

        let mut tx = self.begin().await?;
        let lesson = tx
            .find_lesson(lesson_id)
            .await
            .map_err(map_repository_error)?;
        let Some(mut lesson) = lesson else {
            return Err(abort(tx, lesson_not_found(lesson_id)).await);
        };

        let now = self.clock.utc();
        if !lesson.starts_after(now) {
            info!(
                lesson_id = %lesson_id,
                start = %lesson.start(),
                now = %now,
                "lesson already started; edit skipped"
            );
            if let Err(rollback_error) = tx.rollback().await {
                warn!(error = %rollback_error, "lesson transaction rollback failed");
            }
            return Ok(LessonPayload::from(lesson));
        }

        let details = match LessonDetails::try_from(registration) {
            Ok(details) => details,
            Err(err) => return Err(abort(tx, map_validation_error(&err)).await),
        };
        lesson.revise(details);
        tx.save_lesson(&lesson)
            .await
            .map_err(map_repository_error)?;
        tx.commit().await.map_err(map_repository_error)?;

        info!(lesson_id = %lesson_id, "lesson edited");
        Ok(LessonPayload::from(lesson))
    }

    async fn delete_lesson(&self, id: LessonId) -> Result<LessonPayload, Error> {
        let mut tx = self.begin().await?;
        let lesson = tx.find_lesson(id).await.map_err(map_repository_error)?;
        let Some(lesson) = lesson else {
            return Err(abort(tx, lesson_not_found(id)).await);
        };

        let now = self.clock.utc();
        if !lesson.starts_after(now) {
            let error = Error::wrong_time(format!("lesson {id} has already started"))
                .with_details(json!({
                    "start": lesson.start().to_rfc3339(),
                    "now": now.to_rfc3339(),
                }));
            return Err(abort(tx, error).await);
        }

        tx.delete_lessons(&[id])
            .await
            .map_err(map_repository_error)?;
        tx.commit().await.map_err(map_repository_error)?;

        info!(lesson_id = %id, "lesson deleted");
        Ok(LessonPayload::from(lesson))
    }

    async fn delete_future_lessons(&self) -> Result<Vec<LessonPayload>, Error> {
        let mut tx = self.begin().await?;
        let lessons = tx.list_lessons().await.map_err(map_repository_error)?;

        let now = self.clock.utc();
        let future: Vec<_> = lessons
            .into_iter()
            .filter(|lesson| lesson.starts_after(now))
            .collect();
        if future.is_empty() {
            if let Err(rollback_error) = tx.rollback().await {
                warn!(error = %rollback_error, "lesson transaction rollback failed");
            }
            debug!("no future lessons to delete");
            return Ok(Vec::new());
        }

        let ids: Vec<LessonId> = future.iter().map(|lesson| lesson.id()).collect();
        tx.delete_lessons(&ids)
            .await
            .map_err(map_repository_error)?;
        tx.commit().await.map_err(map_repository_error)?;

        info!(count = ids.len(), "future lessons deleted");
        Ok(future.into_iter().map(LessonPayload::from).collect())
    }
}

#[cfg(test)]
#[path = "lesson_service_tests.rs"]
mod tests;
