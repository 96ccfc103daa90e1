//! PostgreSQL-backed `LessonUnitOfWork` implementation.
//!
//! Each transaction owns one pooled connection from `BEGIN` to
//! `COMMIT`/`ROLLBACK`. Lesson rows read through the transaction are locked
//! with `SELECT ... FOR UPDATE`.
//!
//! A transaction dropped while still open returns its connection to the pool
//! with a non-zero transaction depth. The pool treats such connections as
//! broken and closes them, and PostgreSQL rolls the work back when the
//! session ends.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::pooled_connection::bb8::PooledConnection;
use diesel_async::{AnsiTransactionManager, AsyncPgConnection, RunQueryDsl, TransactionManager};
use tracing::debug;

use crate::domain::ports::{LessonRepositoryError, LessonTransaction, LessonUnitOfWork};
use crate::domain::{Lesson, LessonId, Teacher, TeacherId, User, UserId};

use super::diesel_basic_error_mapping::{map_diesel_error, map_pool_error};
use super::diesel_lesson_repository::attach_enrollments;
use super::models::{LessonRow, LessonUpdate, NewEnrollmentRow, TeacherRow, UserRow};
use super::pool::DbPool;
use super::schema::{lesson_enrollments, lessons, teachers, users};

type Transactions = AnsiTransactionManager;

/// Diesel-backed implementation of the lesson unit-of-work port.
#[derive(Clone)]
pub struct DieselLessonUnitOfWork {
    pool: DbPool,
}

impl DieselLessonUnitOfWork {
    /// Create a new unit of work over the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LessonUnitOfWork for DieselLessonUnitOfWork {
    async fn begin(&self) -> Result<Box<dyn LessonTransaction>, LessonRepositoryError> {
        let mut conn = self.pool.get_owned().await.map_err(map_pool_error)?;
        <Transactions as TransactionManager<AsyncPgConnection>>::begin_transaction(&mut *conn)
            .await
            .map_err(map_diesel_error)?;
        debug!("lesson transaction opened");
        Ok(Box::new(DieselLessonTransaction { conn }))
    }
}

struct DieselLessonTransaction {
    conn: PooledConnection<'static, AsyncPgConnection>,
}

fn invalid_key(err: impl std::fmt::Display) -> LessonRepositoryError {
    LessonRepositoryError::query(err.to_string())
}

#[async_trait]
impl LessonTransaction for DieselLessonTransaction {
    async fn find_lesson(&mut self, id: LessonId) -> Result<Option<Lesson>, LessonRepositoryError> {
        let conn: &mut AsyncPgConnection = &mut self.conn;
        let row = lessons::table
            .filter(lessons::id.eq(id.get()))
            .select(LessonRow::as_select())
            .for_update()
            .first::<LessonRow>(conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        let Some(row) = row else {
            return Ok(None);
        };
        let mut found = attach_enrollments(conn, vec![row]).await?;
        Ok(found.pop())
    }

    async fn find_user(&mut self, id: UserId) -> Result<Option<User>, LessonRepositoryError> {
        let conn: &mut AsyncPgConnection = &mut self.conn;
        let row = users::table
            .filter(users::id.eq(id.get()))
            .select(UserRow::as_select())
            .first::<UserRow>(conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        let Some(row) = row else {
            return Ok(None);
        };
        let lesson_ids: Vec<i64> = lesson_enrollments::table
            .filter(lesson_enrollments::user_id.eq(row.id))
            .select(lesson_enrollments::lesson_id)
            .load(conn)
            .await
            .map_err(map_diesel_error)?;
        let enrolled = lesson_ids
            .into_iter()
            .map(LessonId::new)
            .collect::<Result<_, _>>()
            .map_err(invalid_key)?;
        let user_id = UserId::new(row.id).map_err(invalid_key)?;

        Ok(Some(User::new(user_id, row.display_name, enrolled)))
    }

    async fn find_teacher(
        &mut self,
        id: TeacherId,
    ) -> Result<Option<Teacher>, LessonRepositoryError> {
        let conn: &mut AsyncPgConnection = &mut self.conn;
        let row = teachers::table
            .filter(teachers::id.eq(id.get()))
            .select(TeacherRow::as_select())
            .first::<TeacherRow>(conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(|row| {
            TeacherId::new(row.id)
                .map(|teacher_id| Teacher::new(teacher_id, row.display_name))
                .map_err(invalid_key)
        })
        .transpose()
    }

    async fn list_lessons(&mut self) -> Result<Vec<Lesson>, LessonRepositoryError> {
        let conn: &mut AsyncPgConnection = &mut self.conn;
        let rows: Vec<LessonRow> = lessons::table
            .select(LessonRow::as_select())
            .order(lessons::id.asc())
            .for_update()
            .load(conn)
            .await
            .map_err(map_diesel_error)?;

        attach_enrollments(conn, rows).await
    }

    async fn save_lesson(&mut self, lesson: &Lesson) -> Result<(), LessonRepositoryError> {
        let conn: &mut AsyncPgConnection = &mut self.conn;
        let lesson_id = lesson.id().get();

        let changes = LessonUpdate {
            title: lesson.title(),
            description: lesson.description(),
            starts_at: lesson.start(),
            ends_at: lesson.end(),
            teacher_id: lesson.teacher().map(TeacherId::get),
        };
        let updated = diesel::update(lessons::table.filter(lessons::id.eq(lesson_id)))
            .set(&changes)
            .execute(conn)
            .await
            .map_err(map_diesel_error)?;
        if updated == 0 {
            return Err(LessonRepositoryError::query(format!(
                "lesson {} does not exist",
                lesson.id()
            )));
        }

        let user_ids: Vec<i64> = lesson.enrolled_users().iter().map(|id| id.get()).collect();
        diesel::delete(
            lesson_enrollments::table
                .filter(lesson_enrollments::lesson_id.eq(lesson_id))
                .filter(lesson_enrollments::user_id.ne_all(user_ids.clone())),
        )
        .execute(conn)
        .await
        .map_err(map_diesel_error)?;

        if user_ids.is_empty() {
            return Ok(());
        }
        let links: Vec<NewEnrollmentRow> = user_ids
            .into_iter()
            .map(|user_id| NewEnrollmentRow { lesson_id, user_id })
            .collect();
        diesel::insert_into(lesson_enrollments::table)
            .values(&links)
            .on_conflict_do_nothing()
            .execute(conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn delete_lessons(&mut self, ids: &[LessonId]) -> Result<(), LessonRepositoryError> {
        if ids.is_empty() {
            return Ok(());
        }
        let conn: &mut AsyncPgConnection = &mut self.conn;
        let raw: Vec<i64> = ids.iter().map(|id| id.get()).collect();
        diesel::delete(lessons::table.filter(lessons::id.eq_any(raw)))
            .execute(conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn commit(self: Box<Self>) -> Result<(), LessonRepositoryError> {
        let Self { mut conn } = *self;
        <Transactions as TransactionManager<AsyncPgConnection>>::commit_transaction(&mut *conn)
            .await
            .map_err(map_diesel_error)?;
        debug!("lesson transaction committed");
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<(), LessonRepositoryError> {
        let Self { mut conn } = *self;
        <Transactions as TransactionManager<AsyncPgConnection>>::rollback_transaction(&mut *conn)
            .await
            .map_err(map_diesel_error)?;
        debug!("lesson transaction rolled back");
        Ok(())
    }
}
