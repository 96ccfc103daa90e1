//! Internal Diesel row structs for lesson persistence.
//!
//! These types never leave the persistence module; adapters convert them to
//! domain entities before returning.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::{lesson_enrollments, lessons, teachers, users};

/// Row struct for reading from the lessons table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = lessons)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct LessonRow {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub teacher_id: Option<i64>,
}

/// Insertable struct for new lessons; the id comes from the sequence.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = lessons)]
pub(crate) struct NewLessonRow<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
}

/// Changeset overwriting every mutable lesson column.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = lessons)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct LessonUpdate<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub teacher_id: Option<i64>,
}

/// Insertable enrollment link.
#[derive(Debug, Clone, Copy, Insertable)]
#[diesel(table_name = lesson_enrollments)]
pub(crate) struct NewEnrollmentRow {
    pub lesson_id: i64,
    pub user_id: i64,
}

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i64,
    pub display_name: String,
}

/// Row struct for reading from the teachers table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = teachers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TeacherRow {
    pub id: i64,
    pub display_name: String,
}
