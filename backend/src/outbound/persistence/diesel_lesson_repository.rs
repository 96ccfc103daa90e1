//! PostgreSQL-backed `LessonRepository` implementation using Diesel ORM.
//!
//! Lessons are stored across two tables: the `lessons` row and its
//! `lesson_enrollments` links. Loading helpers here are shared with the
//! unit-of-work adapter so both build lessons the same way.

use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use pagination::{Page, SortDirection};

use crate::domain::ports::{LessonRepository, LessonRepositoryError, LessonSearch};
use crate::domain::{Lesson, LessonDetails, LessonDraft, LessonId, TeacherId, UserId};

use super::diesel_basic_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{LessonRow, NewLessonRow};
use super::pool::DbPool;
use super::schema::{lesson_enrollments, lessons};

diesel::define_sql_function! {
    /// SQL `lower(text)`; over the `"C"`-collated title column this orders by
    /// code point.
    fn lower(value: diesel::sql_types::Text) -> diesel::sql_types::Text;
}

/// Diesel-backed implementation of the lesson repository port.
#[derive(Clone)]
pub struct DieselLessonRepository {
    pool: DbPool,
}

impl DieselLessonRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Escape `LIKE` metacharacters so the fragment matches literally.
pub(crate) fn like_pattern(fragment: &str) -> String {
    let mut pattern = String::with_capacity(fragment.len() + 2);
    pattern.push('%');
    for ch in fragment.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

fn row_to_lesson(
    row: LessonRow,
    enrolled_users: BTreeSet<UserId>,
) -> Result<Lesson, LessonRepositoryError> {
    let LessonRow {
        id,
        title,
        description,
        starts_at,
        ends_at,
        teacher_id,
    } = row;

    let id = LessonId::new(id).map_err(|err| LessonRepositoryError::query(err.to_string()))?;
    let teacher = teacher_id
        .map(TeacherId::new)
        .transpose()
        .map_err(|err| LessonRepositoryError::query(err.to_string()))?;
    let details = LessonDetails::new(title, description, starts_at, ends_at)
        .map_err(|err| LessonRepositoryError::query(format!("stored lesson {id}: {err}")))?;

    Ok(Lesson::new(LessonDraft {
        id,
        details,
        teacher,
        enrolled_users,
    }))
}

/// Attach enrollment links to lesson rows, preserving row order.
pub(crate) async fn attach_enrollments(
    conn: &mut AsyncPgConnection,
    rows: Vec<LessonRow>,
) -> Result<Vec<Lesson>, LessonRepositoryError> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<i64> = rows.iter().map(|row| row.id).collect();
    let links: Vec<(i64, i64)> = lesson_enrollments::table
        .filter(lesson_enrollments::lesson_id.eq_any(ids))
        .select((lesson_enrollments::lesson_id, lesson_enrollments::user_id))
        .load(conn)
        .await
        .map_err(map_diesel_error)?;

    let mut by_lesson: HashMap<i64, BTreeSet<UserId>> = HashMap::new();
    for (lesson_id, user_id) in links {
        let user_id =
            UserId::new(user_id).map_err(|err| LessonRepositoryError::query(err.to_string()))?;
        by_lesson.entry(lesson_id).or_default().insert(user_id);
    }

    rows.into_iter()
        .map(|row| {
            let enrolled = by_lesson.remove(&row.id).unwrap_or_default();
            row_to_lesson(row, enrolled)
        })
        .collect()
}

#[async_trait]
impl LessonRepository for DieselLessonRepository {
    async fn find_by_id(&self, id: LessonId) -> Result<Option<Lesson>, LessonRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = lessons::table
            .filter(lessons::id.eq(id.get()))
            .select(LessonRow::as_select())
            .first::<LessonRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        let Some(row) = row else {
            return Ok(None);
        };
        let mut found = attach_enrollments(&mut conn, vec![row]).await?;
        Ok(found.pop())
    }

    async fn search_by_title(
        &self,
        search: &LessonSearch,
    ) -> Result<Page<Lesson>, LessonRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let pattern = like_pattern(&search.title_fragment);

        let total: i64 = lessons::table
            .filter(lessons::title.ilike(pattern.as_str()))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let limit = i64::from(search.page.size());
        let offset = i64::try_from(search.page.offset())
            .map_err(|err| LessonRepositoryError::query(format!("page offset: {err}")))?;
        let query = lessons::table
            .filter(lessons::title.ilike(pattern.as_str()))
            .select(LessonRow::as_select())
            .into_boxed();
        let query = match search.direction {
            SortDirection::Ascending => query.order((
                lower(lessons::title).asc(),
                lessons::title.asc(),
                lessons::id.asc(),
            )),
            SortDirection::Descending => query.order((
                lower(lessons::title).desc(),
                lessons::title.desc(),
                lessons::id.desc(),
            )),
        };
        let rows: Vec<LessonRow> = query
            .limit(limit)
            .offset(offset)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let items = attach_enrollments(&mut conn, rows).await?;
        let total = u64::try_from(total).unwrap_or_default();
        Ok(Page::new(items, search.page, total))
    }

    async fn create(&self, details: &LessonDetails) -> Result<Lesson, LessonRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewLessonRow {
            title: details.title(),
            description: details.description(),
            starts_at: details.start(),
            ends_at: details.end(),
        };
        let row = diesel::insert_into(lessons::table)
            .values(&new_row)
            .returning(LessonRow::as_returning())
            .get_result::<LessonRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_lesson(row, BTreeSet::new())
    }
}

#[cfg(test)]
mod tests {
    //! Coverage for the pure helpers; queries are exercised against a live
    //! database outside the unit suite.

    use chrono::{Duration, TimeZone, Utc};
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("", "%%")]
    #[case("Math", "%Math%")]
    #[case("100%", "%100\\%%")]
    #[case("snake_case", "%snake\\_case%")]
    #[case("back\\slash", "%back\\\\slash%")]
    fn like_pattern_escapes_wildcards(#[case] fragment: &str, #[case] expected: &str) {
        assert_eq!(like_pattern(fragment), expected);
    }

    #[rstest]
    fn row_to_lesson_rejects_invalid_rows() {
        let start = Utc.with_ymd_and_hms(2026, 1, 1, 8, 0, 0).single().expect("valid");
        let row = LessonRow {
            id: 4,
            title: "Inverted".to_owned(),
            description: String::new(),
            starts_at: start,
            ends_at: start - Duration::hours(1),
            teacher_id: None,
        };

        let result = row_to_lesson(row, BTreeSet::new());

        assert!(matches!(result, Err(LessonRepositoryError::Query { .. })));
    }

    #[rstest]
    fn row_to_lesson_keeps_teacher_and_users() {
        let start = Utc.with_ymd_and_hms(2026, 1, 1, 8, 0, 0).single().expect("valid");
        let row = LessonRow {
            id: 4,
            title: "Chemistry".to_owned(),
            description: "Acids".to_owned(),
            starts_at: start,
            ends_at: start + Duration::hours(1),
            teacher_id: Some(2),
        };
        let users = BTreeSet::from([UserId::new(8).expect("positive id")]);

        let lesson = row_to_lesson(row, users.clone()).expect("valid row");

        assert_eq!(lesson.teacher().map(TeacherId::get), Some(2));
        assert_eq!(lesson.enrolled_users(), &users);
    }
}
