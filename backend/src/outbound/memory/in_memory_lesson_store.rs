//! Mutex-guarded lesson, user, and teacher store.
//!
//! Transactions take the store lock for their whole lifetime and work on a
//! private copy of the state. Commit swaps the copy in; rollback or drop
//! simply releases the lock, so readers never see partial work.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use async_trait::async_trait;
use pagination::Page;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::domain::ports::{
    LessonRepository, LessonRepositoryError, LessonSearch, LessonTransaction, LessonUnitOfWork,
};
use crate::domain::{
    Lesson, LessonDetails, LessonDraft, LessonId, Teacher, TeacherId, User, UserId,
};

/// ASCII-folded title, then exact title, then id. Matches `lower(title)` over
/// the Diesel adapter's `"C"`-collated column, which folds ASCII only.
fn title_order(left: &Lesson, right: &Lesson) -> Ordering {
    left.title()
        .to_ascii_lowercase()
        .cmp(&right.title().to_ascii_lowercase())
        .then_with(|| left.title().cmp(right.title()))
        .then_with(|| left.id().cmp(&right.id()))
}

#[derive(Debug, Clone, Default)]
struct StoreState {
    lessons: BTreeMap<LessonId, Lesson>,
    users: BTreeMap<UserId, String>,
    teachers: BTreeMap<TeacherId, Teacher>,
    last_lesson_id: i64,
}

impl StoreState {
    fn user(&self, id: UserId) -> Option<User> {
        let display_name = self.users.get(&id)?;
        let enrolled_lessons = self
            .lessons
            .values()
            .filter(|lesson| lesson.enrolled_users().contains(&id))
            .map(Lesson::id)
            .collect::<BTreeSet<_>>();
        Some(User::new(id, display_name.as_str(), enrolled_lessons))
    }

    fn next_lesson_id(&mut self) -> Result<LessonId, LessonRepositoryError> {
        let next = self
            .last_lesson_id
            .checked_add(1)
            .ok_or_else(|| LessonRepositoryError::query("lesson id sequence exhausted"))?;
        let id = LessonId::new(next).map_err(|err| LessonRepositoryError::query(err.to_string()))?;
        self.last_lesson_id = next;
        Ok(id)
    }

    fn check_references(&self, lesson: &Lesson) -> Result<(), LessonRepositoryError> {
        if let Some(teacher) = lesson
            .teacher()
            .filter(|teacher| !self.teachers.contains_key(teacher))
        {
            return Err(LessonRepositoryError::query(format!(
                "teacher {teacher} does not exist"
            )));
        }
        if let Some(user) = lesson
            .enrolled_users()
            .iter()
            .find(|user| !self.users.contains_key(user))
        {
            return Err(LessonRepositoryError::query(format!(
                "user {user} does not exist"
            )));
        }
        Ok(())
    }
}

/// In-memory implementation of [`LessonRepository`] and [`LessonUnitOfWork`].
///
/// Clones share the same underlying state.
///
/// # Examples
/// ```
/// use chrono::{Duration, Utc};
/// use lesson_backend::domain::LessonDetails;
/// use lesson_backend::domain::ports::LessonRepository;
/// use lesson_backend::outbound::memory::InMemoryLessonStore;
///
/// # tokio::runtime::Runtime::new().expect("runtime").block_on(async {
/// let store = InMemoryLessonStore::new();
/// let start = Utc::now() + Duration::days(1);
/// let details = LessonDetails::new("Botany", "", start, start + Duration::hours(1))
///     .expect("valid details");
/// let lesson = store.create(&details).await.expect("create lesson");
/// assert_eq!(lesson.id().get(), 1);
/// # });
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryLessonStore {
    state: Arc<Mutex<StoreState>>,
}

impl InMemoryLessonStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a user that lessons may enroll.
    pub async fn insert_user(&self, id: UserId, display_name: impl Into<String>) {
        self.state.lock().await.users.insert(id, display_name.into());
    }

    /// Register a teacher that lessons may reference.
    pub async fn insert_teacher(&self, teacher: Teacher) {
        self.state.lock().await.teachers.insert(teacher.id(), teacher);
    }

    /// Store a lesson under its own id, replacing any lesson with that id.
    ///
    /// Later [`LessonRepository::create`] calls allocate ids above the
    /// largest inserted one.
    ///
    /// # Errors
    /// Returns [`LessonRepositoryError::Query`] when the lesson references an
    /// unknown teacher or user.
    pub async fn insert_lesson(&self, lesson: Lesson) -> Result<(), LessonRepositoryError> {
        let mut state = self.state.lock().await;
        state.check_references(&lesson)?;
        state.last_lesson_id = state.last_lesson_id.max(lesson.id().get());
        state.lessons.insert(lesson.id(), lesson);
        Ok(())
    }

    /// Number of stored lessons.
    pub async fn lesson_count(&self) -> usize {
        self.state.lock().await.lessons.len()
    }
}

#[async_trait]
impl LessonRepository for InMemoryLessonStore {
    async fn find_by_id(&self, id: LessonId) -> Result<Option<Lesson>, LessonRepositoryError> {
        Ok(self.state.lock().await.lessons.get(&id).cloned())
    }

    async fn search_by_title(
        &self,
        search: &LessonSearch,
    ) -> Result<Page<Lesson>, LessonRepositoryError> {
        let fragment = search.title_fragment.to_ascii_lowercase();
        let mut matches: Vec<Lesson> = self
            .state
            .lock()
            .await
            .lessons
            .values()
            .filter(|lesson| lesson.title().to_ascii_lowercase().contains(&fragment))
            .cloned()
            .collect();
        matches.sort_by(|left, right| search.direction.apply(title_order(left, right)));
        Ok(Page::from_sorted(matches, search.page))
    }

    async fn create(&self, details: &LessonDetails) -> Result<Lesson, LessonRepositoryError> {
        let mut state = self.state.lock().await;
        let id = state.next_lesson_id()?;
        let lesson = Lesson::new(LessonDraft {
            id,
            details: details.clone(),
            teacher: None,
            enrolled_users: BTreeSet::new(),
        });
        state.lessons.insert(id, lesson.clone());
        Ok(lesson)
    }
}

#[async_trait]
impl LessonUnitOfWork for InMemoryLessonStore {
    async fn begin(&self) -> Result<Box<dyn LessonTransaction>, LessonRepositoryError> {
        let guard = Arc::clone(&self.state).lock_owned().await;
        let working = guard.clone();
        Ok(Box::new(InMemoryLessonTransaction { guard, working }))
    }
}

struct InMemoryLessonTransaction {
    guard: OwnedMutexGuard<StoreState>,
    working: StoreState,
}

#[async_trait]
impl LessonTransaction for InMemoryLessonTransaction {
    async fn find_lesson(&mut self, id: LessonId) -> Result<Option<Lesson>, LessonRepositoryError> {
        Ok(self.working.lessons.get(&id).cloned())
    }

    async fn find_user(&mut self, id: UserId) -> Result<Option<User>, LessonRepositoryError> {
        Ok(self.working.user(id))
    }

    async fn find_teacher(
        &mut self,
        id: TeacherId,
    ) -> Result<Option<Teacher>, LessonRepositoryError> {
        Ok(self.working.teachers.get(&id).cloned())
    }

    async fn list_lessons(&mut self) -> Result<Vec<Lesson>, LessonRepositoryError> {
        Ok(self.working.lessons.values().cloned().collect())
    }

    async fn save_lesson(&mut self, lesson: &Lesson) -> Result<(), LessonRepositoryError> {
        if !self.working.lessons.contains_key(&lesson.id()) {
            return Err(LessonRepositoryError::query(format!(
                "lesson {} does not exist",
                lesson.id()
            )));
        }
        self.working.check_references(lesson)?;
        self.working.lessons.insert(lesson.id(), lesson.clone());
        Ok(())
    }

    async fn delete_lessons(&mut self, ids: &[LessonId]) -> Result<(), LessonRepositoryError> {
        for id in ids {
            self.working.lessons.remove(id);
        }
        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<(), LessonRepositoryError> {
        let Self { mut guard, working } = *self;
        *guard = working;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<(), LessonRepositoryError> {
        Ok(())
    }
}
