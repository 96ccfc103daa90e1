//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on driving ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{LessonCommand, LessonQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub lessons: Arc<dyn LessonQuery>,
    pub lesson_commands: Arc<dyn LessonCommand>,
}

impl HttpState {
    /// Bundle the lesson read and write ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use lesson_backend::domain::LessonService;
    /// use lesson_backend::inbound::http::state::HttpState;
    /// use lesson_backend::outbound::memory::InMemoryLessonStore;
    /// use mockable::DefaultClock;
    ///
    /// let store = Arc::new(InMemoryLessonStore::new());
    /// let service = Arc::new(LessonService::new(
    ///     store.clone(),
    ///     store,
    ///     Arc::new(DefaultClock),
    /// ));
    /// let state = HttpState::new(service.clone(), service);
    /// # let _ = state;
    /// ```
    pub fn new(lessons: Arc<dyn LessonQuery>, lesson_commands: Arc<dyn LessonCommand>) -> Self {
        Self {
            lessons,
            lesson_commands,
        }
    }
}
