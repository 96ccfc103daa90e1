//! Builders for the HTTP state's lesson ports.

use std::sync::Arc;

use actix_web::web;
use mockable::Clock;

use lesson_backend::domain::LessonService;
use lesson_backend::domain::ports::{LessonCommand, LessonQuery};
use lesson_backend::inbound::http::state::HttpState;
use lesson_backend::outbound::memory::InMemoryLessonStore;
use lesson_backend::outbound::persistence::{DieselLessonRepository, DieselLessonUnitOfWork};
use tracing::warn;

use super::ServerConfig;

type LessonPorts = (Arc<dyn LessonQuery>, Arc<dyn LessonCommand>);

fn lesson_ports<S>(service: Arc<S>) -> LessonPorts
where
    S: LessonQuery + LessonCommand + 'static,
{
    (service.clone(), service)
}

/// Use the pool-backed service when a pool is configured, otherwise a service
/// over an empty in-memory store.
fn select_lesson_ports<Pool, S, MakeService>(
    pool: &Option<Pool>,
    make_service: MakeService,
    clock: Arc<dyn Clock>,
) -> LessonPorts
where
    S: LessonQuery + LessonCommand + 'static,
    MakeService: FnOnce(&Pool, Arc<dyn Clock>) -> S,
{
    match pool {
        Some(pool) => lesson_ports(Arc::new(make_service(pool, clock))),
        None => {
            warn!("no database configured; lessons are kept in memory");
            let store = Arc::new(InMemoryLessonStore::new());
            lesson_ports(Arc::new(LessonService::new(store.clone(), store, clock)))
        }
    }
}

/// Build the shared HTTP state from the configured lesson store.
pub(super) fn build_http_state(
    config: &ServerConfig,
    clock: Arc<dyn Clock>,
) -> web::Data<HttpState> {
    let (lessons, lesson_commands) = select_lesson_ports(
        &config.db_pool,
        |pool, clock| {
            LessonService::new(
                Arc::new(DieselLessonRepository::new(pool.clone())),
                Arc::new(DieselLessonUnitOfWork::new(pool.clone())),
                clock,
            )
        },
        clock,
    );
    web::Data::new(HttpState::new(lessons, lesson_commands))
}
