//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports ([`LessonQuery`], [`LessonCommand`]) are implemented by the
//! lesson service and called by inbound adapters. Driven ports
//! ([`LessonRepository`], [`LessonUnitOfWork`]) are implemented by outbound
//! adapters and called by the service.

mod macros;
pub(crate) use macros::define_port_error;

mod lesson_command;
mod lesson_query;
mod lesson_repository;
mod lesson_unit_of_work;

#[cfg(test)]
pub use lesson_command::MockLessonCommand;
pub use lesson_command::{
    AssignTeacherRequest, EditLessonRequest, EnrollUserRequest, LessonCommand,
    LessonRegistration,
};
#[cfg(test)]
pub use lesson_query::MockLessonQuery;
pub use lesson_query::{LessonPayload, LessonQuery, ListLessonsRequest};
#[cfg(test)]
pub use lesson_repository::MockLessonRepository;
pub use lesson_repository::{LessonRepository, LessonRepositoryError, LessonSearch};
#[cfg(test)]
pub use lesson_unit_of_work::MockLessonUnitOfWork;
pub use lesson_unit_of_work::{LessonTransaction, LessonUnitOfWork};

#[cfg(test)]
mod tests;
