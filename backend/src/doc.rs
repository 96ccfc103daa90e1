//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every lesson and health endpoint together with the
//! [`ErrorSchema`] and [`ErrorCodeSchema`] wrappers, which describe domain
//! types without coupling them to utoipa.
//!
//! The generated document is served by Swagger UI in debug builds and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::lessons::{
    AssignTeacherBody, EnrollUserBody, LessonPageResponse, LessonRegistrationRequest,
    LessonResponse,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Lesson scheduling API",
        description = "HTTP interface for scheduling lessons, enrolling users and assigning teachers."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::lessons::list_lessons,
        crate::inbound::http::lessons::create_lesson,
        crate::inbound::http::lessons::delete_future_lessons,
        crate::inbound::http::lessons::get_lesson,
        crate::inbound::http::lessons::edit_lesson,
        crate::inbound::http::lessons::delete_lesson,
        crate::inbound::http::lessons::enroll_user,
        crate::inbound::http::lessons::assign_teacher,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        LessonResponse,
        LessonPageResponse,
        LessonRegistrationRequest,
        EnrollUserBody,
        AssignTeacherBody,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "lessons", description = "Lesson scheduling operations"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    // utoipa replaces :: with . in schema names
    const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";

    #[rstest]
    fn error_schema_has_code_and_message() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get(ERROR_SCHEMA_NAME).expect("Error schema");

        match error_schema {
            RefOr::T(Schema::Object(object)) => {
                assert!(object.properties.contains_key("code"));
                assert!(object.properties.contains_key("message"));
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    #[case("/api/v1/lessons")]
    #[case("/api/v1/lessons/{id}")]
    #[case("/api/v1/lessons/{id}/users")]
    #[case("/api/v1/lessons/{id}/teacher")]
    #[case("/health/ready")]
    #[case("/health/live")]
    fn every_route_is_documented(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing {path}");
    }

    #[rstest]
    fn collection_path_documents_list_create_and_bulk_delete() {
        let doc = ApiDoc::openapi();
        let item = doc.paths.paths.get("/api/v1/lessons").expect("lessons path");
        assert!(item.get.is_some());
        assert!(item.post.is_some());
        assert!(item.delete.is_some());
    }
}
