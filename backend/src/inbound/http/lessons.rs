//! Lesson HTTP handlers.
//!
//! ```text
//! GET    /api/v1/lessons?page=0&sort=ASC&title=physics
//! POST   /api/v1/lessons
//! DELETE /api/v1/lessons
//! GET    /api/v1/lessons/{id}
//! PUT    /api/v1/lessons/{id}
//! DELETE /api/v1/lessons/{id}
//! POST   /api/v1/lessons/{id}/users   {"userId":11}
//! PUT    /api/v1/lessons/{id}/teacher {"id":21}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use pagination::{Page, SortDirection};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::{
    AssignTeacherRequest, EditLessonRequest, EnrollUserRequest, LessonPayload,
    LessonRegistration, ListLessonsRequest,
};
use crate::domain::{Error, LessonId, TeacherId, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, parse_identifier, parse_rfc3339_timestamp, require,
};

const LESSON_ID: FieldName = FieldName::new("id");
const USER_ID: FieldName = FieldName::new("userId");
const TEACHER_ID: FieldName = FieldName::new("id");
const TITLE: FieldName = FieldName::new("title");
const DESCRIPTION: FieldName = FieldName::new("description");
const START: FieldName = FieldName::new("start");
const END: FieldName = FieldName::new("end");

/// Query parameters for `GET /api/v1/lessons`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListLessonsQuery {
    /// Zero-based page number; defaults to 0.
    pub page: Option<u32>,
    /// `ASC` or `DESC`; anything other than `DESC` sorts ascending.
    pub sort: Option<String>,
    /// Case-insensitive title substring.
    pub title: Option<String>,
}

impl From<ListLessonsQuery> for ListLessonsRequest {
    fn from(query: ListLessonsQuery) -> Self {
        Self {
            page: query.page.unwrap_or_default(),
            direction: query
                .sort
                .as_deref()
                .map(SortDirection::from_param)
                .unwrap_or_default(),
            title: query.title.unwrap_or_default(),
        }
    }
}

/// Request payload for creating or overwriting a lesson.
///
/// Example JSON:
/// `{"id":5,"title":"Physics","description":"Optics","start":"2026-03-01T09:00:00Z","end":"2026-03-01T10:00:00Z"}`
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LessonRegistrationRequest {
    /// Ignored on creation; must match the path id on edit.
    pub id: Option<i64>,
    pub title: Option<String>,
    pub description: Option<String>,
    /// RFC 3339 timestamp.
    pub start: Option<String>,
    /// RFC 3339 timestamp.
    pub end: Option<String>,
}

/// Request payload for enrolling a user.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnrollUserBody {
    pub user_id: Option<i64>,
}

/// Request payload for assigning a teacher.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssignTeacherBody {
    pub id: Option<i64>,
}

/// Lesson projection returned by every lesson endpoint.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LessonResponse {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub start: String,
    pub end: String,
    pub teacher_id: Option<i64>,
    /// Enrolled user ids in ascending order.
    pub user_ids: Vec<i64>,
}

impl From<LessonPayload> for LessonResponse {
    fn from(payload: LessonPayload) -> Self {
        Self {
            id: payload.id.get(),
            title: payload.title,
            description: payload.description,
            start: payload.start.to_rfc3339(),
            end: payload.end.to_rfc3339(),
            teacher_id: payload.teacher_id.map(TeacherId::get),
            user_ids: payload.user_ids.into_iter().map(UserId::get).collect(),
        }
    }
}

/// One page of lessons.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LessonPageResponse {
    pub items: Vec<LessonResponse>,
    pub page: u32,
    pub size: u32,
    pub total_items: u64,
    pub total_pages: u64,
}

impl From<Page<LessonPayload>> for LessonPageResponse {
    fn from(page: Page<LessonPayload>) -> Self {
        let (number, size, total_items, total_pages) = (
            page.number(),
            page.size(),
            page.total_items(),
            page.total_pages(),
        );
        Self {
            items: page.into_items().into_iter().map(LessonResponse::from).collect(),
            page: number,
            size,
            total_items,
            total_pages,
        }
    }
}

fn parse_lesson_id(raw: i64) -> Result<LessonId, Error> {
    parse_identifier(raw, LESSON_ID)
}

fn parse_registration(body: LessonRegistrationRequest) -> Result<LessonRegistration, Error> {
    let title = require(body.title, TITLE)?;
    let description = require(body.description, DESCRIPTION)?;
    let start = parse_rfc3339_timestamp(&require(body.start, START)?, START)?;
    let end = parse_rfc3339_timestamp(&require(body.end, END)?, END)?;
    Ok(LessonRegistration {
        // A non-positive id can never match a path id, so it is treated as
        // absent and the edit is rejected as conflicting.
        id: body.id.and_then(|raw| LessonId::new(raw).ok()),
        title,
        description,
        start,
        end,
    })
}

/// Reject an edit whose body id differs from the path before any other field
/// is validated.
fn ensure_matching_id(lesson_id: LessonId, payload_id: Option<i64>) -> Result<(), Error> {
    if payload_id == Some(lesson_id.get()) {
        return Ok(());
    }
    Err(Error::conflicting_identifier(format!(
        "path id {lesson_id} does not match payload id"
    ))
    .with_details(json!({
        "pathId": lesson_id.get(),
        "payloadId": payload_id,
    })))
}

fn parse_enrollment(lesson_id: LessonId, body: EnrollUserBody) -> Result<EnrollUserRequest, Error> {
    let user_id = body
        .user_id
        .map(|raw| parse_identifier::<UserId>(raw, USER_ID))
        .transpose()?;
    Ok(EnrollUserRequest { lesson_id, user_id })
}

fn parse_assignment(
    lesson_id: LessonId,
    body: AssignTeacherBody,
) -> Result<AssignTeacherRequest, Error> {
    let teacher_id = parse_identifier::<TeacherId>(require(body.id, TEACHER_ID)?, TEACHER_ID)?;
    Ok(AssignTeacherRequest {
        lesson_id,
        teacher_id,
    })
}

/// List lessons one page at a time, sorted by title.
#[utoipa::path(
    get,
    path = "/api/v1/lessons",
    params(ListLessonsQuery),
    responses(
        (status = 200, description = "Lesson page", body = LessonPageResponse),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["lessons"],
    operation_id = "listLessons"
)]
#[get("/lessons")]
pub async fn list_lessons(
    state: web::Data<HttpState>,
    query: web::Query<ListLessonsQuery>,
) -> ApiResult<web::Json<LessonPageResponse>> {
    let page = state.lessons.list_lessons(query.into_inner().into()).await?;
    Ok(web::Json(LessonPageResponse::from(page)))
}

/// Create a lesson with no teacher and no enrolled users.
#[utoipa::path(
    post,
    path = "/api/v1/lessons",
    request_body = LessonRegistrationRequest,
    responses(
        (status = 201, description = "Created lesson", body = LessonResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["lessons"],
    operation_id = "createLesson"
)]
#[post("/lessons")]
pub async fn create_lesson(
    state: web::Data<HttpState>,
    payload: web::Json<LessonRegistrationRequest>,
) -> ApiResult<HttpResponse> {
    let registration = parse_registration(payload.into_inner())?;
    let lesson = state.lesson_commands.create_lesson(registration).await?;
    Ok(HttpResponse::Created().json(LessonResponse::from(lesson)))
}

/// Delete every lesson that has not started yet.
#[utoipa::path(
    delete,
    path = "/api/v1/lessons",
    responses(
        (status = 200, description = "Deleted lessons", body = [LessonResponse]),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["lessons"],
    operation_id = "deleteFutureLessons"
)]
#[delete("/lessons")]
pub async fn delete_future_lessons(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<LessonResponse>>> {
    let deleted = state.lesson_commands.delete_future_lessons().await?;
    Ok(web::Json(
        deleted.into_iter().map(LessonResponse::from).collect(),
    ))
}

/// Fetch one lesson.
#[utoipa::path(
    get,
    path = "/api/v1/lessons/{id}",
    params(("id" = i64, Path, description = "Lesson identifier")),
    responses(
        (status = 200, description = "Lesson", body = LessonResponse),
        (status = 404, description = "Unknown lesson", body = ErrorSchema)
    ),
    tags = ["lessons"],
    operation_id = "getLesson"
)]
#[get("/lessons/{id}")]
pub async fn get_lesson(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<LessonResponse>> {
    let id = parse_lesson_id(path.into_inner())?;
    let lesson = state.lessons.get_lesson(id).await?;
    Ok(web::Json(LessonResponse::from(lesson)))
}

/// Overwrite a lesson's fields. A lesson that has started is returned
/// unchanged.
#[utoipa::path(
    put,
    path = "/api/v1/lessons/{id}",
    params(("id" = i64, Path, description = "Lesson identifier")),
    request_body = LessonRegistrationRequest,
    responses(
        (status = 200, description = "Lesson after the edit", body = LessonResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Unknown lesson", body = ErrorSchema),
        (status = 409, description = "Path and payload ids differ", body = ErrorSchema)
    ),
    tags = ["lessons"],
    operation_id = "editLesson"
)]
#[put("/lessons/{id}")]
pub async fn edit_lesson(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    payload: web::Json<LessonRegistrationRequest>,
) -> ApiResult<web::Json<LessonResponse>> {
    let lesson_id = parse_lesson_id(path.into_inner())?;
    let body = payload.into_inner();
    ensure_matching_id(lesson_id, body.id)?;
    let lesson = parse_registration(body)?;
    let edited = state
        .lesson_commands
        .edit_lesson(EditLessonRequest { lesson_id, lesson })
        .await?;
    Ok(web::Json(LessonResponse::from(edited)))
}

/// Delete a lesson that has not started yet.
#[utoipa::path(
    delete,
    path = "/api/v1/lessons/{id}",
    params(("id" = i64, Path, description = "Lesson identifier")),
    responses(
        (status = 200, description = "Deleted lesson", body = LessonResponse),
        (status = 404, description = "Unknown lesson", body = ErrorSchema),
        (status = 422, description = "Lesson has already started", body = ErrorSchema)
    ),
    tags = ["lessons"],
    operation_id = "deleteLesson"
)]
#[delete("/lessons/{id}")]
pub async fn delete_lesson(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<LessonResponse>> {
    let id = parse_lesson_id(path.into_inner())?;
    let deleted = state.lesson_commands.delete_lesson(id).await?;
    Ok(web::Json(LessonResponse::from(deleted)))
}

/// Enroll a user in a lesson. Enrolling twice is a no-op.
#[utoipa::path(
    post,
    path = "/api/v1/lessons/{id}/users",
    params(("id" = i64, Path, description = "Lesson identifier")),
    request_body = EnrollUserBody,
    responses(
        (status = 200, description = "Lesson after enrollment", body = LessonResponse),
        (status = 404, description = "Unknown lesson or user", body = ErrorSchema)
    ),
    tags = ["lessons"],
    operation_id = "enrollUser"
)]
#[post("/lessons/{id}/users")]
pub async fn enroll_user(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    payload: web::Json<EnrollUserBody>,
) -> ApiResult<web::Json<LessonResponse>> {
    let lesson_id = parse_lesson_id(path.into_inner())?;
    let request = parse_enrollment(lesson_id, payload.into_inner())?;
    let lesson = state.lesson_commands.enroll_user(request).await?;
    Ok(web::Json(LessonResponse::from(lesson)))
}

/// Replace the lesson's teacher.
#[utoipa::path(
    put,
    path = "/api/v1/lessons/{id}/teacher",
    params(("id" = i64, Path, description = "Lesson identifier")),
    request_body = AssignTeacherBody,
    responses(
        (status = 200, description = "Lesson after assignment", body = LessonResponse),
        (status = 400, description = "Missing teacher id", body = ErrorSchema),
        (status = 404, description = "Unknown lesson or teacher", body = ErrorSchema)
    ),
    tags = ["lessons"],
    operation_id = "assignTeacher"
)]
#[put("/lessons/{id}/teacher")]
pub async fn assign_teacher(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    payload: web::Json<AssignTeacherBody>,
) -> ApiResult<web::Json<LessonResponse>> {
    let lesson_id = parse_lesson_id(path.into_inner())?;
    let request = parse_assignment(lesson_id, payload.into_inner())?;
    let lesson = state.lesson_commands.assign_teacher(request).await?;
    Ok(web::Json(LessonResponse::from(lesson)))
}

#[cfg(test)]
#[path = "lessons_tests.rs"]
mod tests;
