use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::AuthUser;
use crate::middleware::role::{RequireAdmin, RequireStudent, RequireTeacher};
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::users::model::{MessageResponse, User};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{
    AdminCreateCourseDto, Course, CourseWithTeacher, CreateCourseDto, DeletedCourseResponse,
    EnrollStudentDto, EnrollmentResponse, RosterRow,
};
use super::service::CourseService;

/// Create a course owned by the calling teacher
#[utoipa::path(
    post,
    path = "/api/courses",
    request_body = CreateCourseDto,
    responses(
        (status = 201, description = "Course created", body = Course),
        (status = 400, description = "Missing or empty fields", body = ErrorResponse),
        (status = 401, description = "Missing token", body = ErrorResponse),
        (status = 403, description = "Teacher role required", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
#[instrument(skip(state, dto))]
pub async fn create_course(
    State(state): State<AppState>,
    RequireTeacher(auth_user): RequireTeacher,
    ValidatedJson(dto): ValidatedJson<CreateCourseDto>,
) -> Result<(StatusCode, Json<Course>), AppError> {
    let course = CourseService::create_course(&state.db, auth_user.user_id()?, dto).await?;
    Ok((StatusCode::CREATED, Json(course)))
}

/// Create a course assigned to an arbitrary teacher (admin only)
#[utoipa::path(
    post,
    path = "/api/courses/admin",
    request_body = AdminCreateCourseDto,
    responses(
        (status = 201, description = "Course created", body = Course),
        (status = 400, description = "Missing or empty fields", body = ErrorResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse),
        (status = 404, description = "Teacher not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
#[instrument(skip(state, dto))]
pub async fn create_course_admin(
    State(state): State<AppState>,
    RequireAdmin(_auth_user): RequireAdmin,
    ValidatedJson(dto): ValidatedJson<AdminCreateCourseDto>,
) -> Result<(StatusCode, Json<Course>), AppError> {
    let course = CourseService::create_course_for_teacher(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(course)))
}

/// List courses, filtered by the caller's role
#[utoipa::path(
    get,
    path = "/api/courses",
    responses(
        (status = 200, description = "Courses with owning teacher names", body = [CourseWithTeacher]),
        (status = 401, description = "Missing token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
#[instrument(skip(state))]
pub async fn list_courses(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Vec<CourseWithTeacher>>, AppError> {
    let courses =
        CourseService::list_courses(&state.db, auth_user.user_id()?, auth_user.role()?).await?;
    Ok(Json(courses))
}

/// Delete a course owned by the calling teacher
#[utoipa::path(
    delete,
    path = "/api/courses/{id}",
    params(("id" = Uuid, Path, description = "Course id")),
    responses(
        (status = 200, description = "Course deleted", body = DeletedCourseResponse),
        (status = 403, description = "Not the owning teacher", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
#[instrument(skip(state))]
pub async fn delete_course(
    State(state): State<AppState>,
    RequireTeacher(auth_user): RequireTeacher,
    Path(id): Path<Uuid>,
) -> Result<Json<DeletedCourseResponse>, AppError> {
    let course = CourseService::delete_course(&state.db, id, auth_user.user_id()?).await?;
    Ok(Json(DeletedCourseResponse {
        message: "Course deleted successfully".to_string(),
        course,
    }))
}

/// Enroll the calling student in a course
#[utoipa::path(
    post,
    path = "/api/courses/{id}/enroll",
    params(("id" = Uuid, Path, description = "Course id")),
    responses(
        (status = 201, description = "Enrolled", body = EnrollmentResponse),
        (status = 400, description = "Already enrolled", body = ErrorResponse),
        (status = 403, description = "Student role required", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Enrollments"
)]
#[instrument(skip(state))]
pub async fn enroll(
    State(state): State<AppState>,
    RequireStudent(auth_user): RequireStudent,
    Path(id): Path<Uuid>,
) -> Result<(StatusCode, Json<EnrollmentResponse>), AppError> {
    let enrollment = CourseService::enroll(&state.db, auth_user.user_id()?, id).await?;
    Ok((
        StatusCode::CREATED,
        Json(EnrollmentResponse {
            message: "Student enrolled successfully".to_string(),
            enrollment,
        }),
    ))
}

/// Enroll a student, resolved by email, into a course owned by the caller
#[utoipa::path(
    post,
    path = "/api/courses/{id}/enroll-student",
    params(("id" = Uuid, Path, description = "Course id")),
    request_body = EnrollStudentDto,
    responses(
        (status = 201, description = "Enrolled", body = EnrollmentResponse),
        (status = 400, description = "Already enrolled", body = ErrorResponse),
        (status = 403, description = "Not the owning teacher", body = ErrorResponse),
        (status = 404, description = "Student or course not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Enrollments"
)]
#[instrument(skip(state, dto))]
pub async fn enroll_student(
    State(state): State<AppState>,
    RequireTeacher(auth_user): RequireTeacher,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<EnrollStudentDto>,
) -> Result<(StatusCode, Json<EnrollmentResponse>), AppError> {
    let enrollment =
        CourseService::enroll_by_email(&state.db, auth_user.user_id()?, id, &dto.student_email)
            .await?;
    Ok((
        StatusCode::CREATED,
        Json(EnrollmentResponse {
            message: "Student enrolled successfully".to_string(),
            enrollment,
        }),
    ))
}

/// Remove a student from a course owned by the caller
#[utoipa::path(
    delete,
    path = "/api/courses/{id}/remove-student/{student_id}",
    params(
        ("id" = Uuid, Path, description = "Course id"),
        ("student_id" = Uuid, Path, description = "Student id")
    ),
    responses(
        (status = 200, description = "Student removed", body = MessageResponse),
        (status = 403, description = "Not the owning teacher", body = ErrorResponse),
        (status = 404, description = "Enrollment not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Enrollments"
)]
#[instrument(skip(state))]
pub async fn remove_student(
    State(state): State<AppState>,
    RequireTeacher(auth_user): RequireTeacher,
    Path((course_id, student_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<MessageResponse>, AppError> {
    CourseService::remove_student(&state.db, auth_user.user_id()?, course_id, student_id).await?;
    Ok(Json(MessageResponse {
        message: "Student removed from course".to_string(),
    }))
}

/// Enrollment roster across all of the caller's courses
#[utoipa::path(
    get,
    path = "/api/courses/enrollments",
    responses(
        (status = 200, description = "Enrolled students with course names", body = [RosterRow]),
        (status = 403, description = "Teacher role required", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Enrollments"
)]
#[instrument(skip(state))]
pub async fn enrollments(
    State(state): State<AppState>,
    RequireTeacher(auth_user): RequireTeacher,
) -> Result<Json<Vec<RosterRow>>, AppError> {
    let rows = CourseService::roster(&state.db, auth_user.user_id()?).await?;
    Ok(Json(rows))
}

/// Students enrolled in one course owned by the caller
#[utoipa::path(
    get,
    path = "/api/courses/{id}/students",
    params(("id" = Uuid, Path, description = "Course id")),
    responses(
        (status = 200, description = "Enrolled students", body = [User]),
        (status = 403, description = "Not the owning teacher", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Enrollments"
)]
#[instrument(skip(state))]
pub async fn course_students(
    State(state): State<AppState>,
    RequireTeacher(auth_user): RequireTeacher,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<User>>, AppError> {
    let students = CourseService::students_in_course(&state.db, auth_user.user_id()?, id).await?;
    Ok(Json(students))
}
