use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::role::{RequireAdmin, RequireStudent};
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::courses::model::CourseWithTeacher;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{CreateUserDto, Role, User};
use super::service::UserService;

/// List all teachers
#[utoipa::path(
    get,
    path = "/api/users/teachers",
    responses(
        (status = 200, description = "All teacher accounts", body = [User]),
        (status = 403, description = "Admin role required", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn list_teachers(
    State(state): State<AppState>,
    RequireAdmin(_auth_user): RequireAdmin,
) -> Result<Json<Vec<User>>, AppError> {
    let teachers = UserService::list_by_role(&state.db, Role::Teacher).await?;
    Ok(Json(teachers))
}

/// Create a teacher account
#[utoipa::path(
    post,
    path = "/api/users/teachers",
    request_body = CreateUserDto,
    responses(
        (status = 201, description = "Teacher created", body = User),
        (status = 400, description = "Validation error or email already registered", body = ErrorResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state, dto))]
pub async fn create_teacher(
    State(state): State<AppState>,
    RequireAdmin(_auth_user): RequireAdmin,
    ValidatedJson(dto): ValidatedJson<CreateUserDto>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let teacher = UserService::create_with_role(&state.db, dto, Role::Teacher).await?;
    Ok((StatusCode::CREATED, Json(teacher)))
}

/// Delete a teacher by id
#[utoipa::path(
    delete,
    path = "/api/users/teachers/{id}",
    params(("id" = Uuid, Path, description = "Teacher id")),
    responses(
        (status = 200, description = "Teacher deleted", body = User),
        (status = 403, description = "Admin role required", body = ErrorResponse),
        (status = 404, description = "Teacher not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn delete_teacher(
    State(state): State<AppState>,
    RequireAdmin(_auth_user): RequireAdmin,
    Path(id): Path<Uuid>,
) -> Result<Json<User>, AppError> {
    let teacher = UserService::delete_with_role(&state.db, id, Role::Teacher).await?;
    Ok(Json(teacher))
}

/// List all students
#[utoipa::path(
    get,
    path = "/api/users/students",
    responses(
        (status = 200, description = "All student accounts", body = [User]),
        (status = 403, description = "Admin role required", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn list_students(
    State(state): State<AppState>,
    RequireAdmin(_auth_user): RequireAdmin,
) -> Result<Json<Vec<User>>, AppError> {
    let students = UserService::list_by_role(&state.db, Role::Student).await?;
    Ok(Json(students))
}

/// Create a student account
#[utoipa::path(
    post,
    path = "/api/users/students",
    request_body = CreateUserDto,
    responses(
        (status = 201, description = "Student created", body = User),
        (status = 400, description = "Validation error or email already registered", body = ErrorResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state, dto))]
pub async fn create_student(
    State(state): State<AppState>,
    RequireAdmin(_auth_user): RequireAdmin,
    ValidatedJson(dto): ValidatedJson<CreateUserDto>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let student = UserService::create_with_role(&state.db, dto, Role::Student).await?;
    Ok((StatusCode::CREATED, Json(student)))
}

/// Delete a student by id
#[utoipa::path(
    delete,
    path = "/api/users/students/{id}",
    params(("id" = Uuid, Path, description = "Student id")),
    responses(
        (status = 200, description = "Student deleted", body = User),
        (status = 403, description = "Admin role required", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn delete_student(
    State(state): State<AppState>,
    RequireAdmin(_auth_user): RequireAdmin,
    Path(id): Path<Uuid>,
) -> Result<Json<User>, AppError> {
    let student = UserService::delete_with_role(&state.db, id, Role::Student).await?;
    Ok(Json(student))
}

/// Courses the calling student is enrolled in
#[utoipa::path(
    get,
    path = "/api/users/my-courses",
    responses(
        (status = 200, description = "Enrolled courses", body = [CourseWithTeacher]),
        (status = 403, description = "Student role required", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn my_courses(
    State(state): State<AppState>,
    RequireStudent(auth_user): RequireStudent,
) -> Result<Json<Vec<CourseWithTeacher>>, AppError> {
    let courses = UserService::enrolled_courses(&state.db, auth_user.user_id()?).await?;
    Ok(Json(courses))
}
