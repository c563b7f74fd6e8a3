use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, FromRow, Serialize, ToSchema)]
pub struct Course {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub teacher_id: Uuid,
}

/// Course row joined with the owning teacher's name, as returned by the
/// course listing endpoints.
#[derive(Debug, Clone, FromRow, Serialize, ToSchema)]
pub struct CourseWithTeacher {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub teacher_id: Uuid,
    pub teacher_name: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCourseDto {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "description is required"))]
    pub description: String,
}

/// Admin variant of course creation with an explicit owner.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AdminCreateCourseDto {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "description is required"))]
    pub description: String,
    pub teacher_id: Uuid,
}

#[derive(Debug, Clone, FromRow, Serialize, ToSchema)]
pub struct Enrollment {
    pub student_id: Uuid,
    pub course_id: Uuid,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct EnrollStudentDto {
    #[serde(alias = "studentEmail")]
    #[validate(email(message = "studentEmail must be a valid email address"))]
    pub student_email: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EnrollmentResponse {
    pub message: String,
    pub enrollment: Enrollment,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DeletedCourseResponse {
    pub message: String,
    pub course: Course,
}

/// One row of the teacher's enrollment roster: a student and the owned
/// course they are enrolled in.
#[derive(Debug, Clone, FromRow, Serialize, ToSchema)]
pub struct RosterRow {
    pub name: String,
    pub email: String,
    pub course_name: String,
}
