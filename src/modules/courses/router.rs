use axum::{
    Router,
    routing::{delete, get, post},
};

use super::controller::{
    course_students, create_course, create_course_admin, delete_course, enroll, enroll_student,
    enrollments, list_courses, remove_student,
};
use crate::state::AppState;

pub fn init_courses_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_course).get(list_courses))
        .route("/admin", post(create_course_admin))
        .route("/enrollments", get(enrollments))
        .route("/{id}", delete(delete_course))
        .route("/{id}/enroll", post(enroll))
        .route("/{id}/enroll-student", post(enroll_student))
        .route("/{id}/students", get(course_students))
        .route("/{id}/remove-student/{student_id}", delete(remove_student))
}
