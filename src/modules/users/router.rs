use axum::{
    Router,
    routing::{delete, get},
};

use super::controller::{
    create_student, create_teacher, delete_student, delete_teacher, list_students, list_teachers,
    my_courses,
};
use crate::state::AppState;

pub fn init_users_router() -> Router<AppState> {
    Router::new()
        .route("/teachers", get(list_teachers).post(create_teacher))
        .route("/teachers/{id}", delete(delete_teacher))
        .route("/students", get(list_students).post(create_student))
        .route("/students/{id}", delete(delete_student))
        .route("/my-courses", get(my_courses))
}
