use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::{LoginRequest, LoginResponse, RegisterRequest};
use crate::modules::courses::model::{
    AdminCreateCourseDto, Course, CourseWithTeacher, CreateCourseDto, DeletedCourseResponse,
    EnrollStudentDto, Enrollment, EnrollmentResponse, RosterRow,
};
use crate::modules::users::model::{CreateUserDto, MessageResponse, Role, User};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::register,
        crate::modules::auth::controller::login,
        crate::modules::courses::controller::create_course,
        crate::modules::courses::controller::create_course_admin,
        crate::modules::courses::controller::list_courses,
        crate::modules::courses::controller::delete_course,
        crate::modules::courses::controller::enroll,
        crate::modules::courses::controller::enroll_student,
        crate::modules::courses::controller::remove_student,
        crate::modules::courses::controller::enrollments,
        crate::modules::courses::controller::course_students,
        crate::modules::users::controller::list_teachers,
        crate::modules::users::controller::create_teacher,
        crate::modules::users::controller::delete_teacher,
        crate::modules::users::controller::list_students,
        crate::modules::users::controller::create_student,
        crate::modules::users::controller::delete_student,
        crate::modules::users::controller::my_courses,
    ),
    components(
        schemas(
            User,
            Role,
            CreateUserDto,
            MessageResponse,
            RegisterRequest,
            LoginRequest,
            LoginResponse,
            Course,
            CourseWithTeacher,
            CreateCourseDto,
            AdminCreateCourseDto,
            Enrollment,
            EnrollStudentDto,
            EnrollmentResponse,
            DeletedCourseResponse,
            RosterRow,
            ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration and login"),
        (name = "Courses", description = "Course management"),
        (name = "Enrollments", description = "Enrollment management"),
        (name = "Users", description = "Admin user management")
    ),
    info(
        title = "Slateboard API",
        description = "Learning management REST API",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
