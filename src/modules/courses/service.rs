use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::users::model::{Role, User};
use crate::utils::errors::AppError;

use super::model::{
    AdminCreateCourseDto, Course, CourseWithTeacher, CreateCourseDto, Enrollment, RosterRow,
};

pub struct CourseService;

impl CourseService {
    #[instrument(skip(db, dto))]
    pub async fn create_course(
        db: &PgPool,
        teacher_id: Uuid,
        dto: CreateCourseDto,
    ) -> Result<Course, AppError> {
        let course = sqlx::query_as::<_, Course>(
            "INSERT INTO courses (name, description, teacher_id)
             VALUES ($1, $2, $3)
             RETURNING id, name, description, teacher_id",
        )
        .bind(&dto.name)
        .bind(&dto.description)
        .bind(teacher_id)
        .fetch_one(db)
        .await
        .map_err(AppError::database)?;

        Ok(course)
    }

    /// Admin course creation with an explicit owner. The assignee must be an
    /// existing user with role teacher.
    #[instrument(skip(db, dto))]
    pub async fn create_course_for_teacher(
        db: &PgPool,
        dto: AdminCreateCourseDto,
    ) -> Result<Course, AppError> {
        let teacher = sqlx::query_as::<_, User>(
            "SELECT id, name, email, role FROM users WHERE id = $1 AND role = $2",
        )
        .bind(dto.teacher_id)
        .bind(Role::Teacher.as_str())
        .fetch_optional(db)
        .await
        .map_err(AppError::database)?;

        if teacher.is_none() {
            return Err(AppError::not_found(anyhow::anyhow!("Teacher not found")));
        }

        let course = sqlx::query_as::<_, Course>(
            "INSERT INTO courses (name, description, teacher_id)
             VALUES ($1, $2, $3)
             RETURNING id, name, description, teacher_id",
        )
        .bind(&dto.name)
        .bind(&dto.description)
        .bind(dto.teacher_id)
        .fetch_one(db)
        .await
        .map_err(AppError::database)?;

        Ok(course)
    }

    /// Course listing, filtered by the caller's role: teachers see only
    /// their own courses, admins and students see everything.
    #[instrument(skip(db))]
    pub async fn list_courses(
        db: &PgPool,
        caller_id: Uuid,
        caller_role: Role,
    ) -> Result<Vec<CourseWithTeacher>, AppError> {
        let courses = match caller_role {
            Role::Teacher => {
                sqlx::query_as::<_, CourseWithTeacher>(
                    "SELECT c.id, c.name, c.description, c.teacher_id, u.name AS teacher_name
                     FROM courses c
                     JOIN users u ON c.teacher_id = u.id
                     WHERE c.teacher_id = $1
                     ORDER BY c.name",
                )
                .bind(caller_id)
                .fetch_all(db)
                .await
            }
            Role::Admin | Role::Student => {
                sqlx::query_as::<_, CourseWithTeacher>(
                    "SELECT c.id, c.name, c.description, c.teacher_id, u.name AS teacher_name
                     FROM courses c
                     JOIN users u ON c.teacher_id = u.id
                     ORDER BY c.name",
                )
                .fetch_all(db)
                .await
            }
        }
        .map_err(AppError::database)?;

        Ok(courses)
    }

    /// Deletes a course owned by the caller. Ownership is encoded in the
    /// DELETE itself, so a missing course and a foreign course are
    /// indistinguishable here and both answer 403.
    #[instrument(skip(db))]
    pub async fn delete_course(
        db: &PgPool,
        course_id: Uuid,
        teacher_id: Uuid,
    ) -> Result<Course, AppError> {
        sqlx::query_as::<_, Course>(
            "DELETE FROM courses WHERE id = $1 AND teacher_id = $2
             RETURNING id, name, description, teacher_id",
        )
        .bind(course_id)
        .bind(teacher_id)
        .fetch_optional(db)
        .await
        .map_err(AppError::database)?
        .ok_or_else(|| {
            AppError::forbidden(anyhow::anyhow!("Unauthorized to delete this course"))
        })
    }

    async fn get_course(db: &PgPool, course_id: Uuid) -> Result<Option<Course>, AppError> {
        sqlx::query_as::<_, Course>(
            "SELECT id, name, description, teacher_id FROM courses WHERE id = $1",
        )
        .bind(course_id)
        .fetch_optional(db)
        .await
        .map_err(AppError::database)
    }

    /// Looks up a course and verifies the caller owns it.
    async fn get_owned_course(
        db: &PgPool,
        course_id: Uuid,
        teacher_id: Uuid,
    ) -> Result<Course, AppError> {
        let course = Self::get_course(db, course_id)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Course not found")))?;

        if course.teacher_id != teacher_id {
            return Err(AppError::forbidden(anyhow::anyhow!(
                "Forbidden: you do not own this course"
            )));
        }

        Ok(course)
    }

    /// Inserts an enrollment if absent. The composite primary key makes the
    /// insert atomic; a conflicting row simply returns nothing, so two
    /// concurrent enrolls cannot both succeed.
    async fn insert_enrollment(
        db: &PgPool,
        student_id: Uuid,
        course_id: Uuid,
    ) -> Result<Option<Enrollment>, AppError> {
        sqlx::query_as::<_, Enrollment>(
            "INSERT INTO enrollments (student_id, course_id)
             VALUES ($1, $2)
             ON CONFLICT (student_id, course_id) DO NOTHING
             RETURNING student_id, course_id",
        )
        .bind(student_id)
        .bind(course_id)
        .fetch_optional(db)
        .await
        .map_err(AppError::database)
    }

    /// Self-enrollment by a student.
    #[instrument(skip(db))]
    pub async fn enroll(
        db: &PgPool,
        student_id: Uuid,
        course_id: Uuid,
    ) -> Result<Enrollment, AppError> {
        let course = Self::get_course(db, course_id)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Course not found")))?;

        Self::insert_enrollment(db, student_id, course_id)
            .await?
            .ok_or_else(|| {
                AppError::conflict(anyhow::anyhow!(
                    "You are already enrolled in the course {}",
                    course.name
                ))
            })
    }

    /// Teacher enrolls a student, resolved by email, into an owned course.
    #[instrument(skip(db, student_email))]
    pub async fn enroll_by_email(
        db: &PgPool,
        teacher_id: Uuid,
        course_id: Uuid,
        student_email: &str,
    ) -> Result<Enrollment, AppError> {
        let student = sqlx::query_as::<_, User>(
            "SELECT id, name, email, role FROM users WHERE email = $1 AND role = $2",
        )
        .bind(student_email)
        .bind(Role::Student.as_str())
        .fetch_optional(db)
        .await
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Student not found")))?;

        let course = Self::get_owned_course(db, course_id, teacher_id).await?;

        Self::insert_enrollment(db, student.id, course_id)
            .await?
            .ok_or_else(|| {
                AppError::conflict(anyhow::anyhow!(
                    "Student is already enrolled in the course {}",
                    course.name
                ))
            })
    }

    /// Removes a student from a course owned by the caller.
    #[instrument(skip(db))]
    pub async fn remove_student(
        db: &PgPool,
        teacher_id: Uuid,
        course_id: Uuid,
        student_id: Uuid,
    ) -> Result<(), AppError> {
        Self::get_owned_course(db, course_id, teacher_id).await?;

        let result = sqlx::query(
            "DELETE FROM enrollments WHERE student_id = $1 AND course_id = $2",
        )
        .bind(student_id)
        .bind(course_id)
        .execute(db)
        .await
        .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Enrollment not found")));
        }

        Ok(())
    }

    /// Every (student, course) pair across the caller's courses.
    #[instrument(skip(db))]
    pub async fn roster(db: &PgPool, teacher_id: Uuid) -> Result<Vec<RosterRow>, AppError> {
        let rows = sqlx::query_as::<_, RosterRow>(
            "SELECT u.name, u.email, c.name AS course_name
             FROM enrollments e
             JOIN users u ON e.student_id = u.id
             JOIN courses c ON e.course_id = c.id
             WHERE c.teacher_id = $1
             ORDER BY c.name, u.name",
        )
        .bind(teacher_id)
        .fetch_all(db)
        .await
        .map_err(AppError::database)?;

        Ok(rows)
    }

    /// Students enrolled in one course owned by the caller.
    #[instrument(skip(db))]
    pub async fn students_in_course(
        db: &PgPool,
        teacher_id: Uuid,
        course_id: Uuid,
    ) -> Result<Vec<User>, AppError> {
        Self::get_owned_course(db, course_id, teacher_id).await?;

        let students = sqlx::query_as::<_, User>(
            "SELECT u.id, u.name, u.email, u.role
             FROM enrollments e
             JOIN users u ON u.id = e.student_id
             WHERE e.course_id = $1
             ORDER BY u.name",
        )
        .bind(course_id)
        .fetch_all(db)
        .await
        .map_err(AppError::database)?;

        Ok(students)
    }
}
