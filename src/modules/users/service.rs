use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::courses::model::CourseWithTeacher;
use crate::utils::errors::AppError;
use crate::utils::password::hash_password;

use super::model::{CreateUserDto, Role, User};

pub struct UserService;

impl UserService {
    #[instrument(skip(db))]
    pub async fn list_by_role(db: &PgPool, role: Role) -> Result<Vec<User>, AppError> {
        let users = sqlx::query_as::<_, User>(
            "SELECT id, name, email, role FROM users WHERE role = $1 ORDER BY name",
        )
        .bind(role.as_str())
        .fetch_all(db)
        .await
        .map_err(AppError::database)?;

        Ok(users)
    }

    /// Admin-creates a teacher or student account. Duplicate emails surface
    /// through the unique constraint.
    #[instrument(skip(db, dto), fields(email = %dto.email))]
    pub async fn create_with_role(
        db: &PgPool,
        dto: CreateUserDto,
        role: Role,
    ) -> Result<User, AppError> {
        let hashed_password = hash_password(&dto.password)?;

        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (name, email, password, role)
             VALUES ($1, $2, $3, $4)
             RETURNING id, name, email, role",
        )
        .bind(&dto.name)
        .bind(&dto.email)
        .bind(&hashed_password)
        .bind(role.as_str())
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::conflict(anyhow::anyhow!("Email already registered"));
                }
            }
            AppError::database(e)
        })?;

        Ok(user)
    }

    /// Deletes a user by id, constrained to the expected role so that a
    /// teacher id cannot be removed through the student endpoint.
    #[instrument(skip(db))]
    pub async fn delete_with_role(db: &PgPool, id: Uuid, role: Role) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            "DELETE FROM users WHERE id = $1 AND role = $2
             RETURNING id, name, email, role",
        )
        .bind(id)
        .bind(role.as_str())
        .fetch_optional(db)
        .await
        .map_err(AppError::database)?
        .ok_or_else(|| {
            AppError::not_found(anyhow::anyhow!(
                "{} not found",
                match role {
                    Role::Teacher => "Teacher",
                    Role::Student => "Student",
                    Role::Admin => "Admin",
                }
            ))
        })
    }

    /// Courses the student is enrolled in, with the owning teacher's name.
    #[instrument(skip(db))]
    pub async fn enrolled_courses(
        db: &PgPool,
        student_id: Uuid,
    ) -> Result<Vec<CourseWithTeacher>, AppError> {
        let courses = sqlx::query_as::<_, CourseWithTeacher>(
            "SELECT c.id, c.name, c.description, c.teacher_id, u.name AS teacher_name
             FROM enrollments e
             JOIN courses c ON e.course_id = c.id
             JOIN users u ON c.teacher_id = u.id
             WHERE e.student_id = $1
             ORDER BY c.name",
        )
        .bind(student_id)
        .fetch_all(db)
        .await
        .map_err(AppError::database)?;

        Ok(courses)
    }
}
