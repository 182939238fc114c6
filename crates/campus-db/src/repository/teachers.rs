//! Teacher operations and course-teacher assignments

use chrono::Utc;
use sqlx::Row;

use crate::error::DbError;
use crate::models::{NewTeacher, Teacher, UpdateTeacher};
use crate::repository::Database;

impl Database {
    // ==================== Teacher Operations ====================

    /// Insert a new teacher
    pub async fn insert_teacher(&self, teacher: NewTeacher) -> Result<Teacher, DbError> {
        let now = Utc::now();

        // Check if email is already registered
        let existing = self.get_teacher_by_email(&teacher.email).await?;
        if existing.is_some() {
            return Err(DbError::Duplicate(format!(
                "Teacher with email '{}' already exists",
                teacher.email
            )));
        }

        let result = sqlx::query(
            r#"
            INSERT INTO teachers (name, email, created_at, updated_at)
            VALUES (?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(&teacher.name)
        .bind(&teacher.email)
        .bind(now.to_rfc3339())
        .bind(now.to_rfc3339())
        .fetch_one(&self.pool)
        .await?;

        let id: i64 = result.get("id");

        Ok(Teacher {
            id,
            name: teacher.name,
            email: teacher.email,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        })
    }

    /// Get an active teacher by ID
    pub async fn get_teacher(&self, id: i64) -> Result<Option<Teacher>, DbError> {
        let result = sqlx::query(
            r#"
            SELECT id, name, email, created_at, updated_at, deleted_at
            FROM teachers
            WHERE id = ? AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        result.map(|row| Teacher::try_from(&row).map_err(DbError::from)).transpose()
    }

    /// Get an active teacher by email
    pub async fn get_teacher_by_email(&self, email: &str) -> Result<Option<Teacher>, DbError> {
        let result = sqlx::query(
            r#"
            SELECT id, name, email, created_at, updated_at, deleted_at
            FROM teachers
            WHERE email = ? AND deleted_at IS NULL
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        result.map(|row| Teacher::try_from(&row).map_err(DbError::from)).transpose()
    }

    /// List all active teachers
    pub async fn list_teachers(&self) -> Result<Vec<Teacher>, DbError> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, email, created_at, updated_at, deleted_at
            FROM teachers
            WHERE deleted_at IS NULL
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| Teacher::try_from(row).map_err(DbError::from))
            .collect()
    }

    /// Update an active teacher, returning the updated row
    pub async fn update_teacher(
        &self,
        id: i64,
        update: UpdateTeacher,
    ) -> Result<Option<Teacher>, DbError> {
        let Some(current) = self.get_teacher(id).await? else {
            return Ok(None);
        };

        let email = update.email.unwrap_or(current.email);
        if let Some(other) = self.get_teacher_by_email(&email).await?
            && other.id != id
        {
            return Err(DbError::Duplicate(format!(
                "Teacher with email '{}' already exists",
                email
            )));
        }

        let name = update.name.unwrap_or(current.name);
        let now = Utc::now();

        sqlx::query(
            r#"
            UPDATE teachers
            SET name = ?, email = ?, updated_at = ?
            WHERE id = ? AND deleted_at IS NULL
            "#,
        )
        .bind(&name)
        .bind(&email)
        .bind(now.to_rfc3339())
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(Some(Teacher {
            id,
            name,
            email,
            created_at: current.created_at,
            updated_at: now,
            deleted_at: None,
        }))
    }

    /// Soft-delete a teacher
    pub async fn soft_delete_teacher(&self, id: i64) -> Result<bool, DbError> {
        let now = Utc::now();
        let result = sqlx::query(
            r#"
            UPDATE teachers
            SET deleted_at = ?
            WHERE id = ? AND deleted_at IS NULL
            "#,
        )
        .bind(now.to_rfc3339())
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    // ==================== Course-Teacher Assignments ====================

    /// List active teachers assigned to a course
    pub async fn list_course_teachers(&self, course_id: i64) -> Result<Vec<Teacher>, DbError> {
        let rows = sqlx::query(
            r#"
            SELECT t.id, t.name, t.email, t.created_at, t.updated_at, t.deleted_at
            FROM teachers t
            INNER JOIN course_teachers ct ON ct.teacher_id = t.id
            WHERE ct.course_id = ? AND t.deleted_at IS NULL
            ORDER BY t.id
            "#,
        )
        .bind(course_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| Teacher::try_from(row).map_err(DbError::from))
            .collect()
    }

    /// Assign a teacher to a course (idempotent)
    pub async fn assign_teacher(&self, course_id: i64, teacher_id: i64) -> Result<(), DbError> {
        sqlx::query(
            r#"
            INSERT OR IGNORE INTO course_teachers (course_id, teacher_id)
            VALUES (?, ?)
            "#,
        )
        .bind(course_id)
        .bind(teacher_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Remove a teacher from a course
    pub async fn unassign_teacher(&self, course_id: i64, teacher_id: i64) -> Result<bool, DbError> {
        let result = sqlx::query(
            "DELETE FROM course_teachers WHERE course_id = ? AND teacher_id = ?",
        )
        .bind(course_id)
        .bind(teacher_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
