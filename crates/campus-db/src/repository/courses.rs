//! Course operations

use chrono::Utc;
use sqlx::Row;

use crate::error::DbError;
use crate::models::{Course, NewCourse, UpdateCourse};
use crate::repository::Database;

impl Database {
    // ==================== Course Operations ====================

    /// Insert a new course
    pub async fn insert_course(&self, course: NewCourse) -> Result<Course, DbError> {
        let now = Utc::now();

        // Check if slug is already taken
        let existing = self.get_course_by_slug(&course.slug).await?;
        if existing.is_some() {
            return Err(DbError::Duplicate(format!(
                "Course with slug '{}' already exists",
                course.slug
            )));
        }

        let result = sqlx::query(
            r#"
            INSERT INTO courses (name, description, thumbnail, slug, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(&course.name)
        .bind(&course.description)
        .bind(&course.thumbnail)
        .bind(&course.slug)
        .bind(now.to_rfc3339())
        .bind(now.to_rfc3339())
        .fetch_one(&self.pool)
        .await?;

        let id: i64 = result.get("id");

        Ok(Course {
            id,
            name: course.name,
            description: course.description,
            thumbnail: course.thumbnail,
            slug: course.slug,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        })
    }

    /// Get an active course by ID
    pub async fn get_course(&self, id: i64) -> Result<Option<Course>, DbError> {
        let result = sqlx::query(
            r#"
            SELECT id, name, description, thumbnail, slug, created_at, updated_at, deleted_at
            FROM courses
            WHERE id = ? AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        result.map(|row| Course::try_from(&row).map_err(DbError::from)).transpose()
    }

    /// Get an active course by slug
    pub async fn get_course_by_slug(&self, slug: &str) -> Result<Option<Course>, DbError> {
        let result = sqlx::query(
            r#"
            SELECT id, name, description, thumbnail, slug, created_at, updated_at, deleted_at
            FROM courses
            WHERE slug = ? AND deleted_at IS NULL
            "#,
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;

        result.map(|row| Course::try_from(&row).map_err(DbError::from)).transpose()
    }

    /// List all active courses
    pub async fn list_courses(&self) -> Result<Vec<Course>, DbError> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, description, thumbnail, slug, created_at, updated_at, deleted_at
            FROM courses
            WHERE deleted_at IS NULL
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| Course::try_from(row).map_err(DbError::from))
            .collect()
    }

    /// Update an active course, returning the updated row
    pub async fn update_course(
        &self,
        id: i64,
        update: UpdateCourse,
    ) -> Result<Option<Course>, DbError> {
        let Some(current) = self.get_course(id).await? else {
            return Ok(None);
        };

        let slug = update.slug.unwrap_or_else(|| current.slug.clone());
        // A changed slug must not collide with another active course
        if slug != current.slug
            && let Some(other) = self.get_course_by_slug(&slug).await?
            && other.id != id
        {
            return Err(DbError::Duplicate(format!(
                "Course with slug '{}' already exists",
                slug
            )));
        }

        let name = update.name.unwrap_or(current.name);
        let description = update.description.unwrap_or(current.description);
        let thumbnail = update.thumbnail.unwrap_or(current.thumbnail);
        let now = Utc::now();

        sqlx::query(
            r#"
            UPDATE courses
            SET name = ?, description = ?, thumbnail = ?, slug = ?, updated_at = ?
            WHERE id = ? AND deleted_at IS NULL
            "#,
        )
        .bind(&name)
        .bind(&description)
        .bind(&thumbnail)
        .bind(&slug)
        .bind(now.to_rfc3339())
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(Some(Course {
            id,
            name,
            description,
            thumbnail,
            slug,
            created_at: current.created_at,
            updated_at: now,
            deleted_at: None,
        }))
    }

    /// Soft-delete a course
    pub async fn soft_delete_course(&self, id: i64) -> Result<bool, DbError> {
        let now = Utc::now();
        let result = sqlx::query(
            r#"
            UPDATE courses
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

    /// Check whether an active course exists
    pub async fn course_exists(&self, id: i64) -> Result<bool, DbError> {
        let result = sqlx::query(
            "SELECT COUNT(*) as count FROM courses WHERE id = ? AND deleted_at IS NULL",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        let count: i64 = result.get("count");
        Ok(count > 0)
    }
}
