//! Class operations

use chrono::Utc;
use sqlx::Row;

use crate::error::DbError;
use crate::models::{Class, NewClass, UpdateClass};
use crate::repository::Database;

impl Database {
    // ==================== Class Operations ====================

    /// Insert a new class under a course
    pub async fn insert_class(&self, course_id: i64, class: NewClass) -> Result<Class, DbError> {
        let now = Utc::now();
        let result = sqlx::query(
            r#"
            INSERT INTO classes (course_id, name, description, slug, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(course_id)
        .bind(&class.name)
        .bind(&class.description)
        .bind(&class.slug)
        .bind(now.to_rfc3339())
        .bind(now.to_rfc3339())
        .fetch_one(&self.pool)
        .await?;

        let id: i64 = result.get("id");

        Ok(Class {
            id,
            course_id,
            name: class.name,
            description: class.description,
            slug: class.slug,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        })
    }

    /// Get an active class by ID
    pub async fn get_class(&self, id: i64) -> Result<Option<Class>, DbError> {
        let result = sqlx::query(
            r#"
            SELECT id, course_id, name, description, slug, created_at, updated_at, deleted_at
            FROM classes
            WHERE id = ? AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        result.map(|row| Class::try_from(&row).map_err(DbError::from)).transpose()
    }

    /// List active classes belonging to a course
    pub async fn list_classes_for_course(&self, course_id: i64) -> Result<Vec<Class>, DbError> {
        let rows = sqlx::query(
            r#"
            SELECT id, course_id, name, description, slug, created_at, updated_at, deleted_at
            FROM classes
            WHERE course_id = ? AND deleted_at IS NULL
            ORDER BY id
            "#,
        )
        .bind(course_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| Class::try_from(row).map_err(DbError::from))
            .collect()
    }

    /// Update an active class, returning the updated row
    pub async fn update_class(
        &self,
        id: i64,
        update: UpdateClass,
    ) -> Result<Option<Class>, DbError> {
        let Some(current) = self.get_class(id).await? else {
            return Ok(None);
        };

        let name = update.name.unwrap_or(current.name);
        let description = update.description.unwrap_or(current.description);
        let slug = update.slug.unwrap_or(current.slug);
        let now = Utc::now();

        sqlx::query(
            r#"
            UPDATE classes
            SET name = ?, description = ?, slug = ?, updated_at = ?
            WHERE id = ? AND deleted_at IS NULL
            "#,
        )
        .bind(&name)
        .bind(&description)
        .bind(&slug)
        .bind(now.to_rfc3339())
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(Some(Class {
            id,
            course_id: current.course_id,
            name,
            description,
            slug,
            created_at: current.created_at,
            updated_at: now,
            deleted_at: None,
        }))
    }

    /// Soft-delete a class
    pub async fn soft_delete_class(&self, id: i64) -> Result<bool, DbError> {
        let now = Utc::now();
        let result = sqlx::query(
            r#"
            UPDATE classes
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
}
