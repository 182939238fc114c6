//! Lesson operations

use chrono::Utc;
use sqlx::Row;

use crate::error::DbError;
use crate::models::{Lesson, NewLesson, UpdateLesson};
use crate::repository::Database;

impl Database {
    // ==================== Lesson Operations ====================

    /// Insert a new lesson under a class
    pub async fn insert_lesson(&self, class_id: i64, lesson: NewLesson) -> Result<Lesson, DbError> {
        let now = Utc::now();
        let result = sqlx::query(
            r#"
            INSERT INTO lessons (class_id, name, video_url, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(class_id)
        .bind(&lesson.name)
        .bind(&lesson.video_url)
        .bind(now.to_rfc3339())
        .bind(now.to_rfc3339())
        .fetch_one(&self.pool)
        .await?;

        let id: i64 = result.get("id");

        Ok(Lesson {
            id,
            class_id,
            name: lesson.name,
            video_url: lesson.video_url,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        })
    }

    /// Get an active lesson by ID
    pub async fn get_lesson(&self, id: i64) -> Result<Option<Lesson>, DbError> {
        let result = sqlx::query(
            r#"
            SELECT id, class_id, name, video_url, created_at, updated_at, deleted_at
            FROM lessons
            WHERE id = ? AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        result.map(|row| Lesson::try_from(&row).map_err(DbError::from)).transpose()
    }

    /// List active lessons belonging to a class
    pub async fn list_lessons_for_class(&self, class_id: i64) -> Result<Vec<Lesson>, DbError> {
        let rows = sqlx::query(
            r#"
            SELECT id, class_id, name, video_url, created_at, updated_at, deleted_at
            FROM lessons
            WHERE class_id = ? AND deleted_at IS NULL
            ORDER BY id
            "#,
        )
        .bind(class_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| Lesson::try_from(row).map_err(DbError::from))
            .collect()
    }

    /// Update an active lesson, returning the updated row
    pub async fn update_lesson(
        &self,
        id: i64,
        update: UpdateLesson,
    ) -> Result<Option<Lesson>, DbError> {
        let Some(current) = self.get_lesson(id).await? else {
            return Ok(None);
        };

        let name = update.name.unwrap_or(current.name);
        let video_url = update.video_url.unwrap_or(current.video_url);
        let now = Utc::now();

        sqlx::query(
            r#"
            UPDATE lessons
            SET name = ?, video_url = ?, updated_at = ?
            WHERE id = ? AND deleted_at IS NULL
            "#,
        )
        .bind(&name)
        .bind(&video_url)
        .bind(now.to_rfc3339())
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(Some(Lesson {
            id,
            class_id: current.class_id,
            name,
            video_url,
            created_at: current.created_at,
            updated_at: now,
            deleted_at: None,
        }))
    }

    /// Soft-delete a lesson
    pub async fn soft_delete_lesson(&self, id: i64) -> Result<bool, DbError> {
        let now = Utc::now();
        let result = sqlx::query(
            r#"
            UPDATE lessons
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
