//! Course rating operations

use chrono::Utc;
use sqlx::Row;

use crate::error::DbError;
use crate::models::CourseRating;
use crate::repository::Database;

impl Database {
    // ==================== Rating Operations ====================

    /// Insert a new rating for a (course, user) pair
    pub async fn insert_course_rating(
        &self,
        course_id: i64,
        user_id: i64,
        rating: i64,
    ) -> Result<CourseRating, DbError> {
        let now = Utc::now();
        let result = sqlx::query(
            r#"
            INSERT INTO course_ratings (course_id, user_id, rating, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(course_id)
        .bind(user_id)
        .bind(rating)
        .bind(now.to_rfc3339())
        .bind(now.to_rfc3339())
        .fetch_one(&self.pool)
        .await?;

        let id: i64 = result.get("id");

        Ok(CourseRating {
            id,
            course_id,
            user_id,
            rating,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        })
    }

    /// Get the active rating a user gave a course
    pub async fn get_course_rating(
        &self,
        course_id: i64,
        user_id: i64,
    ) -> Result<Option<CourseRating>, DbError> {
        let result = sqlx::query(
            r#"
            SELECT id, course_id, user_id, rating, created_at, updated_at, deleted_at
            FROM course_ratings
            WHERE course_id = ? AND user_id = ? AND deleted_at IS NULL
            "#,
        )
        .bind(course_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        result.map(|row| CourseRating::try_from(&row).map_err(DbError::from)).transpose()
    }

    /// List all active ratings for a course
    pub async fn list_course_ratings(&self, course_id: i64) -> Result<Vec<CourseRating>, DbError> {
        let rows = sqlx::query(
            r#"
            SELECT id, course_id, user_id, rating, created_at, updated_at, deleted_at
            FROM course_ratings
            WHERE course_id = ? AND deleted_at IS NULL
            ORDER BY id
            "#,
        )
        .bind(course_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| CourseRating::try_from(row).map_err(DbError::from))
            .collect()
    }

    /// Set a new value on an existing active rating
    pub async fn update_course_rating_value(
        &self,
        id: i64,
        rating: i64,
    ) -> Result<bool, DbError> {
        let now = Utc::now();
        let result = sqlx::query(
            r#"
            UPDATE course_ratings
            SET rating = ?, updated_at = ?
            WHERE id = ? AND deleted_at IS NULL
            "#,
        )
        .bind(rating)
        .bind(now.to_rfc3339())
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Soft-delete a user's rating on a course
    pub async fn soft_delete_course_rating(
        &self,
        course_id: i64,
        user_id: i64,
    ) -> Result<bool, DbError> {
        let now = Utc::now();
        let result = sqlx::query(
            r#"
            UPDATE course_ratings
            SET deleted_at = ?
            WHERE course_id = ? AND user_id = ? AND deleted_at IS NULL
            "#,
        )
        .bind(now.to_rfc3339())
        .bind(course_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
