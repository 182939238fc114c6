//! Database models

use crate::utils::{parse_datetime_or_now, parse_optional_datetime};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::Row;

/// Course model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub id: i64,
    pub name: String,
    pub description: String,
    /// Thumbnail image URL
    pub thumbnail: String,
    /// URL-friendly unique identifier
    pub slug: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Soft-delete marker; active rows have no value
    #[serde(skip_serializing)]
    pub deleted_at: Option<DateTime<Utc>>,
}

/// New course (for insertion)
#[derive(Debug, Clone)]
pub struct NewCourse {
    pub name: String,
    pub description: String,
    pub thumbnail: String,
    pub slug: String,
}

/// Update course (for partial updates)
#[derive(Debug, Clone, Default)]
pub struct UpdateCourse {
    pub name: Option<String>,
    pub description: Option<String>,
    pub thumbnail: Option<String>,
    pub slug: Option<String>,
}

/// Teacher model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Teacher {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing)]
    pub deleted_at: Option<DateTime<Utc>>,
}

/// New teacher (for insertion)
#[derive(Debug, Clone)]
pub struct NewTeacher {
    pub name: String,
    pub email: String,
}

/// Update teacher (for partial updates)
#[derive(Debug, Clone, Default)]
pub struct UpdateTeacher {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Class model (a unit of content within a course)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Class {
    pub id: i64,
    pub course_id: i64,
    pub name: String,
    pub description: String,
    pub slug: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing)]
    pub deleted_at: Option<DateTime<Utc>>,
}

/// New class (for insertion)
#[derive(Debug, Clone)]
pub struct NewClass {
    pub name: String,
    pub description: String,
    pub slug: String,
}

/// Update class (for partial updates)
#[derive(Debug, Clone, Default)]
pub struct UpdateClass {
    pub name: Option<String>,
    pub description: Option<String>,
    pub slug: Option<String>,
}

/// Lesson model (a video within a class)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lesson {
    pub id: i64,
    pub class_id: i64,
    pub name: String,
    pub video_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing)]
    pub deleted_at: Option<DateTime<Utc>>,
}

/// New lesson (for insertion)
#[derive(Debug, Clone)]
pub struct NewLesson {
    pub name: String,
    pub video_url: String,
}

/// Update lesson (for partial updates)
#[derive(Debug, Clone, Default)]
pub struct UpdateLesson {
    pub name: Option<String>,
    pub video_url: Option<String>,
}

/// Course rating model
///
/// At most one active rating exists per (course_id, user_id) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseRating {
    pub id: i64,
    pub course_id: i64,
    pub user_id: i64,
    /// Star rating, 1 to 5
    pub rating: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing)]
    pub deleted_at: Option<DateTime<Utc>>,
}

// ==================== TryFrom Implementations ====================

fn deleted_at(row: &sqlx::sqlite::SqliteRow) -> Result<Option<DateTime<Utc>>, sqlx::Error> {
    let raw: Option<String> = row.try_get("deleted_at")?;
    Ok(parse_optional_datetime(raw.as_deref()))
}

impl TryFrom<&sqlx::sqlite::SqliteRow> for Course {
    type Error = sqlx::Error;

    fn try_from(row: &sqlx::sqlite::SqliteRow) -> Result<Self, Self::Error> {
        Ok(Course {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            thumbnail: row.try_get("thumbnail")?,
            slug: row.try_get("slug")?,
            created_at: parse_datetime_or_now(&row.try_get::<String, _>("created_at")?),
            updated_at: parse_datetime_or_now(&row.try_get::<String, _>("updated_at")?),
            deleted_at: deleted_at(row)?,
        })
    }
}

impl TryFrom<&sqlx::sqlite::SqliteRow> for Teacher {
    type Error = sqlx::Error;

    fn try_from(row: &sqlx::sqlite::SqliteRow) -> Result<Self, Self::Error> {
        Ok(Teacher {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            created_at: parse_datetime_or_now(&row.try_get::<String, _>("created_at")?),
            updated_at: parse_datetime_or_now(&row.try_get::<String, _>("updated_at")?),
            deleted_at: deleted_at(row)?,
        })
    }
}

impl TryFrom<&sqlx::sqlite::SqliteRow> for Class {
    type Error = sqlx::Error;

    fn try_from(row: &sqlx::sqlite::SqliteRow) -> Result<Self, Self::Error> {
        Ok(Class {
            id: row.try_get("id")?,
            course_id: row.try_get("course_id")?,
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            slug: row.try_get("slug")?,
            created_at: parse_datetime_or_now(&row.try_get::<String, _>("created_at")?),
            updated_at: parse_datetime_or_now(&row.try_get::<String, _>("updated_at")?),
            deleted_at: deleted_at(row)?,
        })
    }
}

impl TryFrom<&sqlx::sqlite::SqliteRow> for Lesson {
    type Error = sqlx::Error;

    fn try_from(row: &sqlx::sqlite::SqliteRow) -> Result<Self, Self::Error> {
        Ok(Lesson {
            id: row.try_get("id")?,
            class_id: row.try_get("class_id")?,
            name: row.try_get("name")?,
            video_url: row.try_get("video_url")?,
            created_at: parse_datetime_or_now(&row.try_get::<String, _>("created_at")?),
            updated_at: parse_datetime_or_now(&row.try_get::<String, _>("updated_at")?),
            deleted_at: deleted_at(row)?,
        })
    }
}

impl TryFrom<&sqlx::sqlite::SqliteRow> for CourseRating {
    type Error = sqlx::Error;

    fn try_from(row: &sqlx::sqlite::SqliteRow) -> Result<Self, Self::Error> {
        Ok(CourseRating {
            id: row.try_get("id")?,
            course_id: row.try_get("course_id")?,
            user_id: row.try_get("user_id")?,
            rating: row.try_get("rating")?,
            created_at: parse_datetime_or_now(&row.try_get::<String, _>("created_at")?),
            updated_at: parse_datetime_or_now(&row.try_get::<String, _>("updated_at")?),
            deleted_at: deleted_at(row)?,
        })
    }
}
