//! Course catalog service

use std::collections::BTreeMap;

use campus_db::{
    Class, Course, CourseRating, Database, DbError, Lesson, NewClass, NewCourse, NewLesson,
    NewTeacher, Teacher, UpdateClass, UpdateCourse, UpdateLesson, UpdateTeacher,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::CoreError;

/// Maximum allowed slug length
const MAX_SLUG_LENGTH: usize = 100;

/// Validate a URL slug: non-empty, lowercase alphanumeric and hyphens only
pub fn validate_slug(slug: &str) -> Result<(), CoreError> {
    if slug.is_empty() {
        return Err(CoreError::Validation("Slug cannot be empty".to_string()));
    }
    if slug.len() > MAX_SLUG_LENGTH {
        return Err(CoreError::Validation(format!(
            "Slug exceeds maximum length of {} characters",
            MAX_SLUG_LENGTH
        )));
    }
    if !slug
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(CoreError::Validation(
            "Slug can only contain lowercase letters, digits, and hyphens".to_string(),
        ));
    }
    Ok(())
}

/// Aggregated rating statistics for a course
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingStats {
    /// Mean rating rounded to two decimals, 0.0 when unrated
    pub average_rating: f64,
    pub total_ratings: i64,
    /// Count per star value; every key 1 through 5 is always present
    pub rating_distribution: BTreeMap<i64, i64>,
}

fn duplicate(e: DbError) -> CoreError {
    match e {
        DbError::Duplicate(msg) => CoreError::Duplicate(msg),
        other => CoreError::Database(other),
    }
}

/// Course catalog service handling catalog and rating operations
pub struct CourseService {
    db: Database,
}

impl CourseService {
    /// Create a new course service
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    async fn require_course(&self, course_id: i64) -> Result<(), CoreError> {
        if !self.db.course_exists(course_id).await? {
            return Err(CoreError::NotFound(format!(
                "Course with id {} not found",
                course_id
            )));
        }
        Ok(())
    }

    // ==================== Course Operations ====================

    /// List all courses
    pub async fn list_courses(&self) -> Result<Vec<Course>, CoreError> {
        Ok(self.db.list_courses().await?)
    }

    /// Get a course by ID
    pub async fn get_course(&self, course_id: i64) -> Result<Course, CoreError> {
        self.db.get_course(course_id).await?.ok_or_else(|| {
            CoreError::NotFound(format!("Course with id {} not found", course_id))
        })
    }

    /// Create a new course
    pub async fn create_course(&self, course: NewCourse) -> Result<Course, CoreError> {
        validate_slug(&course.slug)?;
        let created = self.db.insert_course(course).await.map_err(duplicate)?;
        info!(course_id = created.id, slug = %created.slug, "Course created");
        Ok(created)
    }

    /// Update a course
    pub async fn update_course(
        &self,
        course_id: i64,
        update: UpdateCourse,
    ) -> Result<Course, CoreError> {
        if let Some(slug) = &update.slug {
            validate_slug(slug)?;
        }
        self.db
            .update_course(course_id, update)
            .await
            .map_err(duplicate)?
            .ok_or_else(|| CoreError::NotFound(format!("Course with id {} not found", course_id)))
    }

    /// Delete a course
    pub async fn delete_course(&self, course_id: i64) -> Result<(), CoreError> {
        if !self.db.soft_delete_course(course_id).await? {
            return Err(CoreError::NotFound(format!(
                "Course with id {} not found",
                course_id
            )));
        }
        info!(course_id, "Course deleted");
        Ok(())
    }

    // ==================== Teacher Operations ====================

    /// List all teachers
    pub async fn list_teachers(&self) -> Result<Vec<Teacher>, CoreError> {
        Ok(self.db.list_teachers().await?)
    }

    /// Get a teacher by ID
    pub async fn get_teacher(&self, teacher_id: i64) -> Result<Teacher, CoreError> {
        self.db.get_teacher(teacher_id).await?.ok_or_else(|| {
            CoreError::NotFound(format!("Teacher with id {} not found", teacher_id))
        })
    }

    /// Create a new teacher
    pub async fn create_teacher(&self, teacher: NewTeacher) -> Result<Teacher, CoreError> {
        let created = self.db.insert_teacher(teacher).await.map_err(duplicate)?;
        info!(teacher_id = created.id, "Teacher created");
        Ok(created)
    }

    /// Update a teacher
    pub async fn update_teacher(
        &self,
        teacher_id: i64,
        update: UpdateTeacher,
    ) -> Result<Teacher, CoreError> {
        self.db
            .update_teacher(teacher_id, update)
            .await
            .map_err(duplicate)?
            .ok_or_else(|| {
                CoreError::NotFound(format!("Teacher with id {} not found", teacher_id))
            })
    }

    /// Delete a teacher
    pub async fn delete_teacher(&self, teacher_id: i64) -> Result<(), CoreError> {
        if !self.db.soft_delete_teacher(teacher_id).await? {
            return Err(CoreError::NotFound(format!(
                "Teacher with id {} not found",
                teacher_id
            )));
        }
        info!(teacher_id, "Teacher deleted");
        Ok(())
    }

    /// List teachers assigned to a course
    pub async fn get_course_teachers(&self, course_id: i64) -> Result<Vec<Teacher>, CoreError> {
        self.require_course(course_id).await?;
        Ok(self.db.list_course_teachers(course_id).await?)
    }

    /// Assign a teacher to a course
    pub async fn assign_course_teacher(
        &self,
        course_id: i64,
        teacher_id: i64,
    ) -> Result<(), CoreError> {
        self.require_course(course_id).await?;
        self.get_teacher(teacher_id).await?;
        self.db.assign_teacher(course_id, teacher_id).await?;
        Ok(())
    }

    /// Remove a teacher from a course
    pub async fn remove_course_teacher(
        &self,
        course_id: i64,
        teacher_id: i64,
    ) -> Result<(), CoreError> {
        self.require_course(course_id).await?;
        if !self.db.unassign_teacher(course_id, teacher_id).await? {
            return Err(CoreError::NotFound(format!(
                "Teacher with id {} is not assigned to course {}",
                teacher_id, course_id
            )));
        }
        Ok(())
    }

    // ==================== Class Operations ====================

    /// List classes belonging to a course
    pub async fn get_course_classes(&self, course_id: i64) -> Result<Vec<Class>, CoreError> {
        self.require_course(course_id).await?;
        Ok(self.db.list_classes_for_course(course_id).await?)
    }

    /// Create a class under a course
    pub async fn create_class(&self, course_id: i64, class: NewClass) -> Result<Class, CoreError> {
        validate_slug(&class.slug)?;
        self.require_course(course_id).await?;
        let created = self.db.insert_class(course_id, class).await?;
        info!(class_id = created.id, course_id, "Class created");
        Ok(created)
    }

    /// Get a class by ID
    pub async fn get_class(&self, class_id: i64) -> Result<Class, CoreError> {
        self.db
            .get_class(class_id)
            .await?
            .ok_or_else(|| CoreError::NotFound(format!("Class with id {} not found", class_id)))
    }

    /// Update a class
    pub async fn update_class(
        &self,
        class_id: i64,
        update: UpdateClass,
    ) -> Result<Class, CoreError> {
        if let Some(slug) = &update.slug {
            validate_slug(slug)?;
        }
        self.db
            .update_class(class_id, update)
            .await?
            .ok_or_else(|| CoreError::NotFound(format!("Class with id {} not found", class_id)))
    }

    /// Delete a class
    pub async fn delete_class(&self, class_id: i64) -> Result<(), CoreError> {
        if !self.db.soft_delete_class(class_id).await? {
            return Err(CoreError::NotFound(format!(
                "Class with id {} not found",
                class_id
            )));
        }
        info!(class_id, "Class deleted");
        Ok(())
    }

    // ==================== Lesson Operations ====================

    /// List lessons belonging to a class
    pub async fn get_class_lessons(&self, class_id: i64) -> Result<Vec<Lesson>, CoreError> {
        self.get_class(class_id).await?;
        Ok(self.db.list_lessons_for_class(class_id).await?)
    }

    /// Create a lesson under a class
    pub async fn create_lesson(
        &self,
        class_id: i64,
        lesson: NewLesson,
    ) -> Result<Lesson, CoreError> {
        self.get_class(class_id).await?;
        let created = self.db.insert_lesson(class_id, lesson).await?;
        info!(lesson_id = created.id, class_id, "Lesson created");
        Ok(created)
    }

    /// Get a lesson by ID
    pub async fn get_lesson(&self, lesson_id: i64) -> Result<Lesson, CoreError> {
        self.db
            .get_lesson(lesson_id)
            .await?
            .ok_or_else(|| CoreError::NotFound(format!("Lesson with id {} not found", lesson_id)))
    }

    /// Update a lesson
    pub async fn update_lesson(
        &self,
        lesson_id: i64,
        update: UpdateLesson,
    ) -> Result<Lesson, CoreError> {
        self.db
            .update_lesson(lesson_id, update)
            .await?
            .ok_or_else(|| CoreError::NotFound(format!("Lesson with id {} not found", lesson_id)))
    }

    /// Delete a lesson
    pub async fn delete_lesson(&self, lesson_id: i64) -> Result<(), CoreError> {
        if !self.db.soft_delete_lesson(lesson_id).await? {
            return Err(CoreError::NotFound(format!(
                "Lesson with id {} not found",
                lesson_id
            )));
        }
        info!(lesson_id, "Lesson deleted");
        Ok(())
    }

    // ==================== Rating Operations ====================

    /// Add a rating for a course on behalf of a user
    ///
    /// An existing active rating for the same pair is refreshed in place
    /// rather than duplicated.
    pub async fn add_course_rating(
        &self,
        course_id: i64,
        user_id: i64,
        rating: i64,
    ) -> Result<CourseRating, CoreError> {
        self.require_course(course_id).await?;

        if let Some(existing) = self.db.get_course_rating(course_id, user_id).await? {
            debug!(course_id, user_id, "Refreshing existing rating");
            self.db
                .update_course_rating_value(existing.id, rating)
                .await?;
            return self.db.get_course_rating(course_id, user_id).await?.ok_or_else(|| {
                CoreError::NotFound(format!(
                    "No active rating found for user {} on course {}",
                    user_id, course_id
                ))
            });
        }

        info!(course_id, user_id, rating, "Rating added");
        Ok(self.db.insert_course_rating(course_id, user_id, rating).await?)
    }

    /// Update a user's existing rating for a course
    pub async fn update_course_rating(
        &self,
        course_id: i64,
        user_id: i64,
        rating: i64,
    ) -> Result<CourseRating, CoreError> {
        self.require_course(course_id).await?;

        let existing = self
            .db
            .get_course_rating(course_id, user_id)
            .await?
            .ok_or_else(|| {
                CoreError::NotFound(format!(
                    "No active rating found for user {} on course {}",
                    user_id, course_id
                ))
            })?;

        self.db.update_course_rating_value(existing.id, rating).await?;
        info!(course_id, user_id, rating, "Rating updated");

        self.db.get_course_rating(course_id, user_id).await?.ok_or_else(|| {
            CoreError::NotFound(format!(
                "No active rating found for user {} on course {}",
                user_id, course_id
            ))
        })
    }

    /// Delete a user's rating for a course
    ///
    /// Returns whether a rating was actually removed.
    pub async fn delete_course_rating(
        &self,
        course_id: i64,
        user_id: i64,
    ) -> Result<bool, CoreError> {
        self.require_course(course_id).await?;
        let deleted = self.db.soft_delete_course_rating(course_id, user_id).await?;
        if deleted {
            info!(course_id, user_id, "Rating deleted");
        }
        Ok(deleted)
    }

    /// List all ratings for a course
    pub async fn get_course_ratings(&self, course_id: i64) -> Result<Vec<CourseRating>, CoreError> {
        self.require_course(course_id).await?;
        Ok(self.db.list_course_ratings(course_id).await?)
    }

    /// Compute aggregate rating statistics for a course
    pub async fn get_course_rating_stats(&self, course_id: i64) -> Result<RatingStats, CoreError> {
        let ratings = self.get_course_ratings(course_id).await?;

        let mut distribution: BTreeMap<i64, i64> = (1..=5).map(|star| (star, 0)).collect();
        for r in &ratings {
            *distribution.entry(r.rating).or_insert(0) += 1;
        }

        let total = ratings.len() as i64;
        let average = if total > 0 {
            let sum: i64 = ratings.iter().map(|r| r.rating).sum();
            (sum as f64 / total as f64 * 100.0).round() / 100.0
        } else {
            0.0
        };

        Ok(RatingStats {
            average_rating: average,
            total_ratings: total,
            rating_distribution: distribution,
        })
    }

    /// Get the rating a specific user gave a course, if any
    pub async fn get_user_course_rating(
        &self,
        course_id: i64,
        user_id: i64,
    ) -> Result<Option<CourseRating>, CoreError> {
        self.require_course(course_id).await?;
        Ok(self.db.get_course_rating(course_id, user_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn service_with_course() -> (CourseService, i64) {
        let db = Database::new_in_memory().await.unwrap();
        let service = CourseService::new(db);
        let course = service
            .create_course(NewCourse {
                name: "Rust Basics".to_string(),
                description: "Intro course".to_string(),
                thumbnail: "https://example.com/rust.png".to_string(),
                slug: "rust-basics".to_string(),
            })
            .await
            .unwrap();
        (service, course.id)
    }

    #[test]
    fn test_validate_slug() {
        assert!(validate_slug("rust-basics").is_ok());
        assert!(validate_slug("course-101").is_ok());
        assert!(validate_slug("").is_err());
        assert!(validate_slug("Rust-Basics").is_err());
        assert!(validate_slug("rust basics").is_err());
        assert!(validate_slug(&"a".repeat(101)).is_err());
    }

    #[tokio::test]
    async fn test_add_rating_requires_course() {
        let db = Database::new_in_memory().await.unwrap();
        let service = CourseService::new(db);

        let err = service.add_course_rating(999, 42, 5).await.unwrap_err();
        assert!(matches!(err, CoreError::NotFound(msg) if msg.contains("999")));
    }

    #[tokio::test]
    async fn test_add_rating_refreshes_existing_pair() {
        let (service, course_id) = service_with_course().await;

        let first = service.add_course_rating(course_id, 42, 5).await.unwrap();
        let second = service.add_course_rating(course_id, 42, 3).await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.rating, 3);
        assert_eq!(service.get_course_ratings(course_id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_rating_without_existing_is_not_found() {
        let (service, course_id) = service_with_course().await;

        let err = service
            .update_course_rating(course_id, 42, 4)
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::NotFound(msg) if msg.contains("No active rating")));
    }

    #[tokio::test]
    async fn test_delete_rating_reports_miss() {
        let (service, course_id) = service_with_course().await;

        assert!(!service.delete_course_rating(course_id, 42).await.unwrap());

        service.add_course_rating(course_id, 42, 5).await.unwrap();
        assert!(service.delete_course_rating(course_id, 42).await.unwrap());
        assert!(service
            .get_user_course_rating(course_id, 42)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_rating_stats_cover_all_stars() {
        let (service, course_id) = service_with_course().await;

        service.add_course_rating(course_id, 1, 5).await.unwrap();
        service.add_course_rating(course_id, 2, 4).await.unwrap();
        service.add_course_rating(course_id, 3, 4).await.unwrap();

        let stats = service.get_course_rating_stats(course_id).await.unwrap();
        assert_eq!(stats.total_ratings, 3);
        assert_eq!(stats.average_rating, 4.33);
        assert_eq!(stats.rating_distribution.len(), 5);
        assert_eq!(stats.rating_distribution[&4], 2);
        assert_eq!(stats.rating_distribution[&5], 1);
        assert_eq!(stats.rating_distribution[&1], 0);
    }

    #[tokio::test]
    async fn test_stats_for_unrated_course() {
        let (service, course_id) = service_with_course().await;

        let stats = service.get_course_rating_stats(course_id).await.unwrap();
        assert_eq!(stats.total_ratings, 0);
        assert_eq!(stats.average_rating, 0.0);
        assert_eq!(stats.rating_distribution.len(), 5);
    }

    #[tokio::test]
    async fn test_duplicate_slug_rejected() {
        let (service, _) = service_with_course().await;

        let err = service
            .create_course(NewCourse {
                name: "Another".to_string(),
                description: "Dup".to_string(),
                thumbnail: "https://example.com/x.png".to_string(),
                slug: "rust-basics".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Duplicate(_)));
    }

    #[tokio::test]
    async fn test_deleted_course_is_gone() {
        let (service, course_id) = service_with_course().await;

        service.delete_course(course_id).await.unwrap();
        assert!(matches!(
            service.get_course(course_id).await,
            Err(CoreError::NotFound(_))
        ));
        assert!(matches!(
            service.add_course_rating(course_id, 42, 5).await,
            Err(CoreError::NotFound(_))
        ));
    }
}
