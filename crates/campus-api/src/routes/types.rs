//! Request DTOs for the catalog and rating API

use serde::Deserialize;

use crate::error::ApiError;

// ==================== Course Types ====================

/// Create course request
#[derive(Deserialize)]
pub struct CourseRequest {
    pub name: String,
    pub description: String,
    pub thumbnail: String,
    pub slug: String,
}

/// Update course request
#[derive(Deserialize, Default)]
pub struct CourseUpdateRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub thumbnail: Option<String>,
    pub slug: Option<String>,
}

// ==================== Teacher Types ====================

/// Create teacher request
#[derive(Deserialize)]
pub struct TeacherRequest {
    pub name: String,
    pub email: String,
}

/// Update teacher request
#[derive(Deserialize, Default)]
pub struct TeacherUpdateRequest {
    pub name: Option<String>,
    pub email: Option<String>,
}

// ==================== Class Types ====================

/// Create class request
#[derive(Deserialize)]
pub struct ClassRequest {
    pub name: String,
    pub description: String,
    pub slug: String,
}

/// Update class request
#[derive(Deserialize, Default)]
pub struct ClassUpdateRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub slug: Option<String>,
}

// ==================== Lesson Types ====================

/// Create lesson request
#[derive(Deserialize)]
pub struct LessonRequest {
    pub name: String,
    pub video_url: String,
}

/// Update lesson request
#[derive(Deserialize, Default)]
pub struct LessonUpdateRequest {
    pub name: Option<String>,
    pub video_url: Option<String>,
}

// ==================== Rating Types ====================

/// Add or update rating request
#[derive(Deserialize)]
pub struct RatingRequest {
    pub rating: i64,
}

/// Validate a star rating payload value
pub fn validate_rating(rating: i64) -> Result<(), ApiError> {
    if !(1..=5).contains(&rating) {
        return Err(ApiError::Validation(
            "Rating must be between 1 and 5".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rating_bounds() {
        assert!(validate_rating(1).is_ok());
        assert!(validate_rating(5).is_ok());
        assert!(validate_rating(0).is_err());
        assert!(validate_rating(6).is_err());
        assert!(validate_rating(-1).is_err());
    }
}
