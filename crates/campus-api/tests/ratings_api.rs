//! Integration tests for the rating endpoints, covering the
//! authentication and authorization behavior end to end.

mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{request, seed_course, send, test_app, token_for};

// ==================== Authenticated write flow ====================

#[tokio::test]
async fn test_add_rating_success() {
    let (app, state) = test_app().await;
    let course_id = seed_course(&state).await;
    let token = token_for(&state, 42);

    let (status, body) = send(
        &app,
        request(
            "POST",
            &format!("/courses/{}/ratings", course_id),
            Some(&token),
            Some(json!({"rating": 5})),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["user_id"], 42);
    assert_eq!(body["rating"], 5);
}

#[tokio::test]
async fn test_authenticated_user_can_manage_own_rating() {
    let (app, state) = test_app().await;
    let course_id = seed_course(&state).await;
    let token = token_for(&state, 42);

    // Create
    let (status, body) = send(
        &app,
        request(
            "POST",
            &format!("/courses/{}/ratings", course_id),
            Some(&token),
            Some(json!({"rating": 5})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["rating"], 5);

    // Update
    let (status, body) = send(
        &app,
        request(
            "PUT",
            &format!("/courses/{}/ratings/42", course_id),
            Some(&token),
            Some(json!({"rating": 4})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["rating"], 4);

    // Delete
    let (status, _) = send(
        &app,
        request(
            "DELETE",
            &format!("/courses/{}/ratings/42", course_id),
            Some(&token),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_update_missing_rating_is_not_found() {
    let (app, state) = test_app().await;
    let course_id = seed_course(&state).await;
    let token = token_for(&state, 42);

    let (status, _) = send(
        &app,
        request(
            "PUT",
            &format!("/courses/{}/ratings/42", course_id),
            Some(&token),
            Some(json!({"rating": 3})),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_add_rating_to_missing_course_is_not_found() {
    let (app, state) = test_app().await;
    let token = token_for(&state, 42);

    let (status, body) = send(
        &app,
        request(
            "POST",
            "/courses/999/ratings",
            Some(&token),
            Some(json!({"rating": 5})),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["detail"].as_str().unwrap().contains("not found"));
}

#[tokio::test]
async fn test_out_of_range_rating_is_unprocessable() {
    let (app, state) = test_app().await;
    let course_id = seed_course(&state).await;
    let token = token_for(&state, 42);

    for bad in [0, 6] {
        let (status, _) = send(
            &app,
            request(
                "POST",
                &format!("/courses/{}/ratings", course_id),
                Some(&token),
                Some(json!({"rating": bad})),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }
}

// ==================== Authentication ====================

#[tokio::test]
async fn test_write_endpoints_require_authentication() {
    let (app, state) = test_app().await;
    let course_id = seed_course(&state).await;

    let (status, body) = send(
        &app,
        request(
            "POST",
            &format!("/courses/{}/ratings", course_id),
            None,
            Some(json!({"rating": 5})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["detail"], "Authentication required");

    let (status, _) = send(
        &app,
        request(
            "PUT",
            &format!("/courses/{}/ratings/42", course_id),
            None,
            Some(json!({"rating": 3})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        &app,
        request(
            "DELETE",
            &format!("/courses/{}/ratings/42", course_id),
            None,
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_invalid_token_rejected_with_distinct_message() {
    let (app, state) = test_app().await;
    let course_id = seed_course(&state).await;

    let (status, body) = send(
        &app,
        request(
            "POST",
            &format!("/courses/{}/ratings", course_id),
            Some("invalid_token"),
            Some(json!({"rating": 5})),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["detail"], "Could not validate credentials");
}

#[tokio::test]
async fn test_expired_token_rejected_like_invalid() {
    let (app, state) = test_app().await;
    let course_id = seed_course(&state).await;

    let expired_codec =
        campus_auth::TokenCodec::new(common::TEST_SECRET, "HS256", -5).unwrap();
    let token = expired_codec.issue(42, None).unwrap();

    let (status, body) = send(
        &app,
        request(
            "POST",
            &format!("/courses/{}/ratings", course_id),
            Some(&token),
            Some(json!({"rating": 5})),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["detail"], "Could not validate credentials");
}

// ==================== Authorization ====================

#[tokio::test]
async fn test_cannot_update_another_users_rating() {
    let (app, state) = test_app().await;
    let course_id = seed_course(&state).await;
    let token = token_for(&state, 42);

    let (status, body) = send(
        &app,
        request(
            "PUT",
            &format!("/courses/{}/ratings/99", course_id),
            Some(&token),
            Some(json!({"rating": 3})),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(body["detail"]
        .as_str()
        .unwrap()
        .contains("Cannot update another user's rating"));
}

#[tokio::test]
async fn test_cannot_delete_another_users_rating() {
    let (app, state) = test_app().await;
    let course_id = seed_course(&state).await;
    let owner_token = token_for(&state, 99);
    let intruder_token = token_for(&state, 42);

    // User 99 rates the course
    let (status, _) = send(
        &app,
        request(
            "POST",
            &format!("/courses/{}/ratings", course_id),
            Some(&owner_token),
            Some(json!({"rating": 5})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    // User 42 may not delete it
    let (status, body) = send(
        &app,
        request(
            "DELETE",
            &format!("/courses/{}/ratings/99", course_id),
            Some(&intruder_token),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(body["detail"]
        .as_str()
        .unwrap()
        .contains("Cannot delete another user's rating"));

    // The rating survived the forbidden attempt
    let rating = state
        .service
        .get_user_course_rating(course_id, 99)
        .await
        .unwrap();
    assert!(rating.is_some());
}

// ==================== Public reads ====================

#[tokio::test]
async fn test_read_endpoints_are_public() {
    let (app, state) = test_app().await;
    let course_id = seed_course(&state).await;
    state
        .service
        .add_course_rating(course_id, 42, 5)
        .await
        .unwrap();

    let (status, body) = send(
        &app,
        request("GET", &format!("/courses/{}/ratings", course_id), None, None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (status, _) = send(
        &app,
        request(
            "GET",
            &format!("/courses/{}/ratings/stats", course_id),
            None,
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &app,
        request(
            "GET",
            &format!("/courses/{}/ratings/user/42", course_id),
            None,
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_bad_token_does_not_block_public_reads() {
    let (app, state) = test_app().await;
    let course_id = seed_course(&state).await;

    // A garbage bearer token on an optional-auth read resolves to no
    // caller instead of a rejection
    let (status, _) = send(
        &app,
        request(
            "GET",
            &format!("/courses/{}/ratings", course_id),
            Some("not-a-token"),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Same for an expired but well-formed token
    let expired_codec =
        campus_auth::TokenCodec::new(common::TEST_SECRET, "HS256", -5).unwrap();
    let expired = expired_codec.issue(42, None).unwrap();

    let (status, _) = send(
        &app,
        request(
            "GET",
            &format!("/courses/{}/ratings/stats", course_id),
            Some(&expired),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_user_rating_read_miss_is_no_content() {
    let (app, state) = test_app().await;
    let course_id = seed_course(&state).await;

    let (status, body) = send(
        &app,
        request(
            "GET",
            &format!("/courses/{}/ratings/user/42", course_id),
            None,
            None,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());
}

// ==================== Response contracts ====================

#[tokio::test]
async fn test_rating_response_structure() {
    let (app, state) = test_app().await;
    let course_id = seed_course(&state).await;
    state
        .service
        .add_course_rating(course_id, 42, 5)
        .await
        .unwrap();

    let (status, body) = send(
        &app,
        request("GET", &format!("/courses/{}/ratings", course_id), None, None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let entry = &body.as_array().unwrap()[0];
    let mut fields: Vec<&str> = entry.as_object().unwrap().keys().map(String::as_str).collect();
    fields.sort_unstable();
    assert_eq!(
        fields,
        ["course_id", "created_at", "id", "rating", "updated_at", "user_id"]
    );
}

#[tokio::test]
async fn test_stats_response_structure() {
    let (app, state) = test_app().await;
    let course_id = seed_course(&state).await;
    state
        .service
        .add_course_rating(course_id, 1, 4)
        .await
        .unwrap();
    state
        .service
        .add_course_rating(course_id, 2, 5)
        .await
        .unwrap();

    let (status, body) = send(
        &app,
        request(
            "GET",
            &format!("/courses/{}/ratings/stats", course_id),
            None,
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let mut fields: Vec<&str> = body.as_object().unwrap().keys().map(String::as_str).collect();
    fields.sort_unstable();
    assert_eq!(fields, ["average_rating", "rating_distribution", "total_ratings"]);
    assert_eq!(body["average_rating"], 4.5);
    assert_eq!(body["total_ratings"], 2);
    assert_eq!(body["rating_distribution"].as_object().unwrap().len(), 5);
}
