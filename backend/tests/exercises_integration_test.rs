//! Integration tests for the exercise picker and custom exercises

mod common;

use axum::http::StatusCode;
use serde_json::json;

fn unique_user() -> String {
    format!("ex-user-{}", uuid::Uuid::new_v4())
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_picker_lists_predefined_catalog() {
    let app = common::TestApp::new().await;
    let token = app.sign_in(&unique_user()).await;

    let (status, response) = app.get("/api/v1/exercises", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);

    let exercises: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert_eq!(exercises.as_array().unwrap().len(), 51);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_picker_filters_by_query_and_pattern() {
    let app = common::TestApp::new().await;
    let token = app.sign_in(&unique_user()).await;

    let (status, response) = app
        .get("/api/v1/exercises?q=pull&movement_pattern=PULL", Some(&token))
        .await;
    assert_eq!(status, StatusCode::OK);

    let exercises: serde_json::Value = serde_json::from_str(&response).unwrap();
    let names: Vec<&str> = exercises
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["name"].as_str().unwrap())
        .collect();
    assert!(!names.is_empty());
    assert!(names
        .iter()
        .all(|n| n.to_lowercase().contains("pull")));
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_custom_exercise_is_created_and_usable() {
    let app = common::TestApp::new().await;
    let token = app.sign_in(&unique_user()).await;

    let body = json!({
        "name": "Weighted Carries",
        "metric": "ISOMETRICS",
        "primary_target": "CORE",
        "other_targets": ["ARMS"],
        "movement_pattern": "CORE_AND_CARRY"
    });
    let (status, response) = app
        .post("/api/v1/exercises", &body.to_string(), Some(&token))
        .await;
    assert_eq!(status, StatusCode::OK, "{}", response);

    let exercise: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert_eq!(exercise["id"], "weighted_carries");
    assert_eq!(exercise["is_custom"], true);

    // Usable as a goal target like any predefined exercise
    let goal = json!({
        "exercise_id": "weighted_carries",
        "goal_frequency": "DAILY",
        "target_type": "SECONDS",
        "target_value": 120
    });
    let (status, response) = app
        .post("/api/v1/goals", &goal.to_string(), Some(&token))
        .await;
    assert_eq!(status, StatusCode::OK, "{}", response);
    let goal: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert_eq!(goal["exercise_name"], "Weighted Carries");

    // And appears in the picker
    let (_, response) = app.get("/api/v1/exercises?q=carries", Some(&token)).await;
    let exercises: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert_eq!(exercises.as_array().unwrap().len(), 1);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_colliding_custom_id_is_rejected() {
    let app = common::TestApp::new().await;
    let token = app.sign_in(&unique_user()).await;

    // Slug collides with the predefined pull_ups id
    let body = json!({"name": "Pull Ups", "metric": "REPS"});
    let (status, _) = app
        .post("/api/v1/exercises", &body.to_string(), Some(&token))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
