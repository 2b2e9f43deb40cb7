//! Integration tests for set logging, editing, and the daily log

mod common;

use axum::http::StatusCode;
use serde_json::json;

fn unique_user() -> String {
    format!("set-user-{}", uuid::Uuid::new_v4())
}

/// The session serves the display unit from a live preferences subscription,
/// so a preference change lands asynchronously; poll until it does.
async fn await_display_unit(app: &common::TestApp, token: &str, unit: &str) {
    for _ in 0..50 {
        let (_, response) = app
            .get("/api/v1/sets/last-weight?exercise_id=dips", Some(token))
            .await;
        let prefill: serde_json::Value = serde_json::from_str(&response).unwrap();
        if prefill["weight_unit"] == unit {
            return;
        }
        tokio::time::sleep(std::time::Duration::from_millis(100)).await;
    }
    panic!("display unit never became {}", unit);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_log_rep_set() {
    let app = common::TestApp::new().await;
    let token = app.sign_in(&unique_user()).await;

    let body = json!({"exercise_id": "push_ups", "reps": 15});
    let (status, response) = app
        .post("/api/v1/sets", &body.to_string(), Some(&token))
        .await;
    assert_eq!(status, StatusCode::OK, "{}", response);

    let set: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert_eq!(set["exercise_id"], "push_ups");
    assert_eq!(set["reps"], 15);
    assert!(set["weight_added"].is_null());
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_isometric_set_requires_duration() {
    let app = common::TestApp::new().await;
    let token = app.sign_in(&unique_user()).await;

    // plank is measured by duration; reps alone must be rejected
    let body = json!({"exercise_id": "plank", "reps": 10});
    let (status, response) = app
        .post("/api/v1/sets", &body.to_string(), Some(&token))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let error: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert_eq!(error["error"]["field"], "duration_seconds");
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_weight_round_trips_through_kg_preference() {
    let app = common::TestApp::new().await;
    let token = app.sign_in(&unique_user()).await;

    let prefs = json!({"weight_unit": "KG"});
    let (status, _) = app
        .patch("/api/v1/preferences", &prefs.to_string(), Some(&token))
        .await;
    assert_eq!(status, StatusCode::OK);
    await_display_unit(&app, &token, "KG").await;

    let body = json!({"exercise_id": "dips", "reps": 8, "weight_added": 10.0});
    let (status, response) = app
        .post("/api/v1/sets", &body.to_string(), Some(&token))
        .await;
    assert_eq!(status, StatusCode::OK, "{}", response);

    let set: serde_json::Value = serde_json::from_str(&response).unwrap();
    let weight = set["weight_added"].as_f64().unwrap();
    assert!((weight - 10.0).abs() < 1e-6, "got {}", weight);
    assert_eq!(set["weight_unit"], "KG");

    // The pre-fill reports the same entry back in kilograms
    let (_, response) = app
        .get("/api/v1/sets/last-weight?exercise_id=dips", Some(&token))
        .await;
    let prefill: serde_json::Value = serde_json::from_str(&response).unwrap();
    let kg = prefill["weight_added"].as_f64().unwrap();
    assert!((kg - 10.0).abs() < 1e-6, "got {}", kg);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_last_weight_prefills_from_the_previous_set() {
    let app = common::TestApp::new().await;
    let token = app.sign_in(&unique_user()).await;

    // Nothing logged yet
    let (status, response) = app
        .get("/api/v1/sets/last-weight?exercise_id=dips", Some(&token))
        .await;
    assert_eq!(status, StatusCode::OK);
    let prefill: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert!(prefill["weight_added"].is_null());
    assert_eq!(prefill["weight_unit"], "LB");

    let body = json!({"exercise_id": "dips", "reps": 6, "weight_added": 25.0});
    let (status, response) = app
        .post("/api/v1/sets", &body.to_string(), Some(&token))
        .await;
    assert_eq!(status, StatusCode::OK, "{}", response);

    let (_, response) = app
        .get("/api/v1/sets/last-weight?exercise_id=dips", Some(&token))
        .await;
    let prefill: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert_eq!(prefill["exercise_id"], "dips");
    assert_eq!(prefill["weight_added"].as_f64().unwrap(), 25.0);

    // Other exercises are not pre-filled
    let (_, response) = app
        .get("/api/v1/sets/last-weight?exercise_id=pull_ups", Some(&token))
        .await;
    let prefill: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert!(prefill["weight_added"].is_null());
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_last_weight_dies_with_the_session() {
    let app = common::TestApp::new().await;
    let user = unique_user();
    let token = app.sign_in(&user).await;

    let body = json!({"exercise_id": "dips", "reps": 6, "weight_added": 25.0});
    app.post("/api/v1/sets", &body.to_string(), Some(&token))
        .await;

    let (status, _) = app.post("/api/v1/auth/signout", "{}", Some(&token)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    // A fresh session starts with an empty cache
    let token = app.sign_in(&user).await;
    let (_, response) = app
        .get("/api/v1/sets/last-weight?exercise_id=dips", Some(&token))
        .await;
    let prefill: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert!(prefill["weight_added"].is_null());
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_update_and_delete_set() {
    let app = common::TestApp::new().await;
    let token = app.sign_in(&unique_user()).await;

    let body = json!({"exercise_id": "squats", "reps": 20});
    let (_, response) = app
        .post("/api/v1/sets", &body.to_string(), Some(&token))
        .await;
    let set: serde_json::Value = serde_json::from_str(&response).unwrap();
    let id = set["id"].as_str().unwrap();

    let update = json!({"reps": 25, "notes": "felt strong"});
    let (status, response) = app
        .put(
            &format!("/api/v1/sets/{}", id),
            &update.to_string(),
            Some(&token),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let updated: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert_eq!(updated["reps"], 25);
    assert_eq!(updated["notes"], "felt strong");

    let (status, _) = app
        .delete(&format!("/api/v1/sets/{}", id), Some(&token))
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    // Second delete finds nothing
    let (status, _) = app
        .delete(&format!("/api/v1/sets/{}", id), Some(&token))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_users_cannot_touch_each_others_sets() {
    let app = common::TestApp::new().await;
    let owner = app.sign_in(&unique_user()).await;
    let other = app.sign_in(&unique_user()).await;

    let body = json!({"exercise_id": "squats", "reps": 20});
    let (_, response) = app
        .post("/api/v1/sets", &body.to_string(), Some(&owner))
        .await;
    let set: serde_json::Value = serde_json::from_str(&response).unwrap();
    let id = set["id"].as_str().unwrap();

    let (status, _) = app
        .delete(&format!("/api/v1/sets/{}", id), Some(&other))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_daily_log_groups_by_exercise() {
    let app = common::TestApp::new().await;
    let token = app.sign_in(&unique_user()).await;

    for reps in [10, 12] {
        let body = json!({"exercise_id": "push_ups", "reps": reps});
        app.post("/api/v1/sets", &body.to_string(), Some(&token))
            .await;
    }
    let body = json!({"exercise_id": "plank", "duration_seconds": 45.0});
    app.post("/api/v1/sets", &body.to_string(), Some(&token))
        .await;

    let (status, response) = app.get("/api/v1/sets/daily-log", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);

    let log: serde_json::Value = serde_json::from_str(&response).unwrap();
    let exercises = log["exercises"].as_array().unwrap();
    assert_eq!(exercises.len(), 2);

    let push_ups = exercises
        .iter()
        .find(|e| e["exercise_id"] == "push_ups")
        .unwrap();
    assert_eq!(push_ups["total_sets"], 2);
    assert_eq!(push_ups["total_reps"], 22);

    let plank = exercises
        .iter()
        .find(|e| e["exercise_id"] == "plank")
        .unwrap();
    assert_eq!(plank["total_duration_seconds"], 45.0);
    assert_eq!(log["sets"].as_array().unwrap().len(), 3);
}
