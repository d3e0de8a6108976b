mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use serde_json::json;

use common::spawn;

#[tokio::test]
async fn same_day_mood_is_overwritten() {
    let app = spawn().await;
    let token = app.user_token("alice").await;
    let today = Utc::now().date_naive().to_string();

    let (status, first) = app
        .send(
            "POST",
            "/api/mood-stats",
            Some(&token),
            Some(json!({ "mood": "Happy", "date": today })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, second) = app
        .send(
            "POST",
            "/api/mood-stats",
            Some(&token),
            Some(json!({ "mood": "Sad", "date": today })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(first["id"], second["id"]);

    let (_, stats) = app
        .send("GET", "/api/users/me/mood-stats?days=1", Some(&token), None)
        .await;
    assert_eq!(stats, json!([second]));
    assert_eq!(stats[0]["mood"], "Sad");
}

#[tokio::test]
async fn missing_date_means_today() {
    let app = spawn().await;
    let token = app.user_token("alice").await;

    let (status, stat) = app
        .send(
            "POST",
            "/api/mood-stats",
            Some(&token),
            Some(json!({ "mood": "Calm" })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(stat["date"], Utc::now().date_naive().to_string());
}

#[tokio::test]
async fn moods_are_per_user() {
    let app = spawn().await;
    let alice = app.user_token("alice").await;
    let bob = app.user_token("bob").await;

    app.send(
        "POST",
        "/api/mood-stats",
        Some(&alice),
        Some(json!({ "mood": "Happy" })),
    )
    .await;
    app.send(
        "POST",
        "/api/mood-stats",
        Some(&bob),
        Some(json!({ "mood": "Tired" })),
    )
    .await;

    let (_, stats) = app
        .send("GET", "/api/users/me/mood-stats", Some(&alice), None)
        .await;
    assert_eq!(stats.as_array().unwrap().len(), 1);
    assert_eq!(stats[0]["mood"], "Happy");
}

#[tokio::test]
async fn window_covers_last_n_days_ascending() {
    let app = spawn().await;
    let token = app.user_token("alice").await;
    let today = Utc::now().date_naive();

    for (offset, mood) in [(0, "Today"), (7, "TooOld"), (6, "Oldest"), (3, "Middle")] {
        let date = (today - Duration::days(offset)).to_string();
        let (status, _) = app
            .send(
                "POST",
                "/api/mood-stats",
                Some(&token),
                Some(json!({ "mood": mood, "date": date })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }
    let tomorrow = (today + Duration::days(1)).to_string();
    app.send(
        "POST",
        "/api/mood-stats",
        Some(&token),
        Some(json!({ "mood": "Future", "date": tomorrow })),
    )
    .await;

    let (status, stats) = app
        .send("GET", "/api/users/me/mood-stats?days=7", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);

    let moods: Vec<&str> = stats
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["mood"].as_str().unwrap())
        .collect();
    assert_eq!(moods, ["Oldest", "Middle", "Today"]);
}

#[tokio::test]
async fn days_out_of_range_is_rejected() {
    let app = spawn().await;
    let token = app.user_token("alice").await;

    for days in ["0", "366", "-3", "week"] {
        let uri = format!("/api/users/me/mood-stats?days={days}");
        let (status, _) = app.send("GET", &uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "days={days}");
    }

    let (status, _) = app
        .send("GET", "/api/users/me/mood-stats?days=365", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn bad_mood_input_is_rejected() {
    let app = spawn().await;
    let token = app.user_token("alice").await;

    let (status, body) = app
        .send(
            "POST",
            "/api/mood-stats",
            Some(&token),
            Some(json!({ "mood": "Happy", "date": "10/03/2024" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "invalid date format");

    let (status, _) = app
        .send(
            "POST",
            "/api/mood-stats",
            Some(&token),
            Some(json!({ "mood": "  " })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn missing_mood_is_bad_request() {
    let app = spawn().await;
    let token = app.user_token("alice").await;

    let (status, body) = app
        .send(
            "POST",
            "/api/mood-stats",
            Some(&token),
            Some(json!({ "date": "2024-01-01" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], 400);
    assert!(body["error"]["message"].is_string());
}
