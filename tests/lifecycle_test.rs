mod common;

use serde_json::json;

use common::utils::{fetch_match_json, seed_match, spawn_app, transition_to};

#[tokio::test]
#[ignore = "requires a running Postgres"]
async fn full_lifecycle_reaches_completed() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();
    let token = app.admin_token();
    let seeded = seed_match(&app.db_pool).await;

    transition_to(
        &client,
        &app,
        &token,
        seeded.match_id,
        &["live", "halftime", "secondhalf", "completed"],
    )
    .await;

    let body = fetch_match_json(&client, &app, &token, seeded.match_id).await;
    assert_eq!(body["data"]["match"]["status"], "completed");
    assert_eq!(body["data"]["match"]["home_score"], 0);
    assert_eq!(body["data"]["match"]["away_score"], 0);
}

#[tokio::test]
#[ignore = "requires a running Postgres"]
async fn going_live_resets_period_and_minute() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();
    let token = app.admin_token();
    let seeded = seed_match(&app.db_pool).await;

    let response = client
        .post(format!(
            "{}/matches/{}/transition",
            app.address, seeded.match_id
        ))
        .bearer_auth(&token)
        .json(&json!({ "target": "live" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert!(response.status().is_success());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["data"]["current_period"], 1);
    assert_eq!(body["data"]["current_minute"], 0);
    assert_eq!(body["data"]["status"], "live");
}

#[tokio::test]
#[ignore = "requires a running Postgres"]
async fn out_of_order_transition_is_rejected_and_leaves_match_unmodified() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();
    let token = app.admin_token();
    let seeded = seed_match(&app.db_pool).await;

    // scheduled -> completed skips the whole state machine
    let response = client
        .post(format!(
            "{}/matches/{}/transition",
            app.address, seeded.match_id
        ))
        .bearer_auth(&token)
        .json(&json!({ "target": "completed" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status().as_u16(), 409);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["kind"], "invalid_transition");

    let body = fetch_match_json(&client, &app, &token, seeded.match_id).await;
    assert_eq!(body["data"]["match"]["status"], "scheduled");
}

#[tokio::test]
#[ignore = "requires a running Postgres"]
async fn cancelled_match_cannot_be_started() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();
    let token = app.admin_token();
    let seeded = seed_match(&app.db_pool).await;

    transition_to(&client, &app, &token, seeded.match_id, &["cancelled"]).await;

    let response = client
        .post(format!(
            "{}/matches/{}/transition",
            app.address, seeded.match_id
        ))
        .bearer_auth(&token)
        .json(&json!({ "target": "live" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status().as_u16(), 409);
    let body: serde_json::Value = response.json().await.unwrap();
    // The message names both states so operators understand why nothing happened
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("cancelled"));
}

#[tokio::test]
#[ignore = "requires a running Postgres"]
async fn forfeit_assigns_three_nil_without_goal_events() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();
    let token = app.admin_token();
    let seeded = seed_match(&app.db_pool).await;

    let response = client
        .post(format!(
            "{}/matches/{}/transition",
            app.address, seeded.match_id
        ))
        .bearer_auth(&token)
        .json(&json!({
            "target": "forfeit",
            "forfeit_team_id": seeded.away_team_id,
        }))
        .send()
        .await
        .expect("Failed to execute request");
    assert!(response.status().is_success());

    let body = fetch_match_json(&client, &app, &token, seeded.match_id).await;
    assert_eq!(body["data"]["match"]["status"], "forfeit");
    assert_eq!(body["data"]["match"]["home_score"], 3);
    assert_eq!(body["data"]["match"]["away_score"], 0);
    assert_eq!(
        body["data"]["match"]["forfeit_team_id"],
        json!(seeded.away_team_id)
    );
    assert_eq!(body["data"]["events"].as_array().unwrap().len(), 0);
}

#[tokio::test]
#[ignore = "requires a running Postgres"]
async fn forfeit_is_idempotent_for_the_same_team() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();
    let token = app.admin_token();
    let seeded = seed_match(&app.db_pool).await;

    for _ in 0..2 {
        let response = client
            .post(format!(
                "{}/matches/{}/transition",
                app.address, seeded.match_id
            ))
            .bearer_auth(&token)
            .json(&json!({
                "target": "forfeit",
                "forfeit_team_id": seeded.home_team_id,
            }))
            .send()
            .await
            .expect("Failed to execute request");
        assert!(response.status().is_success());
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["data"]["home_score"], 0);
        assert_eq!(body["data"]["away_score"], 3);
    }
}

#[tokio::test]
#[ignore = "requires a running Postgres"]
async fn forfeit_with_the_opposite_team_is_rejected() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();
    let token = app.admin_token();
    let seeded = seed_match(&app.db_pool).await;

    transition_to(&client, &app, &token, seeded.match_id, &[]).await;
    let response = client
        .post(format!(
            "{}/matches/{}/transition",
            app.address, seeded.match_id
        ))
        .bearer_auth(&token)
        .json(&json!({
            "target": "forfeit",
            "forfeit_team_id": seeded.home_team_id,
        }))
        .send()
        .await
        .expect("Failed to execute request");
    assert!(response.status().is_success());

    let response = client
        .post(format!(
            "{}/matches/{}/transition",
            app.address, seeded.match_id
        ))
        .bearer_auth(&token)
        .json(&json!({
            "target": "forfeit",
            "forfeit_team_id": seeded.away_team_id,
        }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status().as_u16(), 409);
}

#[tokio::test]
#[ignore = "requires a running Postgres"]
async fn forfeiting_a_participant_is_required() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();
    let token = app.admin_token();
    let seeded = seed_match(&app.db_pool).await;

    let response = client
        .post(format!(
            "{}/matches/{}/transition",
            app.address, seeded.match_id
        ))
        .bearer_auth(&token)
        .json(&json!({
            "target": "forfeit",
            "forfeit_team_id": uuid::Uuid::new_v4(),
        }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
#[ignore = "requires a running Postgres"]
async fn manager_of_unrelated_team_cannot_transition() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();
    let seeded = seed_match(&app.db_pool).await;
    let token = app.token(
        matchday_backend::models::user::UserRole::TeamManager,
        vec![uuid::Uuid::new_v4()],
    );

    let response = client
        .post(format!(
            "{}/matches/{}/transition",
            app.address, seeded.match_id
        ))
        .bearer_auth(&token)
        .json(&json!({ "target": "live" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status().as_u16(), 403);
}

#[tokio::test]
#[ignore = "requires a running Postgres"]
async fn match_list_total_count_spans_all_pages() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();
    let token = app.admin_token();
    seed_match(&app.db_pool).await;
    seed_match(&app.db_pool).await;
    seed_match(&app.db_pool).await;

    let response = client
        .get(format!("{}/matches?limit=2", app.address))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to list matches");
    assert!(response.status().is_success());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
    assert_eq!(body["total_count"], 3);
}

#[tokio::test]
#[ignore = "requires a running Postgres"]
async fn unknown_match_returns_not_found() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();
    let token = app.admin_token();

    let response = client
        .post(format!(
            "{}/matches/{}/transition",
            app.address,
            uuid::Uuid::new_v4()
        ))
        .bearer_auth(&token)
        .json(&json!({ "target": "live" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status().as_u16(), 404);
}
