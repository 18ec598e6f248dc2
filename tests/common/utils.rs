use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use once_cell::sync::Lazy;
use secrecy::ExposeSecret;
use serde_json::json;
use sqlx::{Connection, Executor, PgConnection, PgPool};
use std::net::TcpListener;
use uuid::Uuid;

use matchday_backend::config::settings::{get_config, get_jwt_settings, DatabaseSettings};
use matchday_backend::middleware::auth::Claims;
use matchday_backend::models::user::UserRole;
use matchday_backend::run;
use matchday_backend::services::telemetry::{get_subscriber, init_subscriber};

// Ensure that the `tracing` stack is only initialised once using `once_cell`
static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();

    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::stdout);
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::sink);
        init_subscriber(subscriber);
    }
});

pub struct TestApp {
    pub address: String,
    pub db_pool: PgPool,
    jwt_secret: String,
}

pub async fn spawn_app() -> TestApp {
    Lazy::force(&TRACING);

    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);
    let mut configuration = get_config().expect("Failed to read configuration.");
    configuration.database.db_name = Uuid::new_v4().to_string();
    let connection_pool = configure_db(&configuration.database).await;
    let jwt_settings = get_jwt_settings(&configuration);
    let jwt_secret = jwt_settings.secret.expose_secret().to_string();

    let server = run(listener, connection_pool.clone(), jwt_settings).expect("Failed to bind address");
    let _ = tokio::spawn(server);

    TestApp {
        address,
        db_pool: connection_pool,
        jwt_secret,
    }
}

pub async fn configure_db(config: &DatabaseSettings) -> PgPool {
    // Create database
    let mut connection = PgConnection::connect(&config.connection_string_without_db())
        .await
        .expect("Failed to connect to Postgres");
    connection
        .execute(format!(r#"CREATE DATABASE "{}";"#, config.db_name).as_str())
        .await
        .expect("Failed to create database.");

    // Migrate database
    let connection_pool = PgPool::connect(&config.connection_string().expose_secret())
        .await
        .expect("Failed to connect to Postgres.");
    sqlx::migrate!("./migrations")
        .run(&connection_pool)
        .await
        .expect("Failed to migrate the database");

    connection_pool
}

impl TestApp {
    /// Mint a bearer token the way the external identity service would.
    pub fn token(&self, role: UserRole, team_ids: Vec<Uuid>) -> String {
        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            username: format!("testuser{}", Uuid::new_v4()),
            role,
            team_ids,
            exp: (Utc::now() + Duration::hours(1)).timestamp() as usize,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .expect("Failed to encode test token")
    }

    pub fn admin_token(&self) -> String {
        self.token(UserRole::Admin, vec![])
    }
}

/// A seeded fixture between two fresh teams with a couple of rostered
/// players per side.
pub struct SeededMatch {
    pub match_id: Uuid,
    pub season_id: Uuid,
    pub home_team_id: Uuid,
    pub away_team_id: Uuid,
    pub home_players: Vec<Uuid>,
    pub away_players: Vec<Uuid>,
}

pub async fn seed_match(pool: &PgPool) -> SeededMatch {
    let match_id = Uuid::new_v4();
    let season_id = Uuid::new_v4();
    let home_team_id = Uuid::new_v4();
    let away_team_id = Uuid::new_v4();

    sqlx::query(
        r#"
        INSERT INTO matches (
            id, home_team_id, away_team_id, season_id, age_group_id, division_id,
            match_type, scheduled_kickoff, half_duration_minutes, status
        ) VALUES ($1, $2, $3, $4, $5, NULL, 'league', NOW() + INTERVAL '1 day', 35, 'scheduled')
        "#,
    )
    .bind(match_id)
    .bind(home_team_id)
    .bind(away_team_id)
    .bind(season_id)
    .bind(Uuid::new_v4())
    .execute(pool)
    .await
    .expect("Failed to seed match");

    let mut home_players = Vec::new();
    let mut away_players = Vec::new();
    for i in 0..4 {
        home_players.push(
            seed_roster_player(pool, home_team_id, season_id, &format!("Home Player {}", i)).await,
        );
        away_players.push(
            seed_roster_player(pool, away_team_id, season_id, &format!("Away Player {}", i)).await,
        );
    }

    SeededMatch {
        match_id,
        season_id,
        home_team_id,
        away_team_id,
        home_players,
        away_players,
    }
}

pub async fn seed_roster_player(
    pool: &PgPool,
    team_id: Uuid,
    season_id: Uuid,
    name: &str,
) -> Uuid {
    let player_id = Uuid::new_v4();
    sqlx::query(
        r#"
        INSERT INTO roster_entries (id, team_id, season_id, player_id, player_name)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(team_id)
    .bind(season_id)
    .bind(player_id)
    .bind(name)
    .execute(pool)
    .await
    .expect("Failed to seed roster entry");
    player_id
}

/// Drive a seeded match into the given status through the transition
/// endpoint, so tests always use the same path operators do.
pub async fn transition_to(
    client: &reqwest::Client,
    app: &TestApp,
    token: &str,
    match_id: Uuid,
    targets: &[&str],
) {
    for target in targets {
        let response = client
            .post(format!("{}/matches/{}/transition", app.address, match_id))
            .bearer_auth(token)
            .json(&json!({ "target": target }))
            .send()
            .await
            .expect("Failed to execute transition request");
        assert!(
            response.status().is_success(),
            "transition to {} failed with {}",
            target,
            response.status()
        );
    }
}

pub async fn fetch_match_json(
    client: &reqwest::Client,
    app: &TestApp,
    token: &str,
    match_id: Uuid,
) -> serde_json::Value {
    let response = client
        .get(format!("{}/matches/{}", app.address, match_id))
        .bearer_auth(token)
        .send()
        .await
        .expect("Failed to fetch match");
    assert!(response.status().is_success());
    response.json().await.expect("Match response was not JSON")
}
