#![allow(dead_code, unused_macros)]

use workout_tracker::config::AppConfig;
use workout_tracker::db::WorkoutStore;
use workout_tracker::models::user::User;
use workout_tracker::utils::password::hash_password;

pub const TEST_PASSWORD: &str = "correct-horse";

pub fn test_config() -> AppConfig {
    AppConfig {
        database_url: "sqlite::memory:".to_string(),
        bind_address: "127.0.0.1:0".to_string(),
        jwt_secret: "test-secret".to_string(),
        token_ttl_hours: 1,
        bcrypt_cost: 4,
    }
}

pub async fn test_store() -> WorkoutStore {
    WorkoutStore::connect("sqlite::memory:").await.unwrap()
}

pub async fn create_user(store: &WorkoutStore, username: &str, email: &str) -> User {
    let password_hash = hash_password(TEST_PASSWORD.to_string(), 4).await.unwrap();
    store.create_user(username, email, &password_hash).await.unwrap()
}

/// Builds the full `/v1` app around a fresh in-memory store.
macro_rules! init_app {
    () => {{
        let store = actix_web::web::Data::new(common::test_store().await);
        let config = actix_web::web::Data::new(common::test_config());
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(store)
                .app_data(config)
                .configure(workout_tracker::routes::configure),
        )
        .await
    }};
}
