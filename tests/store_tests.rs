mod common;

use chrono::NaiveDate;
use workout_tracker::errors::AppError;
use workout_tracker::models::workout::{WorkoutChanges, WorkoutFilter};
use workout_tracker::stats::compute_achievements;

use common::{create_user, test_store, TEST_PASSWORD};

fn date(raw: &str) -> NaiveDate {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").unwrap()
}

#[actix_web::test]
async fn created_workout_is_listed_unchanged() {
    let store = test_store().await;
    let user = create_user(&store, "alice", "alice@example.com").await;

    let created = store
        .create_workout(user.id, date("2024-01-02"), "Push-up", 15)
        .await
        .unwrap();
    let listed = store.list_workouts(user.id).await.unwrap();

    assert_eq!(listed, vec![created.clone()]);
    assert_eq!(listed[0].date, date("2024-01-02"));
    assert_eq!(listed[0].exercise, "Push-up");
    assert_eq!(listed[0].duration_minutes, 15);
}

#[actix_web::test]
async fn list_is_per_user_and_chronological() {
    let store = test_store().await;
    let alice = create_user(&store, "alice", "alice@example.com").await;
    let bob = create_user(&store, "bob", "bob@example.com").await;

    store.create_workout(alice.id, date("2024-01-05"), "Run", 30).await.unwrap();
    store.create_workout(alice.id, date("2024-01-01"), "Swim", 40).await.unwrap();
    store.create_workout(bob.id, date("2024-01-03"), "Yoga", 60).await.unwrap();

    let dates: Vec<NaiveDate> = store
        .list_workouts(alice.id)
        .await
        .unwrap()
        .into_iter()
        .map(|w| w.date)
        .collect();
    assert_eq!(dates, vec![date("2024-01-01"), date("2024-01-05")]);
    assert_eq!(store.list_workouts(bob.id).await.unwrap().len(), 1);
}

#[actix_web::test]
async fn duplicate_email_is_rejected() {
    let store = test_store().await;
    create_user(&store, "alice", "alice@example.com").await;

    let err = store
        .create_user("alice2", "alice@example.com", "hash")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::DuplicateEmail));

    // Still rejected on the cached path, and the first account is untouched.
    let err = store
        .create_user("alice3", "alice@example.com", "hash")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::DuplicateEmail));
    let user = store.authenticate("alice@example.com", TEST_PASSWORD).await.unwrap();
    assert_eq!(user.username, "alice");
}

#[actix_web::test]
async fn duplicate_username_is_a_conflict() {
    let store = test_store().await;
    create_user(&store, "alice", "alice@example.com").await;

    let err = store
        .create_user("alice", "other@example.com", "hash")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[actix_web::test]
async fn authenticate_checks_password() {
    let store = test_store().await;
    let user = create_user(&store, "alice", "alice@example.com").await;
    assert_ne!(user.password_hash, TEST_PASSWORD);

    let found = store.authenticate("alice@example.com", TEST_PASSWORD).await.unwrap();
    assert_eq!(found.id, user.id);

    let wrong = store.authenticate("alice@example.com", "not-the-password").await;
    assert!(matches!(wrong, Err(AppError::InvalidCredentials)));

    let unknown = store.authenticate("nobody@example.com", TEST_PASSWORD).await;
    assert!(matches!(unknown, Err(AppError::InvalidCredentials)));
}

#[actix_web::test]
async fn update_changes_only_given_fields() {
    let store = test_store().await;
    let user = create_user(&store, "alice", "alice@example.com").await;
    let workout = store
        .create_workout(user.id, date("2024-01-02"), "Run", 30)
        .await
        .unwrap();

    let updated = store
        .update_workout(
            user.id,
            workout.id,
            WorkoutChanges {
                duration_minutes: Some(45),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.duration_minutes, 45);
    assert_eq!(updated.exercise, "Run");
    assert_eq!(updated.date, date("2024-01-02"));
    assert_eq!(store.list_workouts(user.id).await.unwrap(), vec![updated]);
}

#[actix_web::test]
async fn update_and_delete_unknown_or_foreign_workouts_are_not_found() {
    let store = test_store().await;
    let alice = create_user(&store, "alice", "alice@example.com").await;
    let bob = create_user(&store, "bob", "bob@example.com").await;
    let workout = store
        .create_workout(alice.id, date("2024-01-02"), "Run", 30)
        .await
        .unwrap();

    let changes = WorkoutChanges {
        exercise: Some("Swim".to_string()),
        ..Default::default()
    };
    assert!(matches!(
        store.update_workout(bob.id, workout.id, changes.clone()).await,
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(
        store.update_workout(alice.id, 9999, changes).await,
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(
        store.delete_workout(bob.id, workout.id).await,
        Err(AppError::NotFound(_))
    ));

    store.delete_workout(alice.id, workout.id).await.unwrap();
    assert!(store.list_workouts(alice.id).await.unwrap().is_empty());
    assert!(matches!(
        store.delete_workout(alice.id, workout.id).await,
        Err(AppError::NotFound(_))
    ));
}

#[actix_web::test]
async fn rejects_invalid_workouts() {
    let store = test_store().await;
    let user = create_user(&store, "alice", "alice@example.com").await;

    assert!(matches!(
        store.create_workout(user.id, date("2024-01-02"), "Run", -1).await,
        Err(AppError::BadRequest(_))
    ));
    assert!(matches!(
        store.create_workout(user.id, date("2024-01-02"), "  ", 10).await,
        Err(AppError::BadRequest(_))
    ));
    assert!(matches!(
        store.create_workout(user.id + 100, date("2024-01-02"), "Run", 10).await,
        Err(AppError::NotFound(_))
    ));
}

#[actix_web::test]
async fn search_applies_filters_and_paging() {
    let store = test_store().await;
    let user = create_user(&store, "alice", "alice@example.com").await;
    for (day, exercise) in [("2024-01-01", "Run"), ("2024-01-02", "Swim"), ("2024-01-03", "Run"), ("2024-01-04", "Run")] {
        store.create_workout(user.id, date(day), exercise, 20).await.unwrap();
    }

    let runs = store
        .search_workouts(
            user.id,
            &WorkoutFilter {
                exercise: Some("Run".to_string()),
                date_from: Some(date("2024-01-02")),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(runs.iter().map(|w| w.date).collect::<Vec<_>>(), vec![date("2024-01-03"), date("2024-01-04")]);

    let page = store
        .search_workouts(
            user.id,
            &WorkoutFilter {
                limit: Some(2),
                offset: Some(1),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(page.iter().map(|w| w.date).collect::<Vec<_>>(), vec![date("2024-01-02"), date("2024-01-03")]);
}

#[actix_web::test]
async fn exercise_names_are_stored_verbatim() {
    let store = test_store().await;
    let user = create_user(&store, "alice", "alice@example.com").await;

    let padded = store
        .create_workout(user.id, date("2024-01-01"), " Push-up", 10)
        .await
        .unwrap();
    for day in ["2024-01-02", "2024-01-03", "2024-01-04", "2024-01-05"] {
        store.create_workout(user.id, date(day), "Push-up ", 10).await.unwrap();
    }

    let listed = store.list_workouts(user.id).await.unwrap();
    assert_eq!(listed[0].exercise, " Push-up");
    assert_eq!(listed[0], padded);
    assert!(listed[1..].iter().all(|w| w.exercise == "Push-up "));

    let achievements = compute_achievements(&listed).unwrap();
    assert_eq!(achievements.len(), 2);
    assert!(achievements[" Push-up"].is_empty());
    assert!(achievements["Push-up "].is_empty());

    let updated = store
        .update_workout(
            user.id,
            padded.id,
            WorkoutChanges {
                exercise: Some("  Squat ".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.exercise, "  Squat ");
}
