use std::str::FromStr;

use chrono::NaiveDate;
use moka::sync::Cache;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::{Executor, QueryBuilder, Sqlite};

use crate::errors::AppError;
use crate::models::user::User;
use crate::models::workout::{Workout, WorkoutChanges, WorkoutFilter};
use crate::utils::password::verify_password;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL UNIQUE CHECK (length(username) > 0),
    email TEXT NOT NULL UNIQUE CHECK (length(email) > 0),
    password_hash TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS workout_sessions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NOT NULL REFERENCES users(id),
    date TEXT NOT NULL,
    exercise TEXT NOT NULL CHECK (length(exercise) > 0),
    duration_minutes INTEGER NOT NULL CHECK (duration_minutes >= 0)
);

CREATE INDEX IF NOT EXISTS idx_workout_sessions_user_date
    ON workout_sessions (user_id, date);
"#;

const WORKOUT_COLUMNS: &str = "id, user_id, date, exercise, duration_minutes";
const DEFAULT_PAGE_SIZE: i64 = 50;

#[derive(Clone)]
pub struct WorkoutStore {
    pool: SqlitePool,
    // Emails already seen registered; the unique index stays authoritative.
    known_emails: Cache<String, ()>,
}

impl WorkoutStore {
    /// Opens (creating if needed) the database at `database_url` and applies the schema.
    pub async fn connect(database_url: &str) -> Result<Self, AppError> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let mut pool_options = SqlitePoolOptions::new();
        if database_url.contains(":memory:") {
            // Every connection to `:memory:` is its own database, so pin one for good.
            pool_options = pool_options
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        } else {
            pool_options = pool_options.max_connections(5);
        }

        let pool = pool_options.connect_with(options).await?;
        let store = Self::from_pool(pool);
        store.init_schema().await?;
        log::info!("Connected to workout database at {}", database_url);
        Ok(store)
    }

    pub fn from_pool(pool: SqlitePool) -> Self {
        Self {
            pool,
            known_emails: Cache::new(10_000),
        }
    }

    pub async fn init_schema(&self) -> Result<(), AppError> {
        (&self.pool).execute(SCHEMA).await?;
        Ok(())
    }

    pub async fn create_user(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<User, AppError> {
        if username.trim().is_empty() || email.trim().is_empty() {
            return Err(AppError::BadRequest("Username and email are required".to_string()));
        }
        if self.known_emails.contains_key(email) || self.email_exists(email).await? {
            return Err(AppError::DuplicateEmail);
        }

        let result = sqlx::query("INSERT INTO users (username, email, password_hash) VALUES (?, ?, ?)")
            .bind(username)
            .bind(email)
            .bind(password_hash)
            .execute(&self.pool)
            .await;

        let id = match result {
            Ok(done) => done.last_insert_rowid(),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                return if db_err.message().contains("users.email") {
                    Err(AppError::DuplicateEmail)
                } else {
                    Err(AppError::Conflict("Username already taken".to_string()))
                };
            }
            Err(e) => return Err(e.into()),
        };

        self.known_emails.insert(email.to_string(), ());
        log::info!("Registered user {} ({})", id, username);

        Ok(User {
            id,
            username: username.to_string(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
        })
    }

    /// Looks up the user by email and checks `password` against the stored hash.
    /// Unknown emails and wrong passwords are reported identically.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, email, password_hash FROM users WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        let Some(user) = user else {
            log::warn!("Login attempt for unknown email");
            return Err(AppError::InvalidCredentials);
        };

        if !verify_password(password.to_string(), user.password_hash.clone()).await? {
            log::warn!("Rejected password for user {}", user.id);
            return Err(AppError::InvalidCredentials);
        }
        Ok(user)
    }

    pub async fn find_user(&self, user_id: i64) -> Result<User, AppError> {
        sqlx::query_as::<_, User>("SELECT id, username, email, password_hash FROM users WHERE id = ?")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    pub async fn create_workout(
        &self,
        user_id: i64,
        date: NaiveDate,
        exercise: &str,
        duration_minutes: i32,
    ) -> Result<Workout, AppError> {
        check_workout_fields(Some(exercise), Some(duration_minutes))?;

        let result = sqlx::query(
            "INSERT INTO workout_sessions (user_id, date, exercise, duration_minutes) VALUES (?, ?, ?, ?)",
        )
        .bind(user_id)
        .bind(date)
        .bind(exercise)
        .bind(duration_minutes)
        .execute(&self.pool)
        .await;

        let id = match result {
            Ok(done) => done.last_insert_rowid(),
            Err(sqlx::Error::Database(db_err)) if db_err.is_foreign_key_violation() => {
                return Err(AppError::NotFound("User not found".to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        Ok(Workout {
            id,
            user_id,
            date,
            exercise: exercise.to_string(),
            duration_minutes,
        })
    }

    /// All workouts of `user_id`, oldest first.
    pub async fn list_workouts(&self, user_id: i64) -> Result<Vec<Workout>, AppError> {
        let workouts = sqlx::query_as::<_, Workout>(&format!(
            "SELECT {} FROM workout_sessions WHERE user_id = ? ORDER BY date, id",
            WORKOUT_COLUMNS
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(workouts)
    }

    pub async fn search_workouts(
        &self,
        user_id: i64,
        filter: &WorkoutFilter,
    ) -> Result<Vec<Workout>, AppError> {
        let mut query: QueryBuilder<Sqlite> = QueryBuilder::new(format!(
            "SELECT {} FROM workout_sessions WHERE user_id = ",
            WORKOUT_COLUMNS
        ));
        query.push_bind(user_id);

        if let Some(exercise) = &filter.exercise {
            query.push(" AND exercise = ").push_bind(exercise.clone());
        }
        if let Some(from) = filter.date_from {
            query.push(" AND date >= ").push_bind(from);
        }
        if let Some(to) = filter.date_to {
            query.push(" AND date <= ").push_bind(to);
        }

        query
            .push(" ORDER BY date, id LIMIT ")
            .push_bind(filter.limit.unwrap_or(DEFAULT_PAGE_SIZE))
            .push(" OFFSET ")
            .push_bind(filter.offset.unwrap_or(0));

        let workouts = query.build_query_as::<Workout>().fetch_all(&self.pool).await?;
        Ok(workouts)
    }

    /// Applies `changes` to a workout owned by `user_id`.
    /// A workout that does not exist or belongs to someone else is `NotFound`.
    pub async fn update_workout(
        &self,
        user_id: i64,
        workout_id: i64,
        changes: WorkoutChanges,
    ) -> Result<Workout, AppError> {
        let exercise = changes.exercise.as_deref();
        check_workout_fields(exercise, changes.duration_minutes)?;

        let result = sqlx::query(
            "UPDATE workout_sessions
             SET date = COALESCE(?, date),
                 exercise = COALESCE(?, exercise),
                 duration_minutes = COALESCE(?, duration_minutes)
             WHERE id = ? AND user_id = ?",
        )
        .bind(changes.date)
        .bind(exercise)
        .bind(changes.duration_minutes)
        .bind(workout_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Workout not found".to_string()));
        }

        sqlx::query_as::<_, Workout>(&format!(
            "SELECT {} FROM workout_sessions WHERE id = ?",
            WORKOUT_COLUMNS
        ))
        .bind(workout_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Workout not found".to_string()))
    }

    pub async fn delete_workout(&self, user_id: i64, workout_id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM workout_sessions WHERE id = ? AND user_id = ?")
            .bind(workout_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Workout not found".to_string()));
        }
        Ok(())
    }

    async fn email_exists(&self, email: &str) -> Result<bool, AppError> {
        let found = sqlx::query_scalar::<_, i64>("SELECT id FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        if found.is_some() {
            self.known_emails.insert(email.to_string(), ());
        }
        Ok(found.is_some())
    }
}

fn check_workout_fields(exercise: Option<&str>, duration_minutes: Option<i32>) -> Result<(), AppError> {
    // Names are stored verbatim; only blank ones are refused.
    if exercise.is_some_and(|name| name.trim().is_empty()) {
        return Err(AppError::BadRequest("Exercise cannot be empty".to_string()));
    }
    if duration_minutes.is_some_and(|minutes| minutes < 0) {
        return Err(AppError::BadRequest("Duration cannot be negative".to_string()));
    }
    Ok(())
}
