use crate::models::{RawProfileRow, RawSkills};
use crate::services::store::{StoreConnector, StoreError, StoreSession};
use async_trait::async_trait;
use serde_json::Value;
use sqlx::postgres::{PgConnectOptions, PgConnection, PgRow};
use sqlx::{Connection, Row};
use std::time::Duration;

/// Worker profile query
///
/// Numeric columns are cast to float8 and the level to text so that the
/// various encodings providers use all decode the same way.
pub const PROFILES_QUERY: &str = r#"
    SELECT
        name,
        about,
        skills,
        rating::float8 AS rating,
        trust_score::float8 AS trust_score,
        ninja_level::text AS ninja_level,
        task_experience::float8 AS task_experience,
        availability
    FROM gig_workers
"#;

/// Connects to PostgreSQL with a fresh connection per fetch
///
/// No pool: every fetch opens and closes its own connection. Concurrent
/// serving needs a pooled connector in its place.
pub struct PgConnector {
    options: PgConnectOptions,
    connect_timeout: Duration,
}

impl PgConnector {
    pub fn new(
        host: &str,
        port: u16,
        database: &str,
        user: &str,
        password: &str,
        connect_timeout: Duration,
    ) -> Self {
        let options = PgConnectOptions::new()
            .host(host)
            .port(port)
            .database(database)
            .username(user)
            .password(password);

        Self {
            options,
            connect_timeout,
        }
    }

    /// Create a connector from settings
    pub fn from_settings(settings: &crate::config::DatabaseSettings) -> Self {
        tracing::info!(
            "Profile store at {}:{}/{} as {}",
            settings.host,
            settings.port,
            settings.name,
            settings.user
        );

        Self::new(
            &settings.host,
            settings.port,
            &settings.name,
            &settings.user,
            &settings.password,
            Duration::from_secs(settings.connect_timeout_secs),
        )
    }
}

#[async_trait]
impl StoreConnector for PgConnector {
    async fn connect(&self) -> Result<Box<dyn StoreSession>, StoreError> {
        let conn = tokio::time::timeout(self.connect_timeout, PgConnection::connect_with(&self.options))
            .await
            .map_err(|_| {
                StoreError::Unavailable(format!(
                    "connect timed out after {}s",
                    self.connect_timeout.as_secs()
                ))
            })?
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        Ok(Box::new(PgSession { conn }))
    }
}

/// One open PostgreSQL connection
pub struct PgSession {
    conn: PgConnection,
}

#[async_trait]
impl StoreSession for PgSession {
    async fn fetch_rows(&mut self) -> Result<Vec<RawProfileRow>, StoreError> {
        let rows = sqlx::query(PROFILES_QUERY)
            .fetch_all(&mut self.conn)
            .await
            .map_err(|e| StoreError::Read(e.to_string()))?;

        rows.iter().map(decode_row).collect()
    }

    async fn close(self: Box<Self>) -> Result<(), StoreError> {
        let session = *self;
        session
            .conn
            .close()
            .await
            .map_err(|e| StoreError::Close(e.to_string()))
    }
}

fn decode_row(row: &PgRow) -> Result<RawProfileRow, StoreError> {
    Ok(RawProfileRow {
        name: required(row, "name")?,
        about: row.try_get("about").map_err(read_error)?,
        skills: skills_column(row)?,
        rating: required(row, "rating")?,
        trust_score: required(row, "trust_score")?,
        ninja_level: row
            .try_get::<Option<String>, _>("ninja_level")
            .map_err(read_error)?
            .unwrap_or_default(),
        task_experience: required(row, "task_experience")?,
        availability: required(row, "availability")?,
    })
}

fn required<'r, T>(row: &'r PgRow, column: &str) -> Result<T, StoreError>
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    row.try_get::<Option<T>, _>(column)
        .map_err(read_error)?
        .ok_or_else(|| StoreError::Read(format!("column {} is null", column)))
}

/// Skills may be stored as text[], json/jsonb, or text holding a JSON list
fn skills_column(row: &PgRow) -> Result<RawSkills, StoreError> {
    if let Ok(list) = row.try_get::<Option<Vec<String>>, _>("skills") {
        return Ok(RawSkills::List(list.unwrap_or_default()));
    }

    if let Ok(json) = row.try_get::<Option<Value>, _>("skills") {
        return Ok(skills_from_json(json));
    }

    row.try_get::<Option<String>, _>("skills")
        .map(|text| RawSkills::Text(text.unwrap_or_default()))
        .map_err(read_error)
}

/// A json/jsonb skills value; strings hold an encoded list, anything else is
/// re-serialized and left to the skills decoder to accept or reject
fn skills_from_json(json: Option<Value>) -> RawSkills {
    match json {
        None | Some(Value::Null) => RawSkills::List(Vec::new()),
        Some(Value::String(text)) => RawSkills::Text(text),
        Some(other) => RawSkills::Text(other.to_string()),
    }
}

fn read_error(e: sqlx::Error) -> StoreError {
    StoreError::Read(e.to_string())
}
