use sqlx::SqlitePool;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// A message submitted before the chat started, waiting to be delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirstMessage {
    id: Option<i64>,
    user_id: String,
    body: String,
}

impl FirstMessage {
    pub fn new(user_id: impl Into<String>, body: impl Into<String>) -> Result<Self, StoreError> {
        let user_id = user_id.into();
        if user_id.is_empty() {
            return Err(StoreError::InvalidInput("user id cannot be empty"));
        }

        Ok(Self {
            id: None,
            user_id,
            body: body.into(),
        })
    }

    fn from_row((id, user_id, body): (i64, String, String)) -> Self {
        Self {
            id: Some(id),
            user_id,
            body,
        }
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn set_body(&mut self, body: impl Into<String>) {
        self.body = body.into();
    }
}

/// Keyed storage for pending first messages, at most one row per user id.
#[derive(Clone)]
pub struct MessageStore {
    db_pool: SqlitePool,
}

impl MessageStore {
    pub fn new(db_pool: SqlitePool) -> Self {
        Self { db_pool }
    }

    pub async fn load_by_id(&self, id: i64) -> Result<Option<FirstMessage>, StoreError> {
        if id <= 0 {
            return Err(StoreError::InvalidInput("message id cannot be empty"));
        }

        let row: Option<(i64, String, String)> =
            sqlx::query_as("SELECT id,user_id,body FROM first_messages WHERE id=?")
                .bind(id)
                .fetch_optional(&self.db_pool)
                .await?;

        Ok(row.map(FirstMessage::from_row))
    }

    pub async fn load_by_user_id(&self, user_id: &str) -> Result<Option<FirstMessage>, StoreError> {
        if user_id.is_empty() {
            return Err(StoreError::InvalidInput("user id cannot be empty"));
        }

        let row: Option<(i64, String, String)> =
            sqlx::query_as("SELECT id,user_id,body FROM first_messages WHERE user_id=?")
                .bind(user_id)
                .fetch_optional(&self.db_pool)
                .await?;

        Ok(row.map(FirstMessage::from_row))
    }

    /// Inserts the record and assigns its id, or updates the body of an
    /// already saved one. A rejected statement (say, losing an insert race
    /// on the user id unique key) comes back as `false`, never as a panic.
    pub async fn save(&self, message: &mut FirstMessage) -> bool {
        let result = match message.id {
            None => {
                sqlx::query("INSERT INTO first_messages (user_id,body) VALUES (?,?)")
                    .bind(message.user_id())
                    .bind(message.body())
                    .execute(&self.db_pool)
                    .await
            }
            Some(_) => {
                sqlx::query("UPDATE first_messages SET body=? WHERE user_id=?")
                    .bind(message.body())
                    .bind(message.user_id())
                    .execute(&self.db_pool)
                    .await
            }
        };

        match result {
            Ok(done) => {
                if message.id.is_none() {
                    message.id = Some(done.last_insert_rowid());
                }
                true
            }
            Err(err) => {
                tracing::warn!(user_id = message.user_id(), "first message not saved: {err}");
                false
            }
        }
    }

    /// Removes the row for the record's user id. Deleting an absent row is
    /// not an error.
    pub async fn delete(&self, message: &FirstMessage) -> bool {
        match sqlx::query("DELETE FROM first_messages WHERE user_id=?")
            .bind(message.user_id())
            .execute(&self.db_pool)
            .await
        {
            Ok(_) => true,
            Err(err) => {
                tracing::warn!(user_id = message.user_id(), "first message not deleted: {err}");
                false
            }
        }
    }
}

pub async fn install(db_pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS first_messages ( \
            id INTEGER PRIMARY KEY AUTOINCREMENT, \
            user_id TEXT NOT NULL UNIQUE, \
            body TEXT NOT NULL \
        )",
    )
    .execute(db_pool)
    .await?;

    Ok(())
}

pub async fn uninstall(db_pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query("DROP TABLE IF EXISTS first_messages")
        .execute(db_pool)
        .await?;

    Ok(())
}
