use sqlx::SqlitePool;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct Thread {
    pub id: Uuid,
    pub user_id: String,
    pub user_name: String,
    pub is_open: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    User,
    Operator,
    Info,
}

impl MessageKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MessageKind::User => "user",
            MessageKind::Operator => "operator",
            MessageKind::Info => "info",
        }
    }
}

impl Thread {
    pub async fn create(
        db_pool: &SqlitePool,
        user_id: &str,
        user_name: &str,
    ) -> Result<Thread, sqlx::Error> {
        let id = Uuid::now_v7();
        sqlx::query("INSERT INTO threads (id,user_id,user_name,is_open) VALUES (?,?,?,?)")
            .bind(id.to_string())
            .bind(user_id)
            .bind(user_name)
            .bind(true)
            .execute(db_pool)
            .await?;

        Ok(Thread {
            id,
            user_id: user_id.to_owned(),
            user_name: user_name.to_owned(),
            is_open: true,
        })
    }

    pub async fn load(db_pool: &SqlitePool, id: Uuid) -> Result<Option<Thread>, sqlx::Error> {
        let row: Option<(String, String, bool)> =
            sqlx::query_as("SELECT user_id,user_name,is_open FROM threads WHERE id=?")
                .bind(id.to_string())
                .fetch_optional(db_pool)
                .await?;

        Ok(row.map(|(user_id, user_name, is_open)| Thread {
            id,
            user_id,
            user_name,
            is_open,
        }))
    }

    pub async fn post_message(
        &self,
        db_pool: &SqlitePool,
        kind: MessageKind,
        text: &str,
        name: Option<&str>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("INSERT INTO messages (id,thread_id,kind,body,name) VALUES (?,?,?,?,?)")
            .bind(Uuid::now_v7().to_string())
            .bind(self.id.to_string())
            .bind(kind.as_str())
            .bind(text)
            .bind(name)
            .execute(db_pool)
            .await?;

        Ok(())
    }

    pub async fn close(&mut self, db_pool: &SqlitePool) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE threads SET is_open=? WHERE id=?")
            .bind(false)
            .bind(self.id.to_string())
            .execute(db_pool)
            .await?;
        self.is_open = false;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use sqlx::sqlite::SqlitePoolOptions;

    use crate::db;

    use super::*;

    async fn test_pool() -> SqlitePool {
        let db_pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        db::install(&db_pool).await.unwrap();
        db_pool
    }

    #[tokio::test]
    async fn create_then_load_round_trips() {
        let db_pool = test_pool().await;

        let thread = Thread::create(&db_pool, "u1", "Brave Otter").await.unwrap();
        let loaded = Thread::load(&db_pool, thread.id).await.unwrap().unwrap();

        assert_eq!(loaded.user_id, "u1");
        assert_eq!(loaded.user_name, "Brave Otter");
        assert!(loaded.is_open);
    }

    #[tokio::test]
    async fn load_missing_thread_returns_none() {
        let db_pool = test_pool().await;

        assert!(Thread::load(&db_pool, Uuid::now_v7()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn post_message_lands_in_the_thread() {
        let db_pool = test_pool().await;
        let thread = Thread::create(&db_pool, "u1", "Brave Otter").await.unwrap();

        thread
            .post_message(&db_pool, MessageKind::User, "hi there", Some("Brave Otter"))
            .await
            .unwrap();

        let (kind, body, name): (String, String, Option<String>) =
            sqlx::query_as("SELECT kind,body,name FROM messages WHERE thread_id=?")
                .bind(thread.id.to_string())
                .fetch_one(&db_pool)
                .await
                .unwrap();

        assert_eq!(kind, "user");
        assert_eq!(body, "hi there");
        assert_eq!(name.as_deref(), Some("Brave Otter"));
    }

    #[tokio::test]
    async fn close_marks_the_thread_closed() {
        let db_pool = test_pool().await;
        let mut thread = Thread::create(&db_pool, "u1", "Brave Otter").await.unwrap();

        thread.close(&db_pool).await.unwrap();

        let loaded = Thread::load(&db_pool, thread.id).await.unwrap().unwrap();
        assert!(!loaded.is_open);
    }
}
