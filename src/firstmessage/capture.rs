use axum::{
    extract::{Query, Request, State},
    middleware::Next,
    response::Response,
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::{session, AppResult, AppState};

use super::store::{FirstMessage, MessageStore, StoreError};

#[derive(Deserialize)]
pub(crate) struct CaptureQuery {
    first_message: Option<String>,
}

/// Runs in front of the chat-start handler. Stores a `first_message` query
/// parameter before the chat starts, so the delivery hook can pick it up
/// later no matter how start-up itself goes.
pub async fn capture_first_message(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<CaptureQuery>,
    request: Request,
    next: Next,
) -> AppResult<Response> {
    if let Some(text) = query.first_message.filter(|text| !text.is_empty()) {
        let visitor = session::current_visitor(&session).await?;
        let store = MessageStore::new(state.db_pool.clone());
        record_first_message(&store, &visitor.id, &text).await?;
    }

    Ok(next.run(request).await)
}

pub(crate) async fn record_first_message(
    store: &MessageStore,
    user_id: &str,
    text: &str,
) -> Result<(), StoreError> {
    let mut message = match store.load_by_user_id(user_id).await? {
        Some(message) => message,
        None => FirstMessage::new(user_id, "")?,
    };

    message.set_body(text);
    if !store.save(&mut message).await {
        // The chat still starts, just without the stored message.
        tracing::warn!(user_id, "first message not recorded");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use sqlx::sqlite::SqlitePoolOptions;

    use crate::firstmessage::store::install;

    use super::*;

    async fn test_store() -> MessageStore {
        let db_pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        install(&db_pool).await.unwrap();
        MessageStore::new(db_pool)
    }

    #[tokio::test]
    async fn first_submission_creates_the_record() {
        let store = test_store().await;

        record_first_message(&store, "u1", "hello").await.unwrap();

        let message = store.load_by_user_id("u1").await.unwrap().unwrap();
        assert_eq!(message.body(), "hello");
    }

    #[tokio::test]
    async fn resubmission_overwrites_the_pending_record() {
        let store = test_store().await;

        record_first_message(&store, "u1", "hello").await.unwrap();
        record_first_message(&store, "u1", "hello again").await.unwrap();

        let message = store.load_by_user_id("u1").await.unwrap().unwrap();
        assert_eq!(message.body(), "hello again");
    }
}
