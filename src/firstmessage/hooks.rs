use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::chat::{MessageKind, Thread};
use crate::events::Listener;

use super::store::MessageStore;

/// Posts the visitor's stored first message into the thread once the user
/// side is ready, then discards the record.
pub(crate) struct DeliverFirstMessage {
    pub(crate) db_pool: SqlitePool,
    pub(crate) store: MessageStore,
    pub(crate) template: String,
}

#[async_trait]
impl Listener for DeliverFirstMessage {
    async fn handle(&self, thread: &Thread) -> anyhow::Result<()> {
        if thread.user_id.is_empty() {
            return Ok(());
        }

        let Some(message) = self.store.load_by_user_id(&thread.user_id).await? else {
            return Ok(());
        };

        let text = self.template.replace("{message}", message.body());
        let posted = thread
            .post_message(&self.db_pool, MessageKind::User, &text, Some(&thread.user_name))
            .await;

        // The message is not needed anymore, whether or not the post went
        // through. Best effort, no retries.
        self.store.delete(&message).await;

        posted?;
        Ok(())
    }
}

/// Drops any still pending first message when its thread closes, so a stale
/// row cannot block the user's next submission.
pub(crate) struct DiscardFirstMessage {
    pub(crate) store: MessageStore,
}

#[async_trait]
impl Listener for DiscardFirstMessage {
    async fn handle(&self, thread: &Thread) -> anyhow::Result<()> {
        if thread.user_id.is_empty() {
            return Ok(());
        }

        if let Some(message) = self.store.load_by_user_id(&thread.user_id).await? {
            self.store.delete(&message).await;
        }

        Ok(())
    }
}
