//! Lets a visitor hand over a message while starting a chat, keeps it until
//! an operator-facing thread is ready, then posts it there and forgets it.

mod capture;
mod hooks;
mod store;

pub use capture::capture_first_message;
pub use store::{install, uninstall, FirstMessage, MessageStore, StoreError};

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::events::{Event, EventDispatcher};

#[derive(Debug, Clone)]
pub struct Config {
    /// Wrapper for the delivered message, `{message}` is the body.
    pub template: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            template: "{message}".to_owned(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        match dotenv::var("FIRST_MESSAGE_TEMPLATE") {
            Ok(template) if !template.is_empty() => Self { template },
            _ => Self::default(),
        }
    }
}

pub fn activate(dispatcher: &mut EventDispatcher, db_pool: SqlitePool, config: Config) {
    let store = MessageStore::new(db_pool.clone());

    dispatcher.attach_listener(
        Event::UserReady,
        Arc::new(hooks::DeliverFirstMessage {
            db_pool,
            store: store.clone(),
            template: config.template,
        }),
    );
    dispatcher.attach_listener(
        Event::ThreadClose,
        Arc::new(hooks::DiscardFirstMessage { store }),
    );
}
