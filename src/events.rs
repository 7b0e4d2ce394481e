use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::chat::Thread;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Event {
    UserReady,
    ThreadClose,
}

#[async_trait]
pub trait Listener: Send + Sync {
    async fn handle(&self, thread: &Thread) -> anyhow::Result<()>;
}

#[derive(Default)]
pub struct EventDispatcher {
    listeners: HashMap<Event, Vec<Arc<dyn Listener>>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach_listener(&mut self, event: Event, listener: Arc<dyn Listener>) {
        self.listeners.entry(event).or_default().push(listener);
    }

    /// Failing listeners are logged and skipped, the rest still run.
    pub async fn dispatch(&self, event: Event, thread: &Thread) {
        let Some(listeners) = self.listeners.get(&event) else {
            return;
        };

        for listener in listeners {
            if let Err(err) = listener.handle(thread).await {
                tracing::error!(?event, thread = %thread.id, "listener failed: {err:#}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use uuid::Uuid;

    use super::*;

    struct Recording {
        seen: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl Listener for Recording {
        async fn handle(&self, thread: &Thread) -> anyhow::Result<()> {
            self.seen.lock().unwrap().push(thread.user_id.clone());
            Ok(())
        }
    }

    struct Failing;

    #[async_trait]
    impl Listener for Failing {
        async fn handle(&self, _thread: &Thread) -> anyhow::Result<()> {
            Err(anyhow::anyhow!("boom"))
        }
    }

    fn test_thread(user_id: &str) -> Thread {
        Thread {
            id: Uuid::now_v7(),
            user_id: user_id.to_owned(),
            user_name: "Guest".to_owned(),
            is_open: true,
        }
    }

    #[tokio::test]
    async fn dispatch_only_reaches_listeners_of_that_event() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut dispatcher = EventDispatcher::new();
        dispatcher.attach_listener(Event::UserReady, Arc::new(Recording { seen: seen.clone() }));

        dispatcher.dispatch(Event::ThreadClose, &test_thread("u1")).await;
        assert!(seen.lock().unwrap().is_empty());

        dispatcher.dispatch(Event::UserReady, &test_thread("u2")).await;
        assert_eq!(*seen.lock().unwrap(), vec!["u2".to_owned()]);
    }

    #[tokio::test]
    async fn failing_listener_does_not_stop_the_rest() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut dispatcher = EventDispatcher::new();
        dispatcher.attach_listener(Event::UserReady, Arc::new(Failing));
        dispatcher.attach_listener(Event::UserReady, Arc::new(Recording { seen: seen.clone() }));

        dispatcher.dispatch(Event::UserReady, &test_thread("u1")).await;

        assert_eq!(*seen.lock().unwrap(), vec!["u1".to_owned()]);
    }
}
