use rand::seq::IndexedRandom;
use tower_sessions::Session;
use uuid::Uuid;

use crate::AppResult;

pub const VISITOR_ID: &str = "visitor_id";
pub const VISITOR_NAME: &str = "visitor_name";

pub struct Visitor {
    pub id: String,
    pub name: String,
}

pub async fn current_visitor(session: &Session) -> AppResult<Visitor> {
    if let Some(id) = session.get::<String>(VISITOR_ID).await? {
        let name = session
            .get::<String>(VISITOR_NAME)
            .await?
            .unwrap_or_else(|| "Guest".to_owned());
        return Ok(Visitor { id, name });
    }

    let id = Uuid::now_v7().to_string();
    let name = guest_name();
    session.insert(VISITOR_ID, &id).await?;
    session.insert(VISITOR_NAME, &name).await?;

    tracing::info!(visitor = %id, name = %name, "new visitor");

    Ok(Visitor { id, name })
}

fn guest_name() -> String {
    let adjectives = [
        "Quick", "Lazy", "Mysterious", "Jolly", "Brave", "Silent", "Witty", "Fierce",
        "Clever", "Gentle", "Wild", "Calm", "Bold", "Shy", "Proud", "Happy",
        "Eager", "Rusty", "Golden", "Silver", "Bright", "Lucky",
    ];

    let nouns = [
        "Fox", "Bear", "Eagle", "Wolf", "Tiger", "Lion", "Owl", "Rabbit",
        "Falcon", "Hawk", "Panda", "Kitten", "Phoenix", "Turtle", "Dolphin", "Otter",
    ];

    format!(
        "{} {}",
        adjectives.choose(&mut rand::rng()).unwrap(),
        nouns.choose(&mut rand::rng()).unwrap()
    )
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tower_sessions::MemoryStore;

    use super::*;

    #[tokio::test]
    async fn visitor_identity_is_stable_within_a_session() {
        let session = Session::new(None, Arc::new(MemoryStore::default()), None);

        let first = current_visitor(&session).await.unwrap();
        let second = current_visitor(&session).await.unwrap();

        assert!(!first.id.is_empty());
        assert_eq!(first.id, second.id);
        assert_eq!(first.name, second.name);
    }
}
