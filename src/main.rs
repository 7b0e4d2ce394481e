use std::sync::Arc;

use axum::{debug_handler, response::{Html, IntoResponse}, routing::get, Router};
use icebreaker::{chat, db, events::EventDispatcher, firstmessage, include_res, AppState};
use sqlx::sqlite::SqlitePoolOptions;
use tower_http::cors::CorsLayer;
use tower_sessions::{cookie::SameSite, Expiry, MemoryStore, SessionManagerLayer};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let session_store = MemoryStore::default();
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(false)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::minutes(30)));

    let db_pool = SqlitePoolOptions::new()
        .max_connections(16)
        .connect(dotenv::var("DATABASE_URL")?.as_str())
        .await?;

    db::install(&db_pool).await?;
    firstmessage::install(&db_pool).await?;

    let mut dispatcher = EventDispatcher::new();
    firstmessage::activate(&mut dispatcher, db_pool.clone(), firstmessage::Config::from_env());

    let app_state = AppState {
        db_pool,
        dispatcher: Arc::new(dispatcher),
    };

    let app = Router::new()
        .route("/", get(index))

        .nest("/chat", chat::router(app_state.clone()))
        .nest("/op", chat::operator::router())

        .layer(CorsLayer::permissive())
        .with_state(app_state)
        .layer(session_layer);

    let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}

#[debug_handler]
async fn index() -> impl IntoResponse {
    Html(include_res!(str, "/pages/index.html"))
}
