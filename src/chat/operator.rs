use std::sync::Arc;

use axum::{debug_handler, extract::{Path, State}, response::{IntoResponse, Response}, routing::post, Router};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::{events::{Event, EventDispatcher}, res, AppResult, AppState};

use super::thread::Thread;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/threads/{thread_id}/ready", post(user_ready))
        .route("/threads/{thread_id}/close", post(close_thread))
}

#[debug_handler(state = AppState)]
pub(crate) async fn user_ready(
    State(db_pool): State<SqlitePool>,
    State(dispatcher): State<Arc<EventDispatcher>>,
    Path(thread_id): Path<Uuid>,
) -> AppResult<Response> {
    let Some(thread) = Thread::load(&db_pool, thread_id).await? else {
        return res::sorry("thread");
    };

    tracing::info!(thread = %thread.id, "user ready");
    dispatcher.dispatch(Event::UserReady, &thread).await;

    Ok(().into_response())
}

#[debug_handler(state = AppState)]
pub(crate) async fn close_thread(
    State(db_pool): State<SqlitePool>,
    State(dispatcher): State<Arc<EventDispatcher>>,
    Path(thread_id): Path<Uuid>,
) -> AppResult<Response> {
    let Some(mut thread) = Thread::load(&db_pool, thread_id).await? else {
        return res::sorry("thread");
    };

    thread.close(&db_pool).await?;
    tracing::info!(thread = %thread.id, "thread closed");
    dispatcher.dispatch(Event::ThreadClose, &thread).await;

    Ok(().into_response())
}
