use axum::{debug_handler, extract::State, response::{IntoResponse, Redirect, Response}};
use sqlx::SqlitePool;
use tower_sessions::Session;

use crate::{session, AppResult};

use super::thread::Thread;

#[debug_handler]
pub(crate) async fn start_chat(
    State(db_pool): State<SqlitePool>,
    session: Session,
) -> AppResult<Response> {
    let visitor = session::current_visitor(&session).await?;
    let thread = Thread::create(&db_pool, &visitor.id, &visitor.name).await?;

    tracing::info!(thread = %thread.id, visitor = %visitor.id, "chat started");

    Ok(Redirect::to(&format!("/chat/{}", thread.id)).into_response())
}
