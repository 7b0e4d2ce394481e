use axum::{debug_handler, extract::{Path, State}, response::{Html, IntoResponse, Response}};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::{include_res, res, AppResult};

use super::thread::Thread;

#[debug_handler]
pub(crate) async fn thread_page(
    State(db_pool): State<SqlitePool>,
    Path(thread_id): Path<Uuid>,
) -> AppResult<Response> {
    let Some(thread) = Thread::load(&db_pool, thread_id).await? else {
        return res::sorry("thread");
    };

    let rows: Vec<(String, String, Option<String>)> =
        sqlx::query_as("SELECT kind,body,name FROM messages WHERE thread_id=?")
            .bind(thread_id.to_string())
            .fetch_all(&db_pool)
            .await?;

    let mut messages = String::new();
    for (kind, body, name) in rows {
        messages += &include_res!(str, "/pages/message.html")
            .replace("{kind}", &kind)
            .replace("{name}", name.as_deref().unwrap_or(""))
            .replace("{body}", &body);
    }

    let body = include_res!(str, "/pages/thread.html")
        .replace("{thread_id}", &thread.id.to_string())
        .replace("{user_name}", &thread.user_name)
        .replace("{state}", if thread.is_open { "open" } else { "closed" })
        .replace("{messages}", &messages);

    Ok(Html(body).into_response())
}
