pub mod operator;
mod page;
mod start;
mod thread;

pub use thread::{MessageKind, Thread};

use axum::{middleware, routing::get, Router};

use crate::{firstmessage, AppState};

pub fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/start",
            get(start::start_chat)
                .layer(middleware::from_fn_with_state(state, firstmessage::capture_first_message)),
        )
        .route("/{thread_id}", get(page::thread_page))
}
