// src/routes/chat.rs
use axum::{Json, extract::State};
use tracing::{Instrument, info_span};
use uuid::Uuid;

use crate::{
    error::AppError,
    message::{ChatRequest, ChatResponse},
    services::assistant::relay,
    state::SharedState,
};

pub async fn chat_handler(
    State(state): State<SharedState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let span = info_span!("chat", request_id = %Uuid::new_v4());

    let reply = relay(state.provider.as_ref(), &payload.message)
        .instrument(span)
        .await?;

    Ok(Json(ChatResponse { reply }))
}
