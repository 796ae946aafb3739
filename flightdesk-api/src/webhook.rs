use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    routing::post,
    Json, Router,
};
use chrono::Local;
use flightdesk_core::{fulfill, FulfillmentReply, WebhookRequest};
use tracing::Instrument;
use uuid::Uuid;

use crate::{error::AppError, state::AppState};

pub fn routes() -> Router<AppState> {
    Router::new().route("/", post(handle_fulfillment).options(preflight))
}

/// POST /
/// Agent fulfillment: normalize the slots, search flights, reply with a summary
pub async fn handle_fulfillment(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<FulfillmentReply>, AppError> {
    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("fulfillment", %request_id);

    async move {
        // Decoded by hand so any Content-Type is accepted and bad bodies get our error shape
        let request: WebhookRequest = serde_json::from_slice(&body).map_err(|e| {
            tracing::warn!("Failed to parse request: {}", e);
            AppError::BadRequest("Invalid JSON".to_string())
        })?;

        let today = Local::now().date_naive();
        let reply = fulfill(state.provider.as_ref(), &request.into_parameters(), today).await?;

        Ok::<_, AppError>(Json(reply))
    }
    .instrument(span)
    .await
}

/// OPTIONS /
/// CORS preflight; the headers come from the router's header layers
async fn preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}
