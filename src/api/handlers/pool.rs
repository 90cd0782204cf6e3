//! Raffle pool handlers: enter, draw, entrant list, pool details.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;

use crate::api::dto::{
    DrawRequest, DrawResponse, EnterRequest, EnterResponse, EntrantListResponse,
    PoolDetailResponse,
};
use crate::app_state::AppState;
use crate::error::{ErrorResponse, RaffleError};

/// `POST /pool/enter` — Join the raffle with value attached.
///
/// # Errors
///
/// Returns [`RaffleError`] on a malformed value or a stake that does
/// not exceed the minimum.
#[utoipa::path(
    post,
    path = "/api/v1/pool/enter",
    tag = "Pool",
    summary = "Enter the raffle",
    description = "Appends the caller to the entrant list and retains the attached value in the pool. The value must strictly exceed the minimum stake; entering twice appends twice.",
    request_body = EnterRequest,
    responses(
        (status = 200, description = "Entry accepted", body = EnterResponse),
        (status = 400, description = "Malformed value", body = ErrorResponse),
        (status = 422, description = "Value does not exceed the minimum stake", body = ErrorResponse),
    )
)]
pub async fn enter(
    State(state): State<AppState>,
    Json(req): Json<EnterRequest>,
) -> Result<impl IntoResponse, RaffleError> {
    let value = parse_wei(&req.value, "value")?;

    let outcome = state.raffle_service.enter(req.caller, value).await?;

    Ok(Json(EnterResponse {
        entrant: outcome.entrant,
        value: outcome.value.to_string(),
        entrant_count: outcome.entrant_count,
        pot: outcome.pot.to_string(),
        entered_at: Utc::now(),
    }))
}

/// `POST /pool/draw` — Draw a winner and pay out the pot.
///
/// # Errors
///
/// Returns [`RaffleError`] when the caller is not the manager, the
/// pool is empty, or the payout transfer fails.
#[utoipa::path(
    post,
    path = "/api/v1/pool/draw",
    tag = "Pool",
    summary = "Draw a winner",
    description = "Selects one entrant pseudo-randomly, transfers the entire pool balance to them, and clears the entrant list. Manager only. A failed payout rolls the whole draw back.",
    request_body = DrawRequest,
    responses(
        (status = 200, description = "Winner drawn and paid", body = DrawResponse),
        (status = 403, description = "Caller is not the manager", body = ErrorResponse),
        (status = 409, description = "No entrants in the pool", body = ErrorResponse),
        (status = 502, description = "Payout failed; draw rolled back", body = ErrorResponse),
    )
)]
pub async fn draw_winner(
    State(state): State<AppState>,
    Json(req): Json<DrawRequest>,
) -> Result<impl IntoResponse, RaffleError> {
    let outcome = state.raffle_service.draw_winner(req.caller).await?;

    Ok(Json(DrawResponse {
        winner: outcome.winner,
        payout: outcome.payout.to_string(),
        entrant_count: outcome.entrant_count,
        drawn_at: Utc::now(),
    }))
}

/// `GET /pool/entrants` — List current entrants.
#[utoipa::path(
    get,
    path = "/api/v1/pool/entrants",
    tag = "Pool",
    summary = "List entrants",
    description = "Returns the current entrant list in insertion order, duplicates included. Read-only; any caller may invoke it.",
    responses(
        (status = 200, description = "Current entrant list", body = EntrantListResponse),
    )
)]
pub async fn list_entrants(State(state): State<AppState>) -> impl IntoResponse {
    let entrants = state.raffle_service.list_entrants().await;
    let count = entrants.len();
    Json(EntrantListResponse { entrants, count })
}

/// `GET /pool` — Get pool details.
#[utoipa::path(
    get,
    path = "/api/v1/pool",
    tag = "Pool",
    summary = "Get pool details",
    description = "Returns the pool account, manager, stake policy, current pot, and operational metadata.",
    responses(
        (status = 200, description = "Pool details", body = PoolDetailResponse),
    )
)]
pub async fn get_pool(State(state): State<AppState>) -> impl IntoResponse {
    let details = state.raffle_service.pool_details().await;

    Json(PoolDetailResponse {
        account: details.account,
        manager: details.manager,
        min_stake: details.min_stake.to_string(),
        pot: details.pot.to_string(),
        entrant_count: details.entrant_count,
        draw_count: details.draw_count,
        total_entered: details.total_entered.to_string(),
        created_at: details.created_at,
        updated_at: details.last_modified_at,
    })
}

/// Raffle pool routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/pool", get(get_pool))
        .route("/pool/enter", post(enter))
        .route("/pool/entrants", get(list_entrants))
        .route("/pool/draw", post(draw_winner))
}

/// Parses a string-encoded u128 wei amount.
///
/// # Errors
///
/// Returns [`RaffleError::InvalidRequest`] when the string is not a
/// non-negative integer.
fn parse_wei(raw: &str, field: &str) -> Result<u128, RaffleError> {
    raw.parse()
        .map_err(|_| RaffleError::InvalidRequest(format!("invalid {field}: {raw}")))
}
