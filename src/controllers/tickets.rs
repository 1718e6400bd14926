use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;

use crate::{
    error::ApiResult,
    models::{PurchaseTicketRequest, Receipt, SeatRef, UpdateSeatRequest, User},
    AppState,
};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/tickets", post(purchase_ticket))
        .route("/tickets/{email}", get(get_receipt).delete(remove_user))
        .route("/tickets/{email}/seat", put(update_user_seat))
}

/* ---------- responses ---------- */

#[derive(Debug, Serialize)]
pub struct PurchaseTicketResponse {
    pub message: &'static str,
    pub receipt: Receipt,
}

#[derive(Debug, Serialize)]
pub struct GetReceiptResponse {
    pub receipt: Receipt,
}

#[derive(Debug, Serialize)]
pub struct UpdateUserSeatResponse {
    pub message: &'static str,
    pub updated_receipt: Receipt,
}

#[derive(Debug, Serialize)]
pub struct RemoveUserResponse {
    pub message: &'static str,
    pub removed_user: User,
}

/* ---------- handlers ---------- */

// POST /api/tickets
async fn purchase_ticket(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<PurchaseTicketRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(req) = payload?;
    let receipt = state.booking.purchase(req)?;

    Ok((
        StatusCode::CREATED,
        Json(PurchaseTicketResponse {
            message: "Ticket booked successfully",
            receipt,
        }),
    ))
}

// GET /api/tickets/{email}
async fn get_receipt(
    State(state): State<Arc<AppState>>,
    Path(email): Path<String>,
) -> ApiResult<Json<GetReceiptResponse>> {
    let receipt = state.booking.receipt(&email)?;
    Ok(Json(GetReceiptResponse { receipt }))
}

// PUT /api/tickets/{email}/seat
async fn update_user_seat(
    State(state): State<Arc<AppState>>,
    Path(email): Path<String>,
    payload: Result<Json<SeatRef>, JsonRejection>,
) -> ApiResult<Json<UpdateUserSeatResponse>> {
    let Json(new_seat) = payload?;
    let updated_receipt = state
        .booking
        .update_seat(UpdateSeatRequest { email, new_seat })?;

    Ok(Json(UpdateUserSeatResponse {
        message: "Seat updated successfully",
        updated_receipt,
    }))
}

// DELETE /api/tickets/{email}
async fn remove_user(
    State(state): State<Arc<AppState>>,
    Path(email): Path<String>,
) -> ApiResult<Json<RemoveUserResponse>> {
    let removed_user = state.booking.cancel(&email)?;

    Ok(Json(RemoveUserResponse {
        message: "Ticket cancelled successfully",
        removed_user,
    }))
}
