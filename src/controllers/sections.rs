use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;

use crate::{
    error::ApiResult,
    models::{SectionOccupant, SectionSummary},
    AppState,
};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/sections", get(section_overview))
        .route("/sections/{section}/users", get(get_users_by_section))
}

#[derive(Debug, Serialize)]
pub struct UsersBySectionResponse {
    pub section: String,
    pub users: Vec<SectionOccupant>,
}

#[derive(Debug, Serialize)]
pub struct SectionOverviewResponse {
    pub sections: Vec<SectionSummary>,
    pub active_bookings: usize,
}

// GET /api/sections/{section}/users
async fn get_users_by_section(
    State(state): State<Arc<AppState>>,
    Path(section): Path<String>,
) -> ApiResult<Json<UsersBySectionResponse>> {
    let users = state.booking.users_by_section(&section)?;
    Ok(Json(UsersBySectionResponse { section, users }))
}

// GET /api/sections
async fn section_overview(State(state): State<Arc<AppState>>) -> Json<SectionOverviewResponse> {
    Json(SectionOverviewResponse {
        sections: state.booking.section_overview(),
        active_bookings: state.booking.active_bookings(),
    })
}
