use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{SeatRef, User};

/// Квитанция о покупке билета. Хранится только в `BookingService`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Receipt {
    pub ticket_id: Uuid,
    pub user: User,
    pub from: String,
    pub to: String,
    pub price_paid: f64,
    pub seat: SeatRef,
    pub purchased_at: DateTime<Utc>,
}

/// Пассажир и его место в запрошенной секции.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionOccupant {
    pub user: User,
    pub allotted_seat: u32,
}

/// Заполненность секции для обзора.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionSummary {
    pub section: String,
    pub total_seats: u32,
    pub occupied_seats: u32,
    pub vacant_seats: u32,
}
