use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{SeatRef, User};

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct PurchaseTicketRequest {
    #[validate(nested)]
    pub user: User,
    #[validate(length(min = 1))]
    pub from: String,
    #[validate(length(min = 1))]
    pub to: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct UpdateSeatRequest {
    #[validate(length(min = 1))]
    pub email: String,
    #[validate(nested)]
    pub new_seat: SeatRef,
}
