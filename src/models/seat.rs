use serde::{Deserialize, Serialize};
use validator::Validate;

/// Место в вагоне: секция + номер. Номер 0 означает "не задано".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct SeatRef {
    #[validate(length(min = 1))]
    pub section: String,
    #[validate(range(min = 1))]
    pub seat_number: u32,
}

impl SeatRef {
    pub fn new(section: impl Into<String>, seat_number: u32) -> Self {
        Self {
            section: section.into(),
            seat_number,
        }
    }
}

impl std::fmt::Display for SeatRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.section, self.seat_number)
    }
}
