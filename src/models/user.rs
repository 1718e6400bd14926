use serde::{Deserialize, Serialize};
use validator::Validate;

/// Пассажир. Email служит ключом бронирования.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct User {
    #[validate(length(min = 1))]
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl User {
    pub fn new(
        email: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }
}
