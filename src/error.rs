//! error.rs
//!
//! Типы ошибок сервиса бронирования.
//!
//! - `SeatError`: внутренние ошибки распределителя мест.
//! - `BookingError`: два класса ошибок, видимых клиенту (InvalidArgument / NotFound).
//! - `ConfigError`: ошибки загрузки и проверки конфигурации.
//! - `ApiError`: HTTP-обёртка над `BookingError`.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use validator::ValidationErrors;

/// Ошибки распределителя мест.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeatError {
    #[error("section {0} does not exist")]
    UnknownSection(String),

    #[error("seat {seat} does not exist in section {section}")]
    UnknownSeat { section: String, seat: u32 },

    /// Double release, or a move whose source seat was never assigned.
    #[error("seat {seat} in section {section} is not occupied")]
    SeatNotOccupied { section: String, seat: u32 },

    #[error("seat {seat} in section {section} is not available")]
    SeatOccupied { section: String, seat: u32 },

    #[error("no available seats")]
    NoAvailableSeats,
}

/// Ошибки уровня бронирования. Других классов клиент не видит.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookingError {
    /// Malformed or missing caller input. Never touches state.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The referenced user, section, seat or route does not exist or is not
    /// in the required state. Seat exhaustion is reported here as well.
    #[error("not found: {0}")]
    NotFound(String),
}

impl BookingError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Machine-readable code used in API responses.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidArgument(_) => "invalid_argument",
            Self::NotFound(_) => "not_found",
        }
    }
}

impl From<ValidationErrors> for BookingError {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields: Vec<&str> = errors.errors().keys().map(|k| k.as_ref()).collect();
        fields.sort_unstable();
        Self::InvalidArgument(format!("missing required fields: {}", fields.join(", ")))
    }
}

/// Ошибки конфигурации, обнаруженные при старте.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Source(#[from] config::ConfigError),

    #[error("at least one section must be configured")]
    NoSections,

    #[error("section name must not be empty")]
    EmptySectionName,

    #[error("section {0} is configured more than once")]
    DuplicateSection(String),

    #[error("section {0} must have at least one seat")]
    ZeroCapacity(String),

    #[error("section {section} has {max_seats} seats; at most {limit} are allowed")]
    CapacityTooLarge { section: String, max_seats: u32, limit: u32 },

    #[error("route {0} must name both origin and destination")]
    MalformedRoute(String),

    #[error("route {0} is priced more than once")]
    DuplicateRoute(String),

    #[error("route {route} has invalid price {price}; prices must be greater than zero")]
    InvalidPrice { route: String, price: f64 },
}

// --- HTTP ---

/// Тело ответа с ошибкой.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: &'static str,
    pub message: String,
}

/// HTTP-обёртка над `BookingError`, реализующая `IntoResponse`.
#[derive(Debug)]
pub struct ApiError(pub BookingError);

pub type ApiResult<T> = Result<T, ApiError>;

impl From<BookingError> for ApiError {
    fn from(err: BookingError) -> Self {
        Self(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(BookingError::InvalidArgument(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            BookingError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            BookingError::NotFound(_) => StatusCode::NOT_FOUND,
        };

        let body = ErrorBody {
            success: false,
            error: self.0.code(),
            message: self.0.to_string(),
        };

        (status, Json(body)).into_response()
    }
}
