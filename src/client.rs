//! client.rs
//!
//! HTTP-клиент для API бронирования. Используется демонстрационным бинарником
//! `booking-client`.

use reqwest::{Method, StatusCode, Url};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::models::{PurchaseTicketRequest, Receipt, SeatRef, SectionOccupant, User};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid base url {0}")]
    InvalidBaseUrl(String),

    /// Сервер ответил ошибкой (4xx/5xx).
    #[error("api error ({status}): {message}")]
    Api { status: StatusCode, code: String, message: String },
}

impl ClientError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Http(e) => e.status(),
            Self::Api { status, .. } => Some(*status),
            Self::InvalidBaseUrl(_) => None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorPayload {
    #[serde(default)]
    error: String,
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
pub struct PurchaseTicketResponse {
    pub message: String,
    pub receipt: Receipt,
}

#[derive(Debug, Deserialize)]
struct GetReceiptResponse {
    receipt: Receipt,
}

#[derive(Debug, Deserialize)]
pub struct UsersBySectionResponse {
    pub section: String,
    pub users: Vec<SectionOccupant>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserSeatResponse {
    pub message: String,
    pub updated_receipt: Receipt,
}

#[derive(Debug, Deserialize)]
pub struct RemoveUserResponse {
    pub message: String,
    pub removed_user: User,
}

/// Клиент API бронирования.
#[derive(Debug, Clone)]
pub struct BookingClient {
    base_url: Url,
    http_client: reqwest::Client,
}

impl BookingClient {
    pub fn new(base_url: impl AsRef<str>) -> Result<Self, ClientError> {
        let raw = base_url.as_ref();
        let base_url = Url::parse(raw)
            .map_err(|e| ClientError::InvalidBaseUrl(format!("{raw}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl(raw.to_string()));
        }

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            base_url,
            http_client,
        })
    }

    /// `{base}/api/<segments...>`; every segment is percent-encoded, so
    /// `#`, `?` and `/` inside an email stay part of that segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .push("api")
            .extend(segments);
        Ok(url)
    }

    async fn send<B, T>(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<&B>,
    ) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(segments)?;
        debug!(%method, %url, "Sending booking API request");

        let mut request = self.http_client.request(method, url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        let payload = response.json::<ErrorPayload>().await.unwrap_or(ErrorPayload {
            error: String::new(),
            message: status.canonical_reason().unwrap_or_default().to_string(),
        });
        Err(ClientError::Api {
            status,
            code: payload.error,
            message: payload.message,
        })
    }

    pub async fn purchase_ticket(
        &self,
        user: User,
        from: &str,
        to: &str,
    ) -> Result<PurchaseTicketResponse, ClientError> {
        let req = PurchaseTicketRequest {
            user,
            from: from.to_string(),
            to: to.to_string(),
        };
        self.send(Method::POST, &["tickets"], Some(&req)).await
    }

    pub async fn get_receipt(&self, email: &str) -> Result<Receipt, ClientError> {
        let response: GetReceiptResponse = self
            .send::<(), _>(Method::GET, &["tickets", email], None)
            .await?;
        Ok(response.receipt)
    }

    pub async fn users_by_section(
        &self,
        section: &str,
    ) -> Result<UsersBySectionResponse, ClientError> {
        self.send::<(), _>(Method::GET, &["sections", section, "users"], None)
            .await
    }

    pub async fn update_seat(
        &self,
        email: &str,
        new_seat: &SeatRef,
    ) -> Result<UpdateUserSeatResponse, ClientError> {
        self.send(Method::PUT, &["tickets", email, "seat"], Some(new_seat))
            .await
    }

    pub async fn remove_user(&self, email: &str) -> Result<RemoveUserResponse, ClientError> {
        self.send::<(), _>(Method::DELETE, &["tickets", email], None)
            .await
    }
}
