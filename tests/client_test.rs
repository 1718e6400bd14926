//! Тесты HTTP-клиента на заглушке wiremock.
#![cfg(feature = "client")]

use reqwest::StatusCode;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use rail_booking::client::{BookingClient, ClientError};
use rail_booking::models::{SeatRef, User};

fn receipt_json(email: &str, section: &str, seat_number: u32) -> serde_json::Value {
    json!({
        "ticket_id": "6f1c1a5e-3c4b-4d7e-9a0b-5f0e2d1c8b7a",
        "user": { "email": email, "first_name": "Sanjay", "last_name": "Kishor" },
        "from": "London",
        "to": "France",
        "price_paid": 20.0,
        "seat": { "section": section, "seat_number": seat_number },
        "purchased_at": "2026-10-19T10:00:00Z"
    })
}

#[tokio::test]
async fn purchase_ticket_posts_request_and_parses_receipt() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/tickets"))
        .and(body_partial_json(json!({
            "user": { "email": "test1@example.com" },
            "from": "London",
            "to": "France"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "message": "Ticket booked successfully",
            "receipt": receipt_json("test1@example.com", "A", 1)
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = BookingClient::new(server.uri()).unwrap();
    let response = client
        .purchase_ticket(User::new("test1@example.com", "Sanjay", "Kishor"), "London", "France")
        .await
        .unwrap();

    assert_eq!(response.message, "Ticket booked successfully");
    assert_eq!(response.receipt.seat, SeatRef::new("A", 1));
    assert_eq!(response.receipt.price_paid, 20.0);
}

#[tokio::test]
async fn update_seat_sends_seat_body() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/tickets/test1@example.com/seat"))
        .and(body_partial_json(json!({ "section": "B", "seat_number": 2 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Seat updated successfully",
            "updated_receipt": receipt_json("test1@example.com", "B", 2)
        })))
        .mount(&server)
        .await;

    let client = BookingClient::new(server.uri()).unwrap();
    let response = client
        .update_seat("test1@example.com", &SeatRef::new("B", 2))
        .await
        .unwrap();

    assert_eq!(response.updated_receipt.seat, SeatRef::new("B", 2));
}

#[tokio::test]
async fn api_errors_carry_status_and_code() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tickets/ghost@example.com"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "success": false,
            "error": "not_found",
            "message": "not found: ticket receipt not found"
        })))
        .mount(&server)
        .await;

    let client = BookingClient::new(server.uri()).unwrap();
    let err = client.get_receipt("ghost@example.com").await.unwrap_err();

    assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    match err {
        ClientError::Api { code, message, .. } => {
            assert_eq!(code, "not_found");
            assert_eq!(message, "not found: ticket receipt not found");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn non_json_error_body_falls_back_to_reason() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/tickets/test1@example.com"))
        .respond_with(ResponseTemplate::new(400).set_body_string("bad"))
        .mount(&server)
        .await;

    let client = BookingClient::new(format!("{}/", server.uri())).unwrap();
    let err = client.remove_user("test1@example.com").await.unwrap_err();

    match err {
        ClientError::Api { status, code, message } => {
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert!(code.is_empty());
            assert_eq!(message, "Bad Request");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn emails_are_sent_as_single_path_segments() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tickets/a%23b@example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "receipt": receipt_json("a#b@example.com", "A", 1)
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/tickets/x%2Fy%3F@example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Ticket cancelled successfully",
            "removed_user": { "email": "x/y?@example.com", "first_name": "", "last_name": "" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = BookingClient::new(server.uri()).unwrap();

    let receipt = client.get_receipt("a#b@example.com").await.unwrap();
    assert_eq!(receipt.user.email, "a#b@example.com");

    let removed = client.remove_user("x/y?@example.com").await.unwrap();
    assert_eq!(removed.removed_user.email, "x/y?@example.com");
}

#[test]
fn rejects_unusable_base_url() {
    assert!(matches!(
        BookingClient::new("not a url"),
        Err(ClientError::InvalidBaseUrl(_))
    ));
    assert!(matches!(
        BookingClient::new("mailto:ops@example.com"),
        Err(ClientError::InvalidBaseUrl(_))
    ));
}
