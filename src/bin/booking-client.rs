//! Демонстрационный сценарий: три покупки, просмотр квитанции и секции,
//! пересадка и отмена.

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use rail_booking::client::BookingClient;
use rail_booking::models::{SeatRef, User};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let address =
        std::env::var("BOOKING_API_URL").unwrap_or_else(|_| "http://localhost:50051".to_string());
    let client = BookingClient::new(&address).context("failed to build HTTP client")?;

    let users = [
        User::new("test1@example.com", "Sanjay", "Kishor"),
        User::new("test2@example.com", "Sanjay", "Kishor"),
        User::new("test3@example.com", "Sanjay", "Kishor"),
    ];

    for user in &users {
        let res = client
            .purchase_ticket(user.clone(), "London", "France")
            .await
            .with_context(|| format!("could not purchase ticket for {}", user.email))?;
        info!(receipt = ?res.receipt, "Ticket purchased successfully");
    }

    let receipt = client
        .get_receipt(&users[2].email)
        .await
        .context("could not get ticket")?;
    info!(?receipt, "Ticket retrieved successfully");

    let section = client
        .users_by_section("A")
        .await
        .context("could not get users by section")?;
    info!(section = %section.section, users = ?section.users, "Users in section");

    // Место рядом с третьим пассажиром
    let new_seat = SeatRef::new(receipt.seat.section.clone(), receipt.seat.seat_number + 1);
    let updated = client
        .update_seat(&users[0].email, &new_seat)
        .await
        .context("could not update user seat")?;
    info!(receipt = ?updated.updated_receipt, "User seat updated successfully");

    let removed = client
        .remove_user(&users[0].email)
        .await
        .context("could not remove user")?;
    info!(user = ?removed.removed_user, "User removed successfully");

    Ok(())
}
