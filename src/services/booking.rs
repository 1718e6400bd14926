//! booking.rs
//!
//! Сервис бронирования билетов.
//!
//! Хранит квитанции по email пассажира и делегирует все изменения мест
//! `SeatAllocator`. Каждая публичная операция целиком выполняется под
//! собственной блокировкой таблицы квитанций.
//!
//! Lock order: receipts → allocator. The allocator never calls back into this
//! service, so the order cannot be inverted.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use tracing::{error, info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::config::SectionConfig;
use crate::error::BookingError;
use crate::models::{
    route_key, PurchaseTicketRequest, Receipt, RoutePrices, SectionOccupant, SectionSummary,
    UpdateSeatRequest, User,
};
use crate::services::seat_allocator::SeatAllocator;

pub struct BookingService {
    receipts: Mutex<HashMap<String, Receipt>>,
    allocator: SeatAllocator,
    prices: RoutePrices,
}

impl BookingService {
    pub fn new(sections: &[SectionConfig], prices: RoutePrices) -> Self {
        Self::with_allocator(SeatAllocator::new(sections), prices)
    }

    pub fn with_allocator(allocator: SeatAllocator, prices: RoutePrices) -> Self {
        info!(routes = prices.len(), "BookingService initialized");
        Self {
            receipts: Mutex::new(HashMap::new()),
            allocator,
            prices,
        }
    }

    fn receipts(&self) -> MutexGuard<'_, HashMap<String, Receipt>> {
        self.receipts.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Read-only access for occupancy reporting.
    pub fn allocator(&self) -> &SeatAllocator {
        &self.allocator
    }

    /// Покупка билета: проверка маршрута, выдача места, сохранение квитанции.
    ///
    /// A repeated purchase by the same email replaces the old booking and
    /// frees its seat, so every occupied seat belongs to exactly one receipt.
    pub fn purchase(&self, req: PurchaseTicketRequest) -> Result<Receipt, BookingError> {
        let mut receipts = self.receipts();

        if let Err(e) = req.validate() {
            error!(
                user_email = %req.user.email,
                from = %req.from,
                to = %req.to,
                "PurchaseTicket request missing required fields"
            );
            return Err(e.into());
        }

        info!(user = %req.user.email, from = %req.from, to = %req.to, "PurchaseTicket request");

        let Some(price) = self.prices.price(&req.from, &req.to) else {
            error!(
                from = %req.from,
                to = %req.to,
                connection = %route_key(&req.from, &req.to),
                "PurchaseTicket invalid station names"
            );
            return Err(BookingError::invalid("invalid station"));
        };

        let seat = self.allocator.assign_seat().map_err(|e| {
            error!(user = %req.user.email, error = %e, "PurchaseTicket failed to assign seat");
            BookingError::not_found("failed to assign seat")
        })?;

        if let Some(previous) = receipts.get(&req.user.email) {
            warn!(
                user = %req.user.email,
                section = %previous.seat.section,
                seat_number = previous.seat.seat_number,
                "PurchaseTicket replaces an existing booking; releasing its seat"
            );
            if let Err(e) = self
                .allocator
                .release_seat(&previous.seat.section, previous.seat.seat_number)
            {
                error!(user = %req.user.email, error = %e, "Failed to release replaced seat");
            }
        }

        let receipt = Receipt {
            ticket_id: Uuid::new_v4(),
            user: req.user,
            from: req.from,
            to: req.to,
            price_paid: price,
            seat,
            purchased_at: Utc::now(),
        };
        receipts.insert(receipt.user.email.clone(), receipt.clone());

        info!(
            user = %receipt.user.email,
            section = %receipt.seat.section,
            seat_number = receipt.seat.seat_number,
            price_paid = receipt.price_paid,
            "PurchaseTicket successful"
        );
        Ok(receipt)
    }

    pub fn receipt(&self, email: &str) -> Result<Receipt, BookingError> {
        let receipts = self.receipts();

        if email.is_empty() {
            error!("GetReceipt request missing required fields");
            return Err(BookingError::invalid("missing required fields: email"));
        }

        let receipt = receipts.get(email).cloned().ok_or_else(|| {
            warn!(email, "GetReceipt ticket receipt not found");
            BookingError::not_found("ticket receipt not found")
        })?;

        info!(
            email,
            section = %receipt.seat.section,
            seat_number = receipt.seat.seat_number,
            "GetReceipt successful"
        );
        Ok(receipt)
    }

    /// Пассажиры секции. Порядок не определён.
    pub fn users_by_section(&self, section: &str) -> Result<Vec<SectionOccupant>, BookingError> {
        let receipts = self.receipts();

        if section.is_empty() {
            error!("GetUsersBySection request missing required fields");
            return Err(BookingError::invalid("missing required fields: section"));
        }

        if !self.allocator.has_section(section) {
            warn!(section, "GetUsersBySection section not found");
            return Err(BookingError::not_found("section not found"));
        }

        let users: Vec<SectionOccupant> = receipts
            .values()
            .filter(|r| r.seat.section == section)
            .map(|r| SectionOccupant {
                user: r.user.clone(),
                allotted_seat: r.seat.seat_number,
            })
            .collect();

        info!(section, user_count = users.len(), "GetUsersBySection successful");
        Ok(users)
    }

    pub fn update_seat(&self, req: UpdateSeatRequest) -> Result<Receipt, BookingError> {
        let mut receipts = self.receipts();

        if let Err(e) = req.validate() {
            error!(
                email = %req.email,
                new_section = %req.new_seat.section,
                new_seat = req.new_seat.seat_number,
                "UpdateUserSeat request missing required fields"
            );
            return Err(e.into());
        }

        let receipt = receipts.get_mut(&req.email).ok_or_else(|| {
            warn!(email = %req.email, "UpdateUserSeat ticket receipt not found");
            BookingError::not_found("ticket receipt not found")
        })?;

        self.allocator
            .move_seat(&receipt.seat, &req.new_seat)
            .map_err(|e| {
                warn!(
                    email = %req.email,
                    new_section = %req.new_seat.section,
                    new_seat = req.new_seat.seat_number,
                    error = %e,
                    "UpdateUserSeat failed to update seat"
                );
                BookingError::not_found("failed to update seat")
            })?;

        receipt.seat = req.new_seat;

        info!(
            email = %req.email,
            new_section = %receipt.seat.section,
            new_seat = receipt.seat.seat_number,
            "UpdateUserSeat successful"
        );
        Ok(receipt.clone())
    }

    /// Отмена билета. Возвращает данные снятого пассажира.
    pub fn cancel(&self, email: &str) -> Result<User, BookingError> {
        let mut receipts = self.receipts();

        if email.is_empty() {
            error!("RemoveUser request missing required fields");
            return Err(BookingError::invalid("missing required fields: email"));
        }

        let receipt = receipts.get(email).ok_or_else(|| {
            warn!(email, "RemoveUser ticket receipt not found");
            BookingError::not_found("ticket receipt not found")
        })?;

        let user = receipt.user.clone();
        let seat = receipt.seat.clone();

        self.allocator
            .release_seat(&seat.section, seat.seat_number)
            .map_err(|e| {
                error!(email, section = %seat.section, seat_number = seat.seat_number, error = %e,
                    "RemoveUser failed to release seat");
                BookingError::not_found("failed to release seat")
            })?;

        receipts.remove(email);

        info!(email, section = %seat.section, seat_number = seat.seat_number, "RemoveUser successful");
        Ok(user)
    }

    /// Заполненность всех секций в порядке обхода.
    pub fn section_overview(&self) -> Vec<SectionSummary> {
        let _receipts = self.receipts();
        self.allocator
            .sections()
            .into_iter()
            .map(|s| SectionSummary {
                occupied_seats: s.occupied_seats(),
                section: s.name,
                total_seats: s.max_seats,
                vacant_seats: s.vacant_seats,
            })
            .collect()
    }

    pub fn active_bookings(&self) -> usize {
        self.receipts().len()
    }
}
