//! seat_allocator.rs
//!
//! Распределитель мест по секциям.
//!
//! Места выдаются по кругу (round-robin): каждая следующая выдача начинает поиск
//! с секции, идущей за той, что выдала место в прошлый раз. Внутри секции всегда
//! выбирается место с наименьшим свободным номером.
//!
//! All state lives behind a single mutex; `assign_seat`, `release_seat` and
//! `move_seat` each run entirely under it, so no partial update is ever visible.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use tracing::{error, info, warn};

use crate::config::SectionConfig;
use crate::error::SeatError;
use crate::models::SeatRef;

#[derive(Debug, Clone, Copy)]
struct Seat {
    number: u32,
    available: bool,
}

#[derive(Debug)]
struct Section {
    name: String,
    max_seats: u32,
    /// Seat `n` lives at index `n - 1`.
    seats: Vec<Seat>,
    vacant_seats: u32,
    /// Never above the lowest available seat number; `max_seats + 1` when full.
    first_vacant: u32,
}

impl Section {
    fn new(config: &SectionConfig) -> Self {
        Self {
            name: config.name.clone(),
            max_seats: config.max_seats,
            seats: (1..=config.max_seats)
                .map(|number| Seat {
                    number,
                    available: true,
                })
                .collect(),
            vacant_seats: config.max_seats,
            first_vacant: 1,
        }
    }

    fn seat(&self, number: u32) -> Option<&Seat> {
        number
            .checked_sub(1)
            .and_then(|idx| self.seats.get(idx as usize))
    }

    fn seat_mut(&mut self, number: u32) -> Option<&mut Seat> {
        number
            .checked_sub(1)
            .and_then(|idx| self.seats.get_mut(idx as usize))
    }

    /// Первое свободное место начиная с `from` (включительно).
    fn next_available_from(&self, from: u32) -> Option<u32> {
        let start = from.max(1);
        (start..=self.max_seats).find(|&n| self.seat(n).is_some_and(|s| s.available))
    }

    fn occupy(&mut self, number: u32) {
        if let Some(seat) = self.seat_mut(number) {
            seat.available = false;
        }
        self.vacant_seats -= 1;
    }

    /// Сдвигает подсказку на первое свободное место после `number`.
    fn advance_hint_past(&mut self, number: u32) {
        self.first_vacant = self
            .next_available_from(number.saturating_add(1))
            .unwrap_or(self.max_seats.saturating_add(1));
    }

    fn vacate(&mut self, number: u32) {
        if let Some(seat) = self.seat_mut(number) {
            seat.available = true;
        }
        self.vacant_seats += 1;
        if number < self.first_vacant {
            self.first_vacant = number;
        }
    }

    fn snapshot(&self) -> SectionSnapshot {
        SectionSnapshot {
            name: self.name.clone(),
            max_seats: self.max_seats,
            vacant_seats: self.vacant_seats,
            first_vacant: self.first_vacant,
        }
    }
}

/// Состояние секции на момент запроса.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionSnapshot {
    pub name: String,
    pub max_seats: u32,
    pub vacant_seats: u32,
    pub first_vacant: u32,
}

impl SectionSnapshot {
    pub fn occupied_seats(&self) -> u32 {
        self.max_seats - self.vacant_seats
    }
}

#[derive(Debug)]
struct AllocatorState {
    sections: HashMap<String, Section>,
    /// Round-robin order, exactly as configured.
    order: Vec<String>,
    cursor: usize,
}

/// Распределитель мест. Секции и их размеры неизменны после создания.
#[derive(Debug)]
pub struct SeatAllocator {
    state: Mutex<AllocatorState>,
}

impl SeatAllocator {
    pub fn new(sections: &[SectionConfig]) -> Self {
        let order: Vec<String> = sections.iter().map(|s| s.name.clone()).collect();
        let sections = sections
            .iter()
            .map(|config| (config.name.clone(), Section::new(config)))
            .collect();

        info!(sections = order.len(), section_names = ?order, "SeatAllocator initialized");

        Self {
            state: Mutex::new(AllocatorState {
                sections,
                order,
                cursor: 0,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, AllocatorState> {
        // Мутации не паникуют на полпути, поэтому состояние после паники согласовано.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Выдаёт место по кругу, начиная с текущей секции курсора.
    pub fn assign_seat(&self) -> Result<SeatRef, SeatError> {
        let mut state = self.lock();
        let total = state.order.len();

        for offset in 0..total {
            let idx = (state.cursor + offset) % total;
            let name = state.order[idx].clone();
            let Some(section) = state.sections.get_mut(&name) else {
                continue;
            };

            if section.vacant_seats == 0 {
                continue;
            }

            match section.next_available_from(section.first_vacant) {
                Some(number) => {
                    section.occupy(number);
                    section.advance_hint_past(number);
                    info!(
                        section = %section.name,
                        seat_number = number,
                        remaining_vacant = section.vacant_seats,
                        "Seat assigned via round-robin"
                    );
                    let seat = SeatRef::new(section.name.clone(), number);
                    state.cursor = (idx + 1) % total;
                    return Ok(seat);
                }
                None => {
                    // Счётчик говорит "есть места", а сканирование их не нашло.
                    error!(
                        section = %section.name,
                        vacant_seats = section.vacant_seats,
                        first_vacant = section.first_vacant,
                        "Vacancy count disagrees with seat map; resetting to zero"
                    );
                    section.vacant_seats = 0;
                }
            }
        }

        warn!("No available seats in any section");
        Err(SeatError::NoAvailableSeats)
    }

    /// Освобождает занятое место. Повторное освобождение возвращает ошибку.
    pub fn release_seat(&self, section_name: &str, seat_number: u32) -> Result<(), SeatError> {
        let mut state = self.lock();

        let section = state
            .sections
            .get_mut(section_name)
            .ok_or_else(|| SeatError::UnknownSection(section_name.to_string()))?;

        let seat = section.seat(seat_number).ok_or_else(|| SeatError::UnknownSeat {
            section: section_name.to_string(),
            seat: seat_number,
        })?;

        if seat.available {
            return Err(SeatError::SeatNotOccupied {
                section: section_name.to_string(),
                seat: seat_number,
            });
        }

        section.vacate(seat_number);

        info!(
            section = %section.name,
            seat_number,
            vacant_seats = section.vacant_seats,
            "Seat released"
        );
        Ok(())
    }

    /// Атомарно пересаживает с `current` на `requested`.
    ///
    /// All checks run before any mutation: both sections must exist, the
    /// current seat must be occupied and the requested seat must be free.
    pub fn move_seat(&self, current: &SeatRef, requested: &SeatRef) -> Result<(), SeatError> {
        let mut state = self.lock();

        let from = state
            .sections
            .get(&current.section)
            .ok_or_else(|| SeatError::UnknownSection(current.section.clone()))?;
        let to = state
            .sections
            .get(&requested.section)
            .ok_or_else(|| SeatError::UnknownSection(requested.section.clone()))?;

        let current_seat = from
            .seat(current.seat_number)
            .ok_or_else(|| SeatError::UnknownSeat {
                section: current.section.clone(),
                seat: current.seat_number,
            })?;
        if current_seat.available {
            return Err(SeatError::SeatNotOccupied {
                section: current.section.clone(),
                seat: current.seat_number,
            });
        }

        let requested_seat = to
            .seat(requested.seat_number)
            .ok_or_else(|| SeatError::UnknownSeat {
                section: requested.section.clone(),
                seat: requested.seat_number,
            })?;
        if !requested_seat.available {
            return Err(SeatError::SeatOccupied {
                section: requested.section.clone(),
                seat: requested.seat_number,
            });
        }

        // Проверки пройдены, дальше ошибок быть не может.
        if let Some(section) = state.sections.get_mut(&current.section) {
            section.vacate(current.seat_number);
        }
        if let Some(section) = state.sections.get_mut(&requested.section) {
            section.occupy(requested.seat_number);
            if requested.seat_number == section.first_vacant {
                section.advance_hint_past(requested.seat_number);
            }
        }

        info!(
            old_section = %current.section,
            old_seat = current.seat_number,
            new_section = %requested.section,
            new_seat = requested.seat_number,
            "Seat updated"
        );
        Ok(())
    }

    pub fn has_section(&self, name: &str) -> bool {
        self.lock().sections.contains_key(name)
    }

    pub fn section(&self, name: &str) -> Option<SectionSnapshot> {
        self.lock().sections.get(name).map(Section::snapshot)
    }

    /// Снимки всех секций в порядке обхода.
    pub fn sections(&self) -> Vec<SectionSnapshot> {
        let state = self.lock();
        state
            .order
            .iter()
            .filter_map(|name| state.sections.get(name))
            .map(Section::snapshot)
            .collect()
    }

    /// `None` if the section or seat does not exist.
    pub fn seat_available(&self, section: &str, seat_number: u32) -> Option<bool> {
        self.lock()
            .sections
            .get(section)
            .and_then(|s| s.seat(seat_number))
            .map(|s| s.available)
    }

    /// Имя секции, с которой начнётся следующий поиск.
    pub fn next_section(&self) -> Option<String> {
        let state = self.lock();
        state.order.get(state.cursor).cloned()
    }

    #[cfg(test)]
    fn available_count(&self, section: &str) -> u32 {
        let state = self.lock();
        state.sections[section]
            .seats
            .iter()
            .filter(|s| s.available)
            .count() as u32
    }

    #[cfg(test)]
    fn lowest_available(&self, section: &str) -> Option<u32> {
        let state = self.lock();
        state.sections[section]
            .seats
            .iter()
            .find(|s| s.available)
            .map(|s| s.number)
    }
}
