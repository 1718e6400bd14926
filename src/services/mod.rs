pub mod booking;
pub mod seat_allocator;

pub use booking::BookingService;
pub use seat_allocator::{SeatAllocator, SectionSnapshot};
