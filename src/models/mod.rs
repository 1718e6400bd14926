pub mod receipt;
pub mod requests;
pub mod route;
pub mod seat;
pub mod user;

pub use receipt::{Receipt, SectionOccupant, SectionSummary};
pub use requests::{PurchaseTicketRequest, UpdateSeatRequest};
pub use route::{route_key, RoutePrices};
pub use seat::SeatRef;
pub use user::User;
