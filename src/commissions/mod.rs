//! Collaborator commissions: per-booking commission math and the
//! dashboard summary endpoint. Bookings are supplied by the reservation
//! subsystem and never written here.

pub mod calculator;
pub mod models;
pub mod queries;
pub mod routes;

pub use calculator::{commission, total_commission, DEFAULT_COMMISSION_RATE};
pub use models::Booking;
pub use routes::router;
