//! Typed endpoint groups over the request wrapper.

mod auth;
mod bookings;
mod tutors;
mod wallet;

pub use bookings::{Booking, CreateBooking};
pub use tutors::{Tutor, TutorQuery};
pub use wallet::{WalletBalance, WalletTransaction};
