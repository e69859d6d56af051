pub mod booking;

pub use booking::{Appointment, BookingRecord};
