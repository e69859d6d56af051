pub mod client_ip;
pub mod form;
pub mod honeypot;
pub mod intake;
pub mod loader;
pub mod parser;
pub mod pipeline;

pub use form::{BookingForm, FieldErrors, ValidatedBooking};
pub use loader::CollectionLoader;
pub use parser::Attachment;
pub use pipeline::{SubmissionError, SubmissionObserver, SubmissionPipeline};

/// The services offered on the booking page.
pub const SERVICES: [&str; 9] = [
    "Water Mitigation",
    "Air Duct Cleaning",
    "Carpet Cleaning",
    "Residential Cleaning",
    "Trash Bin Cleaning",
    "Grass Cutting",
    "Painting",
    "Haul-Offs",
    "Ask About It",
];
