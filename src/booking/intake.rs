use std::collections::HashMap;
use std::net::IpAddr;

use crate::error::AppError;
use crate::models::Appointment;
use crate::state::SharedState;

use super::form::{self, BookingForm};
use super::honeypot;
use super::parser::Attachment;

pub enum IntakeOutcome {
    Stored(Appointment),
    /// Honeypot was filled; answered as a success but nothing was stored.
    Discarded,
}

/// Everything between a parsed post and the pipeline: honeypot, validation,
/// then the per-IP limit. Validation failures never touch either store.
pub async fn accept(
    state: &SharedState,
    client_ip: IpAddr,
    form: &BookingForm,
    raw_fields: &HashMap<String, String>,
    attachment: Option<Attachment>,
) -> Result<IntakeOutcome, AppError> {
    if honeypot::is_spam(raw_fields, state.config.honeypot_field.as_deref()) {
        tracing::info!("Discarding request from {client_ip}: honeypot filled");
        return Ok(IntakeOutcome::Discarded);
    }

    let booking = form::validate(form)?;

    state
        .submission_limiter
        .check(client_ip)
        .map_err(AppError::RateLimited)?;

    let appointment = state.pipeline.submit(booking, attachment).await?;
    Ok(IntakeOutcome::Stored(appointment))
}
