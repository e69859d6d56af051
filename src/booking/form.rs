use std::collections::{BTreeMap, HashMap};
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

pub const NAME: &str = "name";
pub const EMAIL: &str = "email";
pub const SERVICE: &str = "service";
pub const SQUARE_FEET: &str = "squareFeet";
pub const MESSAGE: &str = "message";
pub const DATE: &str = "date";
pub const IMAGE: &str = "image";

const MIN_LEN: usize = 2;

const REQUIRED: &str = "Required";
const TOO_SHORT: &str = "String must contain at least 2 character(s)";
const INVALID_EMAIL: &str = "Invalid email";

// Leading dots and ".." runs are rejected in is_valid_email.
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[A-Z0-9_'+\-.]*[A-Z0-9_+\-]@([A-Z0-9][A-Z0-9\-]*\.)+[A-Z]{2,}$").unwrap()
});

/// Raw field values as typed by the user. Absent fields are `None`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub service: Option<String>,
    pub square_feet: Option<String>,
    pub message: Option<String>,
    pub date: Option<String>,
}

impl BookingForm {
    /// Pick the booking fields out of a flat name/value map, ignoring anything else.
    pub fn from_fields(fields: &HashMap<String, String>) -> Self {
        let get = |key: &str| fields.get(key).cloned();
        BookingForm {
            name: get(NAME),
            email: get(EMAIL),
            service: get(SERVICE),
            square_feet: get(SQUARE_FEET),
            message: get(MESSAGE),
            date: get(DATE),
        }
    }

    pub fn value(&self, field: &str) -> &str {
        let value = match field {
            NAME => &self.name,
            EMAIL => &self.email,
            SERVICE => &self.service,
            SQUARE_FEET => &self.square_feet,
            MESSAGE => &self.message,
            DATE => &self.date,
            _ => &None,
        };
        value.as_deref().unwrap_or("")
    }
}

/// A form that passed validation. Optional fields keep their absence.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedBooking {
    pub name: String,
    pub email: String,
    pub service: String,
    pub square_feet: Option<String>,
    pub message: Option<String>,
    pub date: Option<String>,
}

/// One message per invalid field, keyed by the field's form name.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(|s| s.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    fn insert(&mut self, field: &'static str, message: &str) {
        self.0.insert(field, message.to_string());
    }
}

pub fn validate(form: &BookingForm) -> Result<ValidatedBooking, FieldErrors> {
    let mut errors = FieldErrors::default();

    check_min_len(&mut errors, NAME, form.name.as_deref());
    check_email(&mut errors, form.email.as_deref());
    check_min_len(&mut errors, SERVICE, form.service.as_deref());

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(ValidatedBooking {
        name: form.name.clone().unwrap_or_default(),
        email: form.email.clone().unwrap_or_default(),
        service: form.service.clone().unwrap_or_default(),
        square_feet: form.square_feet.clone(),
        message: form.message.clone(),
        date: form.date.clone(),
    })
}

fn check_min_len(errors: &mut FieldErrors, field: &'static str, value: Option<&str>) {
    match value {
        None => errors.insert(field, REQUIRED),
        Some(s) if s.chars().count() < MIN_LEN => errors.insert(field, TOO_SHORT),
        Some(_) => {}
    }
}

fn check_email(errors: &mut FieldErrors, value: Option<&str>) {
    match value {
        None => errors.insert(EMAIL, REQUIRED),
        Some(s) if !is_valid_email(s) => errors.insert(EMAIL, INVALID_EMAIL),
        Some(_) => {}
    }
}

pub fn is_valid_email(s: &str) -> bool {
    !s.starts_with('.') && !s.contains("..") && EMAIL_RE.is_match(s)
}
