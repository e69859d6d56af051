use std::collections::HashMap;

use ark_booking::booking::form::{self, BookingForm, EMAIL, NAME, SERVICE};

fn filled() -> BookingForm {
    BookingForm {
        name: Some("Jane Doe".to_string()),
        email: Some("jane@x.com".to_string()),
        service: Some("Carpet Cleaning".to_string()),
        square_feet: None,
        message: None,
        date: Some("2024-05-01".to_string()),
    }
}

#[test]
fn valid_form_passes_through_unchanged() {
    let booking = form::validate(&filled()).unwrap();

    assert_eq!(booking.name, "Jane Doe");
    assert_eq!(booking.email, "jane@x.com");
    assert_eq!(booking.service, "Carpet Cleaning");
    assert_eq!(booking.square_feet, None);
    assert_eq!(booking.message, None);
    assert_eq!(booking.date.as_deref(), Some("2024-05-01"));
}

#[test]
fn missing_required_fields_are_reported_as_required() {
    let errors = form::validate(&BookingForm::default()).unwrap_err();

    assert_eq!(errors.len(), 3);
    assert_eq!(errors.get(NAME), Some("Required"));
    assert_eq!(errors.get(EMAIL), Some("Required"));
    assert_eq!(errors.get(SERVICE), Some("Required"));
}

#[test]
fn short_values_fail_length_check() {
    let mut form = filled();
    form.name = Some("J".to_string());
    form.service = Some(String::new());

    let errors = form::validate(&form).unwrap_err();

    assert_eq!(errors.len(), 2);
    assert_eq!(
        errors.get(NAME),
        Some("String must contain at least 2 character(s)")
    );
    assert_eq!(
        errors.get(SERVICE),
        Some("String must contain at least 2 character(s)")
    );
    assert_eq!(errors.get(EMAIL), None);
}

#[test]
fn length_counts_characters_not_bytes() {
    let mut form = filled();
    form.name = Some("É".to_string());
    assert!(form::validate(&form).is_err());

    form.name = Some("Ñé".to_string());
    assert!(form::validate(&form).is_ok());
}

#[test]
fn invalid_email_is_the_only_error() {
    let mut form = filled();
    form.email = Some("not-an-email".to_string());

    let errors = form::validate(&form).unwrap_err();

    assert_eq!(errors.len(), 1);
    assert_eq!(errors.get(EMAIL), Some("Invalid email"));
}

#[test]
fn email_syntax() {
    for good in [
        "jane@x.com",
        "jane.doe+booking@mail.example.org",
        "O'Brien@example.ie",
        "a_b-c@sub-domain.example.co",
    ] {
        assert!(form::is_valid_email(good), "{good} should be valid");
    }

    for bad in [
        "not-an-email",
        "",
        "@example.com",
        "jane@",
        "jane@example",
        "jane@example.c",
        ".jane@example.com",
        "jane..doe@example.com",
        "jane.@example.com",
        "jane doe@example.com",
        "jane@-example.com",
    ] {
        assert!(!form::is_valid_email(bad), "{bad} should be invalid");
    }
}

#[test]
fn optional_fields_never_fail() {
    let mut form = filled();
    form.square_feet = Some("lots".to_string());
    form.message = Some(String::new());
    form.date = Some(String::new());

    let booking = form::validate(&form).unwrap();
    assert_eq!(booking.square_feet.as_deref(), Some("lots"));
    assert_eq!(booking.date.as_deref(), Some(""));
}

#[test]
fn from_fields_picks_known_names_only() {
    let fields: HashMap<String, String> = [
        ("name", "Jane Doe"),
        ("email", "jane@x.com"),
        ("service", "Painting"),
        ("squareFeet", "900"),
        ("website", ""),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();

    let form = BookingForm::from_fields(&fields);

    assert_eq!(form.name.as_deref(), Some("Jane Doe"));
    assert_eq!(form.square_feet.as_deref(), Some("900"));
    assert_eq!(form.message, None);
    assert_eq!(form.value("squareFeet"), "900");
    assert_eq!(form.value("message"), "");
    assert_eq!(form.value("website"), "");
}
