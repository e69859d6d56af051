use std::collections::HashMap;

/// Check if the honeypot field is filled. Returns true if spam detected.
pub fn is_spam(fields: &HashMap<String, String>, honeypot_field: Option<&str>) -> bool {
    let Some(field) = honeypot_field.filter(|f| !f.is_empty()) else {
        return false;
    };

    fields
        .get(field)
        .is_some_and(|value| !value.trim().is_empty())
}
