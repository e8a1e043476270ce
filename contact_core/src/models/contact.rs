//! Contact form request and response models

use serde::{Deserialize, Serialize};
use validator::Validate;
use chrono::{DateTime, Utc};

pub const CONTACT_THANK_YOU: &str = "Thank you for contacting us! We'll be in touch soon.";

/// Absent fields deserialize as empty strings so that every missing field is
/// reported by validation under its own name.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ContactForm {
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: String,

    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(length(min = 10, max = 20, message = "Phone must be between 10 and 20 characters"))]
    pub phone: String,

    #[validate(length(max = 2000, message = "Message must not exceed 2000 characters"))]
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactResponse {
    pub success: bool,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl ContactResponse {
    pub fn received() -> Self {
        Self {
            success: true,
            message: CONTACT_THANK_YOU.to_string(),
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::Validatable;

    fn form(name: &str, email: &str, phone: &str, message: &str) -> ContactForm {
        ContactForm {
            name: name.to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn test_valid_form() {
        let result = form("John Doe", "john@example.com", "555-123-4567", "Test message")
            .validate_comprehensive();
        assert!(result.is_valid);
    }

    #[test]
    fn test_field_bounds() {
        let result = form("", "john@example.com", "555-123-4567", "").validate_comprehensive();
        assert!(result.has_error("name"));

        let result = form(&"x".repeat(101), "john@example.com", "555-123-4567", "")
            .validate_comprehensive();
        assert!(result.has_error("name"));

        let result = form("John", "john@example.com", "555-1234", "").validate_comprehensive();
        assert!(result.has_error("phone"));

        let result = form("John", "john@example.com", &"5".repeat(21), "").validate_comprehensive();
        assert!(result.has_error("phone"));

        let result = form("John", "john@example.com", "555-123-4567", &"m".repeat(2001))
            .validate_comprehensive();
        assert!(result.has_error("message"));

        let result = form("John", "john@example.com", "555-123-4567", &"m".repeat(2000))
            .validate_comprehensive();
        assert!(result.is_valid);
    }

    #[test]
    fn test_invalid_email_reports_field() {
        let result = form("John", "not-an-email", "555-123-4567", "").validate_comprehensive();
        assert!(!result.is_valid);
        assert_eq!(result.errors["email"], vec!["Invalid email address".to_string()]);
    }

    #[test]
    fn test_email_syntax() {
        for email in [
            "john@example.com",
            "pat.o'neil@example.com",
            "first.last+tag@mail.example.org",
        ] {
            let result = form("John", email, "555-123-4567", "").validate_comprehensive();
            assert!(result.is_valid, "{} should be accepted", email);
        }

        for email in ["", "not-an-email", "two@@example.com", "@example.com"] {
            let result = form("John", email, "555-123-4567", "").validate_comprehensive();
            assert!(result.has_error("email"), "{:?} should be rejected", email);
        }
    }

    #[test]
    fn test_missing_fields_are_reported_individually() {
        let form: ContactForm =
            serde_json::from_value(serde_json::json!({ "name": "John Doe" })).unwrap();

        let result = form.validate_comprehensive();
        assert!(!result.is_valid);
        assert!(!result.has_error("name"));
        assert!(result.has_error("email"));
        assert!(result.has_error("phone"));
        assert!(!result.has_error("message"));
    }

    #[test]
    fn test_lengths_count_characters() {
        let result = form(&"é".repeat(100), "john@example.com", "555-123-4567", "")
            .validate_comprehensive();
        assert!(result.is_valid);
    }

    #[test]
    fn test_message_defaults_to_empty() {
        let form: ContactForm = serde_json::from_value(serde_json::json!({
            "name": "Jane",
            "email": "jane@example.com",
            "phone": "555-567-8901"
        }))
        .unwrap();

        assert_eq!(form.message, "");
        assert!(form.validate_comprehensive().is_valid);
    }

    #[test]
    fn test_response_serialization() {
        let response = ContactResponse::received();
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["success"], true);
        assert_eq!(value["message"], CONTACT_THANK_YOU);
        assert!(value["timestamp"].is_string());
    }
}
