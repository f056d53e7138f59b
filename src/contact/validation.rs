//! Field rules for the contact form.
//!
//! Every value is trimmed before it is checked and every field is checked on
//! each attempt, so the result lists all problems at once in form order.

use once_cell::sync::Lazy;
use regex::Regex;

static NAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-zÀ-ÿ\s'-]{2,50}$").unwrap());
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());
static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9\s+()-]{10,20}$").unwrap());

pub const MIN_MESSAGE_CHARS: usize = 10;

pub mod messages {
    pub const NAME_EMPTY: &str = "Bitte geben Sie Ihren Namen ein.";
    pub const NAME_INVALID: &str =
        "Name darf nur Buchstaben, Leerzeichen, Apostrophe und Bindestriche enthalten (2-50 Zeichen).";
    pub const EMAIL_EMPTY: &str = "Bitte geben Sie Ihre E-Mail-Adresse ein.";
    pub const EMAIL_INVALID: &str = "Bitte geben Sie eine gültige E-Mail-Adresse ein.";
    pub const PHONE_EMPTY: &str = "Bitte geben Sie Ihre Telefonnummer ein.";
    pub const PHONE_INVALID: &str = "Bitte geben Sie eine gültige Telefonnummer ein (10-20 Zeichen).";
    pub const MESSAGE_EMPTY: &str = "Bitte geben Sie eine Nachricht ein.";
    pub const MESSAGE_TOO_SHORT: &str = "Die Nachricht muss mindestens 10 Zeichen lang sein.";
    pub const CONSENT_MISSING: &str = "Bitte akzeptieren Sie die Datenschutzerklärung.";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldId {
    Name,
    Email,
    Phone,
    Message,
    PrivacyConsent,
}

impl FieldId {
    /// Form order, which is also the order errors are reported in.
    pub const ALL: [FieldId; 5] = [
        FieldId::Name,
        FieldId::Email,
        FieldId::Phone,
        FieldId::Message,
        FieldId::PrivacyConsent,
    ];

    pub fn dom_id(self) -> &'static str {
        match self {
            FieldId::Name => "name",
            FieldId::Email => "email",
            FieldId::Phone => "phone",
            FieldId::Message => "message",
            FieldId::PrivacyConsent => "privacy-consent",
        }
    }
}

/// A text field as read from the page on one submit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub id: FieldId,
    pub raw_value: String,
}

impl FormField {
    pub fn new(id: FieldId, raw_value: impl Into<String>) -> Self {
        Self {
            id,
            raw_value: raw_value.into(),
        }
    }

    /// Trims Unicode whitespace and the byte order mark, like a browser's
    /// `String.prototype.trim`.
    pub fn trimmed_value(&self) -> &str {
        self.raw_value
            .trim_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}')
    }

    /// `Err` carries the message to show next to the field.
    pub fn validity(&self) -> Result<(), &'static str> {
        check_text(self.id, self.trimmed_value())
    }
}

/// All five inputs of one submit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: FormField,
    pub email: FormField,
    pub phone: FormField,
    pub message: FormField,
    pub privacy_consent: bool,
}

impl ContactSubmission {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
        message: impl Into<String>,
        privacy_consent: bool,
    ) -> Self {
        Self {
            name: FormField::new(FieldId::Name, name),
            email: FormField::new(FieldId::Email, email),
            phone: FormField::new(FieldId::Phone, phone),
            message: FormField::new(FieldId::Message, message),
            privacy_consent,
        }
    }

    pub fn validate(&self) -> ValidationResult {
        let mut field_errors = Vec::new();
        for field in [&self.name, &self.email, &self.phone, &self.message] {
            if let Err(message) = field.validity() {
                field_errors.push(FieldError {
                    field: field.id,
                    message,
                });
            }
        }
        if !self.privacy_consent {
            field_errors.push(FieldError {
                field: FieldId::PrivacyConsent,
                message: messages::CONSENT_MISSING,
            });
        }
        ValidationResult { field_errors }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: FieldId,
    pub message: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationResult {
    pub field_errors: Vec<FieldError>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.field_errors.is_empty()
    }

    #[cfg(test)]
    pub fn error_for(&self, field: FieldId) -> Option<&'static str> {
        self.field_errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message)
    }
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

fn check_text(id: FieldId, value: &str) -> Result<(), &'static str> {
    use messages::*;

    let (empty, invalid, ok) = match id {
        FieldId::Name => (NAME_EMPTY, NAME_INVALID, NAME_RE.is_match(value)),
        FieldId::Email => (EMAIL_EMPTY, EMAIL_INVALID, is_valid_email(value)),
        FieldId::Phone => (PHONE_EMPTY, PHONE_INVALID, PHONE_RE.is_match(value)),
        FieldId::Message => (
            MESSAGE_EMPTY,
            MESSAGE_TOO_SHORT,
            value.chars().count() >= MIN_MESSAGE_CHARS,
        ),
        FieldId::PrivacyConsent => return Ok(()),
    };
    if value.is_empty() {
        Err(empty)
    } else if !ok {
        Err(invalid)
    } else {
        Ok(())
    }
}
