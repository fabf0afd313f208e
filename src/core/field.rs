//! Text format validators for string properties

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;
use uuid::Uuid;

/// Format constraints a text property can declare on top of its length bounds
#[derive(Debug, Clone)]
pub enum TextFormat {
    Email,
    Uuid,
    Url,
    Phone,
    Custom(Regex),
}

impl TextFormat {
    /// Validate a string value against this format
    pub fn validate(&self, value: &str) -> bool {
        match self {
            TextFormat::Email => Self::is_valid_email(value),
            TextFormat::Uuid => Uuid::parse_str(value).is_ok(),
            TextFormat::Url => Self::is_valid_url(value),
            TextFormat::Phone => Self::is_valid_phone(value),
            TextFormat::Custom(regex) => regex.is_match(value),
        }
    }

    fn is_valid_email(email: &str) -> bool {
        static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
        let regex = EMAIL_REGEX.get_or_init(|| {
            Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap()
        });
        regex.is_match(email)
    }

    fn is_valid_url(url: &str) -> bool {
        static URL_REGEX: OnceLock<Regex> = OnceLock::new();
        let regex = URL_REGEX.get_or_init(|| Regex::new(r"^https?://[^\s/$.?#].[^\s]*$").unwrap());
        regex.is_match(url)
    }

    fn is_valid_phone(phone: &str) -> bool {
        static PHONE_REGEX: OnceLock<Regex> = OnceLock::new();
        let regex = PHONE_REGEX.get_or_init(|| {
            // At least 8 digits, max 15 (E.164 standard)
            Regex::new(r"^\+?[1-9]\d{7,14}$").unwrap()
        });
        regex.is_match(phone)
    }
}

impl fmt::Display for TextFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextFormat::Email => write!(f, "email address"),
            TextFormat::Uuid => write!(f, "UUID"),
            TextFormat::Url => write!(f, "URL"),
            TextFormat::Phone => write!(f, "phone number"),
            TextFormat::Custom(regex) => write!(f, "value matching '{}'", regex.as_str()),
        }
    }
}

impl PartialEq for TextFormat {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (TextFormat::Email, TextFormat::Email)
            | (TextFormat::Uuid, TextFormat::Uuid)
            | (TextFormat::Url, TextFormat::Url)
            | (TextFormat::Phone, TextFormat::Phone) => true,
            (TextFormat::Custom(a), TextFormat::Custom(b)) => a.as_str() == b.as_str(),
            _ => false,
        }
    }
}
