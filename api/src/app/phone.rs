//! Indian phone number handling and login identifier parsing
//!
//! Users can sign in with a username, an email address, or an Indian mobile
//! number typed in any of the usual forms (`98765 43210`, `91-9876543210`,
//! `+91 98765 43210`). Numbers are stored as `+91XXXXXXXXXX`.

fn digits_only(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Whether `raw` has the digit count of an Indian mobile number
pub fn looks_like_indian_phone(raw: &str) -> bool {
    let digits = digits_only(raw);
    match digits.len() {
        10 => true,
        12 | 13 => digits.starts_with("91"),
        _ => false,
    }
}

/// Normalize to `+91XXXXXXXXXX`, or `None` when the input cannot be one
pub fn normalize_indian_phone(raw: &str) -> Option<String> {
    let digits = digits_only(raw);

    if digits.len() == 10 {
        return Some(format!("+91{digits}"));
    }
    if digits.len() >= 12 && digits.starts_with("91") {
        return Some(format!("+{}", &digits[..12]));
    }
    if raw.starts_with("+91") && raw.len() == 13 {
        return Some(raw.to_string());
    }
    None
}

/// The lookups to try, in order, for a login identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginIdentifier {
    pub username: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl LoginIdentifier {
    /// Returns `None` for a blank identifier
    pub fn parse(raw: &str) -> Option<Self> {
        let value = raw.trim();
        if value.is_empty() {
            return None;
        }

        let email = value.contains('@').then(|| value.to_string());
        let phone = if looks_like_indian_phone(value) {
            normalize_indian_phone(value)
        } else {
            None
        };

        Some(Self {
            username: value.to_string(),
            email,
            phone,
        })
    }
}
