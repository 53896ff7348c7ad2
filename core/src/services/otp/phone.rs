//! Phone number canonicalization for Indian mobile numbers
//!
//! Every accepted input form reduces to a single canonical representation:
//! `+91` followed by exactly 10 digits. Accepted forms are
//! `+91XXXXXXXXXX`, `91XXXXXXXXXX`, `0XXXXXXXXXX` and the bare
//! `XXXXXXXXXX`, with arbitrary internal spaces or hyphens.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::AuthError;

/// Indian mobile subscriber numbers are 10 digits starting with 6-9
static SUBSCRIBER_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[6-9]\d{9}$").unwrap());

/// Canonical country-code prefix for all normalized numbers
const COUNTRY_PREFIX: &str = "+91";

/// Reduce a raw phone input to the canonical `+91XXXXXXXXXX` form.
///
/// Formatting characters (spaces, hyphens, anything that is not a digit or
/// a `+`) are stripped first, then the country/trunk prefix is removed:
/// a leading `+91`, a leading `91` on a 12-character residue, or a leading
/// `0` on an 11-character residue. The remaining subscriber number must be
/// 10 digits starting with 6-9.
///
/// Normalization is deterministic and idempotent; a canonical number
/// passes through unchanged.
///
/// # Errors
///
/// Returns [`AuthError::InvalidPhoneFormat`] for any input that does not
/// reduce to a valid subscriber number, including a stray `+` surviving
/// inside the digits.
pub fn normalize_phone(raw: &str) -> Result<String, AuthError> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect();

    let subscriber = if let Some(rest) = cleaned.strip_prefix(COUNTRY_PREFIX) {
        rest
    } else if cleaned.len() == 12 && cleaned.starts_with("91") {
        &cleaned[2..]
    } else if cleaned.len() == 11 && cleaned.starts_with('0') {
        &cleaned[1..]
    } else {
        cleaned.as_str()
    };

    if !SUBSCRIBER_REGEX.is_match(subscriber) {
        return Err(AuthError::InvalidPhoneFormat {
            phone: raw.to_string(),
        });
    }

    Ok(format!("{}{}", COUNTRY_PREFIX, subscriber))
}

/// Mask a phone number for logging (show only the last 4 digits).
pub fn mask_phone(phone: &str) -> String {
    if phone.len() <= 4 {
        return "*".repeat(phone.len());
    }
    format!("***{}", &phone[phone.len() - 4..])
}
