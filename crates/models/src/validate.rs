//! Scalar field validators
//!
//! Each validator is a pure function over the raw string value. Digit rules
//! accept ASCII digits only, so Persian or Arabic-Indic numerals are rejected.

use crate::error::FieldError;
use lazy_static::lazy_static;
use regex::Regex;

pub const NATIONAL_ID_LEN: usize = 10;
pub const STUDENT_ID_LEN: usize = 14;
pub const PERSONNEL_CODE_LEN: usize = 10;
pub const COURSE_CODE_LEN: usize = 7;
pub const POSTAL_CODE_LEN: usize = 10;

lazy_static! {
    static ref PHONE_NUMBER: Regex =
        Regex::new(r"^(0|\+98)?(9[0-9]{9}|[1-8][0-9]{7})$").unwrap();
    static ref EMAIL: Regex = Regex::new(
        r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9](?:[A-Za-z0-9\-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9\-]*[A-Za-z0-9])?)*\.[A-Za-z]{2,}$"
    )
    .unwrap();
}

/// Checks that `value` is exactly `len` ASCII digits
pub fn fixed_digits(field: &'static str, value: &str, len: usize) -> Result<(), FieldError> {
    if value.len() == len && value.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(FieldError::format(field, format!("exactly {len} digits")))
    }
}

pub fn national_id(value: &str) -> Result<(), FieldError> {
    fixed_digits("national_id", value, NATIONAL_ID_LEN)
}

pub fn student_id(value: &str) -> Result<(), FieldError> {
    fixed_digits("student_number", value, STUDENT_ID_LEN)
}

pub fn personnel_code(value: &str) -> Result<(), FieldError> {
    fixed_digits("personnel_code", value, PERSONNEL_CODE_LEN)
}

pub fn course_code(value: &str) -> Result<(), FieldError> {
    fixed_digits("code", value, COURSE_CODE_LEN)
}

pub fn postal_code(value: &str) -> Result<(), FieldError> {
    fixed_digits("post_code", value, POSTAL_CODE_LEN)
}

/// Mobile (`9xxxxxxxxx`) or landline (`[1-8]xxxxxxx`) with an optional `0` or `+98` prefix
pub fn phone_number(value: &str) -> Result<(), FieldError> {
    if PHONE_NUMBER.is_match(value) {
        Ok(())
    } else {
        Err(FieldError::format(
            "number",
            "a mobile or landline number, optionally prefixed by 0 or +98",
        ))
    }
}

pub fn email(value: &str) -> Result<(), FieldError> {
    if EMAIL.is_match(value) {
        Ok(())
    } else {
        Err(FieldError::format("email", "an address of the form local@domain.tld"))
    }
}

/// Rejects empty or whitespace-only text
pub fn not_blank(field: &'static str, value: &str) -> Result<(), FieldError> {
    if value.trim().is_empty() {
        Err(FieldError::format(field, "a non-empty value"))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_national_id() {
        assert!(national_id("0012345678").is_ok());
        assert!(national_id("001234567").is_err());
        assert!(national_id("00123456789").is_err());
        assert!(national_id("00123a5678").is_err());
        assert!(national_id("0012-45678").is_err());
        assert!(national_id("").is_err());
        // Persian digits are not ASCII
        assert!(national_id("۰۰۱۲۳۴۵۶۷۸").is_err());
    }

    #[test]
    fn test_fixed_length_codes() {
        assert!(student_id("14020000000001").is_ok());
        assert!(student_id("1402000000001").is_err());
        assert!(personnel_code("1000000001").is_ok());
        assert!(personnel_code("P00001").is_err());
        assert!(course_code("4024401").is_ok());
        assert!(course_code("CE10100").is_err());
        assert!(course_code("40244").is_err());
        assert!(postal_code("1234567890").is_ok());
        assert!(postal_code("12345 67890").is_err());
    }

    #[test]
    fn test_format_error_cites_field_and_length() {
        let err = course_code("123").unwrap_err();
        assert_eq!(
            err,
            FieldError::Format {
                field: "code",
                expected: "exactly 7 digits".to_string()
            }
        );
    }

    #[test]
    fn test_phone_number() {
        assert!(phone_number("09123456789").is_ok());
        assert!(phone_number("9123456789").is_ok());
        assert!(phone_number("+989123456789").is_ok());
        assert!(phone_number("21234567").is_ok());
        assert!(phone_number("021234567").is_ok());
        assert!(phone_number("0912345678").is_err());
        assert!(phone_number("01234567").is_err());
        assert!(phone_number("+1 555 0100").is_err());
        assert!(phone_number("phone").is_err());
    }

    #[test]
    fn test_email() {
        assert!(email("ali.mohammadi@ut.ac.ir").is_ok());
        assert!(email("user+tag@example.com").is_ok());
        assert!(email("no-at-sign.example.com").is_err());
        assert!(email("user@localhost").is_err());
        assert!(email("user@.com").is_err());
        assert!(email("@example.com").is_err());
        assert!(email("user@exa mple.com").is_err());
    }

    #[test]
    fn test_not_blank() {
        assert!(not_blank("name", "Engineering").is_ok());
        assert!(not_blank("name", "   ").is_err());
    }
}
