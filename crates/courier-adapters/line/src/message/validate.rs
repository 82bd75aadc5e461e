//! Field checks shared by every message builder.

use serde_json::Number;
use url::Url;

use super::{ValidationError, ValidationResult};

/// Longest URL the platform accepts in any message field.
pub const MAX_URL_LENGTH: usize = 1000;

/// Longest alternative text shown on clients without rich message support.
pub const MAX_ALT_TEXT_LENGTH: usize = 400;

/// Fails when `value` is empty.
pub(crate) fn required(field: &'static str, value: &str) -> ValidationResult<()> {
    if value.is_empty() {
        return Err(ValidationError::Required { field });
    }
    Ok(())
}

/// Fails when `value` is longer than `max` characters.
pub(crate) fn max_len(field: &'static str, value: &str, max: usize) -> ValidationResult<()> {
    if value.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(())
}

/// A required text field of at most `max` characters.
pub(crate) fn text(field: &'static str, value: &str, max: usize) -> ValidationResult<String> {
    required(field, value)?;
    max_len(field, value, max)?;
    Ok(value.to_string())
}

/// A required absolute URL of at most [`MAX_URL_LENGTH`] characters.
pub(crate) fn url(field: &'static str, value: &str) -> ValidationResult<String> {
    required(field, value)?;
    match Url::parse(value) {
        Ok(parsed) if parsed.has_host() => {}
        _ => return Err(ValidationError::InvalidUrl { field }),
    }
    max_len(field, value, MAX_URL_LENGTH)?;
    Ok(value.to_string())
}

/// A value that parses as a finite number.
pub(crate) fn number(field: &'static str, value: impl IntoNumber) -> ValidationResult<Number> {
    value
        .into_number()
        .ok_or(ValidationError::NotANumber { field })
}

// =============================================================================
// Numeric input
// =============================================================================

/// Anything accepted where the platform expects a number.
///
/// Integers and finite floats are accepted as-is. Strings are accepted when
/// they parse as a finite number, so `"20"` becomes `20` on the wire.
pub trait IntoNumber {
    /// Converts into a JSON number, or `None` if the value is not finite.
    fn into_number(self) -> Option<Number>;
}

macro_rules! impl_into_number_for_int {
    ($($ty:ty),*) => {
        $(
            impl IntoNumber for $ty {
                fn into_number(self) -> Option<Number> {
                    Some(Number::from(self))
                }
            }
        )*
    };
}

impl_into_number_for_int!(i8, i16, i32, i64, u8, u16, u32, u64, usize);

impl IntoNumber for f64 {
    fn into_number(self) -> Option<Number> {
        Number::from_f64(self)
    }
}

impl IntoNumber for f32 {
    fn into_number(self) -> Option<Number> {
        Number::from_f64(f64::from(self))
    }
}

impl IntoNumber for Number {
    fn into_number(self) -> Option<Number> {
        Some(self)
    }
}

impl IntoNumber for &str {
    fn into_number(self) -> Option<Number> {
        let trimmed = self.trim();
        if let Ok(int) = trimmed.parse::<i64>() {
            return Some(Number::from(int));
        }
        trimmed.parse::<f64>().ok().and_then(Number::from_f64)
    }
}

impl IntoNumber for String {
    fn into_number(self) -> Option<Number> {
        self.as_str().into_number()
    }
}

impl IntoNumber for &String {
    fn into_number(self) -> Option<Number> {
        self.as_str().into_number()
    }
}
