//! Literal formatting shared by dialects.

use chrono::{DateTime, FixedOffset};

use crate::error::EncodeError;

/// Fractional digits used for float literals.
pub const FLOAT_PRECISION: usize = 16;

/// Format used for datetime literals.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Renders a boolean keyword.
#[must_use]
pub const fn boolean(value: bool) -> &'static str {
    if value {
        "TRUE"
    } else {
        "FALSE"
    }
}

/// Renders a float in fixed notation with [`FLOAT_PRECISION`] fractional
/// digits. Never produces exponent notation or grouping separators.
///
/// # Errors
///
/// Returns an error for NaN and infinities.
pub fn float(value: f64) -> Result<String, EncodeError> {
    if !value.is_finite() {
        return Err(EncodeError::NonFiniteFloat(value));
    }
    Ok(format!("{value:.prec$}", prec = FLOAT_PRECISION))
}

/// Formats a datetime in its own offset, unquoted.
#[must_use]
pub fn datetime(value: &DateTime<FixedOffset>) -> String {
    value.format(DATETIME_FORMAT).to_string()
}

/// Renders bytes as a hexadecimal literal (`X'00FF'`).
#[must_use]
pub fn hex(bytes: &[u8]) -> String {
    let digits: String = bytes.iter().map(|byte| format!("{byte:02X}")).collect();
    format!("X'{digits}'")
}

/// Text form of a structured value. JSON strings render bare.
#[must_use]
pub fn stringify_object(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
