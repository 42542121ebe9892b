//! Generic SQL dialect.

use super::{literal, Dialect};
use crate::error::EncodeError;
use crate::value::Value;

/// A generic SQL dialect using ANSI SQL standards.
///
/// Strings are escaped by doubling single quotes; datetimes are written in
/// their own offset.
#[derive(Debug, Default, Clone, Copy)]
pub struct GenericDialect;

impl GenericDialect {
    /// Creates a new generic dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

fn quote_text(s: &str) -> String {
    // Escape single quotes by doubling them
    format!("'{}'", s.replace('\'', "''"))
}

impl Dialect for GenericDialect {
    fn name(&self) -> &'static str {
        "generic"
    }

    fn escape_value(&self, value: &Value) -> Result<String, EncodeError> {
        Ok(match value {
            Value::Null => String::from("NULL"),
            Value::Bool(b) => String::from(literal::boolean(*b)),
            Value::Int(n) => n.to_string(),
            Value::UInt(n) => n.to_string(),
            Value::Float(f) => literal::float(*f)?,
            Value::Text(s) => quote_text(s),
            Value::Bytes(b) => literal::hex(b),
            Value::DateTime(dt) => quote_text(&literal::datetime(dt)),
            Value::Object(o) => quote_text(&literal::stringify_object(o)),
        })
    }

    fn render_regex(&self, lhs: &str, rhs: &str) -> String {
        format!("REGEXP_LIKE({lhs}, {rhs})")
    }
}
