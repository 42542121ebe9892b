//! MySQL dialect.

use quarry_core::dialect::literal;
use quarry_core::{Dialect, EncodeError, Escaper, Value};

use crate::timezone::ServerTimezone;

/// Largest row count MySQL accepts in a LIMIT clause.
///
/// MySQL has no OFFSET without LIMIT, so an offset-only page uses this as the
/// limit.
pub const MAX_LIMIT: u64 = u64::MAX;

/// MySQL dialect.
///
/// MySQL uses backticks for identifier quoting and backslash escaping inside
/// string literals. Text escaping is delegated to the connection so the
/// server's character set is honoured; datetimes are converted to the server
/// timezone before they are formatted.
#[derive(Clone, Copy)]
pub struct MySqlDialect<'a> {
    escaper: &'a dyn Escaper,
    server_timezone: Option<ServerTimezone>,
}

impl<'a> MySqlDialect<'a> {
    /// Creates a dialect escaping text through `escaper`.
    #[must_use]
    pub fn new(escaper: &'a dyn Escaper, server_timezone: Option<ServerTimezone>) -> Self {
        Self {
            escaper,
            server_timezone,
        }
    }

    /// Returns the server timezone datetimes are converted to.
    #[must_use]
    pub const fn server_timezone(&self) -> Option<ServerTimezone> {
        self.server_timezone
    }

    fn quote_text(&self, s: &str) -> String {
        format!("'{}'", self.escaper.escape_string(s))
    }
}

impl std::fmt::Debug for MySqlDialect<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MySqlDialect")
            .field("server_timezone", &self.server_timezone)
            .finish_non_exhaustive()
    }
}

impl Dialect for MySqlDialect<'_> {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn identifier_quote(&self) -> char {
        '`'
    }

    fn escape_value(&self, value: &Value) -> Result<String, EncodeError> {
        Ok(match value {
            Value::Null => String::from("NULL"),
            Value::Bool(b) => String::from(literal::boolean(*b)),
            Value::Int(n) => n.to_string(),
            Value::UInt(n) => n.to_string(),
            Value::Float(f) => literal::float(*f)?,
            Value::Text(s) => self.quote_text(s),
            Value::Bytes(b) => literal::hex(b),
            Value::DateTime(dt) => {
                let dt = self.server_timezone.map_or(*dt, |tz| tz.convert(dt));
                self.quote_text(&literal::datetime(&dt))
            }
            Value::Object(o) => self.quote_text(&literal::stringify_object(o)),
        })
    }

    fn render_regex(&self, lhs: &str, rhs: &str) -> String {
        format!("{lhs} REGEXP {rhs}")
    }

    // Backslash is already MySQL's LIKE escape character.
    fn render_like(&self, lhs: &str, keyword: &str, rhs: &str) -> String {
        format!("{lhs} {keyword} {rhs}")
    }

    fn render_limit(&self, limit: Option<u64>, offset: Option<u64>) -> Option<String> {
        match (limit, offset) {
            (Some(limit), Some(offset)) => Some(format!("LIMIT {limit} OFFSET {offset}")),
            (Some(limit), None) => Some(format!("LIMIT {limit}")),
            (None, Some(offset)) => Some(format!("LIMIT {MAX_LIMIT} OFFSET {offset}")),
            (None, None) => None,
        }
    }
}
