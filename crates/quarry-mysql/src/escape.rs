//! MySQL string escaping.

use quarry_core::Escaper;

/// Escapes text the way `mysql_real_escape_string` does for single-byte-safe
/// character sets such as `utf8mb4`, with `NO_BACKSLASH_ESCAPES` off.
///
/// Connection implementations can delegate [`Escaper`] to this when the
/// driver offers no native primitive.
#[derive(Debug, Default, Clone, Copy)]
pub struct MySqlEscaper;

impl Escaper for MySqlEscaper {
    fn escape_string(&self, raw: &str) -> String {
        let mut escaped = String::with_capacity(raw.len() + raw.len() / 8);
        for c in raw.chars() {
            match c {
                '\0' => escaped.push_str("\\0"),
                '\n' => escaped.push_str("\\n"),
                '\r' => escaped.push_str("\\r"),
                '\\' => escaped.push_str("\\\\"),
                '\'' => escaped.push_str("\\'"),
                '"' => escaped.push_str("\\\""),
                '\x1a' => escaped.push_str("\\Z"),
                other => escaped.push(other),
            }
        }
        escaped
    }
}
