//! Parameter interpolation for raw SQL templates.
//!
//! Positional templates use `?`, named templates use `:name`. Placeholders
//! inside quoted strings or quoted identifiers are left alone. Every
//! substituted value goes through [`Dialect::escape_value`].

use std::iter::Peekable;
use std::str::Chars;

use super::Dialect;
use crate::error::EncodeError;
use crate::value::{Record, ToValue, Value};

/// Parameters supplied alongside a raw SQL template.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Params {
    /// No parameters: the template is used verbatim.
    #[default]
    None,
    /// Values for `?` placeholders, in order.
    Positional(Vec<Value>),
    /// Values for `:name` placeholders.
    Named(Record),
}

impl Params {
    /// Creates positional parameters.
    pub fn positional<V: ToValue>(values: Vec<V>) -> Self {
        Self::Positional(values.into_iter().map(ToValue::to_value).collect())
    }

    /// Creates named parameters.
    #[must_use]
    pub const fn named(values: Record) -> Self {
        Self::Named(values)
    }

    /// Returns true if no parameters are supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::None => true,
            Self::Positional(values) => values.is_empty(),
            Self::Named(values) => values.is_empty(),
        }
    }
}

/// Substitutes placeholders in `template` with escaped literals.
///
/// # Errors
///
/// Returns an error if a named parameter is missing, the number of positional
/// parameters does not match the placeholders, or a value cannot be encoded.
pub fn interpolate<D: Dialect + ?Sized>(
    d: &D,
    template: &str,
    params: &Params,
) -> Result<String, EncodeError> {
    if matches!(params, Params::None) {
        return Ok(String::from(template));
    }

    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();
    let mut placeholders = 0;

    while let Some(c) = chars.next() {
        match (c, params) {
            ('\'' | '"' | '`', _) => copy_quoted(c, &mut chars, &mut out),
            ('?', Params::Positional(values)) => {
                if let Some(value) = values.get(placeholders) {
                    out.push_str(&d.escape_value(value)?);
                }
                placeholders += 1;
            }
            (':', Params::Named(values)) => match chars.peek() {
                Some(&next) if next.is_ascii_alphabetic() || next == '_' => {
                    let name = take_identifier(&mut chars);
                    let value = values
                        .get(&name)
                        .ok_or(EncodeError::MissingParameter(name))?;
                    out.push_str(&d.escape_value(value)?);
                }
                Some(&':') => {
                    chars.next();
                    out.push_str("::");
                }
                _ => out.push(':'),
            },
            _ => out.push(c),
        }
    }

    if let Params::Positional(values) = params {
        if placeholders != values.len() {
            return Err(EncodeError::ParameterCount {
                expected: placeholders,
                supplied: values.len(),
            });
        }
    }

    Ok(out)
}

/// Copies a quoted section verbatim, honouring doubled quotes and, outside
/// backtick identifiers, backslash escapes.
fn copy_quoted(quote: char, chars: &mut Peekable<Chars<'_>>, out: &mut String) {
    out.push(quote);
    while let Some(c) = chars.next() {
        out.push(c);
        if c == '\\' && quote != '`' {
            if let Some(escaped) = chars.next() {
                out.push(escaped);
            }
        } else if c == quote {
            if chars.peek() == Some(&quote) {
                chars.next();
                out.push(quote);
            } else {
                return;
            }
        }
    }
}

fn take_identifier(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut name = String::new();
    while let Some(&c) = chars.peek() {
        if c.is_ascii_alphanumeric() || c == '_' {
            name.push(c);
            chars.next();
        } else {
            break;
        }
    }
    name
}
