//! Decoding of raw MySQL result values.
//!
//! Column types are resolved once per result set into [`ResultTypes`]; rows
//! are then decoded positionally against that list.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use quarry_core::{ColumnMeta, DecodeError, RawRow, Record, Value};

use crate::timezone::ServerTimezone;
use crate::types::{ColumnType, TypeFamily};

/// Prefix of MySQL's zero date (`0000-00-00`, `0000-00-00 00:00:00`).
const ZERO_DATE: &str = "0000-00-00";

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";
const TIME_ANCHOR: &str = "1970-01-01";

/// Column names and types of one result set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultTypes {
    columns: Vec<(String, ColumnType)>,
}

impl ResultTypes {
    /// Resolves column metadata into decoding types.
    #[must_use]
    pub fn resolve(meta: &[ColumnMeta]) -> Self {
        Self {
            columns: meta
                .iter()
                .map(|c| (c.name.clone(), ColumnType::from_code(c.type_code)))
                .collect(),
        }
    }

    /// Number of columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns true if the result has no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Returns the column name and type at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<(&str, ColumnType)> {
        self.columns
            .get(index)
            .map(|(name, ty)| (name.as_str(), *ty))
    }

    /// Decodes one raw row into a record keyed by column name.
    ///
    /// Naive datetimes are read in `server_timezone`, or UTC when unset.
    ///
    /// # Errors
    ///
    /// Returns an error if the row does not have one cell per column, or if a
    /// numeric or temporal column holds malformed text.
    pub fn decode_row(
        &self,
        raw: RawRow,
        server_timezone: Option<ServerTimezone>,
    ) -> Result<Record, DecodeError> {
        if raw.len() != self.columns.len() {
            return Err(DecodeError {
                column: String::from("*"),
                expected: "one cell per result column",
                raw: format!("{} cells for {} columns", raw.len(), self.columns.len()),
            });
        }
        let mut record = Record::with_capacity(self.columns.len());
        for ((name, ty), cell) in self.columns.iter().zip(raw) {
            let value = match cell {
                Some(bytes) => decode_value(name, *ty, bytes, server_timezone)?,
                None => Value::Null,
            };
            record.insert(name.clone(), value);
        }
        Ok(record)
    }
}

/// Decodes one non-NULL raw value of a column.
///
/// Pass-through columns become text when they are valid UTF-8 and bytes
/// otherwise. Integers above `i64::MAX` become [`Value::UInt`].
///
/// Zero dates decode to [`Value::Null`], not to the out-of-range calendar
/// date `-0001-11-30` that a lenient date parser yields for them.
///
/// # Errors
///
/// Returns an error if the value does not parse as the column's type.
pub fn decode_value(
    column: &str,
    ty: ColumnType,
    raw: Vec<u8>,
    server_timezone: Option<ServerTimezone>,
) -> Result<Value, DecodeError> {
    let family = ty.family();
    if family == TypeFamily::PassThrough {
        return Ok(match String::from_utf8(raw) {
            Ok(text) => Value::Text(text),
            Err(err) => Value::Bytes(err.into_bytes()),
        });
    }

    let fail = || DecodeError {
        column: String::from(column),
        expected: family.expected(),
        raw: String::from_utf8_lossy(&raw).into_owned(),
    };
    let Ok(text) = std::str::from_utf8(&raw) else {
        return Err(fail());
    };
    let tz = server_timezone.unwrap_or_else(ServerTimezone::utc);
    let decoded = match family {
        TypeFamily::Integer => decode_integer(text),
        TypeFamily::Float => text.trim().parse::<f64>().ok().map(Value::Float),
        TypeFamily::DateTime if text.starts_with(ZERO_DATE) => Some(Value::Null),
        TypeFamily::DateTime => parse_datetime(text, tz).map(Value::DateTime),
        TypeFamily::Time => {
            parse_datetime(&format!("{TIME_ANCHOR} {text}"), tz).map(Value::DateTime)
        }
        TypeFamily::PassThrough => Some(Value::Text(String::from(text))),
    };
    decoded.ok_or_else(fail)
}

fn decode_integer(text: &str) -> Option<Value> {
    let text = text.trim();
    text.parse::<i64>()
        .map(Value::Int)
        .or_else(|_| text.parse::<u64>().map(Value::UInt))
        .ok()
}

fn parse_datetime(raw: &str, tz: ServerTimezone) -> Option<DateTime<FixedOffset>> {
    let naive = NaiveDateTime::parse_from_str(raw, DATETIME_FORMAT)
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(raw, DATE_FORMAT)
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })?;
    tz.localize(naive)
}
