//! Error types and server error classification.
//!
//! Native server errors arrive as a numeric code plus message
//! ([`NativeError`]). A backend supplies an [`ErrorCodeTable`] that maps codes
//! to an [`ErrorKind`]; translation happens exactly once, where the failure
//! is observed, and produces a [`ServerError`] that keeps the original code
//! and message attached.

use std::fmt;

use thiserror::Error;
use tracing::error;

/// Classified failure category derived from a native error code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Access denied for the user or the schema.
    Auth,
    /// The requested schema/database does not exist.
    UnknownSchema,
    /// A unique or primary key would be duplicated.
    DuplicateEntry,
    /// The server could not parse the statement.
    QuerySyntax,
    /// The referenced table does not exist.
    UnknownCollection,
    /// A foreign key or similar constraint failed.
    Constraint,
    /// The server host could not be reached.
    UnknownHost,
    /// Any other server failure.
    Generic,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Auth => "authentication error",
            Self::UnknownSchema => "unknown schema",
            Self::DuplicateEntry => "duplicate entry",
            Self::QuerySyntax => "query syntax error",
            Self::UnknownCollection => "unknown collection",
            Self::Constraint => "constraint violation",
            Self::UnknownHost => "unknown host",
            Self::Generic => "data error",
        };
        f.write_str(name)
    }
}

/// An unclassified error as reported by the connection layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("native error {code}: {message}")]
pub struct NativeError {
    /// Backend-specific numeric code.
    pub code: u32,
    /// Message reported by the server.
    pub message: String,
}

impl NativeError {
    /// Creates a native error.
    pub fn new(code: u32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// A classified server error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} ({code}): {message}")]
pub struct ServerError {
    /// The classified kind.
    pub kind: ErrorKind,
    /// Original numeric code.
    pub code: u32,
    /// Original message.
    pub message: String,
}

/// Static lookup from native error codes to error kinds.
///
/// Unlisted codes classify as [`ErrorKind::Generic`]. A second backend plugs
/// in by declaring its own table.
#[derive(Debug, Clone, Copy)]
pub struct ErrorCodeTable {
    name: &'static str,
    entries: &'static [(u32, ErrorKind)],
}

impl ErrorCodeTable {
    /// Creates a table from `(code, kind)` pairs.
    #[must_use]
    pub const fn new(name: &'static str, entries: &'static [(u32, ErrorKind)]) -> Self {
        Self { name, entries }
    }

    /// Returns the backend name of this table.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Maps a native code to its kind.
    #[must_use]
    pub fn classify(&self, code: u32) -> ErrorKind {
        self.entries
            .iter()
            .find(|(c, _)| *c == code)
            .map_or(ErrorKind::Generic, |(_, kind)| *kind)
    }

    /// Classifies a native error, logging the original message first.
    #[must_use]
    pub fn translate(&self, native: NativeError) -> ServerError {
        error!(
            backend = self.name,
            code = native.code,
            reason = %native.message,
            "Server reported an error"
        );
        ServerError {
            kind: self.classify(native.code),
            code: native.code,
            message: native.message,
        }
    }
}

/// Errors raised while rendering values or statements, before any round trip.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EncodeError {
    /// A float that has no SQL literal form (NaN or infinity).
    #[error("cannot encode non-finite float {0}")]
    NonFiniteFloat(f64),

    /// A named placeholder without a matching parameter.
    #[error("missing value for parameter ':{0}'")]
    MissingParameter(String),

    /// Positional placeholders and supplied parameters disagree.
    #[error("statement has {expected} placeholder(s) but {supplied} parameter(s) were supplied")]
    ParameterCount {
        /// Placeholders found in the template.
        expected: usize,
        /// Parameters supplied by the caller.
        supplied: usize,
    },

    /// A multi-row insert without rows.
    #[error("multiple insert requires at least one row")]
    EmptyInsert,

    /// A row in a multi-row insert has different columns than the first.
    #[error("row {row} does not match the columns of the first row")]
    ColumnMismatch {
        /// Zero-based index of the offending row.
        row: usize,
    },

    /// An UPDATE without assignments.
    #[error("update requires at least one column")]
    EmptyUpdate,
}

/// Errors raised while decoding a raw result value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot decode column '{column}' as {expected}: {raw:?}")]
pub struct DecodeError {
    /// Column name from the result metadata.
    pub column: String,
    /// The semantic type the column declared.
    pub expected: &'static str,
    /// Raw text received from the server.
    pub raw: String,
}

/// Top-level error for data source operations.
#[derive(Debug, Error)]
pub enum DataError {
    /// The server rejected a statement.
    #[error(transparent)]
    Server(ServerError),

    /// The connection could not be established.
    #[error("connection failed: {0}")]
    Connect(ServerError),

    /// A value or statement could not be rendered.
    #[error("encode error: {0}")]
    Encode(#[from] EncodeError),

    /// A result value could not be decoded.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Invalid adapter configuration.
    #[error("configuration error: {0}")]
    Config(String),
}

impl DataError {
    /// Returns the classified kind for server and connection failures.
    #[must_use]
    pub const fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Server(e) | Self::Connect(e) => Some(e.kind),
            _ => None,
        }
    }

    /// Returns the native code for server and connection failures.
    #[must_use]
    pub const fn code(&self) -> Option<u32> {
        match self {
            Self::Server(e) | Self::Connect(e) => Some(e.code),
            _ => None,
        }
    }
}

/// Result type alias for data source operations.
pub type Result<T> = std::result::Result<T, DataError>;

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: ErrorCodeTable = ErrorCodeTable::new(
        "test",
        &[(1, ErrorKind::Auth), (2, ErrorKind::DuplicateEntry)],
    );

    #[test]
    fn test_classify_known_code() {
        assert_eq!(TABLE.classify(1), ErrorKind::Auth);
        assert_eq!(TABLE.classify(2), ErrorKind::DuplicateEntry);
    }

    #[test]
    fn test_classify_unknown_code_is_generic() {
        assert_eq!(TABLE.classify(9999), ErrorKind::Generic);
    }

    #[test]
    fn test_translate_keeps_code_and_message() {
        let err = TABLE.translate(NativeError::new(2, "Duplicate entry 'a'"));
        assert_eq!(err.kind, ErrorKind::DuplicateEntry);
        assert_eq!(err.code, 2);
        assert_eq!(err.message, "Duplicate entry 'a'");
        assert_eq!(err.to_string(), "duplicate entry (2): Duplicate entry 'a'");
    }

    #[test]
    fn test_data_error_kind() {
        let err = DataError::Server(TABLE.translate(NativeError::new(1, "denied")));
        assert_eq!(err.kind(), Some(ErrorKind::Auth));
        assert_eq!(err.code(), Some(1));

        let err = DataError::from(EncodeError::EmptyInsert);
        assert_eq!(err.kind(), None);
    }
}
