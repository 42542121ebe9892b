//! Boundary traits for the server connection.
//!
//! Establishing, pooling and speaking the wire protocol belong to the
//! implementor. A connection is used by one caller at a time: every call is a
//! blocking round trip and there is no internal locking.

use std::fmt;

use serde::Deserialize;

use crate::error::NativeError;

/// Escapes raw text so it can be placed between single quotes.
pub trait Escaper {
    /// Returns `raw` with every character the server would interpret escaped.
    /// The result does not include the surrounding quotes.
    fn escape_string(&self, raw: &str) -> String;
}

/// Metadata for one result column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMeta {
    /// Column name (or alias) as reported by the server.
    pub name: String,
    /// Backend-specific native storage type code.
    pub type_code: u16,
}

impl ColumnMeta {
    /// Creates column metadata.
    pub fn new(name: impl Into<String>, type_code: u16) -> Self {
        Self {
            name: name.into(),
            type_code,
        }
    }
}

/// A raw row: one value per column in the server's text encoding, `None`
/// for SQL NULL. Cells are bytes so binary columns survive unchanged.
pub type RawRow = Vec<Option<Vec<u8>>>;

/// What the server returned for a statement.
#[derive(Debug)]
pub enum Outcome<R> {
    /// A tabular result to be read row by row.
    Rows(R),
    /// The number of rows the statement changed.
    Affected(u64),
}

/// A tabular result handle.
pub trait ResultSet {
    /// Returns the column metadata, in column order.
    fn columns(&self) -> Vec<ColumnMeta>;

    /// Fetches the next row, aligned with [`columns`](Self::columns).
    ///
    /// # Errors
    ///
    /// Returns the native error if fetching fails mid-result.
    fn next_row(&mut self) -> Result<Option<RawRow>, NativeError>;
}

/// An established server connection.
pub trait Connection: Escaper {
    /// Result handle type.
    type ResultSet: ResultSet;

    /// Submits one statement and waits for its outcome.
    ///
    /// # Errors
    ///
    /// Returns the server's native code and message on failure.
    fn execute(&mut self, sql: &str) -> Result<Outcome<Self::ResultSet>, NativeError>;

    /// Returns the identifier assigned by the last INSERT.
    fn last_insert_id(&self) -> u64;
}

/// Establishes connections.
pub trait Connector {
    /// Connection type produced.
    type Connection: Connection;

    /// Opens a connection. Implementations apply `options.charset` and enable
    /// autocommit before returning.
    ///
    /// # Errors
    ///
    /// Returns the native code and message if the server cannot be reached or
    /// rejects the login.
    fn connect(&self, options: &ConnectOptions) -> Result<Self::Connection, NativeError>;
}

fn default_charset() -> String {
    String::from("utf8mb4")
}

/// Where and how to connect.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct ConnectOptions {
    /// Server host, optionally with port.
    pub host: String,
    /// Login user.
    pub user: String,
    /// Login password.
    #[serde(default)]
    pub password: String,
    /// Default schema.
    pub database: String,
    /// Connection character set.
    #[serde(default = "default_charset")]
    pub charset: String,
}

impl ConnectOptions {
    /// Creates options with an empty password and the default charset.
    pub fn new(host: &str, user: &str, database: &str) -> Self {
        Self {
            host: String::from(host),
            user: String::from(user),
            password: String::new(),
            database: String::from(database),
            charset: default_charset(),
        }
    }

    /// Sets the password.
    #[must_use]
    pub fn password(mut self, password: &str) -> Self {
        self.password = String::from(password);
        self
    }

    /// Sets the character set.
    #[must_use]
    pub fn charset(mut self, charset: &str) -> Self {
        self.charset = String::from(charset);
        self
    }
}

impl fmt::Debug for ConnectOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectOptions")
            .field("host", &self.host)
            .field("user", &self.user)
            .field("password", &"***")
            .field("database", &self.database)
            .field("charset", &self.charset)
            .finish()
    }
}
