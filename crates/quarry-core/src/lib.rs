//! # quarry-core
//!
//! Backend-agnostic core of the quarry database adapter.
//!
//! This crate provides:
//! - A criteria object model (collections, fields, predicates, ordering,
//!   aggregates) describing what to read or write
//! - A [`Dialect`] capability trait with shared statement assembly, so a
//!   backend only supplies quoting and escaping
//! - A classified error taxonomy with data-driven native code tables
//! - Boundary traits for the server connection
//!
//! ## SQL Injection Prevention
//!
//! Caller values never reach SQL text unescaped: every literal is rendered by
//! [`Dialect::escape_value`].
//!
//! ```rust
//! use quarry_core::dialect::{Dialect, GenericDialect};
//! use quarry_core::model::{Collection, Criteria, Predicate};
//!
//! let user_input = "'; DROP TABLE users; --";
//! let criteria = Criteria::new(Collection::new("users"))
//!     .only(&["id"])
//!     .filter(Predicate::eq("name", user_input));
//!
//! let sql = GenericDialect.generate_select(&criteria).unwrap();
//! assert_eq!(
//!     sql,
//!     r#"SELECT "id" FROM "users" WHERE "name" = '''; DROP TABLE users; --'"#
//! );
//! ```

pub mod connection;
pub mod dialect;
pub mod error;
pub mod model;
pub mod source;
pub mod value;

pub use connection::{
    ColumnMeta, ConnectOptions, Connection, Connector, Escaper, Outcome, RawRow, ResultSet,
};
pub use dialect::{Dialect, GenericDialect, Params};
pub use error::{
    DataError, DecodeError, EncodeError, ErrorCodeTable, ErrorKind, NativeError, Result,
    ServerError,
};
pub use model::{Aggregate, Collection, Criteria, Field, OrderBy, Predicate};
pub use source::{DataSource, MultipleInsertion, Transactional};
pub use value::{Record, ToValue, Value};
