//! # quarry-mysql
//!
//! MySQL backend for quarry.
//!
//! This crate provides:
//! - [`MySqlDialect`]: backtick identifiers, connection-driven string
//!   escaping and datetimes normalised to the server timezone
//! - [`ResultTypes`]: column metadata resolved once per result set and used
//!   to decode raw rows into typed values
//! - [`ServerTimezone`]: a fixed offset or an IANA zone with daylight saving
//!   rules, applied to datetimes in both directions
//! - [`MYSQL_ERROR_TABLE`]: native error codes mapped to error kinds
//! - [`MySqlAdapter`]: the facade tying these to a [`Connection`]
//!
//! The wire protocol stays behind the [`Connection`] and [`Connector`]
//! traits; any driver that can execute text statements, report column type
//! codes and escape strings can back the adapter.
//!
//! ## Example
//!
//! ```rust
//! use quarry_core::model::{Collection, Criteria, Predicate};
//! use quarry_core::Dialect;
//! use quarry_mysql::{MySqlDialect, MySqlEscaper};
//!
//! let dialect = MySqlDialect::new(&MySqlEscaper, None);
//! let users = Collection::new("users").alias("u");
//! let criteria = Criteria::new(users.clone())
//!     .field(users.field("id"))
//!     .filter(Predicate::eq(users.field("email"), "ann@example.com"))
//!     .limit(1);
//!
//! assert_eq!(
//!     dialect.generate_select(&criteria).unwrap(),
//!     "SELECT `u`.`id` FROM `users` AS `u` WHERE `u`.`email` = 'ann@example.com' LIMIT 1"
//! );
//! ```
//!
//! [`Connection`]: quarry_core::Connection
//! [`Connector`]: quarry_core::Connector

pub mod adapter;
pub mod codec;
pub mod config;
pub mod dialect;
pub mod errors;
pub mod escape;
pub mod timezone;
pub mod types;

pub use adapter::MySqlAdapter;
pub use codec::ResultTypes;
pub use config::{AdapterConfig, ConfigError};
pub use dialect::MySqlDialect;
pub use errors::MYSQL_ERROR_TABLE;
pub use escape::MySqlEscaper;
pub use timezone::ServerTimezone;
pub use types::{ColumnType, TypeFamily};
