//! Caller-facing data source traits.

use crate::dialect::Params;
use crate::error::Result;
use crate::model::{Aggregate, Collection, Criteria};
use crate::value::{Record, Value};

/// Criteria-driven reads and writes against one backend.
pub trait DataSource {
    /// Returns every row matching `criteria`, decoded.
    ///
    /// # Errors
    ///
    /// Returns the classified server error, or an encode/decode error.
    fn find(&mut self, criteria: &Criteria) -> Result<Vec<Record>>;

    /// Returns the number of rows matching `criteria`.
    ///
    /// # Errors
    ///
    /// Returns the classified server error, or an encode/decode error.
    fn count(&mut self, criteria: &Criteria) -> Result<u64>;

    /// Returns the scalar result of an aggregate.
    ///
    /// # Errors
    ///
    /// Returns the classified server error, or an encode/decode error.
    fn aggregate(&mut self, aggregate: &Aggregate, criteria: &Criteria) -> Result<Value>;

    /// Inserts one row and returns the server-assigned identifier.
    ///
    /// # Errors
    ///
    /// Returns the classified server error, or an encode error.
    fn save(&mut self, values: &Record, collection: &Collection) -> Result<u64>;

    /// Updates matching rows and returns the affected-row count.
    ///
    /// # Errors
    ///
    /// Returns the classified server error, or an encode error.
    fn update(&mut self, values: &Record, criteria: &Criteria) -> Result<u64>;

    /// Deletes matching rows and returns the affected-row count.
    ///
    /// # Errors
    ///
    /// Returns the classified server error, or an encode error.
    fn delete(&mut self, criteria: &Criteria) -> Result<u64>;

    /// Runs a raw row-returning statement.
    ///
    /// # Errors
    ///
    /// Returns the classified server error, or an encode/decode error.
    fn query(&mut self, sql: &str, params: &Params) -> Result<Vec<Record>>;

    /// Runs a raw statement and returns the affected-row count.
    ///
    /// # Errors
    ///
    /// Returns the classified server error, or an encode error.
    fn execute(&mut self, sql: &str, params: &Params) -> Result<u64>;

    /// Returns a collection reference for this source.
    fn collection(&self, name: &str) -> Collection {
        Collection::new(name)
    }

    /// Returns empty criteria over `collection`.
    fn criteria(&self, collection: Collection) -> Criteria {
        Criteria::new(collection)
    }
}

/// Sources with explicit transaction control.
pub trait Transactional {
    /// Starts a transaction.
    ///
    /// # Errors
    ///
    /// Returns the classified server error.
    fn begin_transaction(&mut self) -> Result<()>;

    /// Commits the current transaction.
    ///
    /// # Errors
    ///
    /// Returns the classified server error.
    fn commit(&mut self) -> Result<()>;

    /// Rolls back the current transaction.
    ///
    /// # Errors
    ///
    /// Returns the classified server error.
    fn rollback(&mut self) -> Result<()>;
}

/// Sources that insert many rows in one statement.
pub trait MultipleInsertion {
    /// Inserts every row with a single statement and returns the affected-row
    /// count.
    ///
    /// # Errors
    ///
    /// Returns the classified server error, or an encode error.
    fn save_multiple(&mut self, rows: &[Record], collection: &Collection) -> Result<u64>;
}
