//! SQL Dialect support.
//!
//! Different databases quote identifiers and literals differently. A
//! [`Dialect`] supplies those primitives; statement assembly is shared and
//! lives in [`statement`], calling back into the dialect only for quoting and
//! escaping. Caller data reaches SQL text exclusively through
//! [`Dialect::escape_value`].

mod generic;
pub mod literal;
mod params;
pub mod statement;

pub use generic::GenericDialect;
pub use params::{interpolate, Params};

use crate::error::EncodeError;
use crate::model::{Aggregate, Collection, Criteria, Field};
use crate::value::{Record, Value};

/// Trait for SQL dialect-specific behavior.
pub trait Dialect {
    /// Returns the name of the dialect.
    fn name(&self) -> &'static str;

    /// Returns the identifier quote character (e.g., `"` for standard SQL, `` ` `` for MySQL).
    fn identifier_quote(&self) -> char {
        '"'
    }

    /// Wraps an identifier in the dialect's quote character.
    ///
    /// Embedded quote characters are doubled. Identifiers are expected to come
    /// from schema definitions, not end users.
    fn escape_identifier(&self, name: &str) -> String {
        let quote = self.identifier_quote();
        let doubled = format!("{quote}{quote}");
        format!("{quote}{}{quote}", name.replace(quote, &doubled))
    }

    /// Escapes a field, prefixed by its collection alias-or-name when present.
    fn escape_field(&self, field: &Field) -> String {
        let escaped = self.escape_identifier(&field.name);
        match &field.collection {
            Some(collection) => {
                format!("{}.{escaped}", self.escape_identifier(collection.qualifier()))
            }
            None => escaped,
        }
    }

    /// Escapes a collection for FROM/JOIN clauses, with its alias if any.
    fn escape_collection(&self, collection: &Collection) -> String {
        let name = self.escape_identifier(&collection.name);
        match &collection.alias {
            Some(alias) => format!("{name} AS {}", self.escape_identifier(alias)),
            None => name,
        }
    }

    /// Renders a value as a SQL literal.
    ///
    /// # Errors
    ///
    /// Returns an error for values with no literal form.
    fn escape_value(&self, value: &Value) -> Result<String, EncodeError>;

    /// Renders a regular expression match of `lhs` against `rhs`. Both sides
    /// are already escaped.
    fn render_regex(&self, lhs: &str, rhs: &str) -> String;

    /// Renders a `LIKE` (or `NOT LIKE`) match. Patterns escape `%`, `_` and
    /// `\` with a backslash, so the escape character is declared.
    fn render_like(&self, lhs: &str, keyword: &str, rhs: &str) -> String {
        format!("{lhs} {keyword} {rhs} ESCAPE '\\'")
    }

    /// Renders the LIMIT/OFFSET tail, or `None` when neither is set.
    fn render_limit(&self, limit: Option<u64>, offset: Option<u64>) -> Option<String> {
        match (limit, offset) {
            (Some(limit), Some(offset)) => Some(format!("LIMIT {limit} OFFSET {offset}")),
            (Some(limit), None) => Some(format!("LIMIT {limit}")),
            (None, Some(offset)) => Some(format!("OFFSET {offset}")),
            (None, None) => None,
        }
    }

    /// Generates a SELECT statement.
    ///
    /// # Errors
    ///
    /// Returns an error if a filter value cannot be encoded.
    fn generate_select(&self, criteria: &Criteria) -> Result<String, EncodeError> {
        statement::select(self, criteria)
    }

    /// Generates a COUNT statement yielding a single scalar.
    ///
    /// # Errors
    ///
    /// Returns an error if a filter value cannot be encoded.
    fn generate_count(&self, criteria: &Criteria) -> Result<String, EncodeError> {
        statement::count(self, criteria)
    }

    /// Generates an aggregate statement.
    ///
    /// # Errors
    ///
    /// Returns an error if a filter value cannot be encoded.
    fn generate_aggregate(
        &self,
        aggregate: &Aggregate,
        criteria: &Criteria,
    ) -> Result<String, EncodeError> {
        statement::aggregate(self, aggregate, criteria)
    }

    /// Generates a single-row INSERT statement.
    ///
    /// # Errors
    ///
    /// Returns an error if a value cannot be encoded.
    fn generate_insert(
        &self,
        values: &Record,
        collection: &Collection,
    ) -> Result<String, EncodeError> {
        statement::insert(self, values, collection)
    }

    /// Generates one INSERT statement carrying every row.
    ///
    /// # Errors
    ///
    /// Returns an error if there are no rows, rows disagree on columns, or a
    /// value cannot be encoded.
    fn generate_multiple_insert(
        &self,
        rows: &[Record],
        collection: &Collection,
    ) -> Result<String, EncodeError> {
        statement::multiple_insert(self, rows, collection)
    }

    /// Generates an UPDATE statement.
    ///
    /// # Errors
    ///
    /// Returns an error if `values` is empty or a value cannot be encoded.
    fn generate_update(&self, values: &Record, criteria: &Criteria) -> Result<String, EncodeError> {
        statement::update(self, values, criteria)
    }

    /// Generates a DELETE statement.
    ///
    /// # Errors
    ///
    /// Returns an error if a filter value cannot be encoded.
    fn generate_delete(&self, criteria: &Criteria) -> Result<String, EncodeError> {
        statement::delete(self, criteria)
    }

    /// Substitutes placeholders in a caller-supplied template with escaped
    /// literals.
    ///
    /// # Errors
    ///
    /// Returns an error if parameters are missing or cannot be encoded.
    fn interpolate_parameters(&self, sql: &str, params: &Params) -> Result<String, EncodeError> {
        params::interpolate(self, sql, params)
    }
}
