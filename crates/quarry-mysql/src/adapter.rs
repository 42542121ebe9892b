//! MySQL adapter facade.
//!
//! Every operation follows the same path: render SQL through
//! [`MySqlDialect`], submit it to the connection, and either decode the
//! result set or report the affected-row count. Server failures are
//! classified through [`MYSQL_ERROR_TABLE`] once, where they are observed.

use std::time::Instant;

use quarry_core::{
    Aggregate, Collection, ConnectOptions, Connection, Connector, Criteria, DataError,
    DataSource, DecodeError, Dialect, MultipleInsertion, NativeError, Outcome, Params, Record,
    Result, ResultSet, Transactional, Value,
};
use tracing::{debug, info, Level};

use crate::codec::ResultTypes;
use crate::config::AdapterConfig;
use crate::dialect::MySqlDialect;
use crate::errors::MYSQL_ERROR_TABLE;

fn server_error(native: NativeError) -> DataError {
    DataError::Server(MYSQL_ERROR_TABLE.translate(native))
}

fn started() -> Option<Instant> {
    tracing::enabled!(Level::DEBUG).then(Instant::now)
}

/// A MySQL data source over an established connection.
///
/// The adapter owns its connection and needs `&mut self` for every round
/// trip. Share it across threads behind a mutex or give each worker its own.
#[derive(Debug)]
pub struct MySqlAdapter<C: Connection> {
    connection: C,
    config: AdapterConfig,
}

impl<C: Connection> MySqlAdapter<C> {
    /// Wraps an already established connection.
    #[must_use]
    pub const fn new(connection: C, config: AdapterConfig) -> Self {
        Self { connection, config }
    }

    /// Opens a connection through `connector` and wraps it.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::Connect`] carrying the classified kind if the
    /// host is unreachable, the login is rejected or the schema is missing.
    pub fn connect<K>(
        connector: &K,
        options: &ConnectOptions,
        config: AdapterConfig,
    ) -> Result<Self>
    where
        K: Connector<Connection = C>,
    {
        let connection = connector
            .connect(options)
            .map_err(|native| DataError::Connect(MYSQL_ERROR_TABLE.translate(native)))?;
        info!(
            host = %options.host,
            database = %options.database,
            charset = %options.charset,
            "Connected to MySQL"
        );
        Ok(Self::new(connection, config))
    }

    /// Returns the underlying connection.
    #[must_use]
    pub const fn connection(&self) -> &C {
        &self.connection
    }

    /// Returns the underlying connection mutably.
    pub fn connection_mut(&mut self) -> &mut C {
        &mut self.connection
    }

    /// Consumes the adapter and returns the connection.
    #[must_use]
    pub fn into_inner(self) -> C {
        self.connection
    }

    /// Returns the adapter configuration.
    #[must_use]
    pub const fn config(&self) -> &AdapterConfig {
        &self.config
    }

    /// Returns the dialect bound to this connection's escaping.
    #[must_use]
    pub fn dialect(&self) -> MySqlDialect<'_> {
        MySqlDialect::new(&self.connection, self.config.server_timezone)
    }

    /// Returns one row per group of a grouped aggregate.
    ///
    /// # Errors
    ///
    /// Returns the classified server error, or an encode/decode error.
    pub fn aggregate_grouped(
        &mut self,
        aggregate: &Aggregate,
        criteria: &Criteria,
    ) -> Result<Vec<Record>> {
        let sql = self.dialect().generate_aggregate(aggregate, criteria)?;
        self.fetch(&sql)
    }

    fn prepare(&self, sql: &str, params: &Params) -> Result<String> {
        if params.is_empty() {
            return Ok(String::from(sql));
        }
        Ok(self.dialect().interpolate_parameters(sql, params)?)
    }

    /// Runs a row-returning statement and decodes every row.
    fn fetch(&mut self, sql: &str) -> Result<Vec<Record>> {
        debug!(sql = %sql, "Executing query");
        let started = started();

        let mut rows = match self.connection.execute(sql).map_err(server_error)? {
            Outcome::Rows(rows) => rows,
            Outcome::Affected(affected) => {
                debug!(affected, "Query returned no result set");
                return Ok(Vec::new());
            }
        };

        let types = ResultTypes::resolve(&rows.columns());
        let server_timezone = self.config.server_timezone;
        let mut records = Vec::new();
        while let Some(raw) = rows.next_row().map_err(server_error)? {
            records.push(types.decode_row(raw, server_timezone)?);
        }

        if let Some(started) = started {
            debug!(
                rows = records.len(),
                elapsed = ?started.elapsed(),
                "Query returned {} row(s)",
                records.len()
            );
        }
        Ok(records)
    }

    /// Runs a statement and returns the affected-row count.
    fn run(&mut self, sql: &str) -> Result<u64> {
        debug!(sql = %sql, "Executing statement");
        let started = started();

        let affected = match self.connection.execute(sql).map_err(server_error)? {
            Outcome::Affected(affected) => affected,
            Outcome::Rows(mut rows) => {
                let mut count = 0;
                while rows.next_row().map_err(server_error)?.is_some() {
                    count += 1;
                }
                count
            }
        };

        if let Some(started) = started {
            debug!(
                affected,
                elapsed = ?started.elapsed(),
                "{affected} affected row(s)"
            );
        }
        Ok(affected)
    }

    /// First column of the first row, or NULL for an empty result.
    fn scalar(&mut self, sql: &str) -> Result<Value> {
        Ok(self
            .fetch(sql)?
            .into_iter()
            .next()
            .and_then(|row| row.into_iter().next())
            .map_or(Value::Null, |(_, value)| value))
    }
}

impl<C: Connection> DataSource for MySqlAdapter<C> {
    fn find(&mut self, criteria: &Criteria) -> Result<Vec<Record>> {
        let sql = self.dialect().generate_select(criteria)?;
        self.fetch(&sql)
    }

    fn count(&mut self, criteria: &Criteria) -> Result<u64> {
        let sql = self.dialect().generate_count(criteria)?;
        match self.scalar(&sql)? {
            Value::Null => Ok(0),
            Value::Int(n) => u64::try_from(n).map_err(|_| count_error(&n.to_string())),
            Value::UInt(n) => Ok(n),
            Value::Text(s) => s.trim().parse().map_err(|_| count_error(&s)),
            other => Err(count_error(&format!("{other:?}"))),
        }
    }

    fn aggregate(&mut self, aggregate: &Aggregate, criteria: &Criteria) -> Result<Value> {
        let sql = self.dialect().generate_aggregate(aggregate, criteria)?;
        self.scalar(&sql)
    }

    fn save(&mut self, values: &Record, collection: &Collection) -> Result<u64> {
        let sql = self.dialect().generate_insert(values, collection)?;
        self.run(&sql)?;
        Ok(self.connection.last_insert_id())
    }

    fn update(&mut self, values: &Record, criteria: &Criteria) -> Result<u64> {
        let sql = self.dialect().generate_update(values, criteria)?;
        self.run(&sql)
    }

    fn delete(&mut self, criteria: &Criteria) -> Result<u64> {
        let sql = self.dialect().generate_delete(criteria)?;
        self.run(&sql)
    }

    fn query(&mut self, sql: &str, params: &Params) -> Result<Vec<Record>> {
        let sql = self.prepare(sql, params)?;
        self.fetch(&sql)
    }

    fn execute(&mut self, sql: &str, params: &Params) -> Result<u64> {
        let sql = self.prepare(sql, params)?;
        self.run(&sql)
    }
}

fn count_error(raw: &str) -> DataError {
    DataError::Decode(DecodeError {
        column: String::from("COUNT(*)"),
        expected: "integer",
        raw: String::from(raw),
    })
}

impl<C: Connection> Transactional for MySqlAdapter<C> {
    fn begin_transaction(&mut self) -> Result<()> {
        self.run("START TRANSACTION")?;
        Ok(())
    }

    fn commit(&mut self) -> Result<()> {
        self.run("COMMIT")?;
        Ok(())
    }

    fn rollback(&mut self) -> Result<()> {
        self.run("ROLLBACK")?;
        Ok(())
    }
}

impl<C: Connection> MultipleInsertion for MySqlAdapter<C> {
    fn save_multiple(&mut self, rows: &[Record], collection: &Collection) -> Result<u64> {
        if rows.is_empty() {
            return Ok(0);
        }
        let sql = self.dialect().generate_multiple_insert(rows, collection)?;
        self.run(&sql)
    }
}
