#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt::Write as _;
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use quarry_core::{
    ColumnMeta, ConnectOptions, Connection, Connector, Escaper, NativeError, Outcome, RawRow,
    ResultSet,
};
use quarry_mysql::{AdapterConfig, MySqlAdapter, MySqlEscaper};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tracing_subscriber::Registry;

/// Native type codes used by the tests.
pub const INT: u16 = 3;
pub const BIGINT: u16 = 8;
pub const BIT: u16 = 16;
pub const DOUBLE: u16 = 5;
pub const DATETIME: u16 = 12;
pub const TIME: u16 = 11;
pub const VARCHAR: u16 = 253;

/// A scripted result set that counts metadata lookups.
#[derive(Debug)]
pub struct StubRows {
    columns: Vec<ColumnMeta>,
    rows: VecDeque<Result<RawRow, NativeError>>,
    column_calls: Rc<Cell<usize>>,
}

impl ResultSet for StubRows {
    fn columns(&self) -> Vec<ColumnMeta> {
        self.column_calls.set(self.column_calls.get() + 1);
        self.columns.clone()
    }

    fn next_row(&mut self) -> Result<Option<RawRow>, NativeError> {
        self.rows.pop_front().transpose()
    }
}

/// One scripted reply to `execute`.
#[derive(Debug)]
pub enum Reply {
    Rows {
        columns: Vec<ColumnMeta>,
        rows: Vec<Result<RawRow, NativeError>>,
    },
    Affected(u64),
    Fail(NativeError),
}

/// Builds a row-returning reply from `(name, type_code)` columns and text
/// cells (`None` is SQL NULL).
pub fn rows(columns: &[(&str, u16)], rows: &[&[Option<&str>]]) -> Reply {
    Reply::Rows {
        columns: columns
            .iter()
            .map(|(name, code)| ColumnMeta::new(*name, *code))
            .collect(),
        rows: rows
            .iter()
            .map(|row| Ok(row.iter().map(|cell| cell.map(|s| s.as_bytes().to_vec())).collect()))
            .collect(),
    }
}

/// Like [`rows`], with raw byte cells.
pub fn byte_rows(columns: &[(&str, u16)], rows: &[&[Option<&[u8]>]]) -> Reply {
    Reply::Rows {
        columns: columns
            .iter()
            .map(|(name, code)| ColumnMeta::new(*name, *code))
            .collect(),
        rows: rows
            .iter()
            .map(|row| Ok(row.iter().map(|cell| cell.map(<[u8]>::to_vec)).collect()))
            .collect(),
    }
}

pub fn affected(n: u64) -> Reply {
    Reply::Affected(n)
}

pub fn fail(code: u32, message: &str) -> Reply {
    Reply::Fail(NativeError::new(code, message))
}

/// A connection that replays scripted replies and records every statement.
///
/// Unscripted statements succeed with zero affected rows.
#[derive(Debug, Default)]
pub struct StubConnection {
    replies: VecDeque<Reply>,
    statements: Vec<String>,
    column_calls: Rc<Cell<usize>>,
    insert_id: u64,
}

impl StubConnection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(mut self, reply: Reply) -> Self {
        self.replies.push_back(reply);
        self
    }

    pub fn insert_id(mut self, id: u64) -> Self {
        self.insert_id = id;
        self
    }

    pub fn statements(&self) -> &[String] {
        &self.statements
    }

    pub fn column_calls(&self) -> usize {
        self.column_calls.get()
    }
}

impl Escaper for StubConnection {
    fn escape_string(&self, raw: &str) -> String {
        MySqlEscaper.escape_string(raw)
    }
}

impl Connection for StubConnection {
    type ResultSet = StubRows;

    fn execute(&mut self, sql: &str) -> Result<Outcome<StubRows>, NativeError> {
        self.statements.push(String::from(sql));
        match self.replies.pop_front() {
            None => Ok(Outcome::Affected(0)),
            Some(Reply::Affected(n)) => Ok(Outcome::Affected(n)),
            Some(Reply::Fail(err)) => Err(err),
            Some(Reply::Rows { columns, rows }) => Ok(Outcome::Rows(StubRows {
                columns,
                rows: rows.into(),
                column_calls: Rc::clone(&self.column_calls),
            })),
        }
    }

    fn last_insert_id(&self) -> u64 {
        self.insert_id
    }
}

/// A connector that either hands out a prepared connection or fails.
#[derive(Debug)]
pub struct StubConnector {
    outcome: RefCell<Option<Result<StubConnection, NativeError>>>,
}

impl StubConnector {
    pub fn accepting(connection: StubConnection) -> Self {
        Self {
            outcome: RefCell::new(Some(Ok(connection))),
        }
    }

    pub fn refusing(code: u32, message: &str) -> Self {
        Self {
            outcome: RefCell::new(Some(Err(NativeError::new(code, message)))),
        }
    }
}

impl Connector for StubConnector {
    type Connection = StubConnection;

    fn connect(&self, _options: &ConnectOptions) -> Result<StubConnection, NativeError> {
        self.outcome
            .borrow_mut()
            .take()
            .unwrap_or_else(|| Err(NativeError::new(2002, "connector already used")))
    }
}

pub fn adapter(connection: StubConnection) -> MySqlAdapter<StubConnection> {
    MySqlAdapter::new(connection, AdapterConfig::default())
}

/// A log event seen by [`capture_logs`].
#[derive(Debug, Clone)]
pub struct Captured {
    pub level: Level,
    pub message: String,
    pub fields: String,
}

#[derive(Default)]
struct EventVisitor {
    message: String,
    fields: String,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.message, "{value:?}");
        } else {
            let _ = write!(self.fields, "{}={value:?} ", field.name());
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message.push_str(value);
        } else {
            let _ = write!(self.fields, "{}={value} ", field.name());
        }
    }
}

struct CaptureLayer {
    events: Arc<Mutex<Vec<Captured>>>,
}

impl<S: Subscriber> Layer<S> for CaptureLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);
        self.events.lock().unwrap().push(Captured {
            level: *event.metadata().level(),
            message: visitor.message,
            fields: visitor.fields,
        });
    }
}

/// Runs `f` with a subscriber that records every event, and returns them.
pub fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, Vec<Captured>) {
    let events = Arc::new(Mutex::new(Vec::new()));
    let subscriber = Registry::default().with(CaptureLayer {
        events: Arc::clone(&events),
    });
    let result = tracing::subscriber::with_default(subscriber, f);
    let captured = events.lock().unwrap().clone();
    (result, captured)
}
