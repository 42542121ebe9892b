//! The criteria object model consumed by generators.
//!
//! Everything here is an immutable value built by the caller; generators and
//! adapters only read it.

mod aggregate;
mod collection;
mod criteria;
mod filter;

pub use aggregate::{
    avg, count, count_all, count_distinct, max, min, sum, Aggregate, AggregateFunction,
};
pub use collection::{Collection, Field};
pub use criteria::{Criteria, Join, JoinKind, OrderBy, OrderDirection};
pub use filter::{escape_like, CompareOp, Operand, Predicate};
