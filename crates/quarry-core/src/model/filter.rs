//! Filter predicates.
//!
//! Predicates form a tree of comparisons combined with AND, OR and NOT. They
//! carry [`Value`]s, never SQL text; a dialect renders and escapes them.
//!
//! # Example
//!
//! ```rust
//! use quarry_core::model::Predicate;
//!
//! let filter = Predicate::eq("status", "active")
//!     .and(Predicate::gt("age", 18).or(Predicate::eq("verified", true)));
//! ```

use std::fmt;

use super::collection::Field;
use crate::value::{ToValue, Value};

/// Comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    /// Equal (=)
    Eq,
    /// Not equal (!=)
    Ne,
    /// Greater than (>)
    Gt,
    /// Greater than or equal (>=)
    Gte,
    /// Less than (<)
    Lt,
    /// Less than or equal (<=)
    Lte,
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Eq => write!(f, "="),
            Self::Ne => write!(f, "!="),
            Self::Gt => write!(f, ">"),
            Self::Gte => write!(f, ">="),
            Self::Lt => write!(f, "<"),
            Self::Lte => write!(f, "<="),
        }
    }
}

/// Right-hand side of a comparison.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// A literal value, escaped on render.
    Value(Value),
    /// Another column, as in join conditions.
    Field(Field),
}

/// A filter predicate.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// `field op operand`
    Compare {
        field: Field,
        op: CompareOp,
        operand: Operand,
    },
    /// `field IS NULL`
    IsNull(Field),
    /// `field IS NOT NULL`
    IsNotNull(Field),
    /// `field [NOT] IN (...)`
    In {
        field: Field,
        values: Vec<Value>,
        negated: bool,
    },
    /// `field [NOT] LIKE pattern`
    Like {
        field: Field,
        pattern: String,
        negated: bool,
    },
    /// `field BETWEEN low AND high`
    Between { field: Field, low: Value, high: Value },
    /// Dialect-specific regular expression match.
    Regex { field: Field, pattern: String },
    /// All members hold.
    And(Vec<Predicate>),
    /// Any member holds.
    Or(Vec<Predicate>),
    /// Negation.
    Not(Box<Predicate>),
}

impl Predicate {
    fn compare<V: ToValue>(field: impl Into<Field>, op: CompareOp, value: V) -> Self {
        Self::Compare {
            field: field.into(),
            op,
            operand: Operand::Value(value.to_value()),
        }
    }

    /// Creates an equality filter (field = value).
    pub fn eq<V: ToValue>(field: impl Into<Field>, value: V) -> Self {
        Self::compare(field, CompareOp::Eq, value)
    }

    /// Creates an inequality filter (field != value).
    pub fn ne<V: ToValue>(field: impl Into<Field>, value: V) -> Self {
        Self::compare(field, CompareOp::Ne, value)
    }

    /// Creates a greater-than filter (field > value).
    pub fn gt<V: ToValue>(field: impl Into<Field>, value: V) -> Self {
        Self::compare(field, CompareOp::Gt, value)
    }

    /// Creates a greater-than-or-equal filter (field >= value).
    pub fn gte<V: ToValue>(field: impl Into<Field>, value: V) -> Self {
        Self::compare(field, CompareOp::Gte, value)
    }

    /// Creates a less-than filter (field < value).
    pub fn lt<V: ToValue>(field: impl Into<Field>, value: V) -> Self {
        Self::compare(field, CompareOp::Lt, value)
    }

    /// Creates a less-than-or-equal filter (field <= value).
    pub fn lte<V: ToValue>(field: impl Into<Field>, value: V) -> Self {
        Self::compare(field, CompareOp::Lte, value)
    }

    /// Compares two columns, as in a join condition.
    pub fn fields(left: impl Into<Field>, op: CompareOp, right: impl Into<Field>) -> Self {
        Self::Compare {
            field: left.into(),
            op,
            operand: Operand::Field(right.into()),
        }
    }

    /// Creates an IS NULL filter.
    pub fn is_null(field: impl Into<Field>) -> Self {
        Self::IsNull(field.into())
    }

    /// Creates an IS NOT NULL filter.
    pub fn is_not_null(field: impl Into<Field>) -> Self {
        Self::IsNotNull(field.into())
    }

    /// Creates an IN list filter.
    pub fn in_list<V: ToValue>(field: impl Into<Field>, values: Vec<V>) -> Self {
        Self::In {
            field: field.into(),
            values: values.into_iter().map(ToValue::to_value).collect(),
            negated: false,
        }
    }

    /// Creates a NOT IN list filter.
    pub fn not_in_list<V: ToValue>(field: impl Into<Field>, values: Vec<V>) -> Self {
        Self::In {
            field: field.into(),
            values: values.into_iter().map(ToValue::to_value).collect(),
            negated: true,
        }
    }

    /// Creates a LIKE filter. Use `%` for wildcard matching.
    pub fn like(field: impl Into<Field>, pattern: &str) -> Self {
        Self::Like {
            field: field.into(),
            pattern: String::from(pattern),
            negated: false,
        }
    }

    /// Creates a NOT LIKE filter.
    pub fn not_like(field: impl Into<Field>, pattern: &str) -> Self {
        Self::Like {
            field: field.into(),
            pattern: String::from(pattern),
            negated: true,
        }
    }

    /// Creates a contains filter (LIKE %value%).
    ///
    /// `value` is matched literally: its `%` and `_` are not wildcards.
    pub fn contains(field: impl Into<Field>, value: &str) -> Self {
        Self::like(field, &format!("%{}%", escape_like(value)))
    }

    /// Creates a starts-with filter (LIKE value%).
    pub fn startswith(field: impl Into<Field>, value: &str) -> Self {
        Self::like(field, &format!("{}%", escape_like(value)))
    }

    /// Creates an ends-with filter (LIKE %value).
    pub fn endswith(field: impl Into<Field>, value: &str) -> Self {
        Self::like(field, &format!("%{}", escape_like(value)))
    }

    /// Creates a BETWEEN filter (low <= field <= high).
    pub fn between<V: ToValue>(field: impl Into<Field>, low: V, high: V) -> Self {
        Self::Between {
            field: field.into(),
            low: low.to_value(),
            high: high.to_value(),
        }
    }

    /// Creates a regular expression match filter.
    pub fn regex(field: impl Into<Field>, pattern: &str) -> Self {
        Self::Regex {
            field: field.into(),
            pattern: String::from(pattern),
        }
    }

    /// Combines this filter with another using AND.
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        match self {
            Self::And(mut members) => {
                members.push(other);
                Self::And(members)
            }
            first => Self::And(vec![first, other]),
        }
    }

    /// Combines this filter with another using OR.
    #[must_use]
    pub fn or(self, other: Self) -> Self {
        match self {
            Self::Or(mut members) => {
                members.push(other);
                Self::Or(members)
            }
            first => Self::Or(vec![first, other]),
        }
    }

    /// Negates this filter with NOT.
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn not(self) -> Self {
        Self::Not(Box::new(self))
    }

    /// Returns true for AND/OR nodes, which need parentheses when nested.
    #[must_use]
    pub const fn is_compound(&self) -> bool {
        matches!(self, Self::And(_) | Self::Or(_))
    }
}

/// Escapes the LIKE wildcards `%` and `_`, and the backslash escape itself.
#[must_use]
pub fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_and_flattens_left_chain() {
        let p = Predicate::eq("a", 1)
            .and(Predicate::eq("b", 2))
            .and(Predicate::eq("c", 3));
        match p {
            Predicate::And(members) => assert_eq!(members.len(), 3),
            other => panic!("expected AND, got {other:?}"),
        }
    }

    #[test]
    fn test_or_inside_and_stays_nested() {
        let p = Predicate::eq("a", 1).and(Predicate::eq("b", 2).or(Predicate::eq("c", 3)));
        match p {
            Predicate::And(members) => {
                assert_eq!(members.len(), 2);
                assert!(members[1].is_compound());
            }
            other => panic!("expected AND, got {other:?}"),
        }
    }

    #[test]
    fn test_contains_wraps_pattern() {
        assert_eq!(
            Predicate::contains("email", "@example.com"),
            Predicate::Like {
                field: Field::new("email"),
                pattern: String::from("%@example.com%"),
                negated: false,
            }
        );
    }

    #[test]
    fn test_lookup_wildcards_are_literal() {
        assert_eq!(escape_like(r"50%_off\"), r"50\%\_off\\");
        assert_eq!(
            Predicate::startswith("code", "A_1"),
            Predicate::Like {
                field: Field::new("code"),
                pattern: String::from(r"A\_1%"),
                negated: false,
            }
        );
    }

    #[test]
    fn test_compare_op_display() {
        assert_eq!(CompareOp::Gte.to_string(), ">=");
        assert_eq!(CompareOp::Ne.to_string(), "!=");
    }
}
