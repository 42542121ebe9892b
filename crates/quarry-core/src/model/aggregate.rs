//! Aggregate functions.
//!
//! Provides Django-like aggregate functions such as Count, Sum, Avg, Max, Min,
//! with optional grouping.

use super::collection::Field;

/// The aggregate function applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateFunction {
    /// COUNT
    Count,
    /// SUM
    Sum,
    /// AVG
    Avg,
    /// MAX
    Max,
    /// MIN
    Min,
}

impl AggregateFunction {
    /// Returns the SQL function name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Count => "COUNT",
            Self::Sum => "SUM",
            Self::Avg => "AVG",
            Self::Max => "MAX",
            Self::Min => "MIN",
        }
    }
}

/// A function over a field, optionally grouped.
///
/// Without grouping the query yields a single scalar. With grouping each row
/// carries the aggregate first, followed by the group fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aggregate {
    /// Function to apply.
    pub function: AggregateFunction,
    /// Target field; `None` means `*` (only meaningful for COUNT).
    pub field: Option<Field>,
    /// Whether to aggregate only distinct values.
    pub distinct: bool,
    /// GROUP BY fields.
    pub group_by: Vec<Field>,
}

impl Aggregate {
    fn over(function: AggregateFunction, field: Option<Field>) -> Self {
        Self {
            function,
            field,
            distinct: false,
            group_by: Vec::new(),
        }
    }

    /// Creates a COUNT(*) aggregate.
    #[must_use]
    pub fn count_all() -> Self {
        Self::over(AggregateFunction::Count, None)
    }

    /// Creates a COUNT(field) aggregate.
    pub fn count(field: impl Into<Field>) -> Self {
        Self::over(AggregateFunction::Count, Some(field.into()))
    }

    /// Creates a COUNT(DISTINCT field) aggregate.
    pub fn count_distinct(field: impl Into<Field>) -> Self {
        Self {
            distinct: true,
            ..Self::count(field)
        }
    }

    /// Creates a SUM(field) aggregate.
    pub fn sum(field: impl Into<Field>) -> Self {
        Self::over(AggregateFunction::Sum, Some(field.into()))
    }

    /// Creates an AVG(field) aggregate.
    pub fn avg(field: impl Into<Field>) -> Self {
        Self::over(AggregateFunction::Avg, Some(field.into()))
    }

    /// Creates a MAX(field) aggregate.
    pub fn max(field: impl Into<Field>) -> Self {
        Self::over(AggregateFunction::Max, Some(field.into()))
    }

    /// Creates a MIN(field) aggregate.
    pub fn min(field: impl Into<Field>) -> Self {
        Self::over(AggregateFunction::Min, Some(field.into()))
    }

    /// Adds a GROUP BY field.
    #[must_use]
    pub fn group_by(mut self, field: impl Into<Field>) -> Self {
        self.group_by.push(field.into());
        self
    }

    /// Returns true if the aggregate is grouped.
    #[must_use]
    pub fn is_grouped(&self) -> bool {
        !self.group_by.is_empty()
    }
}

/// Convenience function to create a COUNT(*) aggregate.
#[must_use]
pub fn count_all() -> Aggregate {
    Aggregate::count_all()
}

/// Convenience function to create a COUNT(field) aggregate.
pub fn count(field: impl Into<Field>) -> Aggregate {
    Aggregate::count(field)
}

/// Convenience function to create a COUNT(DISTINCT field) aggregate.
pub fn count_distinct(field: impl Into<Field>) -> Aggregate {
    Aggregate::count_distinct(field)
}

/// Convenience function to create a SUM(field) aggregate.
pub fn sum(field: impl Into<Field>) -> Aggregate {
    Aggregate::sum(field)
}

/// Convenience function to create an AVG(field) aggregate.
pub fn avg(field: impl Into<Field>) -> Aggregate {
    Aggregate::avg(field)
}

/// Convenience function to create a MAX(field) aggregate.
pub fn max(field: impl Into<Field>) -> Aggregate {
    Aggregate::max(field)
}

/// Convenience function to create a MIN(field) aggregate.
pub fn min(field: impl Into<Field>) -> Aggregate {
    Aggregate::min(field)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_all_has_no_field() {
        let agg = count_all();
        assert_eq!(agg.function, AggregateFunction::Count);
        assert!(agg.field.is_none());
        assert!(!agg.is_grouped());
    }

    #[test]
    fn test_count_distinct() {
        let agg = count_distinct("user_id");
        assert!(agg.distinct);
        assert_eq!(agg.field, Some(Field::new("user_id")));
    }

    #[test]
    fn test_grouped_sum() {
        let agg = sum("amount").group_by("status");
        assert_eq!(agg.function.name(), "SUM");
        assert!(agg.is_grouped());
    }
}
