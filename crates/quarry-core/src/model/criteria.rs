//! Query criteria: target collection, projection, joins, filters, ordering
//! and paging.

use super::collection::{Collection, Field};
use super::filter::Predicate;

/// Order direction for sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderDirection {
    /// Ascending order (ASC)
    Asc,
    /// Descending order (DESC)
    Desc,
}

/// An ordering specification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    /// Field to order by
    pub field: Field,
    /// Order direction
    pub direction: OrderDirection,
}

impl OrderBy {
    /// Creates a new ascending order specification.
    pub fn asc(field: impl Into<Field>) -> Self {
        Self {
            field: field.into(),
            direction: OrderDirection::Asc,
        }
    }

    /// Creates a new descending order specification.
    pub fn desc(field: impl Into<Field>) -> Self {
        Self {
            field: field.into(),
            direction: OrderDirection::Desc,
        }
    }

    /// Parses a Django-style order specification.
    ///
    /// Prefix with `-` for descending order.
    /// Example: `"-created_at"` for descending, `"name"` for ascending.
    #[must_use]
    pub fn parse(spec: &str) -> Self {
        if let Some(column) = spec.strip_prefix('-') {
            Self::desc(column)
        } else {
            Self::asc(spec)
        }
    }
}

/// Kind of join between collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    /// INNER JOIN
    Inner,
    /// LEFT JOIN
    Left,
    /// RIGHT JOIN
    Right,
}

impl JoinKind {
    /// Returns the SQL keyword.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Inner => "INNER JOIN",
            Self::Left => "LEFT JOIN",
            Self::Right => "RIGHT JOIN",
        }
    }
}

/// A joined collection and its join condition.
#[derive(Debug, Clone, PartialEq)]
pub struct Join {
    /// Join kind.
    pub kind: JoinKind,
    /// Joined collection.
    pub collection: Collection,
    /// Join condition.
    pub on: Predicate,
}

/// A backend-agnostic description of which rows to read or modify.
///
/// Criteria are built by the caller and only read by generators.
///
/// # Example
///
/// ```rust
/// use quarry_core::model::{Collection, Criteria, Predicate};
///
/// let users = Collection::new("users");
/// let criteria = Criteria::new(users)
///     .filter(Predicate::eq("active", true))
///     .order_by("-created_at")
///     .limit(10);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Criteria {
    /// Target collection.
    pub collection: Collection,
    /// Projected fields; empty means all columns.
    pub fields: Vec<Field>,
    /// Whether to select distinct rows.
    pub distinct: bool,
    /// Joined collections.
    pub joins: Vec<Join>,
    /// Filters, combined with AND.
    pub predicates: Vec<Predicate>,
    /// Ordering specifications.
    pub order: Vec<OrderBy>,
    /// LIMIT clause.
    pub limit: Option<u64>,
    /// OFFSET clause.
    pub offset: Option<u64>,
}

impl Criteria {
    /// Creates criteria matching every row of `collection`.
    #[must_use]
    pub const fn new(collection: Collection) -> Self {
        Self {
            collection,
            fields: Vec::new(),
            distinct: false,
            joins: Vec::new(),
            predicates: Vec::new(),
            order: Vec::new(),
            limit: None,
            offset: None,
        }
    }

    /// Adds a projected field.
    #[must_use]
    pub fn field(mut self, field: impl Into<Field>) -> Self {
        self.fields.push(field.into());
        self
    }

    /// Replaces the projection.
    #[must_use]
    pub fn only(mut self, fields: &[&str]) -> Self {
        self.fields = fields.iter().map(|f| Field::new(f)).collect();
        self
    }

    /// Makes the query return distinct rows.
    #[must_use]
    pub const fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    /// Adds a filter. Multiple filters are combined with AND.
    #[must_use]
    pub fn filter(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    /// Adds an exclusion: rows matching `predicate` are left out.
    #[must_use]
    pub fn exclude(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate.not());
        self
    }

    /// Adds a join.
    #[must_use]
    pub fn join(mut self, kind: JoinKind, collection: Collection, on: Predicate) -> Self {
        self.joins.push(Join {
            kind,
            collection,
            on,
        });
        self
    }

    /// Adds an ordering from a `"-column"` / `"column"` spec.
    #[must_use]
    pub fn order_by(mut self, spec: &str) -> Self {
        self.order.push(OrderBy::parse(spec));
        self
    }

    /// Adds an ordering.
    #[must_use]
    pub fn order(mut self, order: OrderBy) -> Self {
        self.order.push(order);
        self
    }

    /// Limits the number of results.
    #[must_use]
    pub const fn limit(mut self, n: u64) -> Self {
        self.limit = Some(n);
        self
    }

    /// Sets the offset for pagination.
    #[must_use]
    pub const fn offset(mut self, n: u64) -> Self {
        self.offset = Some(n);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_by_parsing() {
        assert_eq!(
            OrderBy::parse("-created_at").direction,
            OrderDirection::Desc
        );
        assert_eq!(OrderBy::parse("-created_at").field.name, "created_at");
        assert_eq!(OrderBy::parse("name").direction, OrderDirection::Asc);
    }

    #[test]
    fn test_exclude_negates() {
        let criteria =
            Criteria::new(Collection::new("users")).exclude(Predicate::eq("role", "banned"));
        assert!(matches!(criteria.predicates[0], Predicate::Not(_)));
    }

    #[test]
    fn test_new_criteria_is_unrestricted() {
        let criteria = Criteria::new(Collection::new("users"));
        assert!(criteria.fields.is_empty());
        assert!(criteria.predicates.is_empty());
        assert!(criteria.limit.is_none());
    }
}
