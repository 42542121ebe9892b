//! Dialect-agnostic statement assembly.
//!
//! These functions build complete statements from the criteria model and call
//! through [`Dialect`] only for quoting and escaping. Optional clauses are
//! omitted entirely when empty.

use super::Dialect;
use crate::error::EncodeError;
use crate::model::{Aggregate, Collection, CompareOp, Criteria, Field, Operand, Predicate};
use crate::value::{Record, Value};

/// Builds a SELECT statement.
///
/// # Errors
///
/// Returns an error if a filter value cannot be encoded.
pub fn select<D: Dialect + ?Sized>(d: &D, criteria: &Criteria) -> Result<String, EncodeError> {
    let mut sql = String::from("SELECT ");

    if criteria.distinct {
        sql.push_str("DISTINCT ");
    }

    if criteria.fields.is_empty() {
        sql.push('*');
    } else {
        sql.push_str(&field_list(d, &criteria.fields));
    }

    push_source(d, &mut sql, criteria)?;
    push_where(d, &mut sql, &criteria.predicates)?;
    push_order(d, &mut sql, criteria);
    push_limit(d, &mut sql, criteria);

    Ok(sql)
}

/// Builds a COUNT statement. Ordering and paging do not affect a count and
/// are left out.
///
/// # Errors
///
/// Returns an error if a filter value cannot be encoded.
pub fn count<D: Dialect + ?Sized>(d: &D, criteria: &Criteria) -> Result<String, EncodeError> {
    let mut sql = if criteria.distinct && !criteria.fields.is_empty() {
        format!("SELECT COUNT(DISTINCT {})", field_list(d, &criteria.fields))
    } else {
        String::from("SELECT COUNT(*)")
    };

    push_source(d, &mut sql, criteria)?;
    push_where(d, &mut sql, &criteria.predicates)?;

    Ok(sql)
}

/// Builds an aggregate statement.
///
/// The aggregate is always the first column, so an ungrouped result is read
/// as the first column of the first row. Grouped statements keep the
/// criteria's ordering and paging.
///
/// # Errors
///
/// Returns an error if a filter value cannot be encoded.
pub fn aggregate<D: Dialect + ?Sized>(
    d: &D,
    aggregate: &Aggregate,
    criteria: &Criteria,
) -> Result<String, EncodeError> {
    let mut sql = format!("SELECT {}", aggregate_expr(d, aggregate));

    if aggregate.is_grouped() {
        sql.push_str(", ");
        sql.push_str(&field_list(d, &aggregate.group_by));
    }

    push_source(d, &mut sql, criteria)?;
    push_where(d, &mut sql, &criteria.predicates)?;

    if aggregate.is_grouped() {
        sql.push_str(" GROUP BY ");
        sql.push_str(&field_list(d, &aggregate.group_by));
        push_order(d, &mut sql, criteria);
        push_limit(d, &mut sql, criteria);
    }

    Ok(sql)
}

/// Builds a single-row INSERT statement.
///
/// # Errors
///
/// Returns an error if a value cannot be encoded.
pub fn insert<D: Dialect + ?Sized>(
    d: &D,
    values: &Record,
    collection: &Collection,
) -> Result<String, EncodeError> {
    let columns: Vec<&str> = values.columns().collect();
    let row = values
        .iter()
        .map(|(_, value)| d.escape_value(value))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(format!(
        "INSERT INTO {} ({}) VALUES ({})",
        d.escape_identifier(&collection.name),
        column_list(d, &columns),
        row.join(", ")
    ))
}

/// Builds one INSERT statement with a VALUES tuple per row.
///
/// Columns are taken from the first row; every other row must carry exactly
/// the same columns, in any order.
///
/// # Errors
///
/// Returns an error if `rows` is empty, a row's columns differ from the first
/// row's, or a value cannot be encoded.
pub fn multiple_insert<D: Dialect + ?Sized>(
    d: &D,
    rows: &[Record],
    collection: &Collection,
) -> Result<String, EncodeError> {
    let first = rows.first().ok_or(EncodeError::EmptyInsert)?;
    let columns: Vec<&str> = first.columns().collect();

    let mut tuples = Vec::with_capacity(rows.len());
    for (index, row) in rows.iter().enumerate() {
        if row.len() != columns.len() {
            return Err(EncodeError::ColumnMismatch { row: index });
        }
        let literals = columns
            .iter()
            .map(|column| {
                row.get(column)
                    .ok_or(EncodeError::ColumnMismatch { row: index })
                    .and_then(|value| d.escape_value(value))
            })
            .collect::<Result<Vec<_>, _>>()?;
        tuples.push(format!("({})", literals.join(", ")));
    }

    Ok(format!(
        "INSERT INTO {} ({}) VALUES {}",
        d.escape_identifier(&collection.name),
        column_list(d, &columns),
        tuples.join(", ")
    ))
}

/// Builds an UPDATE statement.
///
/// # Errors
///
/// Returns an error if `values` is empty or a value cannot be encoded.
pub fn update<D: Dialect + ?Sized>(
    d: &D,
    values: &Record,
    criteria: &Criteria,
) -> Result<String, EncodeError> {
    if values.is_empty() {
        return Err(EncodeError::EmptyUpdate);
    }

    let assignments = values
        .iter()
        .map(|(column, value)| {
            Ok(format!(
                "{} = {}",
                d.escape_identifier(column),
                d.escape_value(value)?
            ))
        })
        .collect::<Result<Vec<_>, EncodeError>>()?;

    let mut sql = format!("UPDATE {}", d.escape_collection(&criteria.collection));
    push_joins(d, &mut sql, criteria)?;
    sql.push_str(" SET ");
    sql.push_str(&assignments.join(", "));
    push_where(d, &mut sql, &criteria.predicates)?;

    Ok(sql)
}

/// Builds a DELETE statement.
///
/// An aliased or joined target uses the multi-table form
/// `DELETE alias FROM table AS alias ...` so qualified predicates resolve.
///
/// # Errors
///
/// Returns an error if a filter value cannot be encoded.
pub fn delete<D: Dialect + ?Sized>(d: &D, criteria: &Criteria) -> Result<String, EncodeError> {
    let target = &criteria.collection;
    let mut sql = if target.alias.is_none() && criteria.joins.is_empty() {
        format!("DELETE FROM {}", d.escape_identifier(&target.name))
    } else {
        format!(
            "DELETE {} FROM {}",
            d.escape_identifier(target.qualifier()),
            d.escape_collection(target)
        )
    };

    push_joins(d, &mut sql, criteria)?;
    push_where(d, &mut sql, &criteria.predicates)?;

    Ok(sql)
}

/// Renders a single predicate.
///
/// # Errors
///
/// Returns an error if a value in the predicate cannot be encoded.
pub fn predicate<D: Dialect + ?Sized>(d: &D, predicate: &Predicate) -> Result<String, EncodeError> {
    let sql = match predicate {
        Predicate::Compare {
            field,
            op,
            operand: Operand::Value(Value::Null),
        } if matches!(op, CompareOp::Eq | CompareOp::Ne) => {
            let keyword = if *op == CompareOp::Eq {
                "IS NULL"
            } else {
                "IS NOT NULL"
            };
            format!("{} {keyword}", d.escape_field(field))
        }
        Predicate::Compare { field, op, operand } => {
            let rhs = match operand {
                Operand::Value(value) => d.escape_value(value)?,
                Operand::Field(other) => d.escape_field(other),
            };
            format!("{} {op} {rhs}", d.escape_field(field))
        }
        Predicate::IsNull(field) => format!("{} IS NULL", d.escape_field(field)),
        Predicate::IsNotNull(field) => format!("{} IS NOT NULL", d.escape_field(field)),
        Predicate::In {
            field,
            values,
            negated,
        } => {
            if values.is_empty() {
                // Nothing is IN an empty list; everything is NOT IN it.
                return Ok(String::from(if *negated { "1 = 1" } else { "1 = 0" }));
            }
            let keyword = if *negated { "NOT IN" } else { "IN" };
            let list = values
                .iter()
                .map(|value| d.escape_value(value))
                .collect::<Result<Vec<_>, _>>()?;
            format!("{} {keyword} ({})", d.escape_field(field), list.join(", "))
        }
        Predicate::Like {
            field,
            pattern,
            negated,
        } => {
            let keyword = if *negated { "NOT LIKE" } else { "LIKE" };
            d.render_like(
                &d.escape_field(field),
                keyword,
                &d.escape_value(&Value::Text(pattern.clone()))?,
            )
        }
        Predicate::Between { field, low, high } => format!(
            "{} BETWEEN {} AND {}",
            d.escape_field(field),
            d.escape_value(low)?,
            d.escape_value(high)?
        ),
        Predicate::Regex { field, pattern } => d.render_regex(
            &d.escape_field(field),
            &d.escape_value(&Value::Text(pattern.clone()))?,
        ),
        Predicate::And(members) => junction(d, members, " AND ", "1 = 1")?,
        Predicate::Or(members) => junction(d, members, " OR ", "1 = 0")?,
        Predicate::Not(inner) => format!("NOT ({})", self::predicate(d, inner)?),
    };
    Ok(sql)
}

fn junction<D: Dialect + ?Sized>(
    d: &D,
    members: &[Predicate],
    separator: &str,
    empty: &str,
) -> Result<String, EncodeError> {
    if members.is_empty() {
        return Ok(String::from(empty));
    }
    let parts = members
        .iter()
        .map(|member| {
            let sql = predicate(d, member)?;
            Ok(if member.is_compound() && members.len() > 1 {
                format!("({sql})")
            } else {
                sql
            })
        })
        .collect::<Result<Vec<_>, EncodeError>>()?;
    Ok(parts.join(separator))
}

fn aggregate_expr<D: Dialect + ?Sized>(d: &D, aggregate: &Aggregate) -> String {
    let target = aggregate
        .field
        .as_ref()
        .map_or_else(|| String::from("*"), |field| d.escape_field(field));
    let distinct = if aggregate.distinct { "DISTINCT " } else { "" };
    format!("{}({distinct}{target})", aggregate.function.name())
}

fn field_list<D: Dialect + ?Sized>(d: &D, fields: &[Field]) -> String {
    fields
        .iter()
        .map(|field| d.escape_field(field))
        .collect::<Vec<_>>()
        .join(", ")
}

fn column_list<D: Dialect + ?Sized>(d: &D, columns: &[&str]) -> String {
    columns
        .iter()
        .map(|column| d.escape_identifier(column))
        .collect::<Vec<_>>()
        .join(", ")
}

fn push_source<D: Dialect + ?Sized>(
    d: &D,
    sql: &mut String,
    criteria: &Criteria,
) -> Result<(), EncodeError> {
    sql.push_str(" FROM ");
    sql.push_str(&d.escape_collection(&criteria.collection));
    push_joins(d, sql, criteria)
}

fn push_joins<D: Dialect + ?Sized>(
    d: &D,
    sql: &mut String,
    criteria: &Criteria,
) -> Result<(), EncodeError> {
    for join in &criteria.joins {
        sql.push(' ');
        sql.push_str(join.kind.keyword());
        sql.push(' ');
        sql.push_str(&d.escape_collection(&join.collection));
        sql.push_str(" ON ");
        sql.push_str(&predicate(d, &join.on)?);
    }
    Ok(())
}

fn push_where<D: Dialect + ?Sized>(
    d: &D,
    sql: &mut String,
    predicates: &[Predicate],
) -> Result<(), EncodeError> {
    if predicates.is_empty() {
        return Ok(());
    }
    sql.push_str(" WHERE ");
    sql.push_str(&junction(d, predicates, " AND ", "1 = 1")?);
    Ok(())
}

fn push_order<D: Dialect + ?Sized>(d: &D, sql: &mut String, criteria: &Criteria) {
    if criteria.order.is_empty() {
        return;
    }
    let parts: Vec<String> = criteria
        .order
        .iter()
        .map(|order| {
            let direction = match order.direction {
                crate::model::OrderDirection::Asc => "ASC",
                crate::model::OrderDirection::Desc => "DESC",
            };
            format!("{} {direction}", d.escape_field(&order.field))
        })
        .collect();
    sql.push_str(" ORDER BY ");
    sql.push_str(&parts.join(", "));
}

fn push_limit<D: Dialect + ?Sized>(d: &D, sql: &mut String, criteria: &Criteria) {
    if let Some(tail) = d.render_limit(criteria.limit, criteria.offset) {
        sql.push(' ');
        sql.push_str(&tail);
    }
}
