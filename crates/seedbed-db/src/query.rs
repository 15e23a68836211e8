//! Query descriptions.
//!
//! A [`Query`] is an owned description of "rows of one table matching some
//! filters". It holds no connection, so seed units can keep caller-supplied
//! queries around and run them later against whatever database they are
//! prepared on.

use serde_json::Value;
use std::cmp::Ordering;

use crate::model::{Model, TableRef};
use crate::record::Record;

/// Comparison operator of a [`Filter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
	/// `field = value`
	Eq,
	/// `field <> value`
	Ne,
	/// `field > value`
	Gt,
	/// `field >= value`
	Gte,
	/// `field < value`
	Lt,
	/// `field <= value`
	Lte,
	/// `field IN (values...)`; the filter value is a JSON array.
	In,
	/// `field IS NULL`
	IsNull,
	/// `field IS NOT NULL`
	IsNotNull,
}

/// A single column predicate.
///
/// # Examples
///
/// ```
/// use seedbed_db::Filter;
/// use serde_json::json;
///
/// let adults = Filter::gte("age", 18);
/// let record = json!({"age": 21});
/// assert!(adults.matches(record.as_object().unwrap()));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
	/// Column name.
	pub field: String,
	/// Operator.
	pub op: FilterOp,
	/// Right-hand operand (ignored by the null checks).
	pub value: Value,
}

impl Filter {
	fn new(field: impl Into<String>, op: FilterOp, value: Value) -> Self {
		Self {
			field: field.into(),
			op,
			value,
		}
	}

	/// `field = value`
	pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
		Self::new(field, FilterOp::Eq, value.into())
	}

	/// `field <> value`
	pub fn ne(field: impl Into<String>, value: impl Into<Value>) -> Self {
		Self::new(field, FilterOp::Ne, value.into())
	}

	/// `field > value`
	pub fn gt(field: impl Into<String>, value: impl Into<Value>) -> Self {
		Self::new(field, FilterOp::Gt, value.into())
	}

	/// `field >= value`
	pub fn gte(field: impl Into<String>, value: impl Into<Value>) -> Self {
		Self::new(field, FilterOp::Gte, value.into())
	}

	/// `field < value`
	pub fn lt(field: impl Into<String>, value: impl Into<Value>) -> Self {
		Self::new(field, FilterOp::Lt, value.into())
	}

	/// `field <= value`
	pub fn lte(field: impl Into<String>, value: impl Into<Value>) -> Self {
		Self::new(field, FilterOp::Lte, value.into())
	}

	/// `field IN (values...)`
	pub fn is_in<I, V>(field: impl Into<String>, values: I) -> Self
	where
		I: IntoIterator<Item = V>,
		V: Into<Value>,
	{
		let values = values.into_iter().map(Into::into).collect();
		Self::new(field, FilterOp::In, Value::Array(values))
	}

	/// `field IS NULL` (a missing column counts as null)
	pub fn is_null(field: impl Into<String>) -> Self {
		Self::new(field, FilterOp::IsNull, Value::Null)
	}

	/// `field IS NOT NULL`
	pub fn is_not_null(field: impl Into<String>) -> Self {
		Self::new(field, FilterOp::IsNotNull, Value::Null)
	}

	/// Evaluates the predicate against a record.
	///
	/// Comparisons between values of different JSON types never match.
	pub fn matches(&self, record: &Record) -> bool {
		let actual = record.get(&self.field).unwrap_or(&Value::Null);
		match self.op {
			FilterOp::IsNull => actual.is_null(),
			FilterOp::IsNotNull => !actual.is_null(),
			FilterOp::Eq => compare(actual, &self.value) == Some(Ordering::Equal),
			FilterOp::Ne => {
				!actual.is_null() && compare(actual, &self.value) != Some(Ordering::Equal)
			}
			FilterOp::Gt => compare(actual, &self.value) == Some(Ordering::Greater),
			FilterOp::Gte => matches!(
				compare(actual, &self.value),
				Some(Ordering::Greater | Ordering::Equal)
			),
			FilterOp::Lt => compare(actual, &self.value) == Some(Ordering::Less),
			FilterOp::Lte => matches!(
				compare(actual, &self.value),
				Some(Ordering::Less | Ordering::Equal)
			),
			FilterOp::In => self.value.as_array().is_some_and(|candidates| {
				candidates
					.iter()
					.any(|candidate| compare(actual, candidate) == Some(Ordering::Equal))
			}),
		}
	}
}

fn compare(left: &Value, right: &Value) -> Option<Ordering> {
	match (left, right) {
		(Value::Number(l), Value::Number(r)) => match (l.as_i64(), r.as_i64()) {
			(Some(l), Some(r)) => Some(l.cmp(&r)),
			_ => l.as_f64()?.partial_cmp(&r.as_f64()?),
		},
		(Value::String(l), Value::String(r)) => Some(l.cmp(r)),
		(Value::Bool(l), Value::Bool(r)) => Some(l.cmp(r)),
		(Value::Null, _) | (_, Value::Null) => None,
		(l, r) if l == r => Some(Ordering::Equal),
		_ => None,
	}
}

/// Rows of one table matching every filter.
///
/// # Examples
///
/// ```
/// use seedbed_db::{Filter, KeyKind, Query, TableRef};
///
/// let table = TableRef { name: "students", primary_key: "id", key_kind: KeyKind::AutoIncrement };
/// let query = Query::table(table)
///     .filter(Filter::eq("year", 2))
///     .limit(10);
/// assert_eq!(query.filters().len(), 1);
/// assert_eq!(query.get_limit(), Some(10));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
	table: TableRef,
	filters: Vec<Filter>,
	limit: Option<usize>,
}

impl Query {
	/// All rows of a table.
	pub fn table(table: TableRef) -> Self {
		Self {
			table,
			filters: Vec::new(),
			limit: None,
		}
	}

	/// All rows of a model's table.
	pub fn of<M: Model>() -> Self {
		Self::table(M::table())
	}

	/// Adds a filter; filters are combined with AND.
	pub fn filter(mut self, filter: Filter) -> Self {
		self.filters.push(filter);
		self
	}

	/// Caps the number of rows returned by a full fetch.
	pub fn limit(mut self, limit: usize) -> Self {
		self.limit = Some(limit);
		self
	}

	/// Target table.
	pub fn table_ref(&self) -> &TableRef {
		&self.table
	}

	/// Filters in declaration order.
	pub fn filters(&self) -> &[Filter] {
		&self.filters
	}

	/// Row cap, if any.
	pub fn get_limit(&self) -> Option<usize> {
		self.limit
	}

	/// Returns true when the record passes every filter.
	pub fn matches(&self, record: &Record) -> bool {
		self.filters.iter().all(|filter| filter.matches(record))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::KeyKind;
	use rstest::rstest;
	use serde_json::json;

	fn record(value: Value) -> Record {
		value.as_object().cloned().unwrap()
	}

	#[rstest]
	#[case(Filter::eq("age", 30), true)]
	#[case(Filter::eq("age", 30.0), true)]
	#[case(Filter::ne("age", 30), false)]
	#[case(Filter::gt("age", 29), true)]
	#[case(Filter::gte("age", 30), true)]
	#[case(Filter::lt("age", 30), false)]
	#[case(Filter::lte("age", 30), true)]
	#[case(Filter::is_in("age", [10, 30]), true)]
	#[case(Filter::is_in("age", [10, 20]), false)]
	#[case(Filter::eq("age", "30"), false)]
	fn test_numeric_filters(#[case] filter: Filter, #[case] expected: bool) {
		let row = record(json!({"age": 30}));
		assert_eq!(filter.matches(&row), expected);
	}

	#[rstest]
	fn test_null_filters_treat_missing_as_null() {
		let row = record(json!({"parent_id": null}));
		assert!(Filter::is_null("parent_id").matches(&row));
		assert!(Filter::is_null("other").matches(&row));
		assert!(!Filter::is_not_null("parent_id").matches(&row));
		assert!(!Filter::eq("parent_id", 1).matches(&row));
		assert!(!Filter::ne("parent_id", 1).matches(&row));
	}

	#[rstest]
	fn test_query_combines_filters_with_and() {
		let table = TableRef {
			name: "people",
			primary_key: "id",
			key_kind: KeyKind::AutoIncrement,
		};
		let query = Query::table(table)
			.filter(Filter::eq("name", "ada"))
			.filter(Filter::gt("age", 18));

		assert!(query.matches(&record(json!({"name": "ada", "age": 36}))));
		assert!(!query.matches(&record(json!({"name": "ada", "age": 12}))));
		assert!(!query.matches(&record(json!({"name": "bob", "age": 36}))));
	}
}
