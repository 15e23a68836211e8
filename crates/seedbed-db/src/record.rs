//! Row representation shared by every backend.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use uuid::Uuid;

use crate::model::{KeyKind, TableRef};

/// A row as stored by the database: column name to JSON value.
pub type Record = Map<String, Value>;

/// Primary key of a persisted row.
///
/// # Examples
///
/// ```
/// use seedbed_db::RecordId;
/// use serde_json::json;
///
/// assert_eq!(RecordId::from_value(&json!(42)), Some(RecordId::Int(42)));
/// assert_eq!(RecordId::from_value(&json!("alice")), Some(RecordId::Text("alice".into())));
/// assert_eq!(RecordId::from_value(&json!(null)), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
	/// Integer key (auto-increment tables).
	Int(i64),
	/// UUID key.
	Uuid(Uuid),
	/// Caller-assigned text key.
	Text(String),
}

impl RecordId {
	/// Reads a primary key out of a JSON value.
	///
	/// Strings that parse as UUIDs become [`RecordId::Uuid`]. Returns `None`
	/// for null and for values that cannot be keys (floats, arrays, objects).
	pub fn from_value(value: &Value) -> Option<Self> {
		match value {
			Value::Number(n) => n.as_i64().map(Self::Int),
			Value::String(s) => Some(
				Uuid::parse_str(s)
					.map(Self::Uuid)
					.unwrap_or_else(|_| Self::Text(s.clone())),
			),
			_ => None,
		}
	}

	/// Converts the key back into the JSON value stored in the row.
	pub fn to_value(&self) -> Value {
		match self {
			Self::Int(id) => Value::from(*id),
			Self::Uuid(id) => Value::String(id.to_string()),
			Self::Text(id) => Value::String(id.clone()),
		}
	}

	/// Reads a key of `table` out of a JSON value.
	///
	/// Unlike [`RecordId::from_value`] the variant follows the table's
	/// [`KeyKind`], so a UUID-shaped string stays [`RecordId::Text`] on a
	/// manually keyed table. Values of the wrong shape return `None`.
	pub fn for_table(table: &TableRef, value: &Value) -> Option<Self> {
		match (table.key_kind, value) {
			(KeyKind::AutoIncrement, Value::Number(n)) => n.as_i64().map(Self::Int),
			(KeyKind::Uuid, Value::String(s)) => Uuid::parse_str(s).ok().map(Self::Uuid),
			(KeyKind::Manual, Value::String(s)) => Some(Self::Text(s.clone())),
			_ => None,
		}
	}

	/// Reads the primary key column of a record.
	pub fn of(record: &Record, primary_key: &str) -> Option<Self> {
		record.get(primary_key).and_then(Self::from_value)
	}

	/// Reads the primary key of a row of `table`.
	pub fn key_of(record: &Record, table: &TableRef) -> Option<Self> {
		record
			.get(table.primary_key)
			.and_then(|value| Self::for_table(table, value))
	}
}

impl fmt::Display for RecordId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Int(id) => write!(f, "{}", id),
			Self::Uuid(id) => write!(f, "{}", id),
			Self::Text(id) => f.write_str(id),
		}
	}
}

impl From<i64> for RecordId {
	fn from(value: i64) -> Self {
		Self::Int(value)
	}
}

impl From<Uuid> for RecordId {
	fn from(value: Uuid) -> Self {
		Self::Uuid(value)
	}
}

impl From<String> for RecordId {
	fn from(value: String) -> Self {
		Self::Text(value)
	}
}

impl From<&str> for RecordId {
	fn from(value: &str) -> Self {
		Self::Text(value.to_string())
	}
}
