//! Model traits.
//!
//! A model is a serde-decodable struct mapped onto one table. The seeding
//! engine builds rows as JSON records and decodes them through serde, so every
//! model must round-trip through [`Record`](crate::Record).

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt;
use uuid::Uuid;

use crate::error::{DatabaseError, DatabaseResult};
use crate::record::RecordId;

/// How a table obtains primary keys for rows inserted without one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyKind {
	/// Sequential integers assigned by the backend.
	AutoIncrement,
	/// Random UUIDs assigned by the backend.
	Uuid,
	/// The caller must always supply the key.
	Manual,
}

/// Primary key types usable by [`Model`].
pub trait PrimaryKey: Clone + fmt::Debug + PartialEq + Send + Sync + 'static {
	/// Key generation strategy for tables keyed by this type.
	const KIND: KeyKind;

	/// Converts the key to its backend representation.
	fn to_record_id(&self) -> RecordId;

	/// Converts a backend key back to this type.
	fn from_record_id(id: &RecordId) -> Option<Self>;
}

impl PrimaryKey for i64 {
	const KIND: KeyKind = KeyKind::AutoIncrement;

	fn to_record_id(&self) -> RecordId {
		RecordId::Int(*self)
	}

	fn from_record_id(id: &RecordId) -> Option<Self> {
		match id {
			RecordId::Int(id) => Some(*id),
			_ => None,
		}
	}
}

impl PrimaryKey for Uuid {
	const KIND: KeyKind = KeyKind::Uuid;

	fn to_record_id(&self) -> RecordId {
		RecordId::Uuid(*self)
	}

	fn from_record_id(id: &RecordId) -> Option<Self> {
		match id {
			RecordId::Uuid(id) => Some(*id),
			RecordId::Text(text) => Uuid::parse_str(text).ok(),
			RecordId::Int(_) => None,
		}
	}
}

impl PrimaryKey for String {
	const KIND: KeyKind = KeyKind::Manual;

	fn to_record_id(&self) -> RecordId {
		RecordId::Text(self.clone())
	}

	fn from_record_id(id: &RecordId) -> Option<Self> {
		Some(id.to_string())
	}
}

/// Static description of the table a model lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TableRef {
	/// Table name.
	pub name: &'static str,
	/// Primary key column.
	pub primary_key: &'static str,
	/// How missing keys are generated.
	pub key_kind: KeyKind,
}

/// A typed row schema in the backing store.
///
/// # Examples
///
/// ```
/// use seedbed_db::Model;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, Clone, Serialize, Deserialize)]
/// struct User {
///     id: Option<i64>,
///     username: String,
/// }
///
/// impl Model for User {
///     type PrimaryKey = i64;
///     fn table_name() -> &'static str { "users" }
///     fn primary_key(&self) -> Option<&i64> { self.id.as_ref() }
///     fn set_primary_key(&mut self, value: i64) { self.id = Some(value); }
/// }
///
/// assert_eq!(User::table().name, "users");
/// assert_eq!(User::table().primary_key, "id");
/// ```
pub trait Model: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
	/// Primary key type.
	type PrimaryKey: PrimaryKey;

	/// Table name.
	fn table_name() -> &'static str;

	/// Primary key column name.
	fn primary_key_field() -> &'static str {
		"id"
	}

	/// Returns the primary key, if the instance has one.
	fn primary_key(&self) -> Option<&Self::PrimaryKey>;

	/// Sets the primary key.
	fn set_primary_key(&mut self, value: Self::PrimaryKey);

	/// Returns the table description used by queries and writes.
	fn table() -> TableRef {
		TableRef {
			name: Self::table_name(),
			primary_key: Self::primary_key_field(),
			key_kind: <Self::PrimaryKey as PrimaryKey>::KIND,
		}
	}

	/// Returns the primary key or fails if the instance was never persisted.
	fn require_primary_key(&self) -> DatabaseResult<&Self::PrimaryKey> {
		self.primary_key()
			.ok_or_else(|| DatabaseError::MissingPrimaryKey(Self::table_name().to_string()))
	}
}
