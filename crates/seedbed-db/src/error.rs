//! Error types for database operations.

use thiserror::Error;

use crate::record::RecordId;

/// Errors raised by a [`Database`](crate::Database) implementation.
#[derive(Debug, Error)]
pub enum DatabaseError {
	/// A row with the same primary key already exists.
	#[error("Duplicate primary key: {table}#{id}")]
	DuplicateKey {
		/// Table the insert targeted.
		table: String,
		/// Conflicting primary key.
		id: RecordId,
	},

	/// The row has no primary key and the table cannot generate one.
	#[error("Missing primary key for table: {0}")]
	MissingPrimaryKey(String),

	/// The row does not have the shape the table expects.
	#[error("Invalid record for table {table}: {message}")]
	InvalidRecord {
		/// Table the record was written to.
		table: String,
		/// What was wrong with the record.
		message: String,
	},

	/// A stored row could not be decoded into its model type.
	#[error("Failed to decode row from {table}: {source}")]
	Decode {
		/// Table the row came from.
		table: String,
		/// Underlying serde error.
		source: serde_json::Error,
	},

	/// JSON serialization/deserialization error.
	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),

	/// Failure reported by the storage backend itself.
	#[error("Backend error: {0}")]
	Backend(String),
}

/// Result type alias for database operations.
pub type DatabaseResult<T> = Result<T, DatabaseError>;
