//! The database capability consumed by the seeding engine.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{DatabaseError, DatabaseResult};
use crate::model::{Model, PrimaryKey, TableRef};
use crate::query::Query;
use crate::record::{Record, RecordId};

/// Storage operations the seeding engine relies on.
///
/// Implementations own transaction and connection semantics; callers add no
/// locking of their own.
#[async_trait]
pub trait Database: Send + Sync {
	/// Returns every row matching the query.
	async fn fetch_all(&self, query: &Query) -> DatabaseResult<Vec<Record>>;

	/// Returns up to `count` distinct rows matching the query, chosen at random.
	///
	/// When fewer rows match, all of them are returned.
	async fn random_slice(&self, query: &Query, count: usize) -> DatabaseResult<Vec<Record>>;

	/// Looks up a row by primary key.
	async fn find(&self, table: &TableRef, id: &RecordId) -> DatabaseResult<Option<Record>>;

	/// Inserts a row, assigning a primary key when the record has none.
	///
	/// Returns the row as stored.
	async fn create(&self, table: &TableRef, record: Record) -> DatabaseResult<Record>;

	/// Writes a row that carries its primary key, replacing any stored version.
	async fn save(&self, table: &TableRef, record: Record) -> DatabaseResult<Record>;

	/// Counts rows matching the query.
	async fn count(&self, query: &Query) -> DatabaseResult<usize> {
		Ok(self.fetch_all(query).await?.len())
	}

	/// Returns one random row matching the query.
	async fn random(&self, query: &Query) -> DatabaseResult<Option<Record>> {
		Ok(self.random_slice(query, 1).await?.pop())
	}
}

/// Serializes a model into a record.
pub fn encode_model<M: Model>(model: &M) -> DatabaseResult<Record> {
	match serde_json::to_value(model)? {
		Value::Object(record) => Ok(record),
		other => Err(DatabaseError::InvalidRecord {
			table: M::table_name().to_string(),
			message: format!("model serialized to {} instead of an object", other),
		}),
	}
}

/// Deserializes a record into a model.
pub fn decode_record<M: Model>(record: Record) -> DatabaseResult<M> {
	serde_json::from_value(Value::Object(record)).map_err(|source| DatabaseError::Decode {
		table: M::table_name().to_string(),
		source,
	})
}

/// Typed helpers over [`Database`].
///
/// # Examples
///
/// ```ignore
/// let saved: User = db.create_model(&user).await?;
/// let again = db.find_model::<User>(saved.primary_key().unwrap()).await?;
/// ```
#[async_trait]
pub trait DatabaseExt: Database {
	/// Finds a model by primary key.
	async fn find_model<M: Model>(&self, id: &M::PrimaryKey) -> DatabaseResult<Option<M>>;

	/// Inserts a model and returns it as stored.
	async fn create_model<M: Model>(&self, model: &M) -> DatabaseResult<M>;

	/// Saves a model that already has a primary key.
	async fn save_model<M: Model>(&self, model: &M) -> DatabaseResult<M>;

	/// Fetches every model matching the query.
	async fn all_models<M: Model>(&self, query: &Query) -> DatabaseResult<Vec<M>>;

	/// Fetches one random model matching the query.
	async fn random_model<M: Model>(&self, query: &Query) -> DatabaseResult<Option<M>>;
}

#[async_trait]
impl<D: Database + ?Sized> DatabaseExt for D {
	async fn find_model<M: Model>(&self, id: &M::PrimaryKey) -> DatabaseResult<Option<M>> {
		self.find(&M::table(), &id.to_record_id())
			.await?
			.map(decode_record::<M>)
			.transpose()
	}

	async fn create_model<M: Model>(&self, model: &M) -> DatabaseResult<M> {
		let record = encode_model(model)?;
		decode_record(self.create(&M::table(), record).await?)
	}

	async fn save_model<M: Model>(&self, model: &M) -> DatabaseResult<M> {
		model.require_primary_key()?;
		let record = encode_model(model)?;
		decode_record(self.save(&M::table(), record).await?)
	}

	async fn all_models<M: Model>(&self, query: &Query) -> DatabaseResult<Vec<M>> {
		self.fetch_all(query)
			.await?
			.into_iter()
			.map(decode_record::<M>)
			.collect()
	}

	async fn random_model<M: Model>(&self, query: &Query) -> DatabaseResult<Option<M>> {
		self.random(query).await?.map(decode_record::<M>).transpose()
	}
}
