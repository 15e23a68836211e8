//! In-memory database backend.
//!
//! Stores every table as an ordered map from primary key to record behind a
//! single `RwLock`. Used by tests and by callers that want to seed without a
//! real driver.

use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use uuid::Uuid;

use crate::database::Database;
use crate::error::{DatabaseError, DatabaseResult};
use crate::model::{KeyKind, TableRef};
use crate::query::Query;
use crate::record::{Record, RecordId};

#[derive(Debug, Default)]
struct TableData {
	rows: BTreeMap<RecordId, Record>,
	next_id: i64,
}

impl TableData {
	fn assign_key(&mut self, table: &TableRef) -> DatabaseResult<RecordId> {
		match table.key_kind {
			KeyKind::AutoIncrement => {
				self.next_id = self.next_id.max(1);
				let id = self.next_id;
				self.next_id += 1;
				Ok(RecordId::Int(id))
			}
			KeyKind::Uuid => Ok(RecordId::Uuid(Uuid::new_v4())),
			KeyKind::Manual => Err(DatabaseError::MissingPrimaryKey(table.name.to_string())),
		}
	}

	fn observe_key(&mut self, id: &RecordId) {
		if let RecordId::Int(id) = id {
			self.next_id = self.next_id.max(id + 1);
		}
	}
}

/// Counters of operations served by a [`MemoryDatabase`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OperationStats {
	/// Rows inserted through `create`.
	pub creates: usize,
	/// Rows written through `save`.
	pub saves: usize,
	/// Read operations (fetch, sample, find, count).
	pub reads: usize,
}

impl OperationStats {
	/// Total number of write operations.
	pub fn writes(&self) -> usize {
		self.creates + self.saves
	}
}

#[derive(Debug, Default)]
struct Counters {
	creates: AtomicUsize,
	saves: AtomicUsize,
	reads: AtomicUsize,
}

/// Database backend that keeps every table in process memory.
///
/// # Examples
///
/// ```
/// use seedbed_db::{Database, KeyKind, MemoryDatabase, Query, TableRef};
/// use serde_json::json;
///
/// # tokio_test::block_on(async {
/// let db = MemoryDatabase::new();
/// let users = TableRef { name: "users", primary_key: "id", key_kind: KeyKind::AutoIncrement };
///
/// let row = json!({"id": null, "name": "ada"}).as_object().cloned().unwrap();
/// let stored = db.create(&users, row).await.unwrap();
/// assert_eq!(stored["id"], json!(1));
/// assert_eq!(db.count(&Query::table(users)).await.unwrap(), 1);
/// # });
/// ```
#[derive(Debug)]
pub struct MemoryDatabase {
	tables: RwLock<HashMap<&'static str, TableData>>,
	rng: Mutex<StdRng>,
	counters: Counters,
	failing_tables: RwLock<HashSet<String>>,
}

impl MemoryDatabase {
	/// Creates an empty database sampling from OS entropy.
	pub fn new() -> Self {
		Self::with_rng(StdRng::from_entropy())
	}

	/// Creates an empty database whose random sampling is reproducible.
	pub fn with_seed(seed: u64) -> Self {
		Self::with_rng(StdRng::seed_from_u64(seed))
	}

	fn with_rng(rng: StdRng) -> Self {
		Self {
			tables: RwLock::new(HashMap::new()),
			rng: Mutex::new(rng),
			counters: Counters::default(),
			failing_tables: RwLock::new(HashSet::new()),
		}
	}

	/// Makes every subsequent write to `table` fail with a backend error.
	///
	/// Lets callers exercise failure propagation without a real driver.
	pub fn fail_writes_to(&self, table: impl Into<String>) {
		self.failing_tables.write().insert(table.into());
	}

	/// Number of rows currently stored in `table`.
	pub fn row_count(&self, table: &str) -> usize {
		self.tables
			.read()
			.get(table)
			.map_or(0, |data| data.rows.len())
	}

	/// Names of tables that have received at least one row.
	pub fn table_names(&self) -> Vec<&'static str> {
		let mut names: Vec<_> = self.tables.read().keys().copied().collect();
		names.sort_unstable();
		names
	}

	/// Drops every table.
	pub fn clear(&self) {
		self.tables.write().clear();
	}

	/// Snapshot of the operation counters.
	pub fn stats(&self) -> OperationStats {
		OperationStats {
			creates: self.counters.creates.load(Ordering::Relaxed),
			saves: self.counters.saves.load(Ordering::Relaxed),
			reads: self.counters.reads.load(Ordering::Relaxed),
		}
	}

	fn check_writable(&self, table: &TableRef) -> DatabaseResult<()> {
		if self.failing_tables.read().contains(table.name) {
			return Err(DatabaseError::Backend(format!(
				"writes to table `{}` are disabled",
				table.name
			)));
		}
		Ok(())
	}

	fn matching(&self, query: &Query) -> Vec<Record> {
		self.counters.reads.fetch_add(1, Ordering::Relaxed);
		let tables = self.tables.read();
		let Some(data) = tables.get(query.table_ref().name) else {
			return Vec::new();
		};
		data.rows
			.values()
			.filter(|record| query.matches(record))
			.cloned()
			.collect()
	}
}

impl Default for MemoryDatabase {
	fn default() -> Self {
		Self::new()
	}
}

#[async_trait]
impl Database for MemoryDatabase {
	async fn fetch_all(&self, query: &Query) -> DatabaseResult<Vec<Record>> {
		let mut rows = self.matching(query);
		if let Some(limit) = query.get_limit() {
			rows.truncate(limit);
		}
		Ok(rows)
	}

	async fn random_slice(&self, query: &Query, count: usize) -> DatabaseResult<Vec<Record>> {
		let rows = self.matching(query);
		let mut rng = self.rng.lock();
		Ok(rows.choose_multiple(&mut *rng, count).cloned().collect())
	}

	async fn find(&self, table: &TableRef, id: &RecordId) -> DatabaseResult<Option<Record>> {
		self.counters.reads.fetch_add(1, Ordering::Relaxed);
		Ok(self
			.tables
			.read()
			.get(table.name)
			.and_then(|data| data.rows.get(id))
			.cloned())
	}

	async fn create(&self, table: &TableRef, mut record: Record) -> DatabaseResult<Record> {
		self.check_writable(table)?;
		let mut tables = self.tables.write();
		let data = tables.entry(table.name).or_default();

		let id = match record.get(table.primary_key) {
			None | Some(Value::Null) => data.assign_key(table)?,
			Some(value) => RecordId::for_table(table, value).ok_or_else(|| {
				DatabaseError::InvalidRecord {
					table: table.name.to_string(),
					message: format!("`{}` is not a valid primary key", value),
				}
			})?,
		};
		if data.rows.contains_key(&id) {
			return Err(DatabaseError::DuplicateKey {
				table: table.name.to_string(),
				id,
			});
		}

		data.observe_key(&id);
		record.insert(table.primary_key.to_string(), id.to_value());
		data.rows.insert(id.clone(), record.clone());
		self.counters.creates.fetch_add(1, Ordering::Relaxed);
		tracing::trace!(table = table.name, %id, "row created");
		Ok(record)
	}

	async fn save(&self, table: &TableRef, record: Record) -> DatabaseResult<Record> {
		self.check_writable(table)?;
		let id = RecordId::key_of(&record, table)
			.ok_or_else(|| DatabaseError::MissingPrimaryKey(table.name.to_string()))?;

		let mut tables = self.tables.write();
		let data = tables.entry(table.name).or_default();
		data.observe_key(&id);
		data.rows.insert(id.clone(), record.clone());
		self.counters.saves.fetch_add(1, Ordering::Relaxed);
		tracing::trace!(table = table.name, %id, "row saved");
		Ok(record)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::query::Filter;
	use rstest::rstest;
	use serde_json::json;

	const USERS: TableRef = TableRef {
		name: "users",
		primary_key: "id",
		key_kind: KeyKind::AutoIncrement,
	};

	const TAGS: TableRef = TableRef {
		name: "tags",
		primary_key: "slug",
		key_kind: KeyKind::Manual,
	};

	fn row(value: Value) -> Record {
		value.as_object().cloned().unwrap()
	}

	#[rstest]
	#[tokio::test]
	async fn test_auto_increment_continues_after_explicit_id() {
		let db = MemoryDatabase::new();
		db.create(&USERS, row(json!({"id": 10, "name": "a"})))
			.await
			.unwrap();
		let next = db.create(&USERS, row(json!({"name": "b"}))).await.unwrap();
		assert_eq!(next["id"], json!(11));
	}

	#[rstest]
	#[tokio::test]
	async fn test_duplicate_key_rejected() {
		let db = MemoryDatabase::new();
		db.create(&USERS, row(json!({"id": 1}))).await.unwrap();
		let result = db.create(&USERS, row(json!({"id": 1}))).await;
		assert!(matches!(result, Err(DatabaseError::DuplicateKey { .. })));
	}

	#[rstest]
	#[tokio::test]
	async fn test_manual_key_required() {
		let db = MemoryDatabase::new();
		let result = db.create(&TAGS, row(json!({"label": "x"}))).await;
		assert!(matches!(result, Err(DatabaseError::MissingPrimaryKey(_))));

		let stored = db
			.create(&TAGS, row(json!({"slug": "rust", "label": "Rust"})))
			.await
			.unwrap();
		assert_eq!(stored["slug"], json!("rust"));
	}

	#[rstest]
	#[tokio::test]
	async fn test_uuid_shaped_manual_key_is_found_as_text() {
		let db = MemoryDatabase::new();
		let slug = "550e8400-e29b-41d4-a716-446655440000";
		db.create(&TAGS, row(json!({"slug": slug}))).await.unwrap();

		let found = db.find(&TAGS, &RecordId::from(slug)).await.unwrap();
		assert!(found.is_some());
		let again = db.create(&TAGS, row(json!({"slug": slug}))).await;
		assert!(matches!(again, Err(DatabaseError::DuplicateKey { .. })));
	}

	#[rstest]
	#[tokio::test]
	async fn test_random_slice_is_distinct_and_bounded() {
		let db = MemoryDatabase::with_seed(7);
		for _ in 0..5 {
			db.create(&USERS, row(json!({}))).await.unwrap();
		}

		let slice = db.random_slice(&Query::table(USERS), 3).await.unwrap();
		let ids: HashSet<_> = slice.iter().map(|r| r["id"].to_string()).collect();
		assert_eq!(ids.len(), 3);

		let all = db.random_slice(&Query::table(USERS), 50).await.unwrap();
		assert_eq!(all.len(), 5);
	}

	#[rstest]
	#[tokio::test]
	async fn test_random_on_empty_table_is_none() {
		let db = MemoryDatabase::new();
		assert!(db.random(&Query::table(USERS)).await.unwrap().is_none());
	}

	#[rstest]
	#[tokio::test]
	async fn test_save_replaces_row() {
		let db = MemoryDatabase::new();
		let mut stored = db
			.create(&USERS, row(json!({"name": "old"})))
			.await
			.unwrap();
		stored.insert("name".to_string(), json!("new"));
		db.save(&USERS, stored).await.unwrap();

		let found = db.find(&USERS, &RecordId::Int(1)).await.unwrap().unwrap();
		assert_eq!(found["name"], json!("new"));
		assert_eq!(db.row_count("users"), 1);
		assert_eq!(db.stats().writes(), 2);
	}

	#[rstest]
	#[tokio::test]
	async fn test_filtered_fetch_with_limit() {
		let db = MemoryDatabase::new();
		for age in [10, 20, 30, 40] {
			db.create(&USERS, row(json!({"age": age}))).await.unwrap();
		}
		let query = Query::table(USERS).filter(Filter::gte("age", 20)).limit(2);
		let rows = db.fetch_all(&query).await.unwrap();
		assert_eq!(rows.len(), 2);
		assert_eq!(rows[0]["age"], json!(20));
		assert_eq!(db.count(&Query::table(USERS)).await.unwrap(), 4);
	}

	#[rstest]
	#[tokio::test]
	async fn test_failing_table_rejects_writes() {
		let db = MemoryDatabase::new();
		db.fail_writes_to("users");
		let result = db.create(&USERS, row(json!({}))).await;
		assert!(matches!(result, Err(DatabaseError::Backend(_))));
		assert_eq!(db.row_count("users"), 0);
	}
}
