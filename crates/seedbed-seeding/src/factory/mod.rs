//! Random model factory.
//!
//! [`ModelFactory`] combines the schema of a model with the random generator
//! to build fully populated instances. Required parent references are filled
//! with the key of a random persisted row of the parent model.

mod ext;

pub use ext::ModelSeedExt;

use futures::stream::{self, StreamExt, TryStreamExt};
use seedbed_db::{Database, DatabaseExt, Model, PrimaryKey, Query, Record, RecordId};
use serde_json::Value;

use crate::config::FactoryConfig;
use crate::error::{SeedingError, SeedingResult};
use crate::random::{RandomEnum, RandomGenerator};
use crate::schema::{GenerationStrategy, Seedable, classify};

/// Builds and persists random model instances.
///
/// # Examples
///
/// ```ignore
/// let factory = ModelFactory::new(FactoryConfig::default().with_rng_seed(1))?;
/// factory.register_enum::<Status>()?;
///
/// let users: Vec<User> = factory.create_batch::<User>(10, &db).await?;
/// let admin = factory.find_or_create::<User>(1, &db).await?;
/// ```
#[derive(Debug)]
pub struct ModelFactory {
	config: FactoryConfig,
	generator: RandomGenerator,
}

impl ModelFactory {
	/// Creates a factory from an explicit configuration.
	///
	/// The configuration is validated first; empty value ranges are rejected
	/// with [`SeedingError::Config`].
	pub fn new(config: FactoryConfig) -> SeedingResult<Self> {
		config.validate()?;
		Ok(Self::with_valid_config(config))
	}

	fn with_valid_config(config: FactoryConfig) -> Self {
		let generator = match config.rng_seed {
			Some(seed) => RandomGenerator::seeded(config.generator.clone(), seed),
			None => RandomGenerator::new(config.generator.clone()),
		};
		Self { config, generator }
	}

	/// Configuration in use.
	pub fn config(&self) -> &FactoryConfig {
		&self.config
	}

	/// The underlying value generator.
	pub fn generator(&self) -> &RandomGenerator {
		&self.generator
	}

	/// Registers the case set of an enum used by model fields.
	pub fn register_enum<E: RandomEnum>(&self) -> SeedingResult<&Self> {
		self.generator.register_enum::<E>()?;
		Ok(self)
	}

	/// Generates every column that needs no database access.
	///
	/// Skipped columns and unresolved parent references are explicit nulls.
	pub fn random_record<M: Seedable>(&self) -> SeedingResult<Record> {
		let schema = classify::<M>()?;
		let mut record = Record::new();
		for property in schema.properties() {
			let value = match property.strategy() {
				GenerationStrategy::Skip | GenerationStrategy::AsyncLookup(_) => Value::Null,
				GenerationStrategy::RandomOfType(ty) => self.generator.generate(&ty)?,
				GenerationStrategy::Fake(faker) => self.generator.fake(faker),
				GenerationStrategy::Custom(custom) => custom(&self.generator)?,
			};
			record.insert(property.name().to_string(), value);
		}
		Ok(record)
	}

	/// Fills required parent references of `record` from persisted rows.
	///
	/// Issues one random-row query per parent reference. Fails with
	/// [`SeedingError::OrderingViolation`] when a parent table is empty.
	pub async fn resolve_relationships<M: Seedable>(
		&self,
		record: &mut Record,
		db: &dyn Database,
	) -> SeedingResult<()> {
		let schema = classify::<M>()?;
		for property in schema.properties() {
			let GenerationStrategy::AsyncLookup(target) = property.strategy() else {
				continue;
			};
			let table = target.table();
			let parent = db
				.random(&Query::table(table))
				.await?
				.ok_or_else(|| SeedingError::ordering(M::table_name(), target.name()))?;
			let key = RecordId::key_of(&parent, &table)
				.ok_or_else(|| seedbed_db::DatabaseError::MissingPrimaryKey(table.name.to_string()))?;
			record.insert(property.name().to_string(), key.to_value());
		}
		Ok(())
	}

	/// Builds a random, unpersisted instance with parents resolved.
	pub async fn randomized<M: Seedable>(&self, db: &dyn Database) -> SeedingResult<M> {
		self.initialize_model::<M>(None, db).await
	}

	/// Builds a random, unpersisted instance with parents resolved and the
	/// given primary key, if any.
	pub async fn initialize_model<M: Seedable>(
		&self,
		id: Option<&M::PrimaryKey>,
		db: &dyn Database,
	) -> SeedingResult<M> {
		let mut record = self.random_record::<M>()?;
		self.resolve_relationships::<M>(&mut record, db).await?;
		if let Some(id) = id {
			record.insert(
				M::primary_key_field().to_string(),
				id.to_record_id().to_value(),
			);
		}
		decode::<M>(record)
	}

	/// Creates and persists one random instance.
	///
	/// `id` overrides the primary key before the row is written.
	pub async fn create<M: Seedable>(
		&self,
		id: Option<M::PrimaryKey>,
		db: &dyn Database,
	) -> SeedingResult<M> {
		let model = self.initialize_model::<M>(id.as_ref(), db).await?;
		let stored = db.create_model(&model).await?;
		tracing::debug!(
			model = M::table_name(),
			id = ?stored.primary_key(),
			"random row created"
		);
		Ok(stored)
	}

	/// Creates `count` instances and returns them in creation order.
	///
	/// Up to `batch_concurrency` creations run at once. `count == 0` performs
	/// no writes.
	pub async fn create_batch<M: Seedable>(
		&self,
		count: usize,
		db: &dyn Database,
	) -> SeedingResult<Vec<M>> {
		if count == 0 {
			return Ok(Vec::new());
		}
		let concurrency = self.config.batch_concurrency.max(1);
		stream::iter(0..count)
			.map(|_| self.create::<M>(None, db))
			.buffered(concurrency)
			.try_collect()
			.await
	}

	/// Returns the row with primary key `id`, creating a random one with that
	/// key when absent.
	pub async fn find_or_create<M: Seedable>(
		&self,
		id: M::PrimaryKey,
		db: &dyn Database,
	) -> SeedingResult<M> {
		if let Some(existing) = db.find_model::<M>(&id).await? {
			tracing::debug!(model = M::table_name(), id = ?id, "row already present");
			return Ok(existing);
		}
		self.create::<M>(Some(id), db).await
	}

	/// [`ModelFactory::find_or_create`] for every key, in order.
	pub async fn find_or_create_batch<M, I>(&self, ids: I, db: &dyn Database) -> SeedingResult<Vec<M>>
	where
		M: Seedable,
		I: IntoIterator<Item = M::PrimaryKey> + Send,
		I::IntoIter: Send,
	{
		let mut models = Vec::new();
		for id in ids {
			models.push(self.find_or_create::<M>(id, db).await?);
		}
		Ok(models)
	}
}

impl Default for ModelFactory {
	fn default() -> Self {
		Self::with_valid_config(FactoryConfig::default())
	}
}

fn decode<M: Model>(record: Record) -> SeedingResult<M> {
	serde_json::from_value(Value::Object(record)).map_err(|source| SeedingError::Decode {
		model: M::table_name().to_string(),
		source,
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::random::{FakerType, ScalarType};
	use crate::schema::SchemaBuilder;
	use rstest::*;
	use seedbed_db::MemoryDatabase;
	use serde::{Deserialize, Serialize};

	#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
	struct Author {
		id: Option<i64>,
		name: String,
		bio: Option<String>,
	}

	impl Model for Author {
		type PrimaryKey = i64;

		fn table_name() -> &'static str {
			"factory_authors"
		}

		fn primary_key(&self) -> Option<&i64> {
			self.id.as_ref()
		}

		fn set_primary_key(&mut self, value: i64) {
			self.id = Some(value);
		}
	}

	impl Seedable for Author {
		fn describe(schema: SchemaBuilder) -> SchemaBuilder {
			schema
				.id()
				.faker("name", FakerType::Name)
				.optional_field("bio", ScalarType::String)
		}
	}

	#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
	struct Book {
		id: Option<i64>,
		title: String,
		author_id: i64,
	}

	impl Model for Book {
		type PrimaryKey = i64;

		fn table_name() -> &'static str {
			"factory_books"
		}

		fn primary_key(&self) -> Option<&i64> {
			self.id.as_ref()
		}

		fn set_primary_key(&mut self, value: i64) {
			self.id = Some(value);
		}
	}

	impl Seedable for Book {
		fn describe(schema: SchemaBuilder) -> SchemaBuilder {
			schema
				.id()
				.field("title", ScalarType::String)
				.parent::<Author>("author_id")
		}
	}

	#[fixture]
	fn factory() -> ModelFactory {
		ModelFactory::new(FactoryConfig::default().with_rng_seed(3)).unwrap()
	}

	#[rstest]
	fn test_random_record_nulls_skipped_columns(factory: ModelFactory) {
		let record = factory.random_record::<Author>().unwrap();
		assert_eq!(record["id"], Value::Null);
		assert_eq!(record["bio"], Value::Null);
		assert!(record["name"].is_string());
	}

	#[rstest]
	#[tokio::test]
	async fn test_child_without_parent_is_ordering_violation(factory: ModelFactory) {
		let db = MemoryDatabase::new();
		let result = factory.create::<Book>(None, &db).await;
		match result {
			Err(SeedingError::OrderingViolation { model, dependency }) => {
				assert_eq!(model, "factory_books");
				assert_eq!(dependency, "factory_authors");
			}
			other => panic!("expected ordering violation, got {:?}", other),
		}
		assert_eq!(db.stats().writes(), 0);
	}

	#[rstest]
	#[tokio::test]
	async fn test_parent_reference_resolves_to_persisted_row(factory: ModelFactory) {
		let db = MemoryDatabase::new();
		let authors = factory.create_batch::<Author>(3, &db).await.unwrap();
		let ids: Vec<i64> = authors.iter().filter_map(|a| a.id).collect();

		let book = factory.create::<Book>(None, &db).await.unwrap();
		assert!(ids.contains(&book.author_id));
	}

	#[rstest]
	#[tokio::test]
	async fn test_explicit_id_is_kept(factory: ModelFactory) {
		let db = MemoryDatabase::new();
		let author = factory.create::<Author>(Some(42), &db).await.unwrap();
		assert_eq!(author.id, Some(42));
	}

	#[rstest]
	#[tokio::test]
	async fn test_randomized_does_not_write(factory: ModelFactory) {
		let db = MemoryDatabase::new();
		let author = factory.randomized::<Author>(&db).await.unwrap();
		assert_eq!(author.id, None);
		assert_eq!(db.stats().writes(), 0);
	}

	#[rstest]
	#[case(1)]
	#[case(4)]
	#[tokio::test]
	async fn test_batch_preserves_creation_order(#[case] concurrency: usize) {
		let factory =
			ModelFactory::new(FactoryConfig::default().with_batch_concurrency(concurrency)).unwrap();
		let db = MemoryDatabase::new();
		let authors = factory.create_batch::<Author>(6, &db).await.unwrap();
		let ids: Vec<i64> = authors.iter().filter_map(|a| a.id).collect();
		assert_eq!(ids.len(), 6);
		if concurrency == 1 {
			assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
		}
	}

	#[rstest]
	#[tokio::test]
	async fn test_find_or_create_batch_mixes_existing_and_new(factory: ModelFactory) {
		let db = MemoryDatabase::new();
		let existing = factory.create::<Author>(Some(2), &db).await.unwrap();

		let authors = factory
			.find_or_create_batch::<Author, _>(vec![1, 2, 3], &db)
			.await
			.unwrap();
		assert_eq!(authors.len(), 3);
		assert_eq!(authors[1], existing);
		assert_eq!(db.row_count("factory_authors"), 3);
	}
}
