use async_trait::async_trait;
use seedbed_db::Database;

use super::ModelFactory;
use crate::error::SeedingResult;
use crate::schema::Seedable;

/// Factory shortcuts callable on the model type.
///
/// # Examples
///
/// ```ignore
/// let user = User::create_random(&factory, &db).await?;
/// let users = User::create_batch(&factory, 5, &db).await?;
/// let admin = User::find_or_create(&factory, 1, &db).await?;
/// ```
#[async_trait]
pub trait ModelSeedExt: Seedable {
	/// Creates one random persisted instance.
	async fn create_random(factory: &ModelFactory, db: &dyn Database) -> SeedingResult<Self> {
		factory.create::<Self>(None, db).await
	}

	/// Creates `count` random persisted instances.
	async fn create_batch(
		factory: &ModelFactory,
		count: usize,
		db: &dyn Database,
	) -> SeedingResult<Vec<Self>> {
		factory.create_batch::<Self>(count, db).await
	}

	/// Finds the row with `id` or creates a random one with that key.
	async fn find_or_create(
		factory: &ModelFactory,
		id: Self::PrimaryKey,
		db: &dyn Database,
	) -> SeedingResult<Self> {
		factory.find_or_create::<Self>(id, db).await
	}

	/// [`ModelSeedExt::find_or_create`] for every key, in order.
	async fn find_or_create_batch(
		factory: &ModelFactory,
		ids: Vec<Self::PrimaryKey>,
		db: &dyn Database,
	) -> SeedingResult<Vec<Self>> {
		factory.find_or_create_batch::<Self, _>(ids, db).await
	}
}

impl<M: Seedable> ModelSeedExt for M {}
