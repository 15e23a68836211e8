use async_trait::async_trait;
use seedbed_db::Database;
use std::marker::PhantomData;
use std::sync::Arc;

use super::{SeedUnit, UnitReport};
use crate::error::SeedingResult;
use crate::factory::ModelFactory;
use crate::schema::{ModelRef, Seedable, classify};

/// Creates `count` random rows of `M`.
///
/// # Examples
///
/// ```ignore
/// let factory = Arc::new(ModelFactory::default());
/// let users = Seed::<User>::new(Arc::clone(&factory)).with_count(20);
/// ```
pub struct Seed<M> {
	count: usize,
	factory: Arc<ModelFactory>,
	_model: PhantomData<fn() -> M>,
}

impl<M: Seedable> Seed<M> {
	/// Rows created when no count is given.
	pub const DEFAULT_COUNT: usize = 100;

	/// Creates a unit seeding [`Self::DEFAULT_COUNT`] rows.
	pub fn new(factory: Arc<ModelFactory>) -> Self {
		Self {
			count: Self::DEFAULT_COUNT,
			factory,
			_model: PhantomData,
		}
	}

	/// Sets the number of rows.
	pub fn with_count(mut self, count: usize) -> Self {
		self.count = count;
		self
	}

	/// Number of rows this unit creates.
	pub fn count(&self) -> usize {
		self.count
	}
}

#[async_trait]
impl<M: Seedable> SeedUnit for Seed<M> {
	fn name(&self) -> String {
		format!("seed({})", M::table_name())
	}

	fn produces(&self) -> Vec<ModelRef> {
		vec![ModelRef::seedable::<M>()]
	}

	fn requires(&self) -> SeedingResult<Vec<ModelRef>> {
		Ok(classify::<M>()?.parent_dependencies())
	}

	async fn prepare(&self, db: &dyn Database) -> SeedingResult<UnitReport> {
		let created = self.factory.create_batch::<M>(self.count, db).await?;
		Ok(UnitReport::new(self.name()).with_created(created.len()))
	}
}
