//! Test case that seeds an in-memory store before each test.

use seedbed_db::MemoryDatabase;
use seedbed_seeding::SeedingResult;
use seedbed_seeding::seeder::{SeedReport, Seeder};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::seeder::TestModelsSeeder;

/// Base test case for seeded tests
///
/// Holds a fresh [`MemoryDatabase`] and a [`TestModelsSeeder`]. When
/// `auto_seed` is on, [`setup`](Self::setup) runs the seeder as part of
/// preparing the store and [`teardown`](Self::teardown) reverts it.
///
/// # Example
/// ```ignore
/// let case = SeededTestCase::new()?;
/// case.setup().await?;
/// assert_eq!(case.db().row_count("students"), 20);
/// case.teardown().await?;
/// ```
pub struct SeededTestCase {
	db: Arc<MemoryDatabase>,
	seeder: TestModelsSeeder,
	auto_seed: bool,
	report: Arc<RwLock<Option<SeedReport>>>,
	setup_called: Arc<RwLock<bool>>,
	teardown_called: Arc<RwLock<bool>>,
}

impl SeededTestCase {
	/// Create a test case with the reference seeder and auto seeding on
	pub fn new() -> SeedingResult<Self> {
		Ok(Self::with_seeder(TestModelsSeeder::new()?))
	}

	/// Create a test case around a configured seeder
	pub fn with_seeder(seeder: TestModelsSeeder) -> Self {
		Self {
			db: Arc::new(MemoryDatabase::new()),
			seeder,
			auto_seed: true,
			report: Arc::new(RwLock::new(None)),
			setup_called: Arc::new(RwLock::new(false)),
			teardown_called: Arc::new(RwLock::new(false)),
		}
	}

	/// Use a specific store, e.g. one with a fixed random seed
	pub fn with_database(mut self, db: Arc<MemoryDatabase>) -> Self {
		self.db = db;
		self
	}

	/// Turn seeding during setup on or off
	pub fn with_auto_seed(mut self, auto_seed: bool) -> Self {
		self.auto_seed = auto_seed;
		self
	}

	/// The store under test
	pub fn db(&self) -> &Arc<MemoryDatabase> {
		&self.db
	}

	/// The seeder run by setup
	pub fn seeder(&self) -> &TestModelsSeeder {
		&self.seeder
	}

	/// Report of the seeding run, if setup seeded
	pub async fn report(&self) -> Option<SeedReport> {
		self.report.read().await.clone()
	}

	/// Setup method called before each test
	pub async fn setup(&self) -> SeedingResult<()> {
		if self.auto_seed {
			let report = self.seeder.prepare(self.db.as_ref()).await?;
			tracing::debug!(
				created = report.total_created(),
				linked = report.total_linked(),
				"test database seeded"
			);
			*self.report.write().await = Some(report);
		}
		*self.setup_called.write().await = true;
		Ok(())
	}

	/// Teardown method called after each test
	pub async fn teardown(&self) -> SeedingResult<()> {
		if self.auto_seed {
			self.seeder.revert(self.db.as_ref()).await?;
		}
		self.db.clear();
		*self.report.write().await = None;
		*self.teardown_called.write().await = true;
		Ok(())
	}

	/// Check if setup was called
	pub async fn is_setup_called(&self) -> bool {
		*self.setup_called.read().await
	}

	/// Check if teardown was called
	pub async fn is_teardown_called(&self) -> bool {
		*self.teardown_called.read().await
	}
}
