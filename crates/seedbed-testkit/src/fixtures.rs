//! rstest fixtures for seeded tests
//!
//! ```ignore
//! #[rstest]
//! #[tokio::test]
//! async fn test_students(#[future] seeded_db: Arc<MemoryDatabase>) {
//!     let db = seeded_db.await;
//!     assert_eq!(db.row_count("students"), 20);
//! }
//! ```

use rstest::fixture;
use seedbed_db::MemoryDatabase;
use seedbed_seeding::config::FactoryConfig;
use seedbed_seeding::factory::ModelFactory;
use seedbed_seeding::seeder::Seeder;
use std::sync::Arc;

use crate::logging::init_test_logging;
use crate::models::register_test_enums;
use crate::seeder::TestModelsSeeder;

/// Fixed seed shared by the deterministic fixtures.
pub const FIXTURE_SEED: u64 = 0x5eed;

/// Empty in-memory store with a fixed random seed.
#[fixture]
pub fn memory_db() -> Arc<MemoryDatabase> {
	init_test_logging();
	Arc::new(MemoryDatabase::with_seed(FIXTURE_SEED))
}

/// Deterministic factory with the reference enums registered.
#[fixture]
pub fn factory() -> Arc<ModelFactory> {
	let factory = ModelFactory::new(FactoryConfig::default().with_rng_seed(FIXTURE_SEED))
		.expect("fixture config is valid");
	register_test_enums(&factory).expect("reference enums register");
	Arc::new(factory)
}

/// Store populated by [`TestModelsSeeder`].
#[fixture]
pub async fn seeded_db(memory_db: Arc<MemoryDatabase>) -> Arc<MemoryDatabase> {
	let config = FactoryConfig::default().with_rng_seed(FIXTURE_SEED);
	let seeder = TestModelsSeeder::with_config(config).expect("reference seeder builds");
	seeder
		.prepare(memory_db.as_ref())
		.await
		.expect("reference seeder runs");
	memory_db
}
