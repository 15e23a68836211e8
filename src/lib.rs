//! # seedbed
//!
//! Random model seeding for integration tests.
//!
//! Declare how each model's fields are generated, compose seed units into a
//! seeder, and run it against a [`Database`](db::Database). Parent references
//! are resolved from rows that already exist, so seeders run in dependency
//! order and fail loudly when they do not.
//!
//! ## Feature Flags
//!
//! - `db` - Model traits and the in-memory backend
//! - `seeding` - The seeding engine (implies `db`)
//! - `yaml` - YAML factory configuration
//! - `testkit` - Reference models, seeder and fixtures
//! - `full` (default) - All of the above
//!
//! ## Quick Example
//!
//! ```rust,ignore
//! use seedbed::prelude::*;
//! use std::sync::Arc;
//!
//! #[derive(Debug, Clone, Serialize, Deserialize)]
//! struct Author {
//!     id: Option<i64>,
//!     name: String,
//! }
//!
//! impl Model for Author {
//!     type PrimaryKey = i64;
//!     fn table_name() -> &'static str { "authors" }
//!     fn primary_key(&self) -> Option<&i64> { self.id.as_ref() }
//!     fn set_primary_key(&mut self, value: i64) { self.id = Some(value); }
//! }
//!
//! impl Seedable for Author {
//!     fn describe(schema: SchemaBuilder) -> SchemaBuilder {
//!         schema.id().faker("name", FakerType::Name)
//!     }
//! }
//!
//! let factory = Arc::new(ModelFactory::default());
//! let db = MemoryDatabase::new();
//! SeedPlan::new()
//!     .add(Seed::<Author>::new(factory).with_count(10))
//!     .run(&db)
//!     .await?;
//! ```

#[cfg(feature = "db")]
pub mod db;
#[cfg(feature = "seeding")]
pub mod seeding;
#[cfg(feature = "testkit")]
pub mod testkit;

/// Prelude module for convenient imports
pub mod prelude {
	#[cfg(feature = "db")]
	pub use seedbed_db::MemoryDatabase;

	#[cfg(feature = "seeding")]
	pub use seedbed_seeding::prelude::*;

	#[cfg(feature = "testkit")]
	pub use seedbed_testkit::{SeededTestCase, TestModelsSeeder, init_test_logging};
}
