//! Seed units: the steps of a seeding plan.
//!
//! - [`Seed`] creates random rows of one model.
//! - [`SiblingSeed`], [`ChildSeed`], [`ParentSeed`] and [`AllChildrenSeed`]
//!   attach rows that already exist.

mod model_seed;
mod relationship;

pub use model_seed::Seed;
pub use relationship::{AllChildrenSeed, ChildSeed, ParentSeed, SiblingSeed};

use async_trait::async_trait;
use seedbed_db::Database;
use std::time::Duration;

use crate::error::SeedingResult;
use crate::schema::ModelRef;

/// Outcome of one unit's `prepare`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitReport {
	/// Unit name.
	pub unit: String,
	/// Rows created.
	pub created: usize,
	/// Relationship links written.
	pub linked: usize,
	/// Wall-clock time spent in `prepare`, filled in by the runner.
	pub elapsed: Duration,
}

impl UnitReport {
	/// Empty report for `unit`.
	pub fn new(unit: impl Into<String>) -> Self {
		Self {
			unit: unit.into(),
			created: 0,
			linked: 0,
			elapsed: Duration::ZERO,
		}
	}

	/// Sets the number of created rows.
	pub fn with_created(mut self, created: usize) -> Self {
		self.created = created;
		self
	}

	/// Sets the number of links written.
	pub fn with_linked(mut self, linked: usize) -> Self {
		self.linked = linked;
		self
	}
}

/// One step of a seeding plan.
///
/// A unit's `prepare` must leave the database in its final state before it
/// returns; the runner starts the next unit only afterwards.
#[async_trait]
pub trait SeedUnit: Send + Sync {
	/// Name used in logs, reports and plan errors.
	fn name(&self) -> String;

	/// Models whose rows this unit creates.
	fn produces(&self) -> Vec<ModelRef> {
		Vec::new()
	}

	/// Models whose rows must exist before this unit runs.
	fn requires(&self) -> SeedingResult<Vec<ModelRef>> {
		Ok(Vec::new())
	}

	/// Runs the unit.
	async fn prepare(&self, db: &dyn Database) -> SeedingResult<UnitReport>;

	/// Undoes the unit. Seeded data is left in place.
	async fn revert(&self, _db: &dyn Database) -> SeedingResult<()> {
		Ok(())
	}
}
