//! Seeder orchestration.
//!
//! A [`Seeder`] names an ordered list of seed units and runs them as one
//! logical migration through a [`SeedPlan`].

mod plan;

pub use plan::SeedPlan;

use async_trait::async_trait;
use seedbed_db::{Database, Model};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::SeedingResult;
use crate::schema::ModelRef;
use crate::seed::{SeedUnit, UnitReport};

/// Whether a plan is checked before it runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanValidation {
	/// Reject cycles and out-of-order units before any unit runs.
	#[default]
	Strict,
	/// Run without checks; ordering problems surface at seed time.
	Off,
}

/// Options of a seeding run.
#[derive(Debug, Clone, Default)]
pub struct SeederOptions {
	/// Validation mode.
	pub validation: PlanValidation,
	pre_seeded: Vec<ModelRef>,
}

impl SeederOptions {
	/// Default options (strict validation).
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the validation mode.
	pub fn with_validation(mut self, validation: PlanValidation) -> Self {
		self.validation = validation;
		self
	}

	/// Declares that rows of `M` exist before the plan runs.
	pub fn assume_seeded<M: Model>(mut self) -> Self {
		let model = ModelRef::of::<M>();
		if !self.pre_seeded.contains(&model) {
			self.pre_seeded.push(model);
		}
		self
	}

	/// Models declared as already seeded.
	pub fn pre_seeded(&self) -> &[ModelRef] {
		&self.pre_seeded
	}
}

/// Outcome of a seeding run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedReport {
	/// Per-unit reports in run order.
	pub units: Vec<UnitReport>,
	/// Total wall-clock time.
	pub elapsed: Duration,
}

impl SeedReport {
	/// Rows created across all units.
	pub fn total_created(&self) -> usize {
		self.units.iter().map(|unit| unit.created).sum()
	}

	/// Links written across all units.
	pub fn total_linked(&self) -> usize {
		self.units.iter().map(|unit| unit.linked).sum()
	}

	/// Report of the unit with the given name.
	pub fn unit(&self, name: &str) -> Option<&UnitReport> {
		self.units.iter().find(|unit| unit.unit == name)
	}
}

/// An ordered composition of seed units, run as one migration.
///
/// # Examples
///
/// ```ignore
/// struct BlogSeeder {
///     factory: Arc<ModelFactory>,
/// }
///
/// impl Seeder for BlogSeeder {
///     fn seeds(&self, _db: &dyn Database) -> Vec<Box<dyn SeedUnit>> {
///         vec![
///             Box::new(Seed::<Author>::new(self.factory.clone()).with_count(5)),
///             Box::new(Seed::<Post>::new(self.factory.clone()).with_count(50)),
///         ]
///     }
/// }
///
/// let report = BlogSeeder { factory }.prepare(&db).await?;
/// ```
#[async_trait]
pub trait Seeder: Send + Sync {
	/// Units to run against `db`, in order.
	fn seeds(&self, db: &dyn Database) -> Vec<Box<dyn SeedUnit>>;

	/// Run options.
	fn options(&self) -> SeederOptions {
		SeederOptions::default()
	}

	/// Builds the plan of this seeder for `db`.
	fn plan(&self, db: &dyn Database) -> SeedPlan {
		SeedPlan::from_units(self.seeds(db)).with_options(self.options())
	}

	/// Runs every unit strictly in sequence.
	async fn prepare(&self, db: &dyn Database) -> SeedingResult<SeedReport> {
		self.plan(db).run(db).await
	}

	/// Runs every unit's revert in sequence.
	async fn revert(&self, db: &dyn Database) -> SeedingResult<()> {
		self.plan(db).revert(db).await
	}
}
