//! Reference seeder over the test models.

use seedbed_db::Database;
use seedbed_seeding::SeedingResult;
use seedbed_seeding::config::FactoryConfig;
use seedbed_seeding::factory::ModelFactory;
use seedbed_seeding::seed::{ParentSeed, Seed, SeedUnit, SiblingSeed};
use seedbed_seeding::seeder::{Seeder, SeederOptions};
use std::sync::Arc;

use crate::models::{
	ChildModel, ClassModel, EnrollmentModel, KitchenSink, ParentModel, StudentModel,
	register_test_enums,
};

/// Seeds every reference model and wires up both relationship shapes.
///
/// Runs, in order: kitchen sinks, students, classes, parents, children,
/// student/class enrollments, then reassigns every child to a random parent.
#[derive(Debug, Clone)]
pub struct TestModelsSeeder {
	/// Kitchen sink rows.
	pub kitchen_sink_count: usize,
	/// Student rows.
	pub student_count: usize,
	/// Class rows.
	pub class_count: usize,
	/// Classes linked to every student.
	pub classes_per_student: usize,
	/// Parent rows.
	pub parent_count: usize,
	/// Child rows.
	pub child_count: usize,
	options: SeederOptions,
	factory: Arc<ModelFactory>,
}

impl TestModelsSeeder {
	/// Seeder with default counts and an unseeded factory.
	pub fn new() -> SeedingResult<Self> {
		Self::with_config(FactoryConfig::default())
	}

	/// Seeder whose factory is built from `config`.
	pub fn with_config(config: FactoryConfig) -> SeedingResult<Self> {
		let factory = ModelFactory::new(config)?;
		register_test_enums(&factory)?;
		Ok(Self {
			kitchen_sink_count: 5,
			student_count: 20,
			class_count: 10,
			classes_per_student: 5,
			parent_count: 5,
			child_count: 10,
			options: SeederOptions::default(),
			factory: Arc::new(factory),
		})
	}

	/// Replaces the run options.
	pub fn with_options(mut self, options: SeederOptions) -> Self {
		self.options = options;
		self
	}

	/// Factory shared by every unit.
	pub fn factory(&self) -> &Arc<ModelFactory> {
		&self.factory
	}
}

impl Seeder for TestModelsSeeder {
	fn seeds(&self, _db: &dyn Database) -> Vec<Box<dyn SeedUnit>> {
		vec![
			Box::new(Seed::<KitchenSink>::new(self.factory.clone()).with_count(self.kitchen_sink_count)),
			Box::new(Seed::<StudentModel>::new(self.factory.clone()).with_count(self.student_count)),
			Box::new(Seed::<ClassModel>::new(self.factory.clone()).with_count(self.class_count)),
			Box::new(Seed::<ParentModel>::new(self.factory.clone()).with_count(self.parent_count)),
			Box::new(Seed::<ChildModel>::new(self.factory.clone()).with_count(self.child_count)),
			Box::new(SiblingSeed::<EnrollmentModel>::new().with_count(self.classes_per_student)),
			Box::new(ParentSeed::new(ChildModel::parent())),
		]
	}

	fn options(&self) -> SeederOptions {
		self.options.clone()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use seedbed_db::MemoryDatabase;

	#[rstest]
	fn test_units_run_in_declared_order() {
		let seeder = TestModelsSeeder::new().unwrap();
		let db = MemoryDatabase::new();
		let names: Vec<String> = seeder.seeds(&db).iter().map(|unit| unit.name()).collect();
		assert_eq!(
			names,
			vec![
				"seed(kitchen_sinks)",
				"seed(students)",
				"seed(classes)",
				"seed(parents)",
				"seed(children)",
				"sibling_seed(enrollments)",
				"parent_seed(parents -> children)",
			]
		);
	}

	#[rstest]
	fn test_plan_is_valid() {
		let seeder = TestModelsSeeder::new().unwrap();
		seeder.plan(&MemoryDatabase::new()).validate().unwrap();
	}

	#[rstest]
	fn test_invalid_config_is_rejected() {
		let config = FactoryConfig::default().with_batch_concurrency(0);
		assert!(TestModelsSeeder::with_config(config).is_err());
	}
}
