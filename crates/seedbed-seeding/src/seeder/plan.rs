//! Ordered seed plans and their validation.

use seedbed_db::{Database, Model};
use std::collections::{HashMap, HashSet, VecDeque};
use std::time::Instant;
use tracing::Instrument;

use super::{PlanValidation, SeedReport, SeederOptions};
use crate::error::{SeedingError, SeedingResult};
use crate::schema::ModelRef;
use crate::seed::SeedUnit;

/// An owned, ordered list of seed units.
///
/// # Examples
///
/// ```ignore
/// let plan = SeedPlan::new()
///     .add(Seed::<ParentModel>::new(factory.clone()).with_count(5))
///     .add(Seed::<ChildModel>::new(factory.clone()).with_count(10))
///     .add(ParentSeed::new(ForeignKey::<ChildModel, ParentModel>::new("parent_id")));
///
/// plan.validate()?;
/// let report = plan.run(&db).await?;
/// ```
#[derive(Default)]
pub struct SeedPlan {
	units: Vec<Box<dyn SeedUnit>>,
	options: SeederOptions,
}

impl SeedPlan {
	/// Creates an empty plan with default options.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a plan from already boxed units.
	pub fn from_units(units: Vec<Box<dyn SeedUnit>>) -> Self {
		Self {
			units,
			options: SeederOptions::default(),
		}
	}

	/// Appends a unit.
	pub fn add<U: SeedUnit + 'static>(mut self, unit: U) -> Self {
		self.units.push(Box::new(unit));
		self
	}

	/// Replaces the options.
	pub fn with_options(mut self, options: SeederOptions) -> Self {
		self.options = options;
		self
	}

	/// Declares that rows of `M` exist before the plan runs.
	pub fn assume_seeded<M: Model>(mut self) -> Self {
		self.options = self.options.assume_seeded::<M>();
		self
	}

	/// Units in run order.
	pub fn units(&self) -> &[Box<dyn SeedUnit>] {
		&self.units
	}

	/// Number of units.
	pub fn len(&self) -> usize {
		self.units.len()
	}

	/// Returns true if the plan has no units.
	pub fn is_empty(&self) -> bool {
		self.units.is_empty()
	}

	/// Checks the plan without touching the database.
	///
	/// Rejects parent-reference cycles among the seeded models and units that
	/// run before the models they require are seeded.
	pub fn validate(&self) -> SeedingResult<()> {
		self.check_cycles()?;
		self.check_order()
	}

	fn check_cycles(&self) -> SeedingResult<()> {
		let mut nodes: Vec<ModelRef> = Vec::new();
		let mut edges: HashMap<ModelRef, Vec<ModelRef>> = HashMap::new();
		for unit in &self.units {
			for model in unit.produces() {
				if nodes.contains(&model) {
					continue;
				}
				nodes.push(model);
				if let Some(schema) = model.schema() {
					edges.insert(model, schema?.parent_dependencies());
				}
			}
		}
		for targets in edges.values() {
			for target in targets {
				if !nodes.contains(target) {
					nodes.push(*target);
				}
			}
		}

		// Kahn: a node is ready once every parent it references is ready.
		let mut pending: HashMap<ModelRef, usize> = nodes
			.iter()
			.map(|node| (*node, edges.get(node).map_or(0, Vec::len)))
			.collect();
		let mut ready: VecDeque<ModelRef> = nodes
			.iter()
			.filter(|node| pending[*node] == 0)
			.copied()
			.collect();
		let mut resolved = HashSet::new();
		while let Some(node) = ready.pop_front() {
			resolved.insert(node);
			for (child, parents) in &edges {
				if resolved.contains(child) {
					continue;
				}
				let count = parents.iter().filter(|parent| **parent == node).count();
				if count == 0 {
					continue;
				}
				if let Some(remaining) = pending.get_mut(child) {
					*remaining -= count;
					if *remaining == 0 {
						ready.push_back(*child);
					}
				}
			}
		}

		if resolved.len() < nodes.len() {
			let cycle: Vec<String> = nodes
				.iter()
				.filter(|node| !resolved.contains(*node))
				.map(|node| node.name().to_string())
				.collect();
			tracing::error!(models = ?cycle, "seed plan rejected: dependency cycle");
			return Err(SeedingError::PlanCycle(cycle));
		}
		Ok(())
	}

	fn check_order(&self) -> SeedingResult<()> {
		let mut seeded: HashSet<ModelRef> = self.options.pre_seeded().iter().copied().collect();
		for unit in &self.units {
			for required in unit.requires()? {
				if !seeded.contains(&required) {
					tracing::error!(
						unit = %unit.name(),
						model = required.name(),
						"seed plan rejected: unit runs before its dependency"
					);
					return Err(SeedingError::PlanOrder {
						unit: unit.name(),
						model: required.name().to_string(),
					});
				}
			}
			seeded.extend(unit.produces());
		}
		Ok(())
	}

	/// Runs every unit strictly in order.
	///
	/// The first failing unit aborts the run; later units never start.
	pub async fn run(&self, db: &dyn Database) -> SeedingResult<SeedReport> {
		if self.options.validation == PlanValidation::Strict {
			self.validate()?;
		}

		let started = Instant::now();
		let mut report = SeedReport::default();
		tracing::info!(units = self.units.len(), "seed plan started");
		for (index, unit) in self.units.iter().enumerate() {
			let name = unit.name();
			let span = tracing::info_span!("seed_unit", unit = %name, index);
			let unit_started = Instant::now();
			tracing::info!(parent: &span, "seed unit started");

			let mut unit_report = match unit.prepare(db).instrument(span.clone()).await {
				Ok(unit_report) => unit_report,
				Err(error) => {
					tracing::error!(parent: &span, %error, "seed unit failed; aborting plan");
					return Err(error);
				}
			};
			unit_report.elapsed = unit_started.elapsed();
			tracing::info!(
				parent: &span,
				created = unit_report.created,
				linked = unit_report.linked,
				elapsed_ms = unit_report.elapsed.as_millis() as u64,
				"seed unit finished"
			);
			report.units.push(unit_report);
		}
		report.elapsed = started.elapsed();
		tracing::info!(
			created = report.total_created(),
			linked = report.total_linked(),
			elapsed_ms = report.elapsed.as_millis() as u64,
			"seed plan finished"
		);
		Ok(report)
	}

	/// Runs every unit's revert in order.
	pub async fn revert(&self, db: &dyn Database) -> SeedingResult<()> {
		for unit in &self.units {
			unit.revert(db).await?;
		}
		Ok(())
	}
}

impl std::fmt::Debug for SeedPlan {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let names: Vec<String> = self.units.iter().map(|unit| unit.name()).collect();
		f.debug_struct("SeedPlan")
			.field("units", &names)
			.field("options", &self.options)
			.finish()
	}
}
