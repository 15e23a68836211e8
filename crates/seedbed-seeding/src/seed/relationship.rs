use async_trait::async_trait;
use seedbed_db::{Database, ForeignKey, Model, Pivot, Query};
use std::marker::PhantomData;
use std::sync::Arc;

use super::{SeedUnit, UnitReport};
use crate::error::SeedingResult;
use crate::factory::ModelFactory;
use crate::relations::{
	SiblingSeedDirection, attach_all_children, attach_random_children, attach_random_parent,
	attach_random_siblings,
};
use crate::schema::{ModelRef, Seedable};

/// Links rows of a many-to-many relation through pivot `V`.
pub struct SiblingSeed<V> {
	count: usize,
	direction: SiblingSeedDirection,
	left_query: Option<Query>,
	right_query: Option<Query>,
	_pivot: PhantomData<fn() -> V>,
}

impl<V: Pivot> SiblingSeed<V> {
	/// Siblings per driving row when no count is given.
	pub const DEFAULT_COUNT: usize = 5;

	/// Creates a left-to-right unit with the default count.
	pub fn new() -> Self {
		Self {
			count: Self::DEFAULT_COUNT,
			direction: SiblingSeedDirection::default(),
			left_query: None,
			right_query: None,
			_pivot: PhantomData,
		}
	}

	/// Sets how many rows each driving row is linked to.
	pub fn with_count(mut self, count: usize) -> Self {
		self.count = count;
		self
	}

	/// Sets the driving side.
	pub fn with_direction(mut self, direction: SiblingSeedDirection) -> Self {
		self.direction = direction;
		self
	}

	/// Restricts the left rows.
	pub fn with_left_query(mut self, query: Query) -> Self {
		self.left_query = Some(query);
		self
	}

	/// Restricts the right rows.
	pub fn with_right_query(mut self, query: Query) -> Self {
		self.right_query = Some(query);
		self
	}
}

impl<V: Pivot> Default for SiblingSeed<V> {
	fn default() -> Self {
		Self::new()
	}
}

#[async_trait]
impl<V: Pivot> SeedUnit for SiblingSeed<V> {
	fn name(&self) -> String {
		format!("sibling_seed({})", V::table_name())
	}

	fn produces(&self) -> Vec<ModelRef> {
		vec![ModelRef::of::<V>()]
	}

	fn requires(&self) -> SeedingResult<Vec<ModelRef>> {
		Ok(vec![ModelRef::of::<V::Left>(), ModelRef::of::<V::Right>()])
	}

	async fn prepare(&self, db: &dyn Database) -> SeedingResult<UnitReport> {
		let report = attach_random_siblings::<V>(
			self.count,
			self.direction,
			self.left_query.as_ref(),
			self.right_query.as_ref(),
			db,
		)
		.await?;
		Ok(UnitReport::new(self.name()).with_linked(report.linked))
	}
}

/// Gives every parent row `count` random children.
///
/// With a factory, an empty child table is filled with fresh children instead
/// of failing.
pub struct ChildSeed<P, C> {
	fk: ForeignKey<C, P>,
	count: usize,
	parent_query: Option<Query>,
	child_query: Option<Query>,
	factory: Option<Arc<ModelFactory>>,
}

impl<P: Model, C: Seedable> ChildSeed<P, C> {
	/// Children per parent when no count is given.
	pub const DEFAULT_COUNT: usize = 3;

	/// Creates a unit attaching through `fk`.
	pub fn new(fk: ForeignKey<C, P>) -> Self {
		Self {
			fk,
			count: Self::DEFAULT_COUNT,
			parent_query: None,
			child_query: None,
			factory: None,
		}
	}

	/// Sets the number of children per parent.
	pub fn with_count(mut self, count: usize) -> Self {
		self.count = count;
		self
	}

	/// Restricts the parent rows.
	pub fn with_parent_query(mut self, query: Query) -> Self {
		self.parent_query = Some(query);
		self
	}

	/// Restricts the candidate children.
	pub fn with_child_query(mut self, query: Query) -> Self {
		self.child_query = Some(query);
		self
	}

	/// Creates children through `factory` when none exist.
	pub fn with_factory(mut self, factory: Arc<ModelFactory>) -> Self {
		self.factory = Some(factory);
		self
	}
}

#[async_trait]
impl<P: Model, C: Seedable> SeedUnit for ChildSeed<P, C> {
	fn name(&self) -> String {
		format!("child_seed({} -> {})", P::table_name(), C::table_name())
	}

	fn produces(&self) -> Vec<ModelRef> {
		match self.factory {
			Some(_) => vec![ModelRef::seedable::<C>()],
			None => Vec::new(),
		}
	}

	fn requires(&self) -> SeedingResult<Vec<ModelRef>> {
		let mut required = vec![ModelRef::of::<P>()];
		if self.factory.is_none() {
			required.push(ModelRef::of::<C>());
		}
		Ok(required)
	}

	async fn prepare(&self, db: &dyn Database) -> SeedingResult<UnitReport> {
		let report = attach_random_children(
			&self.fk,
			self.count,
			self.child_query.as_ref(),
			self.parent_query.as_ref(),
			self.factory.as_deref(),
			db,
		)
		.await?;
		Ok(UnitReport::new(self.name())
			.with_created(report.created)
			.with_linked(report.linked))
	}
}

/// Points every child row at a random parent row.
pub struct ParentSeed<P, C> {
	fk: ForeignKey<C, P>,
	parent_query: Option<Query>,
	child_query: Option<Query>,
}

impl<P: Model, C: Model> ParentSeed<P, C> {
	/// Creates a unit attaching through `fk`.
	pub fn new(fk: ForeignKey<C, P>) -> Self {
		Self {
			fk,
			parent_query: None,
			child_query: None,
		}
	}

	/// Restricts the candidate parents.
	pub fn with_parent_query(mut self, query: Query) -> Self {
		self.parent_query = Some(query);
		self
	}

	/// Restricts the children to update.
	pub fn with_child_query(mut self, query: Query) -> Self {
		self.child_query = Some(query);
		self
	}
}

#[async_trait]
impl<P: Model, C: Model> SeedUnit for ParentSeed<P, C> {
	fn name(&self) -> String {
		format!("parent_seed({} -> {})", P::table_name(), C::table_name())
	}

	fn requires(&self) -> SeedingResult<Vec<ModelRef>> {
		Ok(vec![ModelRef::of::<P>(), ModelRef::of::<C>()])
	}

	async fn prepare(&self, db: &dyn Database) -> SeedingResult<UnitReport> {
		let report = attach_random_parent(
			&self.fk,
			self.parent_query.as_ref(),
			self.child_query.as_ref(),
			db,
		)
		.await?;
		Ok(UnitReport::new(self.name()).with_linked(report.linked))
	}
}

/// Assigns every matched child to each parent in turn.
pub struct AllChildrenSeed<P, C> {
	fk: ForeignKey<C, P>,
	parent_query: Option<Query>,
	child_query: Option<Query>,
}

impl<P: Model, C: Model> AllChildrenSeed<P, C> {
	/// Creates a unit attaching through `fk`.
	pub fn new(fk: ForeignKey<C, P>) -> Self {
		Self {
			fk,
			parent_query: None,
			child_query: None,
		}
	}

	/// Restricts the parents.
	pub fn with_parent_query(mut self, query: Query) -> Self {
		self.parent_query = Some(query);
		self
	}

	/// Restricts the children.
	pub fn with_child_query(mut self, query: Query) -> Self {
		self.child_query = Some(query);
		self
	}
}

#[async_trait]
impl<P: Model, C: Model> SeedUnit for AllChildrenSeed<P, C> {
	fn name(&self) -> String {
		format!("all_children_seed({} -> {})", P::table_name(), C::table_name())
	}

	fn requires(&self) -> SeedingResult<Vec<ModelRef>> {
		Ok(vec![ModelRef::of::<P>(), ModelRef::of::<C>()])
	}

	async fn prepare(&self, db: &dyn Database) -> SeedingResult<UnitReport> {
		let report = attach_all_children(
			&self.fk,
			self.child_query.as_ref(),
			self.parent_query.as_ref(),
			db,
		)
		.await?;
		Ok(UnitReport::new(self.name()).with_linked(report.linked))
	}
}
