use seedbed_db::{Model, Pivot};
use serde_json::Value;
use std::sync::Arc;

use super::property::{CustomGenerator, PropertyDescriptor, PropertyKind};
use super::{Group, ModelRef};
use crate::error::{SeedingError, SeedingResult};
use crate::random::{EnumRef, FakerType, RandomEnum, RandomGenerator, ScalarType, TypeRef};

/// Collects a model's property declarations.
///
/// Declaration errors (duplicate names, custom generators for undeclared
/// properties) are collected and reported together by [`SchemaBuilder::build`].
pub struct SchemaBuilder {
	model: ModelRef,
	properties: Vec<PropertyDescriptor>,
	errors: Vec<String>,
}

impl SchemaBuilder {
	/// Starts an empty declaration for `model`.
	pub fn new(model: ModelRef) -> Self {
		Self {
			model,
			properties: Vec::new(),
			errors: Vec::new(),
		}
	}

	fn push(mut self, property: PropertyDescriptor) -> Self {
		if self.properties.iter().any(|p| p.name() == property.name()) {
			self.errors
				.push(format!("property `{}` is declared twice", property.name()));
		} else {
			self.properties.push(property);
		}
		self
	}

	fn kind(self, name: &'static str, kind: PropertyKind) -> Self {
		self.push(PropertyDescriptor::new(name, kind))
	}

	/// Declares the model's primary key column.
	pub fn id(self) -> Self {
		let name = self.model.table().primary_key;
		self.identifier(name)
	}

	/// Declares an identifier column by name.
	pub fn identifier(self, name: &'static str) -> Self {
		self.kind(name, PropertyKind::Identifier)
	}

	/// Declares a required value.
	pub fn field(self, name: &'static str, ty: impl Into<TypeRef>) -> Self {
		self.kind(name, PropertyKind::Field(ty.into()))
	}

	/// Declares an optional value, generated as null.
	pub fn optional_field(self, name: &'static str, ty: impl Into<TypeRef>) -> Self {
		self.kind(name, PropertyKind::OptionalField(ty.into()))
	}

	/// Declares a required string filled from a faker hint.
	pub fn faker(self, name: &'static str, faker: FakerType) -> Self {
		self.push(
			PropertyDescriptor::new(name, PropertyKind::Field(ScalarType::String.into()))
				.with_faker(faker),
		)
	}

	/// Declares a required enum value.
	pub fn enumeration<E: RandomEnum>(self, name: &'static str) -> Self {
		self.kind(name, PropertyKind::Enum(EnumRef::of::<E>()))
	}

	/// Declares an optional enum value, generated as null.
	pub fn optional_enumeration<E: RandomEnum>(self, name: &'static str) -> Self {
		self.kind(name, PropertyKind::OptionalEnum(EnumRef::of::<E>()))
	}

	/// Declares an embedded group.
	pub fn group<G: Group>(self, name: &'static str) -> Self {
		self.kind(name, PropertyKind::Group(G::group_schema()))
	}

	/// Declares a required foreign key to `P`, resolved from persisted rows.
	pub fn parent<P: Model>(self, name: &'static str) -> Self {
		self.kind(name, PropertyKind::ParentRef(ModelRef::of::<P>()))
	}

	/// Declares an optional foreign key to `P`, generated as null.
	pub fn optional_parent<P: Model>(self, name: &'static str) -> Self {
		self.kind(name, PropertyKind::OptionalParentRef(ModelRef::of::<P>()))
	}

	/// Declares a one-to-many collection of `C`.
	pub fn children<C: Model>(self, name: &'static str) -> Self {
		self.kind(name, PropertyKind::ChildrenRef(ModelRef::of::<C>()))
	}

	/// Declares an optional single child of type `C`.
	pub fn optional_child<C: Model>(self, name: &'static str) -> Self {
		self.kind(name, PropertyKind::OptionalChildRef(ModelRef::of::<C>()))
	}

	/// Declares a many-to-many collection of `T` linked through pivot `P`.
	pub fn siblings<T: Model, P: Pivot>(self, name: &'static str) -> Self {
		self.kind(
			name,
			PropertyKind::SiblingsRef {
				target: ModelRef::of::<T>(),
				through: ModelRef::of::<P>(),
			},
		)
	}

	/// Declares a timestamp maintained by the store.
	pub fn timestamp(self, name: &'static str) -> Self {
		self.kind(name, PropertyKind::Timestamp)
	}

	/// Overrides the strategy of an already declared property.
	///
	/// # Examples
	///
	/// ```ignore
	/// schema
	///     .field("score", ScalarType::Integer)
	///     .custom("score", |generator| {
	///         Ok(generator.with_rng_mut(|rng| rng.gen_range(0..=100)).into())
	///     })
	/// ```
	pub fn custom<F>(mut self, name: &'static str, generator: F) -> Self
	where
		F: Fn(&RandomGenerator) -> SeedingResult<Value> + Send + Sync + 'static,
	{
		let generator: CustomGenerator = Arc::new(generator);
		match self.properties.iter_mut().find(|p| p.name() == name) {
			Some(property) => property.set_custom(generator),
			None => self.errors.push(format!(
				"custom generator given for undeclared property `{}`",
				name
			)),
		}
		self
	}

	/// Finishes the declaration.
	pub fn build(self) -> SeedingResult<ModelSchema> {
		if !self.errors.is_empty() {
			return Err(SeedingError::Schema {
				model: self.model.name().to_string(),
				message: self.errors.join("; "),
			});
		}
		Ok(ModelSchema {
			model: self.model,
			properties: self.properties,
		})
	}
}

/// Classified properties of one model type.
#[derive(Debug, Clone)]
pub struct ModelSchema {
	model: ModelRef,
	properties: Vec<PropertyDescriptor>,
}

impl ModelSchema {
	/// Model the schema describes.
	pub fn model(&self) -> ModelRef {
		self.model
	}

	/// Properties in declaration order.
	pub fn properties(&self) -> &[PropertyDescriptor] {
		&self.properties
	}

	/// Looks up a property by name.
	pub fn property(&self, name: &str) -> Option<&PropertyDescriptor> {
		self.properties.iter().find(|p| p.name() == name)
	}

	/// The identifier property, if declared.
	pub fn identifier(&self) -> Option<&PropertyDescriptor> {
		self.properties
			.iter()
			.find(|p| matches!(p.kind(), PropertyKind::Identifier))
	}

	/// Targets of required parent references, without duplicates.
	///
	/// These are the models whose rows must exist before this model can be
	/// created.
	pub fn parent_dependencies(&self) -> Vec<ModelRef> {
		let mut targets: Vec<ModelRef> = Vec::new();
		for property in &self.properties {
			if let PropertyKind::ParentRef(target) = property.kind()
				&& !property.has_custom()
				&& !targets.contains(target)
			{
				targets.push(*target);
			}
		}
		targets
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::schema::GenerationStrategy;
	use rstest::rstest;
	use seedbed_db::Model;
	use serde::{Deserialize, Serialize};

	#[derive(Debug, Clone, Serialize, Deserialize)]
	struct Owner {
		id: Option<i64>,
	}

	impl Model for Owner {
		type PrimaryKey = i64;

		fn table_name() -> &'static str {
			"owners"
		}

		fn primary_key(&self) -> Option<&i64> {
			self.id.as_ref()
		}

		fn set_primary_key(&mut self, value: i64) {
			self.id = Some(value);
		}
	}

	fn builder() -> SchemaBuilder {
		SchemaBuilder::new(ModelRef::of::<Owner>())
	}

	#[rstest]
	fn test_id_uses_primary_key_column() {
		let schema = builder().id().build().unwrap();
		let identifier = schema.identifier().unwrap();
		assert_eq!(identifier.name(), "id");
		assert!(matches!(identifier.strategy(), GenerationStrategy::Skip));
	}

	#[rstest]
	fn test_duplicate_property_rejected() {
		let result = builder()
			.field("name", ScalarType::String)
			.optional_field("name", ScalarType::String)
			.build();
		match result {
			Err(SeedingError::Schema { model, message }) => {
				assert_eq!(model, "owners");
				assert!(message.contains("`name` is declared twice"));
			}
			other => panic!("expected schema error, got {:?}", other),
		}
	}

	#[rstest]
	fn test_custom_for_undeclared_property_rejected() {
		let result = builder()
			.custom("missing", |_| Ok(Value::Null))
			.build();
		assert!(matches!(result, Err(SeedingError::Schema { .. })));
	}

	#[rstest]
	fn test_strategies_follow_classification() {
		let schema = builder()
			.id()
			.field("name", ScalarType::String)
			.faker("email", FakerType::Email)
			.optional_field("bio", ScalarType::String)
			.parent::<Owner>("owner_id")
			.optional_parent::<Owner>("mentor_id")
			.children::<Owner>("pets")
			.timestamp("created_at")
			.build()
			.unwrap();

		let strategy = |name: &str| schema.property(name).unwrap().strategy();
		assert!(matches!(strategy("id"), GenerationStrategy::Skip));
		assert!(matches!(strategy("name"), GenerationStrategy::RandomOfType(_)));
		assert!(matches!(
			strategy("email"),
			GenerationStrategy::Fake(FakerType::Email)
		));
		assert!(matches!(strategy("bio"), GenerationStrategy::Skip));
		assert!(matches!(strategy("owner_id"), GenerationStrategy::AsyncLookup(_)));
		assert!(matches!(strategy("mentor_id"), GenerationStrategy::Skip));
		assert!(matches!(strategy("pets"), GenerationStrategy::Skip));
		assert!(matches!(strategy("created_at"), GenerationStrategy::Skip));
	}

	#[rstest]
	fn test_custom_overrides_parent_lookup() {
		let schema = builder()
			.parent::<Owner>("owner_id")
			.custom("owner_id", |_| Ok(Value::from(1)))
			.build()
			.unwrap();
		assert!(matches!(
			schema.property("owner_id").unwrap().strategy(),
			GenerationStrategy::Custom(_)
		));
		assert!(schema.parent_dependencies().is_empty());
	}

	#[rstest]
	fn test_parent_dependencies_are_unique() {
		let schema = builder()
			.parent::<Owner>("owner_id")
			.parent::<Owner>("co_owner_id")
			.optional_parent::<Owner>("previous_owner_id")
			.build()
			.unwrap();
		assert_eq!(schema.parent_dependencies(), vec![ModelRef::of::<Owner>()]);
	}
}
