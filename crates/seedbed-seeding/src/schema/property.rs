//! Property descriptors and their generation strategies.

use serde_json::Value;
use std::fmt;
use std::sync::Arc;

use super::{GroupSchema, ModelRef};
use crate::error::SeedingResult;
use crate::random::{EnumRef, FakerType, RandomGenerator, TypeRef};

/// Pluggable generator that replaces a property's default strategy.
pub type CustomGenerator = Arc<dyn Fn(&RandomGenerator) -> SeedingResult<Value> + Send + Sync>;

/// Classification of a declared model property.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyKind {
	/// Primary key.
	Identifier,
	/// Required plain value.
	Field(TypeRef),
	/// Optional plain value.
	OptionalField(TypeRef),
	/// Required enum value.
	Enum(EnumRef),
	/// Optional enum value.
	OptionalEnum(EnumRef),
	/// Embedded nested object.
	Group(GroupSchema),
	/// Required foreign key to exactly one row of another model.
	ParentRef(ModelRef),
	/// Optional foreign key.
	OptionalParentRef(ModelRef),
	/// One-to-many collection (lives on the other table).
	ChildrenRef(ModelRef),
	/// Optional one-to-one child (lives on the other table).
	OptionalChildRef(ModelRef),
	/// Many-to-many collection mediated by a pivot model.
	SiblingsRef {
		/// Model on the other side.
		target: ModelRef,
		/// Pivot model holding the links.
		through: ModelRef,
	},
	/// Created/updated timestamp maintained by the store.
	Timestamp,
}

impl PropertyKind {
	/// Strategy used when the descriptor carries no custom generator or hint.
	pub fn default_strategy(&self) -> GenerationStrategy {
		match self {
			Self::Field(ty) => GenerationStrategy::RandomOfType(ty.clone()),
			Self::Enum(reference) => GenerationStrategy::RandomOfType(TypeRef::Enum(*reference)),
			Self::Group(group) => GenerationStrategy::RandomOfType(TypeRef::Group(group.clone())),
			Self::ParentRef(target) => GenerationStrategy::AsyncLookup(*target),
			Self::Identifier
			| Self::OptionalField(_)
			| Self::OptionalEnum(_)
			| Self::OptionalParentRef(_)
			| Self::ChildrenRef(_)
			| Self::OptionalChildRef(_)
			| Self::SiblingsRef { .. }
			| Self::Timestamp => GenerationStrategy::Skip,
		}
	}
}

/// How the factory fills a property.
#[derive(Clone)]
pub enum GenerationStrategy {
	/// Written as explicit null.
	Skip,
	/// Random value of the type.
	RandomOfType(TypeRef),
	/// Realistic string from a faker hint.
	Fake(FakerType),
	/// Key of one random persisted row of the target model.
	AsyncLookup(ModelRef),
	/// Caller-supplied generator.
	Custom(CustomGenerator),
}

impl fmt::Debug for GenerationStrategy {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Skip => f.write_str("Skip"),
			Self::RandomOfType(ty) => f.debug_tuple("RandomOfType").field(ty).finish(),
			Self::Fake(faker) => f.debug_tuple("Fake").field(faker).finish(),
			Self::AsyncLookup(target) => f.debug_tuple("AsyncLookup").field(target).finish(),
			Self::Custom(_) => f.write_str("Custom(..)"),
		}
	}
}

/// One declared property of a model.
#[derive(Clone)]
pub struct PropertyDescriptor {
	name: &'static str,
	kind: PropertyKind,
	custom: Option<CustomGenerator>,
	faker: Option<FakerType>,
}

impl PropertyDescriptor {
	pub(crate) fn new(name: &'static str, kind: PropertyKind) -> Self {
		Self {
			name,
			kind,
			custom: None,
			faker: None,
		}
	}

	pub(crate) fn with_faker(mut self, faker: FakerType) -> Self {
		self.faker = Some(faker);
		self
	}

	pub(crate) fn set_custom(&mut self, generator: CustomGenerator) {
		self.custom = Some(generator);
	}

	/// Column name.
	pub fn name(&self) -> &'static str {
		self.name
	}

	/// Classification.
	pub fn kind(&self) -> &PropertyKind {
		&self.kind
	}

	/// Faker hint, if any.
	pub fn faker(&self) -> Option<FakerType> {
		self.faker
	}

	/// Returns true when a custom generator overrides the default strategy.
	pub fn has_custom(&self) -> bool {
		self.custom.is_some()
	}

	/// Resolved strategy: custom generator first, then faker hint on required
	/// fields, then the kind's default.
	pub fn strategy(&self) -> GenerationStrategy {
		if let Some(custom) = &self.custom {
			return GenerationStrategy::Custom(Arc::clone(custom));
		}
		match (&self.kind, self.faker) {
			(PropertyKind::Field(_), Some(faker)) => GenerationStrategy::Fake(faker),
			(kind, _) => kind.default_strategy(),
		}
	}
}

impl fmt::Debug for PropertyDescriptor {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("PropertyDescriptor")
			.field("name", &self.name)
			.field("kind", &self.kind)
			.field("custom", &self.custom.is_some())
			.field("faker", &self.faker)
			.finish()
	}
}
