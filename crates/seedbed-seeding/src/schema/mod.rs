//! Model field introspection.
//!
//! Models declare their properties once through [`Seedable::describe`]. The
//! resulting [`ModelSchema`] is cached per type by [`classify`] and tells the
//! factory how to fill every column.

mod builder;
mod group;
mod property;
mod registry;

pub use builder::{ModelSchema, SchemaBuilder};
pub use group::{Group, GroupField, GroupSchema};
pub use property::{CustomGenerator, GenerationStrategy, PropertyDescriptor, PropertyKind};
pub use registry::{SchemaRegistry, classify};

use seedbed_db::{Model, TableRef};
use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::error::SeedingResult;

/// A model whose properties can be randomly generated.
///
/// # Examples
///
/// ```
/// use seedbed_db::Model;
/// use seedbed_seeding::random::{FakerType, ScalarType};
/// use seedbed_seeding::schema::{SchemaBuilder, Seedable, classify};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, Clone, Serialize, Deserialize)]
/// struct Post {
///     id: Option<i64>,
///     title: String,
///     views: i64,
/// }
///
/// impl Model for Post {
///     type PrimaryKey = i64;
///     fn table_name() -> &'static str { "posts" }
///     fn primary_key(&self) -> Option<&i64> { self.id.as_ref() }
///     fn set_primary_key(&mut self, value: i64) { self.id = Some(value); }
/// }
///
/// impl Seedable for Post {
///     fn describe(schema: SchemaBuilder) -> SchemaBuilder {
///         schema
///             .id()
///             .faker("title", FakerType::Sentence)
///             .field("views", ScalarType::Integer)
///     }
/// }
///
/// let schema = classify::<Post>().unwrap();
/// assert_eq!(schema.properties().len(), 3);
/// ```
pub trait Seedable: Model {
	/// Declares the model's properties.
	fn describe(schema: SchemaBuilder) -> SchemaBuilder;
}

type SchemaFn = fn() -> SeedingResult<Arc<ModelSchema>>;

/// Type-erased reference to a model type.
///
/// Equality and hashing use the type identity only.
#[derive(Clone, Copy)]
pub struct ModelRef {
	type_id: TypeId,
	table: TableRef,
	schema: Option<SchemaFn>,
}

impl ModelRef {
	/// Reference to any model.
	pub fn of<M: Model>() -> Self {
		Self {
			type_id: TypeId::of::<M>(),
			table: M::table(),
			schema: None,
		}
	}

	/// Reference to a seedable model; its schema is reachable through
	/// [`ModelRef::schema`].
	pub fn seedable<M: Seedable>() -> Self {
		Self {
			schema: Some(classify::<M> as SchemaFn),
			..Self::of::<M>()
		}
	}

	/// Type identity.
	pub fn type_id(&self) -> TypeId {
		self.type_id
	}

	/// Table name, used as the model's display name.
	pub fn name(&self) -> &'static str {
		self.table.name
	}

	/// Table description.
	pub fn table(&self) -> TableRef {
		self.table
	}

	/// Classified schema, when the reference was made from a seedable model.
	pub fn schema(&self) -> Option<SeedingResult<Arc<ModelSchema>>> {
		self.schema.map(|classify| classify())
	}
}

impl PartialEq for ModelRef {
	fn eq(&self, other: &Self) -> bool {
		self.type_id == other.type_id
	}
}

impl Eq for ModelRef {}

impl Hash for ModelRef {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.type_id.hash(state);
	}
}

impl fmt::Debug for ModelRef {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("ModelRef").field(&self.table.name).finish()
	}
}

impl fmt::Display for ModelRef {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.table.name)
	}
}
