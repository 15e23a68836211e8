//! Type-keyed cache of classified schemas.

use std::any::TypeId;
use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;

use super::{ModelRef, ModelSchema, SchemaBuilder, Seedable};
use crate::error::SeedingResult;

/// Global schema cache.
static SCHEMA_REGISTRY: Lazy<RwLock<HashMap<TypeId, Arc<ModelSchema>>>> =
	Lazy::new(|| RwLock::new(HashMap::new()));

/// Classifies the properties of `M`.
///
/// The declaration is evaluated on first use and cached; later calls return
/// the cached schema. Invalid declarations are reported every time and never
/// cached.
pub fn classify<M: Seedable>() -> SeedingResult<Arc<ModelSchema>> {
	let type_id = TypeId::of::<M>();
	if let Some(schema) = SCHEMA_REGISTRY.read().get(&type_id) {
		return Ok(Arc::clone(schema));
	}

	let schema = M::describe(SchemaBuilder::new(ModelRef::seedable::<M>())).build()?;
	tracing::debug!(
		model = M::table_name(),
		properties = schema.properties().len(),
		"model schema classified"
	);
	let mut registry = SCHEMA_REGISTRY.write();
	Ok(Arc::clone(
		registry.entry(type_id).or_insert_with(|| Arc::new(schema)),
	))
}

/// Handle over the global schema cache.
#[derive(Debug, Default)]
pub struct SchemaRegistry;

impl SchemaRegistry {
	/// Creates a new registry handle.
	pub fn new() -> Self {
		Self
	}

	/// Cached schema of `M`, classifying it when absent.
	pub fn get<M: Seedable>(&self) -> SeedingResult<Arc<ModelSchema>> {
		classify::<M>()
	}

	/// Cached schema by type identity, without classifying.
	pub fn get_cached(&self, type_id: TypeId) -> Option<Arc<ModelSchema>> {
		SCHEMA_REGISTRY.read().get(&type_id).cloned()
	}

	/// Returns true if `M` has been classified.
	pub fn contains<M: Seedable>(&self) -> bool {
		SCHEMA_REGISTRY.read().contains_key(&TypeId::of::<M>())
	}

	/// Number of cached schemas.
	pub fn len(&self) -> usize {
		SCHEMA_REGISTRY.read().len()
	}

	/// Returns true if nothing has been classified.
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Drops every cached schema (primarily for testing).
	pub fn clear(&self) {
		SCHEMA_REGISTRY.write().clear();
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::random::ScalarType;
	use rstest::rstest;
	use seedbed_db::Model;
	use serde::{Deserialize, Serialize};

	#[derive(Debug, Clone, Serialize, Deserialize)]
	struct Widget {
		id: Option<i64>,
		label: String,
	}

	impl Model for Widget {
		type PrimaryKey = i64;

		fn table_name() -> &'static str {
			"widgets"
		}

		fn primary_key(&self) -> Option<&i64> {
			self.id.as_ref()
		}

		fn set_primary_key(&mut self, value: i64) {
			self.id = Some(value);
		}
	}

	impl Seedable for Widget {
		fn describe(schema: SchemaBuilder) -> SchemaBuilder {
			schema.id().field("label", ScalarType::String)
		}
	}

	#[rstest]
	fn test_classify_is_cached() {
		let first = classify::<Widget>().unwrap();
		let second = classify::<Widget>().unwrap();
		assert!(Arc::ptr_eq(&first, &second));

		let registry = SchemaRegistry::new();
		assert!(registry.contains::<Widget>());
		assert!(!registry.is_empty());
		assert!(registry.get_cached(TypeId::of::<Widget>()).is_some());
	}

	#[rstest]
	fn test_schema_reachable_from_model_ref() {
		let reference = ModelRef::seedable::<Widget>();
		let schema = reference.schema().unwrap().unwrap();
		assert_eq!(schema.model(), ModelRef::of::<Widget>());
		assert!(ModelRef::of::<Widget>().schema().is_none());
	}
}
