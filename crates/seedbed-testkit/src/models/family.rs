use seedbed_db::{ForeignKey, Model};
use seedbed_seeding::random::FakerType;
use seedbed_seeding::schema::{SchemaBuilder, Seedable};
use serde::{Deserialize, Serialize};

/// Parent side of a one-to-many relation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParentModel {
	/// Primary key.
	pub id: Option<i64>,
	/// Display name.
	pub name: String,
}

impl Model for ParentModel {
	type PrimaryKey = i64;

	fn table_name() -> &'static str {
		"parents"
	}

	fn primary_key(&self) -> Option<&i64> {
		self.id.as_ref()
	}

	fn set_primary_key(&mut self, value: i64) {
		self.id = Some(value);
	}
}

impl Seedable for ParentModel {
	fn describe(schema: SchemaBuilder) -> SchemaBuilder {
		schema
			.id()
			.faker("name", FakerType::LastName)
			.children::<ChildModel>("children")
	}
}

/// Child side of a one-to-many relation; always has a parent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildModel {
	/// Primary key.
	pub id: Option<i64>,
	/// Display name.
	pub name: String,
	/// Owning parent.
	pub parent_id: i64,
}

impl ChildModel {
	/// Foreign key from children to their parent.
	pub fn parent() -> ForeignKey<ChildModel, ParentModel> {
		ForeignKey::new("parent_id")
	}
}

impl Model for ChildModel {
	type PrimaryKey = i64;

	fn table_name() -> &'static str {
		"children"
	}

	fn primary_key(&self) -> Option<&i64> {
		self.id.as_ref()
	}

	fn set_primary_key(&mut self, value: i64) {
		self.id = Some(value);
	}
}

impl Seedable for ChildModel {
	fn describe(schema: SchemaBuilder) -> SchemaBuilder {
		schema
			.id()
			.faker("name", FakerType::FirstName)
			.parent::<ParentModel>("parent_id")
	}
}
