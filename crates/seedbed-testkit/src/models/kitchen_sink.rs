use chrono::{DateTime, Utc};
use seedbed_db::Model;
use seedbed_seeding::random::{FakerType, ScalarType};
use seedbed_seeding::schema::{Group, GroupSchema, SchemaBuilder, Seedable};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{ParentModel, TestIntEnum, TestRawIntEnum, TestRawStringEnum, TestStringEnum};

/// Nested object embedded in [`KitchenSink`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KitchenSinkGroup {
	/// Required text.
	pub string_field: String,
	/// Required integer.
	pub int_field: i64,
	/// Optional text.
	pub optional_string_field: Option<String>,
}

impl Group for KitchenSinkGroup {
	fn group_schema() -> GroupSchema {
		GroupSchema::new("KitchenSinkGroup")
			.field("string_field", ScalarType::String)
			.field("int_field", ScalarType::Integer)
			.optional_field("optional_string_field", ScalarType::String)
	}
}

/// A model with one property of every kind the generator supports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KitchenSink {
	/// UUID primary key.
	pub id: Option<Uuid>,
	/// Required text.
	pub string_field: String,
	/// Optional text, never generated.
	pub optional_string_field: Option<String>,
	/// Required integer.
	pub int_field: i64,
	/// Required float.
	pub double_field: f64,
	/// Required boolean.
	pub bool_field: bool,
	/// Required date-time.
	pub date_field: DateTime<Utc>,
	/// Required UUID value.
	pub uuid_field: Uuid,
	/// Faker-generated email.
	pub email_field: String,
	/// Enum stored by name.
	pub string_enum: TestStringEnum,
	/// Optional enum, never generated.
	pub optional_string_enum: Option<TestStringEnum>,
	/// Enum stored by discriminant.
	pub int_enum: TestIntEnum,
	/// Enum stored by renamed raw string.
	pub raw_string_enum: TestRawStringEnum,
	/// Enum stored by explicit raw integer.
	pub raw_int_enum: TestRawIntEnum,
	/// Embedded object.
	pub group: KitchenSinkGroup,
	/// Optional parent reference, never generated.
	pub optional_parent_id: Option<i64>,
	/// Creation timestamp, maintained by the store.
	pub created_at: Option<DateTime<Utc>>,
	/// Update timestamp, maintained by the store.
	pub updated_at: Option<DateTime<Utc>>,
}

impl Model for KitchenSink {
	type PrimaryKey = Uuid;

	fn table_name() -> &'static str {
		"kitchen_sinks"
	}

	fn primary_key(&self) -> Option<&Uuid> {
		self.id.as_ref()
	}

	fn set_primary_key(&mut self, value: Uuid) {
		self.id = Some(value);
	}
}

impl Seedable for KitchenSink {
	fn describe(schema: SchemaBuilder) -> SchemaBuilder {
		schema
			.id()
			.field("string_field", ScalarType::String)
			.optional_field("optional_string_field", ScalarType::String)
			.field("int_field", ScalarType::Integer)
			.field("double_field", ScalarType::Float)
			.field("bool_field", ScalarType::Boolean)
			.field("date_field", ScalarType::Date)
			.field("uuid_field", ScalarType::Uuid)
			.faker("email_field", FakerType::Email)
			.enumeration::<TestStringEnum>("string_enum")
			.optional_enumeration::<TestStringEnum>("optional_string_enum")
			.enumeration::<TestIntEnum>("int_enum")
			.enumeration::<TestRawStringEnum>("raw_string_enum")
			.enumeration::<TestRawIntEnum>("raw_int_enum")
			.group::<KitchenSinkGroup>("group")
			.optional_parent::<ParentModel>("optional_parent_id")
			.timestamp("created_at")
			.timestamp("updated_at")
	}
}
