use crate::random::{FakerType, ScalarType, TypeRef};

/// Field of an embedded group.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupField {
	/// Key inside the nested object.
	pub name: &'static str,
	/// Value type.
	pub ty: TypeRef,
	/// Optional fields are generated as null.
	pub optional: bool,
	/// Faker hint for string fields.
	pub faker: Option<FakerType>,
}

/// Shape of an embedded nested object.
///
/// # Examples
///
/// ```
/// use seedbed_seeding::random::{FakerType, ScalarType};
/// use seedbed_seeding::schema::GroupSchema;
///
/// let address = GroupSchema::new("Address")
///     .faker("street", FakerType::Street)
///     .field("number", ScalarType::Integer)
///     .optional_field("unit", ScalarType::String);
/// assert_eq!(address.fields().len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GroupSchema {
	name: &'static str,
	fields: Vec<GroupField>,
}

impl GroupSchema {
	/// Creates an empty group.
	pub fn new(name: &'static str) -> Self {
		Self {
			name,
			fields: Vec::new(),
		}
	}

	fn push(mut self, name: &'static str, ty: TypeRef, optional: bool, faker: Option<FakerType>) -> Self {
		self.fields.push(GroupField {
			name,
			ty,
			optional,
			faker,
		});
		self
	}

	/// Adds a required field.
	pub fn field(self, name: &'static str, ty: impl Into<TypeRef>) -> Self {
		self.push(name, ty.into(), false, None)
	}

	/// Adds an optional field.
	pub fn optional_field(self, name: &'static str, ty: impl Into<TypeRef>) -> Self {
		self.push(name, ty.into(), true, None)
	}

	/// Adds a required string field filled from a faker hint.
	pub fn faker(self, name: &'static str, faker: FakerType) -> Self {
		self.push(name, TypeRef::Scalar(ScalarType::String), false, Some(faker))
	}

	/// Group name.
	pub fn name(&self) -> &'static str {
		self.name
	}

	/// Fields in declaration order.
	pub fn fields(&self) -> &[GroupField] {
		&self.fields
	}
}

/// A struct embedded in a model as a nested object.
pub trait Group {
	/// Shape of the nested object.
	fn group_schema() -> GroupSchema;
}
