//! Random value generation.
//!
//! [`RandomGenerator`] turns a [`TypeRef`] into a JSON value of that type.
//! Enum types must be registered with their case set first; groups are
//! generated field by field.

mod faker;
mod generator;

pub use faker::FakerType;
pub use generator::RandomGenerator;

use serde::Serialize;
use std::any::TypeId;
use std::fmt;

use crate::schema::GroupSchema;

/// Primitive column types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarType {
	/// Text.
	String,
	/// 64-bit signed integer.
	Integer,
	/// 64-bit float.
	Float,
	/// Boolean.
	Boolean,
	/// UTC date-time, encoded as RFC 3339.
	Date,
	/// UUID, encoded in hyphenated form.
	Uuid,
}

/// An enum whose cases can be sampled.
///
/// Cases are stored as their serde representation, so the values written to a
/// record are exactly what the model's field deserializes from.
///
/// # Examples
///
/// ```
/// use seedbed_seeding::random::RandomEnum;
/// use serde::Serialize;
///
/// #[derive(Debug, Clone, Serialize)]
/// enum Level { Low, High }
///
/// impl RandomEnum for Level {
///     fn all_cases() -> Vec<Self> {
///         vec![Level::Low, Level::High]
///     }
/// }
/// ```
pub trait RandomEnum: Serialize + Send + Sync + 'static {
	/// Every case of the enum.
	fn all_cases() -> Vec<Self>
	where
		Self: Sized;

	/// Name used in error messages.
	fn enum_name() -> &'static str
	where
		Self: Sized,
	{
		std::any::type_name::<Self>()
	}
}

/// Reference to a [`RandomEnum`] type.
#[derive(Clone, Copy)]
pub struct EnumRef {
	type_id: TypeId,
	name: &'static str,
}

impl EnumRef {
	/// Reference to `E`.
	pub fn of<E: RandomEnum>() -> Self {
		Self {
			type_id: TypeId::of::<E>(),
			name: E::enum_name(),
		}
	}

	/// Type identity of the enum.
	pub fn type_id(&self) -> TypeId {
		self.type_id
	}

	/// Enum name.
	pub fn name(&self) -> &'static str {
		self.name
	}
}

impl PartialEq for EnumRef {
	fn eq(&self, other: &Self) -> bool {
		self.type_id == other.type_id
	}
}

impl Eq for EnumRef {}

impl fmt::Debug for EnumRef {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("EnumRef").field(&self.name).finish()
	}
}

/// Type descriptor understood by the generator.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeRef {
	/// Primitive value.
	Scalar(ScalarType),
	/// One case of a registered enum.
	Enum(EnumRef),
	/// Nested object.
	Group(GroupSchema),
}

impl From<ScalarType> for TypeRef {
	fn from(scalar: ScalarType) -> Self {
		Self::Scalar(scalar)
	}
}

impl From<EnumRef> for TypeRef {
	fn from(reference: EnumRef) -> Self {
		Self::Enum(reference)
	}
}

impl From<GroupSchema> for TypeRef {
	fn from(group: GroupSchema) -> Self {
		Self::Group(group)
	}
}
