//! Reference models covering every property kind and relationship shape.

mod enums;
mod family;
mod kitchen_sink;
mod school;

pub use enums::{TestIntEnum, TestRawIntEnum, TestRawStringEnum, TestStringEnum};
pub use family::{ChildModel, ParentModel};
pub use kitchen_sink::{KitchenSink, KitchenSinkGroup};
pub use school::{ClassModel, EnrollmentModel, StudentModel};

use seedbed_seeding::SeedingResult;
use seedbed_seeding::factory::ModelFactory;

/// Registers every enum used by the reference models.
pub fn register_test_enums(factory: &ModelFactory) -> SeedingResult<()> {
	factory.register_enum::<TestStringEnum>()?;
	factory.register_enum::<TestIntEnum>()?;
	factory.register_enum::<TestRawStringEnum>()?;
	factory.register_enum::<TestRawIntEnum>()?;
	Ok(())
}
