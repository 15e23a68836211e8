use seedbed_db::{Model, Pivot};
use seedbed_seeding::random::FakerType;
use seedbed_seeding::schema::{SchemaBuilder, Seedable};
use serde::{Deserialize, Serialize};

/// A student, enrolled in many classes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentModel {
	/// Primary key.
	pub id: Option<i64>,
	/// Full name.
	pub name: String,
}

impl Model for StudentModel {
	type PrimaryKey = i64;

	fn table_name() -> &'static str {
		"students"
	}

	fn primary_key(&self) -> Option<&i64> {
		self.id.as_ref()
	}

	fn set_primary_key(&mut self, value: i64) {
		self.id = Some(value);
	}
}

impl Seedable for StudentModel {
	fn describe(schema: SchemaBuilder) -> SchemaBuilder {
		schema
			.id()
			.faker("name", FakerType::Name)
			.siblings::<ClassModel, EnrollmentModel>("classes")
	}
}

/// A class, attended by many students.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassModel {
	/// Primary key.
	pub id: Option<i64>,
	/// Class name.
	pub name: String,
}

impl Model for ClassModel {
	type PrimaryKey = i64;

	fn table_name() -> &'static str {
		"classes"
	}

	fn primary_key(&self) -> Option<&i64> {
		self.id.as_ref()
	}

	fn set_primary_key(&mut self, value: i64) {
		self.id = Some(value);
	}
}

impl Seedable for ClassModel {
	fn describe(schema: SchemaBuilder) -> SchemaBuilder {
		schema
			.id()
			.faker("name", FakerType::Word)
			.siblings::<StudentModel, EnrollmentModel>("students")
	}
}

/// Pivot between [`StudentModel`] and [`ClassModel`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrollmentModel {
	/// Primary key.
	pub id: Option<i64>,
	/// Enrolled student.
	pub student_id: i64,
	/// Class enrolled in.
	pub class_id: i64,
}

impl Model for EnrollmentModel {
	type PrimaryKey = i64;

	fn table_name() -> &'static str {
		"enrollments"
	}

	fn primary_key(&self) -> Option<&i64> {
		self.id.as_ref()
	}

	fn set_primary_key(&mut self, value: i64) {
		self.id = Some(value);
	}
}

impl Pivot for EnrollmentModel {
	type Left = StudentModel;
	type Right = ClassModel;

	fn left_key() -> &'static str {
		"student_id"
	}

	fn right_key() -> &'static str {
		"class_id"
	}

	fn link(left: &i64, right: &i64) -> Self {
		Self {
			id: None,
			student_id: *left,
			class_id: *right,
		}
	}
}
