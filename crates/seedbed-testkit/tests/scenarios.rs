//! End-to-end seeding of the reference models.

use rstest::*;
use seedbed_db::{Database, DatabaseExt, Filter, MemoryDatabase, Query};
use seedbed_seeding::SeedingError;
use seedbed_seeding::factory::ModelFactory;
use seedbed_seeding::seed::{Seed, SiblingSeed};
use seedbed_seeding::seeder::{SeedPlan, Seeder};
use seedbed_seeding::random::RandomEnum;
use seedbed_seeding::relations::SiblingSeedDirection;
use seedbed_testkit::models::{
	ChildModel, ClassModel, EnrollmentModel, KitchenSink, ParentModel, StudentModel, TestRawIntEnum,
};
use seedbed_testkit::{SeededTestCase, TestModelsSeeder, factory, memory_db, seeded_db};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

#[rstest]
#[tokio::test]
async fn test_reference_seeder_row_counts(#[future] seeded_db: Arc<MemoryDatabase>) {
	let db = seeded_db.await;

	assert_eq!(db.row_count("kitchen_sinks"), 5);
	assert_eq!(db.row_count("students"), 20);
	assert_eq!(db.row_count("classes"), 10);
	assert_eq!(db.row_count("parents"), 5);
	assert_eq!(db.row_count("children"), 10);
	assert_eq!(db.row_count("enrollments"), 20 * 5);
}

#[rstest]
#[tokio::test]
async fn test_every_student_has_classes_per_student_classes(
	#[future] seeded_db: Arc<MemoryDatabase>,
) {
	let db = seeded_db.await;
	let students: Vec<StudentModel> = db.all_models(&Query::of::<StudentModel>()).await.unwrap();
	let class_ids: HashSet<i64> = db
		.all_models::<ClassModel>(&Query::of::<ClassModel>())
		.await
		.unwrap()
		.into_iter()
		.filter_map(|class| class.id)
		.collect();

	for student in students {
		let student_id = student.id.unwrap();
		let enrollments: Vec<EnrollmentModel> = db
			.all_models(&Query::of::<EnrollmentModel>().filter(Filter::eq("student_id", student_id)))
			.await
			.unwrap();
		assert_eq!(enrollments.len(), 5, "student {}", student_id);

		let distinct: HashSet<i64> = enrollments.iter().map(|e| e.class_id).collect();
		assert_eq!(distinct.len(), 5);
		assert!(distinct.is_subset(&class_ids));
	}
}

#[rstest]
#[tokio::test]
async fn test_every_child_has_an_existing_parent(#[future] seeded_db: Arc<MemoryDatabase>) {
	let db = seeded_db.await;
	let parent_ids: HashSet<i64> = db
		.all_models::<ParentModel>(&Query::of::<ParentModel>())
		.await
		.unwrap()
		.into_iter()
		.filter_map(|parent| parent.id)
		.collect();
	let children: Vec<ChildModel> = db.all_models(&Query::of::<ChildModel>()).await.unwrap();

	assert_eq!(children.len(), 10);
	for child in children {
		assert!(parent_ids.contains(&child.parent_id));
	}
}

#[rstest]
#[tokio::test]
async fn test_kitchen_sink_generated_and_skipped_fields(#[future] seeded_db: Arc<MemoryDatabase>) {
	let db = seeded_db.await;
	let sinks: Vec<KitchenSink> = db.all_models(&Query::of::<KitchenSink>()).await.unwrap();

	assert_eq!(sinks.len(), 5);
	let ids: HashSet<_> = sinks.iter().map(|sink| sink.id.unwrap()).collect();
	assert_eq!(ids.len(), 5);
	for sink in &sinks {
		assert!(!sink.string_field.is_empty());
		assert!(sink.email_field.contains('@'));
		assert!((0..=10000).contains(&sink.int_field));
		assert!(sink.optional_string_field.is_none());
		assert!(sink.optional_string_enum.is_none());
		assert!(sink.optional_parent_id.is_none());
		assert!(sink.group.optional_string_field.is_none());
		assert!(sink.created_at.is_none());
		assert!(sink.updated_at.is_none());
	}
}

#[rstest]
#[tokio::test]
async fn test_kitchen_sink_raw_enums_store_raw_values(#[future] seeded_db: Arc<MemoryDatabase>) {
	let db = seeded_db.await;
	let rows = db.fetch_all(&Query::of::<KitchenSink>()).await.unwrap();

	assert_eq!(rows.len(), 5);
	for row in &rows {
		let raw_string = row["raw_string_enum"].as_str().unwrap();
		assert!(["first", "second-value", "THIRD"].contains(&raw_string));
		let raw_int = row["raw_int_enum"].as_i64().unwrap();
		assert!([-1, 10, 250].contains(&raw_int));
	}
	let sinks: Vec<KitchenSink> = db.all_models(&Query::of::<KitchenSink>()).await.unwrap();
	assert!(sinks.iter().all(|sink| TestRawIntEnum::all_cases().contains(&sink.raw_int_enum)));
}

#[rstest]
#[tokio::test]
async fn test_right_to_left_links_students_to_every_class(
	memory_db: Arc<MemoryDatabase>,
	factory: Arc<ModelFactory>,
) {
	let plan = SeedPlan::new()
		.add(Seed::<StudentModel>::new(factory.clone()).with_count(8))
		.add(Seed::<ClassModel>::new(factory.clone()).with_count(4))
		.add(
			SiblingSeed::<EnrollmentModel>::new()
				.with_count(3)
				.with_direction(SiblingSeedDirection::RightToLeft),
		);
	let report = plan.run(memory_db.as_ref()).await.unwrap();

	assert_eq!(report.total_linked(), 4 * 3);
	let enrollments: Vec<EnrollmentModel> = memory_db
		.all_models(&Query::of::<EnrollmentModel>())
		.await
		.unwrap();
	let mut per_class: HashMap<i64, usize> = HashMap::new();
	for enrollment in enrollments {
		*per_class.entry(enrollment.class_id).or_default() += 1;
	}
	assert_eq!(per_class.len(), 4);
	assert!(per_class.values().all(|&count| count == 3));
}

#[rstest]
#[tokio::test]
async fn test_children_before_parents_is_rejected(
	memory_db: Arc<MemoryDatabase>,
	factory: Arc<ModelFactory>,
) {
	let plan = SeedPlan::new()
		.add(Seed::<ChildModel>::new(factory.clone()).with_count(3))
		.add(Seed::<ParentModel>::new(factory.clone()).with_count(3));

	let err = plan.run(memory_db.as_ref()).await.unwrap_err();
	assert!(matches!(err, SeedingError::PlanOrder { .. }));
	assert!(err.is_fatal());
	assert_eq!(memory_db.stats().writes(), 0);
}

#[rstest]
#[tokio::test]
async fn test_seeded_test_case_lifecycle() {
	let case = SeededTestCase::new().unwrap();
	assert!(!case.is_setup_called().await);

	case.setup().await.unwrap();
	let report = case.report().await.unwrap();
	assert_eq!(report.unit("seed(children)").unwrap().created, 10);
	assert_eq!(report.unit("sibling_seed(enrollments)").unwrap().linked, 100);
	assert_eq!(report.unit("parent_seed(parents -> children)").unwrap().linked, 10);

	case.teardown().await.unwrap();
	assert!(case.is_teardown_called().await);
	assert!(case.db().table_names().iter().all(|table| case.db().row_count(table) == 0));
}

#[rstest]
#[tokio::test]
async fn test_custom_counts(memory_db: Arc<MemoryDatabase>) {
	let mut seeder = TestModelsSeeder::new().unwrap();
	seeder.student_count = 3;
	seeder.class_count = 2;
	seeder.classes_per_student = 2;
	seeder.child_count = 0;

	seeder.prepare(memory_db.as_ref()).await.unwrap();

	assert_eq!(memory_db.row_count("students"), 3);
	assert_eq!(memory_db.row_count("enrollments"), 3 * 2);
	assert_eq!(memory_db.row_count("children"), 0);
}
