//! Test utilities for seedbed.
//!
//! Provides reference models covering every property kind, a reference
//! [`TestModelsSeeder`], a [`SeededTestCase`] harness and rstest fixtures.

#![warn(missing_docs)]

pub mod fixtures;
pub mod logging;
pub mod models;
pub mod seeder;
pub mod testcase;

pub use fixtures::{factory, memory_db, seeded_db};
pub use logging::init_test_logging;
pub use seeder::TestModelsSeeder;
pub use testcase::SeededTestCase;
