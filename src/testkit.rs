//! Testing utilities module.
//!
//! Reference models, the reference seeder, a seeded test case and rstest
//! fixtures.
//!
//! # Examples
//!
//! ```rust,no_run
//! use seedbed::testkit::{SeededTestCase, TestModelsSeeder};
//! ```

pub use seedbed_testkit::*;
