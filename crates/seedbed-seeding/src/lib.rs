//! Random model seeding for integration tests.
//!
//! Given models that declare their properties and relationships, this crate
//! fills a database with syntactically valid random rows in dependency order:
//!
//! - **Generator** ([`random`]): random values per declared type, enum case
//!   sampling, faker hints
//! - **Introspection** ([`schema`]): per-model property classification, cached
//!   per type
//! - **Factory** ([`factory`]): random instances with required parent
//!   references resolved from persisted rows
//! - **Relationships** ([`relations`]): parent, child and many-to-many
//!   attachment of existing rows
//! - **Orchestration** ([`seed`], [`seeder`]): seed units run strictly in
//!   order, with up-front plan validation
//!
//! # Features
//!
//! - `yaml` - load [`FactoryConfig`](config::FactoryConfig) from YAML
//! - `full` - All features enabled
//!
//! # Quick Start
//!
//! ```ignore
//! use seedbed_seeding::prelude::*;
//! use std::sync::Arc;
//!
//! let factory = Arc::new(ModelFactory::new(FactoryConfig::default().with_rng_seed(1))?);
//!
//! let report = SeedPlan::new()
//!     .add(Seed::<ClassModel>::new(factory.clone()).with_count(10))
//!     .add(Seed::<StudentModel>::new(factory.clone()).with_count(20))
//!     .add(SiblingSeed::<EnrollmentModel>::new().with_count(5))
//!     .run(&db)
//!     .await?;
//! ```
//!
//! A parent reference is resolved by sampling a row that already exists. A
//! plan that seeds a child before its parent fails validation. With validation
//! off it fails at seed time with [`SeedingError::OrderingViolation`].

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod factory;
pub mod prelude;
pub mod random;
pub mod relations;
pub mod schema;
pub mod seed;
pub mod seeder;

pub use error::{SeedingError, SeedingResult};
