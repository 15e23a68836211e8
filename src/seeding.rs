//! Seeding engine module.
//!
//! This module provides the random generator, model schemas, the model
//! factory, seed units and seeders.
//!
//! # Examples
//!
//! ```rust,no_run
//! use seedbed::seeding::seed::{Seed, SiblingSeed};
//! use seedbed::seeding::seeder::{SeedPlan, Seeder};
//! ```

pub use seedbed_seeding::*;
