//! Convenience re-exports for common usage.
//!
//! ```ignore
//! use seedbed_seeding::prelude::*;
//! ```

// Error types
pub use crate::error::{SeedingError, SeedingResult};

// Configuration
pub use crate::config::{FactoryConfig, GeneratorSettings};

// Schema declaration
pub use crate::random::{FakerType, RandomEnum, ScalarType, TypeRef};
pub use crate::schema::{Group, GroupSchema, ModelRef, SchemaBuilder, Seedable, classify};

// Factory types
pub use crate::factory::{ModelFactory, ModelSeedExt};

// Relationships
pub use crate::relations::{AttachReport, SiblingSeedDirection};

// Seed units and orchestration
pub use crate::seed::{AllChildrenSeed, ChildSeed, ParentSeed, Seed, SeedUnit, SiblingSeed, UnitReport};
pub use crate::seeder::{PlanValidation, SeedPlan, SeedReport, Seeder, SeederOptions};

// Database capability
pub use seedbed_db::{Database, DatabaseExt, Filter, ForeignKey, Model, Pivot, Query};
