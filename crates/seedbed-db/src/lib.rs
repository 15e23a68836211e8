//! # seedbed-db
//!
//! The database capability the seedbed seeding engine is written against.
//!
//! - [`Database`]: object-safe async storage operations (fetch, random
//!   sampling, find, create, save)
//! - [`DatabaseExt`]: typed helpers that encode and decode [`Model`]s
//! - [`Query`] / [`Filter`]: owned, connection-free query descriptions
//! - [`ForeignKey`] / [`Pivot`]: relationship descriptors
//! - [`MemoryDatabase`]: an in-process backend
//!
//! Rows travel as JSON [`Record`]s so that any model that round-trips through
//! serde can be stored.

#![warn(missing_docs)]

pub mod associations;
pub mod database;
pub mod error;
pub mod memory;
pub mod model;
pub mod query;
pub mod record;

pub use associations::{ForeignKey, Pivot};
pub use database::{Database, DatabaseExt, decode_record, encode_model};
pub use error::{DatabaseError, DatabaseResult};
pub use memory::{MemoryDatabase, OperationStats};
pub use model::{KeyKind, Model, PrimaryKey, TableRef};
pub use query::{Filter, FilterOp, Query};
pub use record::{Record, RecordId};
