//! Database capability module.
//!
//! Model traits, queries and the in-memory backend.
//!
//! # Examples
//!
//! ```rust,no_run
//! use seedbed::db::{Database, MemoryDatabase, Query};
//! ```

pub use seedbed_db::*;
