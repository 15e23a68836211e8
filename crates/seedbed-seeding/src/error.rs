//! Error types for the seeding engine.

use seedbed_db::DatabaseError;
use thiserror::Error;

/// Errors that can occur while generating or seeding models.
#[derive(Debug, Error)]
pub enum SeedingError {
	/// A required parent lookup or relationship attachment found no rows of the
	/// type it depends on. The plan seeded `dependency` too late (or never).
	#[error("Ordering violation: cannot seed {model} because no {dependency} rows exist")]
	OrderingViolation {
		/// Model being created or attached.
		model: String,
		/// Model whose rows were expected to exist.
		dependency: String,
	},

	/// An enum type was used before its cases were registered.
	#[error("Unregistered enum: {0}")]
	UnregisteredEnum(String),

	/// A model schema declaration is invalid.
	#[error("Schema error for {model}: {message}")]
	Schema {
		/// Model whose declaration failed.
		model: String,
		/// What was wrong.
		message: String,
	},

	/// A randomly generated record could not be decoded into its model.
	#[error("Failed to decode random {model}: {source}")]
	Decode {
		/// Model being generated.
		model: String,
		/// Underlying serde error.
		source: serde_json::Error,
	},

	/// Database operation failed.
	#[error("Database error: {0}")]
	Database(#[from] DatabaseError),

	/// JSON serialization/deserialization error.
	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),

	/// The ParentRef graph of the seeded models contains a cycle.
	#[error("Seed plan has a dependency cycle between: {}", .0.join(", "))]
	PlanCycle(Vec<String>),

	/// A unit requires a model that no earlier unit produces.
	#[error("Seed unit `{unit}` requires {model}, which no earlier unit seeds")]
	PlanOrder {
		/// Name of the offending unit.
		unit: String,
		/// Model it depends on.
		model: String,
	},

	/// Invalid configuration value.
	#[error("Configuration error: {0}")]
	Config(String),

	/// Configuration file could not be read.
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	/// TOML configuration could not be parsed.
	#[error("TOML error: {0}")]
	Toml(#[from] toml::de::Error),

	/// YAML configuration could not be parsed (when yaml feature is enabled).
	#[cfg(feature = "yaml")]
	#[error("YAML error: {0}")]
	Yaml(#[from] serde_yaml::Error),
}

impl SeedingError {
	/// Returns true for errors caused by how the plan or the models were
	/// declared. Running the same plan again fails the same way.
	pub fn is_fatal(&self) -> bool {
		matches!(
			self,
			Self::OrderingViolation { .. }
				| Self::UnregisteredEnum(_)
				| Self::Schema { .. }
				| Self::PlanCycle(_)
				| Self::PlanOrder { .. }
		)
	}

	pub(crate) fn ordering(model: impl Into<String>, dependency: impl Into<String>) -> Self {
		let error = Self::OrderingViolation {
			model: model.into(),
			dependency: dependency.into(),
		};
		tracing::error!(%error, "seeding order violated");
		error
	}
}

/// Result type alias for seeding operations.
pub type SeedingResult<T> = Result<T, SeedingError>;

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_ordering_violation_display() {
		let error = SeedingError::OrderingViolation {
			model: "children".to_string(),
			dependency: "parents".to_string(),
		};
		assert_eq!(
			error.to_string(),
			"Ordering violation: cannot seed children because no parents rows exist"
		);
		assert!(error.is_fatal());
	}

	#[rstest]
	fn test_plan_cycle_display() {
		let error = SeedingError::PlanCycle(vec!["a".to_string(), "b".to_string()]);
		assert_eq!(
			error.to_string(),
			"Seed plan has a dependency cycle between: a, b"
		);
	}

	#[rstest]
	fn test_database_error_is_not_fatal() {
		let error: SeedingError = DatabaseError::Backend("connection reset".to_string()).into();
		assert!(matches!(error, SeedingError::Database(_)));
		assert!(!error.is_fatal());
	}

	#[rstest]
	fn test_json_error_from() {
		let json_error = serde_json::from_str::<serde_json::Value>("nope").unwrap_err();
		let error: SeedingError = json_error.into();
		assert!(matches!(error, SeedingError::Json(_)));
	}
}
