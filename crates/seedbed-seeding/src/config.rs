//! Factory configuration.
//!
//! [`FactoryConfig`] is an explicit value handed to
//! [`ModelFactory::new`](crate::factory::ModelFactory::new). It can be built in
//! code with the `with_*` methods or loaded from TOML (and YAML with the `yaml`
//! feature). Missing keys fall back to their defaults.
//!
//! ```toml
//! rng_seed = 42
//! batch_concurrency = 4
//!
//! [generator]
//! integer_min = 0
//! integer_max = 1000
//! date_start = "2020-01-01"
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{SeedingError, SeedingResult};

/// Value ranges used by the random generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorSettings {
	/// Smallest generated integer (inclusive).
	pub integer_min: i64,
	/// Largest generated integer (inclusive).
	pub integer_max: i64,
	/// Smallest generated float (inclusive).
	pub float_min: f64,
	/// Upper bound of generated floats (exclusive).
	pub float_max: f64,
	/// Minimum number of words in generated sentences.
	pub sentence_words_min: usize,
	/// Maximum number of words in generated sentences, at most
	/// [`GeneratorSettings::MAX_SENTENCE_WORDS`].
	pub sentence_words_max: usize,
	/// First day of the generated date-time window.
	pub date_start: NaiveDate,
	/// Length of the date-time window in days.
	pub date_span_days: u32,
}

impl Default for GeneratorSettings {
	fn default() -> Self {
		Self {
			integer_min: 0,
			integer_max: 10_000,
			float_min: 0.0,
			float_max: 10_000.0,
			sentence_words_min: 3,
			sentence_words_max: 10,
			date_start: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap_or_default(),
			date_span_days: 365 * 30,
		}
	}
}

impl GeneratorSettings {
	/// Upper limit accepted for `sentence_words_max`.
	pub const MAX_SENTENCE_WORDS: usize = 1_000;

	/// Sets the integer range.
	pub fn with_integer_range(mut self, min: i64, max: i64) -> Self {
		self.integer_min = min;
		self.integer_max = max;
		self
	}

	/// Sets the float range.
	pub fn with_float_range(mut self, min: f64, max: f64) -> Self {
		self.float_min = min;
		self.float_max = max;
		self
	}

	/// Sets the sentence length range in words.
	pub fn with_sentence_words(mut self, min: usize, max: usize) -> Self {
		self.sentence_words_min = min;
		self.sentence_words_max = max;
		self
	}

	/// Sets the date-time window.
	pub fn with_dates(mut self, start: NaiveDate, span_days: u32) -> Self {
		self.date_start = start;
		self.date_span_days = span_days;
		self
	}

	fn validate(&self) -> SeedingResult<()> {
		if self.integer_min > self.integer_max {
			return Err(SeedingError::Config(format!(
				"integer range is empty: {}..={}",
				self.integer_min, self.integer_max
			)));
		}
		if !(self.float_min < self.float_max) {
			return Err(SeedingError::Config(format!(
				"float range is empty: {}..{}",
				self.float_min, self.float_max
			)));
		}
		if self.sentence_words_min == 0
			|| self.sentence_words_min > self.sentence_words_max
			|| self.sentence_words_max > Self::MAX_SENTENCE_WORDS
		{
			return Err(SeedingError::Config(format!(
				"sentence word range is invalid: {}..={}",
				self.sentence_words_min, self.sentence_words_max
			)));
		}
		Ok(())
	}
}

/// Configuration of a [`ModelFactory`](crate::factory::ModelFactory).
///
/// # Examples
///
/// ```
/// use seedbed_seeding::config::FactoryConfig;
///
/// let config = FactoryConfig::default()
///     .with_rng_seed(7)
///     .with_batch_concurrency(4);
/// assert_eq!(config.rng_seed, Some(7));
///
/// let parsed = FactoryConfig::from_toml_str("rng_seed = 7\nbatch_concurrency = 4").unwrap();
/// assert_eq!(parsed, config);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FactoryConfig {
	/// Seed for the value generator; `None` seeds from OS entropy.
	pub rng_seed: Option<u64>,
	/// Number of rows `create_batch` creates concurrently. `1` is sequential.
	pub batch_concurrency: usize,
	/// Value ranges.
	pub generator: GeneratorSettings,
}

impl Default for FactoryConfig {
	fn default() -> Self {
		Self {
			rng_seed: None,
			batch_concurrency: 1,
			generator: GeneratorSettings::default(),
		}
	}
}

impl FactoryConfig {
	/// Creates the default configuration.
	pub fn new() -> Self {
		Self::default()
	}

	/// Makes generated values reproducible.
	pub fn with_rng_seed(mut self, seed: u64) -> Self {
		self.rng_seed = Some(seed);
		self
	}

	/// Sets how many rows a batch creates concurrently.
	pub fn with_batch_concurrency(mut self, concurrency: usize) -> Self {
		self.batch_concurrency = concurrency;
		self
	}

	/// Replaces the generator settings.
	pub fn with_generator(mut self, generator: GeneratorSettings) -> Self {
		self.generator = generator;
		self
	}

	/// Checks that every range is non-empty and concurrency is at least one.
	pub fn validate(&self) -> SeedingResult<()> {
		if self.batch_concurrency == 0 {
			return Err(SeedingError::Config(
				"batch_concurrency must be at least 1".to_string(),
			));
		}
		self.generator.validate()
	}

	/// Parses and validates a TOML document.
	pub fn from_toml_str(source: &str) -> SeedingResult<Self> {
		let config: Self = toml::from_str(source)?;
		config.validate()?;
		Ok(config)
	}

	/// Parses and validates a YAML document.
	#[cfg(feature = "yaml")]
	pub fn from_yaml_str(source: &str) -> SeedingResult<Self> {
		let config: Self = serde_yaml::from_str(source)?;
		config.validate()?;
		Ok(config)
	}

	/// Loads a configuration file, picking the format from its extension.
	///
	/// `.toml` is always accepted; `.yaml` and `.yml` need the `yaml` feature.
	pub fn from_path(path: impl AsRef<Path>) -> SeedingResult<Self> {
		let path = path.as_ref();
		let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
		match extension {
			"toml" => Self::from_toml_str(&std::fs::read_to_string(path)?),
			#[cfg(feature = "yaml")]
			"yaml" | "yml" => Self::from_yaml_str(&std::fs::read_to_string(path)?),
			other => Err(SeedingError::Config(format!(
				"unsupported configuration format `{}` for {}",
				if other.is_empty() { "(none)" } else { other },
				path.display()
			))),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_defaults() {
		let config = FactoryConfig::default();
		assert_eq!(config.rng_seed, None);
		assert_eq!(config.batch_concurrency, 1);
		assert!(config.validate().is_ok());
	}

	#[rstest]
	fn test_from_toml_with_generator_table() {
		let config = FactoryConfig::from_toml_str(
			r#"
			rng_seed = 99

			[generator]
			integer_min = -5
			integer_max = 5
			date_start = "2021-06-01"
			"#,
		)
		.unwrap();

		assert_eq!(config.rng_seed, Some(99));
		assert_eq!(config.batch_concurrency, 1);
		assert_eq!(config.generator.integer_min, -5);
		assert_eq!(config.generator.integer_max, 5);
		assert_eq!(
			config.generator.date_start,
			NaiveDate::from_ymd_opt(2021, 6, 1).unwrap()
		);
		assert_eq!(config.generator.sentence_words_min, 3);
	}

	#[rstest]
	#[case("batch_concurrency = 0")]
	#[case("[generator]\ninteger_min = 10\ninteger_max = 1")]
	#[case("[generator]\nfloat_min = 1.0\nfloat_max = 1.0")]
	#[case("[generator]\nsentence_words_min = 0")]
	#[case("[generator]\nsentence_words_max = 1001")]
	fn test_invalid_values_rejected(#[case] source: &str) {
		let result = FactoryConfig::from_toml_str(source);
		assert!(matches!(result, Err(SeedingError::Config(_))));
	}

	#[rstest]
	fn test_from_path_reads_toml_file() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("seeding.toml");
		std::fs::write(&path, "rng_seed = 11\nbatch_concurrency = 3\n").unwrap();

		let config = FactoryConfig::from_path(&path).unwrap();
		assert_eq!(config.rng_seed, Some(11));
		assert_eq!(config.batch_concurrency, 3);
	}

	#[rstest]
	fn test_from_path_errors() {
		let missing = FactoryConfig::from_path("/nonexistent/seeding.toml");
		assert!(matches!(missing, Err(SeedingError::Io(_))));

		let unknown = FactoryConfig::from_path("seeding.ini");
		assert!(matches!(unknown, Err(SeedingError::Config(_))));
	}

	#[rstest]
	fn test_malformed_toml() {
		let result = FactoryConfig::from_toml_str("rng_seed = ");
		assert!(matches!(result, Err(SeedingError::Toml(_))));
	}

	#[cfg(feature = "yaml")]
	#[rstest]
	fn test_from_yaml() {
		let config = FactoryConfig::from_yaml_str("rng_seed: 3\nbatch_concurrency: 2\n").unwrap();
		assert_eq!(config.rng_seed, Some(3));
		assert_eq!(config.batch_concurrency, 2);
	}
}
