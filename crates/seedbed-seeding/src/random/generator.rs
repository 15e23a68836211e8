use chrono::{Duration, NaiveTime, TimeZone, Utc};
use parking_lot::{Mutex, RwLock};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::{Map, Value};
use std::any::TypeId;
use std::collections::HashMap;
use std::sync::Arc;

use super::faker::FakerType;
use super::{EnumRef, RandomEnum, ScalarType, TypeRef};
use crate::config::GeneratorSettings;
use crate::error::{SeedingError, SeedingResult};
use crate::schema::GroupSchema;

/// Produces random values for type descriptors.
///
/// The generator owns its RNG; two generators built with the same seed and
/// asked for the same sequence of types return the same values.
///
/// # Examples
///
/// ```
/// use seedbed_seeding::config::GeneratorSettings;
/// use seedbed_seeding::random::{RandomGenerator, ScalarType, TypeRef};
///
/// let generator = RandomGenerator::seeded(GeneratorSettings::default(), 1);
/// let value = generator.generate(&TypeRef::Scalar(ScalarType::Integer)).unwrap();
/// assert!(value.is_i64());
/// ```
pub struct RandomGenerator {
	settings: GeneratorSettings,
	rng: Mutex<StdRng>,
	enums: RwLock<HashMap<TypeId, Arc<[Value]>>>,
}

impl RandomGenerator {
	/// Creates a generator seeded from OS entropy.
	pub fn new(settings: GeneratorSettings) -> Self {
		Self::with_rng(settings, StdRng::from_entropy())
	}

	/// Creates a reproducible generator.
	pub fn seeded(settings: GeneratorSettings, seed: u64) -> Self {
		Self::with_rng(settings, StdRng::seed_from_u64(seed))
	}

	fn with_rng(settings: GeneratorSettings, rng: StdRng) -> Self {
		Self {
			settings,
			rng: Mutex::new(rng),
			enums: RwLock::new(HashMap::new()),
		}
	}

	/// Value ranges in use.
	pub fn settings(&self) -> &GeneratorSettings {
		&self.settings
	}

	/// Registers the case set of `E`. Registering again replaces the cases.
	pub fn register_enum<E: RandomEnum>(&self) -> SeedingResult<()> {
		let cases = E::all_cases()
			.iter()
			.map(serde_json::to_value)
			.collect::<Result<Vec<_>, _>>()?;
		if cases.is_empty() {
			return Err(SeedingError::Schema {
				model: E::enum_name().to_string(),
				message: "enum has no cases to sample".to_string(),
			});
		}
		tracing::debug!(enum_name = E::enum_name(), cases = cases.len(), "enum registered");
		self.enums.write().insert(TypeId::of::<E>(), cases.into());
		Ok(())
	}

	/// Returns true when `E` has been registered.
	pub fn is_registered<E: RandomEnum>(&self) -> bool {
		self.enums.read().contains_key(&TypeId::of::<E>())
	}

	/// Generates a value of the given type.
	pub fn generate(&self, ty: &TypeRef) -> SeedingResult<Value> {
		match ty {
			TypeRef::Scalar(scalar) => Ok(self.scalar(*scalar)),
			TypeRef::Enum(reference) => self.enum_case(reference),
			TypeRef::Group(group) => self.group(group),
		}
	}

	/// Generates a string following a faker hint.
	pub fn fake(&self, faker: FakerType) -> Value {
		let mut rng = self.rng.lock();
		Value::String(faker.generate(&self.settings, &mut *rng))
	}

	/// Runs `f` with exclusive access to the RNG.
	pub fn with_rng_mut<T>(&self, f: impl FnOnce(&mut StdRng) -> T) -> T {
		f(&mut self.rng.lock())
	}

	fn scalar(&self, scalar: ScalarType) -> Value {
		let settings = &self.settings;
		let mut rng = self.rng.lock();
		match scalar {
			ScalarType::String => Value::String(FakerType::Word.generate(settings, &mut *rng)),
			ScalarType::Integer => {
				let max = settings.integer_max.max(settings.integer_min);
				Value::from(rng.gen_range(settings.integer_min..=max))
			}
			ScalarType::Float => {
				let value = if settings.float_min < settings.float_max {
					rng.gen_range(settings.float_min..settings.float_max)
				} else {
					settings.float_min
				};
				Value::from(value)
			}
			ScalarType::Boolean => Value::Bool(rng.gen_bool(0.5)),
			ScalarType::Date => {
				let span = i64::from(settings.date_span_days.max(1)) * 86_400;
				let offset = rng.gen_range(0..span);
				let start = Utc.from_utc_datetime(&settings.date_start.and_time(NaiveTime::MIN));
				let at = start + Duration::seconds(offset);
				Value::String(at.to_rfc3339_opts(chrono::SecondsFormat::Secs, true))
			}
			ScalarType::Uuid => {
				let bytes: [u8; 16] = rng.r#gen();
				let id = uuid::Builder::from_random_bytes(bytes).into_uuid();
				Value::String(id.to_string())
			}
		}
	}

	fn enum_case(&self, reference: &EnumRef) -> SeedingResult<Value> {
		let cases = self
			.enums
			.read()
			.get(&reference.type_id())
			.cloned()
			.ok_or_else(|| SeedingError::UnregisteredEnum(reference.name().to_string()))?;
		let index = self.rng.lock().gen_range(0..cases.len());
		Ok(cases[index].clone())
	}

	fn group(&self, group: &GroupSchema) -> SeedingResult<Value> {
		let mut object = Map::new();
		for field in group.fields() {
			let value = match field.faker {
				_ if field.optional => Value::Null,
				Some(faker) => self.fake(faker),
				None => self.generate(&field.ty)?,
			};
			object.insert(field.name.to_string(), value);
		}
		Ok(Value::Object(object))
	}
}

impl std::fmt::Debug for RandomGenerator {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("RandomGenerator")
			.field("settings", &self.settings)
			.field("registered_enums", &self.enums.read().len())
			.finish_non_exhaustive()
	}
}
