use seedbed_seeding::random::RandomEnum;
use serde::{Deserialize, Serialize};

/// Enum stored by case name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestStringEnum {
	/// First case.
	CaseOne,
	/// Second case.
	CaseTwo,
	/// Third case.
	CaseThree,
}

impl RandomEnum for TestStringEnum {
	fn all_cases() -> Vec<Self> {
		vec![Self::CaseOne, Self::CaseTwo, Self::CaseThree]
	}
}

/// Enum stored by integer discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i64", try_from = "i64")]
pub enum TestIntEnum {
	/// `0`
	Zero,
	/// `1`
	One,
	/// `2`
	Two,
}

impl From<TestIntEnum> for i64 {
	fn from(value: TestIntEnum) -> Self {
		match value {
			TestIntEnum::Zero => 0,
			TestIntEnum::One => 1,
			TestIntEnum::Two => 2,
		}
	}
}

impl TryFrom<i64> for TestIntEnum {
	type Error = String;

	fn try_from(value: i64) -> Result<Self, Self::Error> {
		match value {
			0 => Ok(Self::Zero),
			1 => Ok(Self::One),
			2 => Ok(Self::Two),
			other => Err(format!("{} is not a TestIntEnum discriminant", other)),
		}
	}
}

impl RandomEnum for TestIntEnum {
	fn all_cases() -> Vec<Self> {
		vec![Self::Zero, Self::One, Self::Two]
	}
}

/// Enum stored by explicit raw strings unrelated to its case names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TestRawStringEnum {
	/// `"first"`
	#[serde(rename = "first")]
	Alpha,
	/// `"second-value"`
	#[serde(rename = "second-value")]
	Beta,
	/// `"THIRD"`
	#[serde(rename = "THIRD")]
	Gamma,
}

impl RandomEnum for TestRawStringEnum {
	fn all_cases() -> Vec<Self> {
		vec![Self::Alpha, Self::Beta, Self::Gamma]
	}
}

/// Enum stored by explicit, non-contiguous integer values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i64", try_from = "i64")]
#[repr(i64)]
pub enum TestRawIntEnum {
	/// `-1`
	Negative = -1,
	/// `10`
	Ten = 10,
	/// `250`
	Large = 250,
}

impl From<TestRawIntEnum> for i64 {
	fn from(value: TestRawIntEnum) -> Self {
		value as i64
	}
}

impl TryFrom<i64> for TestRawIntEnum {
	type Error = String;

	fn try_from(value: i64) -> Result<Self, Self::Error> {
		TestRawIntEnum::all_cases()
			.into_iter()
			.find(|case| *case as i64 == value)
			.ok_or_else(|| format!("{} is not a TestRawIntEnum value", value))
	}
}

impl RandomEnum for TestRawIntEnum {
	fn all_cases() -> Vec<Self> {
		vec![Self::Negative, Self::Ten, Self::Large]
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	fn test_int_enum_serializes_as_number() {
		assert_eq!(serde_json::to_value(TestIntEnum::Two).unwrap(), json!(2));
		let parsed: TestIntEnum = serde_json::from_value(json!(1)).unwrap();
		assert_eq!(parsed, TestIntEnum::One);
		assert!(serde_json::from_value::<TestIntEnum>(json!(9)).is_err());
	}

	#[rstest]
	fn test_string_enum_serializes_as_name() {
		assert_eq!(
			serde_json::to_value(TestStringEnum::CaseTwo).unwrap(),
			json!("case_two")
		);
	}

	#[rstest]
	#[case(TestRawStringEnum::Alpha, json!("first"))]
	#[case(TestRawStringEnum::Beta, json!("second-value"))]
	#[case(TestRawStringEnum::Gamma, json!("THIRD"))]
	fn test_raw_string_enum_uses_raw_value(
		#[case] case: TestRawStringEnum,
		#[case] raw: serde_json::Value,
	) {
		assert_eq!(serde_json::to_value(case).unwrap(), raw);
		assert_eq!(serde_json::from_value::<TestRawStringEnum>(raw).unwrap(), case);
	}

	#[rstest]
	fn test_raw_int_enum_uses_raw_value() {
		assert_eq!(serde_json::to_value(TestRawIntEnum::Negative).unwrap(), json!(-1));
		assert_eq!(serde_json::to_value(TestRawIntEnum::Large).unwrap(), json!(250));
		let parsed: TestRawIntEnum = serde_json::from_value(json!(10)).unwrap();
		assert_eq!(parsed, TestRawIntEnum::Ten);
		assert!(serde_json::from_value::<TestRawIntEnum>(json!(1)).is_err());
	}
}
