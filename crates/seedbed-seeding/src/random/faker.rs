use fake::Fake;
use fake::faker::address::en::{CityName, CountryName, StreetName, ZipCode};
use fake::faker::company::en::CompanyName;
use fake::faker::internet::en::{DomainSuffix, SafeEmail, Username};
use fake::faker::lorem::en::{Paragraph, Sentence, Word};
use fake::faker::name::en::{FirstName, LastName, Name};
use fake::faker::phone_number::en::PhoneNumber;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::GeneratorSettings;

/// Hint for generating realistic-looking strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FakerType {
	/// Single lorem word.
	Word,
	/// Lorem sentence.
	Sentence,
	/// Lorem paragraph.
	Paragraph,
	/// Full person name.
	Name,
	/// Given name.
	FirstName,
	/// Family name.
	LastName,
	/// Email address on a reserved domain.
	Email,
	/// Login name.
	Username,
	/// Company name.
	Company,
	/// City.
	City,
	/// Street name.
	Street,
	/// Country.
	Country,
	/// Phone number.
	Phone,
	/// HTTPS URL.
	Url,
	/// Postal code.
	ZipCode,
}

impl FakerType {
	pub(crate) fn generate<R: Rng + ?Sized>(
		self,
		settings: &GeneratorSettings,
		rng: &mut R,
	) -> String {
		match self {
			Self::Word => Word().fake_with_rng(rng),
			Self::Sentence => {
				let max = settings.sentence_words_max.max(settings.sentence_words_min);
				let count = rng.gen_range(settings.sentence_words_min..=max);
				Sentence(count..count.saturating_add(1)).fake_with_rng(rng)
			}
			Self::Paragraph => Paragraph(2..5).fake_with_rng(rng),
			Self::Name => Name().fake_with_rng(rng),
			Self::FirstName => FirstName().fake_with_rng(rng),
			Self::LastName => LastName().fake_with_rng(rng),
			Self::Email => SafeEmail().fake_with_rng(rng),
			Self::Username => Username().fake_with_rng(rng),
			Self::Company => CompanyName().fake_with_rng(rng),
			Self::City => CityName().fake_with_rng(rng),
			Self::Street => StreetName().fake_with_rng(rng),
			Self::Country => CountryName().fake_with_rng(rng),
			Self::Phone => PhoneNumber().fake_with_rng(rng),
			Self::Url => {
				let host: String = Word().fake_with_rng(rng);
				let suffix: String = DomainSuffix().fake_with_rng(rng);
				format!("https://{}.{}", host.to_lowercase(), suffix)
			}
			Self::ZipCode => ZipCode().fake_with_rng(rng),
		}
	}
}
