use std::fmt;

use rand::Rng;

use super::SequenceModel;
use super::sampler::NameSampler;
use crate::encoding::{GOBLIN_RACE, LAST_GROUP};
use crate::error::{NameError, Result};

/// Generation parameters shared by every name of a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorConfig {
	/// Maximum characters per first or last name, seed letter included.
	pub max_length: usize,
}

impl Default for GeneratorConfig {
	fn default() -> Self {
		Self { max_length: 50 }
	}
}

/// A generated full name with the race and group it was sampled for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamePair {
	pub first: String,
	pub last: String,
	pub race: String,
	pub group: String,
}

impl NamePair {
	/// `"{first} {last}"`.
	pub fn full_name(&self) -> String {
		format!("{} {}", self.first, self.last)
	}
}

impl fmt::Display for NamePair {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{} {}", self.first, self.last)
	}
}

/// High-level interface producing first/last name pairs.
///
/// # Responsibilities
/// - Draw independent random seed letters for first and last names
/// - Sample the first name with the requested group and the last name
///   with the `last` group
/// - Discard degenerate pairs (a one-letter part) and retry, except for
///   goblins whose names are meant to be short
///
/// Retries are internal: `generate(n, ..)` always returns exactly `n`
/// pairs.
#[derive(Debug)]
pub struct NameGenerator<M> {
	sampler: NameSampler<M>,
	config: GeneratorConfig,
}

impl<M: SequenceModel> NameGenerator<M> {
	/// Creates a generator with the default configuration.
	pub fn new(model: M) -> Result<Self> {
		Self::with_config(model, GeneratorConfig::default())
	}

	/// # Errors
	/// - `InvalidInput` if `config.max_length` is 0
	/// - `ModelShape` if the model does not fit the encoders
	pub fn with_config(model: M, config: GeneratorConfig) -> Result<Self> {
		if config.max_length == 0 {
			return Err(NameError::InvalidInput("max_length must be at least 1".to_owned()));
		}
		Ok(Self { sampler: NameSampler::new(model)?, config })
	}

	pub fn sampler(&self) -> &NameSampler<M> {
		&self.sampler
	}

	pub fn config(&self) -> &GeneratorConfig {
		&self.config
	}

	/// Generates `count` names using the thread RNG.
	pub fn generate(&self, count: usize, race: &str, group: &str) -> Result<Vec<NamePair>> {
		self.generate_with_rng(&mut rand::rng(), count, race, group)
	}

	/// Generates `count` names for `race` and `group`.
	///
	/// # Errors
	/// - `InvalidInput` for an unknown race or group, before any sampling
	/// - Any sampler error aborts the whole batch
	pub fn generate_with_rng<R: Rng + ?Sized>(
		&self,
		rng: &mut R,
		count: usize,
		race: &str,
		group: &str,
	) -> Result<Vec<NamePair>> {
		if !self.sampler.races().contains(race) {
			return Err(NameError::InvalidInput(format!("invalid race '{race}'")));
		}
		if !self.sampler.groups().contains(group) {
			return Err(NameError::InvalidInput(format!("invalid group '{group}'")));
		}

		(0..count).map(|_| self.generate_one(rng, race, group)).collect()
	}

	/// Samples pairs until one passes the degenerate-name filter.
	fn generate_one<R: Rng + ?Sized>(&self, rng: &mut R, race: &str, group: &str) -> Result<NamePair> {
		let mut attempt = 1usize;
		loop {
			let first_letter = self.sampler.random_letter(rng);
			let last_letter = self.sampler.random_letter(rng);

			let first = self.sampler.sample_with_rng(rng, first_letter, race, group, self.config.max_length)?;
			let last = self.sampler.sample_with_rng(rng, last_letter, race, LAST_GROUP, self.config.max_length)?;

			let pair = NamePair { first, last, race: race.to_owned(), group: group.to_owned() };
			if !Self::is_degenerate(&pair) {
				return Ok(pair);
			}
			log::debug!("Discarding degenerate name '{pair}' (attempt {attempt})");
			attempt += 1;
		}
	}

	/// A pair is degenerate when either part is only its seed letter.
	/// Goblin names are never degenerate.
	fn is_degenerate(pair: &NamePair) -> bool {
		pair.race != GOBLIN_RACE && (pair.first.chars().count() == 1 || pair.last.chars().count() == 1)
	}
}
