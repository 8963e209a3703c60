use rand::Rng;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;

use super::SequenceModel;
use crate::encoding::{CategoryEncoder, END_CHAR, FeatureComposer, OneHot, Vocabulary};
use crate::error::{NameError, Result};

/// One categorical draw: the chosen index and its one-hot vector.
///
/// The vector, not a re-encoding of the decoded character, is what gets fed
/// back into the model on the next step.
#[derive(Debug, Clone, PartialEq)]
pub struct OneHotSample {
	pub index: usize,
	pub vector: Vec<f32>,
}

/// Draws one index with probability `softmax(logits)`.
///
/// # Errors
/// `ModelInference` if a logit is not finite or the distribution is empty.
pub fn sample_one_hot<R: Rng + ?Sized>(logits: &[f32], rng: &mut R) -> Result<OneHotSample> {
	if let Some(bad) = logits.iter().find(|l| !l.is_finite()) {
		return Err(NameError::ModelInference(format!("non-finite logit {bad}")));
	}
	let max = logits.iter().copied().fold(f32::NEG_INFINITY, f32::max);
	let weights: Vec<f32> = logits.iter().map(|l| (l - max).exp()).collect();
	let dist = WeightedIndex::new(&weights)
		.map_err(|e| NameError::ModelInference(format!("invalid sampling distribution: {e}")))?;

	let index = dist.sample(rng);
	let mut vector = vec![0.0; logits.len()];
	vector[index] = 1.0;
	Ok(OneHotSample { index, vector })
}

/// Generates one name, character by character, from a seed letter.
///
/// # Responsibilities
/// - Validate the seed letter, race and group before touching the model
/// - Compose model inputs from the character, race and group one-hots
/// - Sample stochastically from the logits and feed the sample back
/// - Stop on the end symbol or once `max_length` characters are produced
///
/// The sampler holds no per-sequence state: every call owns a fresh
/// recurrent state, so one sampler can serve concurrent callers.
#[derive(Debug)]
pub struct NameSampler<M> {
	model: M,
	vocab: Vocabulary,
	races: CategoryEncoder,
	groups: CategoryEncoder,
	composer: FeatureComposer,
	start_letters: Vec<char>,
}

impl<M: SequenceModel> NameSampler<M> {
	/// Wraps a model trained on the standard vocabulary, races and groups.
	///
	/// # Errors
	/// `ModelShape` if the model's input or output width does not match the
	/// encoders.
	pub fn new(model: M) -> Result<Self> {
		let vocab = Vocabulary::new();
		let races = CategoryEncoder::races();
		let groups = CategoryEncoder::groups();
		let composer = FeatureComposer::new(vocab.size(), races.size(), groups.size());

		if model.input_size() != composer.input_size() {
			return Err(NameError::ModelShape { expected: composer.input_size(), found: model.input_size() });
		}
		if model.output_size() != vocab.size() {
			return Err(NameError::ModelShape { expected: vocab.size(), found: model.output_size() });
		}

		let start_letters = vocab.start_letters().collect();
		Ok(Self { model, vocab, races, groups, composer, start_letters })
	}

	pub fn model(&self) -> &M {
		&self.model
	}

	pub fn vocabulary(&self) -> &Vocabulary {
		&self.vocab
	}

	pub fn races(&self) -> &CategoryEncoder {
		&self.races
	}

	pub fn groups(&self) -> &CategoryEncoder {
		&self.groups
	}

	/// Uniformly random uppercase seed letter.
	pub fn random_letter<R: Rng + ?Sized>(&self, rng: &mut R) -> char {
		self.start_letters[rng.random_range(0..self.start_letters.len())]
	}

	/// Random seed letter, race and group.
	pub fn random_input<R: Rng + ?Sized>(&self, rng: &mut R) -> (char, &str, &str) {
		let race = self.races.labels()[rng.random_range(0..self.races.size())].as_str();
		let group = self.groups.labels()[rng.random_range(0..self.groups.size())].as_str();
		(self.random_letter(rng), race, group)
	}

	/// Samples a name using the thread RNG.
	pub fn sample(&self, seed: char, race: &str, group: &str, max_length: usize) -> Result<String> {
		self.sample_with_rng(&mut rand::rng(), seed, race, group, max_length)
	}

	/// Samples a name starting with `seed`.
	///
	/// The seed counts as the first character: the result is never longer
	/// than `max_length` and never contains the end symbol.
	///
	/// # Errors
	/// - `InvalidInput` for a non-uppercase seed, an unknown race or group,
	///   or `max_length == 0` (raised before any model call)
	/// - Model errors are propagated unchanged
	pub fn sample_with_rng<R: Rng + ?Sized>(
		&self,
		rng: &mut R,
		seed: char,
		race: &str,
		group: &str,
		max_length: usize,
	) -> Result<String> {
		let (letter_t, race_t, group_t) = self.transform_input(seed, race, group)?;
		if max_length == 0 {
			return Err(NameError::InvalidInput("max_length must be at least 1".to_owned()));
		}

		let mut input = self.composer.compose(&letter_t, &race_t, &group_t)?;
		let mut state = self.model.init_state(1);
		let mut name = String::from(seed);
		let mut length = 1;

		loop {
			let (logits, next_state) = self.model.step(&input, state)?;
			state = next_state;
			if logits.len() != self.vocab.size() {
				return Err(NameError::ModelShape { expected: self.vocab.size(), found: logits.len() });
			}

			let sample = sample_one_hot(&logits, rng)?;
			let c = self.vocab.decode(sample.index)?;
			log::trace!("step {length}: sampled '{c}' (index {})", sample.index);

			if c == END_CHAR || length >= max_length {
				break;
			}

			name.push(c);
			length += 1;
			input = self.composer.compose(&sample.vector, &race_t, &group_t)?;
		}

		Ok(name)
	}

	/// Validates the inputs and turns them into one-hot vectors.
	fn transform_input(&self, seed: char, race: &str, group: &str) -> Result<(Vec<f32>, Vec<f32>, Vec<f32>)> {
		if !self.vocab.is_start_letter(seed) {
			return Err(NameError::InvalidInput(format!("invalid seed letter '{seed}'")));
		}
		let race_index = self
			.races
			.encode(race)
			.map_err(|_| NameError::InvalidInput(format!("invalid race '{race}'")))?;
		let group_index = self
			.groups
			.encode(group)
			.map_err(|_| NameError::InvalidInput(format!("invalid group '{group}'")))?;

		Ok((
			OneHot::new(self.vocab.size()).encode(self.vocab.encode(seed)?)?,
			OneHot::new(self.races.size()).encode(race_index)?,
			OneHot::new(self.groups.size()).encode(group_index)?,
		))
	}
}
