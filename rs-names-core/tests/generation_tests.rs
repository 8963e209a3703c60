//! End-to-end generation tests against public API only.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rs_names_core::encoding::{GROUPS, RACES, Vocabulary};
use rs_names_core::model::lstm::{Linear, LstmLayer};
use rs_names_core::{GeneratorConfig, LstmModel, NameError, NameGenerator, NameSampler, Result, SequenceModel};

/// Stops immediately, or always emits `next` when set.
struct ConstantModel {
	next: Option<char>,
}

impl SequenceModel for ConstantModel {
	type State = usize;

	fn input_size(&self) -> usize {
		Vocabulary::new().size() + RACES.len() + GROUPS.len()
	}

	fn output_size(&self) -> usize {
		Vocabulary::new().size()
	}

	fn init_state(&self, batch_size: usize) -> usize {
		assert_eq!(batch_size, 1);
		0
	}

	fn step(&self, _input: &[f32], steps: usize) -> Result<(Vec<f32>, usize)> {
		let vocab = Vocabulary::new();
		let mut logits = vec![-1000.0; vocab.size()];
		let index = match self.next {
			Some(c) => vocab.encode(c)?,
			None => vocab.end_index(),
		};
		logits[index] = 1.0;
		Ok((logits, steps + 1))
	}
}

/// Untrained LSTM whose head always picks `letter`.
fn biased_lstm(letter: char) -> LstmModel {
	let vocab = Vocabulary::new();
	let mut bias = vec![-1000.0; vocab.size()];
	bias[vocab.encode(letter).unwrap()] = 0.0;
	let head = Linear::new(4, vocab.size(), vec![0.0; 4 * vocab.size()], bias).unwrap();
	LstmModel::new(vec![LstmLayer::zeros(vocab.size() + 9, 4)], head).unwrap()
}

#[test]
fn immediate_stop_model_yields_single_letter() {
	let sampler = NameSampler::new(ConstantModel { next: None }).unwrap();
	assert_eq!(sampler.sample('A', "human", "female", 50).unwrap(), "A");
}

#[test]
fn names_start_with_seed_and_stay_bounded() {
	let sampler = NameSampler::new(ConstantModel { next: Some('o') }).unwrap();
	let mut rng = StdRng::seed_from_u64(3);
	for seed in Vocabulary::new().start_letters() {
		for race in RACES {
			for group in GROUPS {
				let name = sampler.sample_with_rng(&mut rng, seed, race, group, 6).unwrap();
				assert_eq!(name.chars().count(), 6);
				assert!(name.starts_with(seed));
				assert!(!name.contains('.'));
			}
		}
	}
}

#[test]
fn orc_batch_has_five_tagged_two_part_names() {
	let generator = NameGenerator::with_config(biased_lstm('g'), GeneratorConfig { max_length: 4 }).unwrap();
	let names = generator.generate(5, "orc", "male").unwrap();

	assert_eq!(names.len(), 5);
	for pair in names {
		assert_eq!(pair.race, "orc");
		assert_eq!(pair.group, "male");
		let full_name = pair.full_name();
		let parts: Vec<&str> = full_name.split(' ').collect();
		assert_eq!(parts.len(), 2);
		assert!(parts.iter().all(|p| p.len() == 4 && p.ends_with("ggg")));
	}
}

#[test]
fn goblin_accepts_single_letter_names() {
	let generator = NameGenerator::new(ConstantModel { next: None }).unwrap();
	let names = generator.generate(4, "goblin", "male").unwrap();
	assert_eq!(names.len(), 4);
	assert!(names.iter().all(|p| p.first.len() == 1 && p.last.len() == 1));
}

#[test]
fn shared_model_serves_parallel_callers() {
	let generator = std::sync::Arc::new(NameGenerator::new(biased_lstm('a')).unwrap());
	let handles: Vec<_> = (0..4)
		.map(|_| {
			let generator = generator.clone();
			std::thread::spawn(move || generator.generate(3, "halfling", "female"))
		})
		.collect();

	for handle in handles {
		let names = handle.join().unwrap().unwrap();
		assert_eq!(names.len(), 3);
	}
}

#[test]
fn unknown_race_is_invalid_input() {
	let generator = NameGenerator::new(ConstantModel { next: Some('a') }).unwrap();
	let err = generator.generate(1, "dragon", "male").unwrap_err();
	assert!(matches!(err, NameError::InvalidInput(_)));
	assert!(err.is_client_error());
}
