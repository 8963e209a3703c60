//! Character-level name model and the sampling loop built on top of it.
//!
//! - `SequenceModel`: the recurrent capability (`init_state` + `step`)
//! - `LstmModel`: a postcard-loaded LSTM implementing `SequenceModel`
//! - `NameSampler`: autoregressive decoding of a single name
//! - `NameGenerator`: paired first/last names with the degenerate-name filter

use crate::error::Result;

/// High-level interface producing full names in batches.
pub mod generator;

/// Stacked LSTM inference model and its binary artifact format.
pub mod lstm;

/// Single-name autoregressive sampling.
pub mod sampler;

/// A trained recurrent model, seen as a pure step function.
///
/// Implementations hold read-only parameters; everything that changes
/// during a sequence lives in `State`, which is created by `init_state` and
/// threaded through `step` by value. Several sequences can therefore share
/// one model as long as each owns its state.
pub trait SequenceModel {
	/// Recurrent state of one in-flight batch.
	type State;

	/// Width of one input vector.
	fn input_size(&self) -> usize;

	/// Number of logits produced per sequence (vocabulary size).
	fn output_size(&self) -> usize;

	/// Fresh state for `batch_size` sequences.
	fn init_state(&self, batch_size: usize) -> Self::State;

	/// Consumes one input step and returns next-step logits with the updated state.
	///
	/// # Errors
	/// `ModelInference` on numerical failure, `ModelShape` on a malformed input.
	fn step(&self, input: &[f32], state: Self::State) -> Result<(Vec<f32>, Self::State)>;
}

impl<M: SequenceModel + ?Sized> SequenceModel for &M {
	type State = M::State;

	fn input_size(&self) -> usize {
		(**self).input_size()
	}

	fn output_size(&self) -> usize {
		(**self).output_size()
	}

	fn init_state(&self, batch_size: usize) -> Self::State {
		(**self).init_state(batch_size)
	}

	fn step(&self, input: &[f32], state: Self::State) -> Result<(Vec<f32>, Self::State)> {
		(**self).step(input, state)
	}
}
