use std::path::Path;

use serde::{Deserialize, Serialize};

use super::SequenceModel;
use crate::error::{NameError, Result};

/// A single LSTM layer with PyTorch weight layout.
///
/// Gate rows are stacked in the order input, forget, cell, output, so
/// `w_ih` is `4 * hidden_size` rows of `input_size` columns and `w_hh` is
/// `4 * hidden_size` rows of `hidden_size` columns (row-major).
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct LstmLayer {
	input_size: usize,
	hidden_size: usize,
	w_ih: Vec<f32>,
	w_hh: Vec<f32>,
	b_ih: Vec<f32>,
	b_hh: Vec<f32>,
}

impl LstmLayer {
	/// Creates a layer from raw weights.
	///
	/// # Errors
	/// `ModelShape` if any buffer length disagrees with the sizes.
	pub fn new(
		input_size: usize,
		hidden_size: usize,
		w_ih: Vec<f32>,
		w_hh: Vec<f32>,
		b_ih: Vec<f32>,
		b_hh: Vec<f32>,
	) -> Result<Self> {
		let layer = Self { input_size, hidden_size, w_ih, w_hh, b_ih, b_hh };
		layer.validate()?;
		Ok(layer)
	}

	/// A layer whose weights and biases are all zero.
	pub fn zeros(input_size: usize, hidden_size: usize) -> Self {
		let gates = 4 * hidden_size;
		Self {
			input_size,
			hidden_size,
			w_ih: vec![0.0; gates * input_size],
			w_hh: vec![0.0; gates * hidden_size],
			b_ih: vec![0.0; gates],
			b_hh: vec![0.0; gates],
		}
	}

	fn validate(&self) -> Result<()> {
		check_nonzero("LSTM input size", self.input_size)?;
		check_nonzero("LSTM hidden size", self.hidden_size)?;
		let gates = 4 * self.hidden_size;
		check_len(gates * self.input_size, self.w_ih.len())?;
		check_len(gates * self.hidden_size, self.w_hh.len())?;
		check_len(gates, self.b_ih.len())?;
		check_len(gates, self.b_hh.len())
	}

	/// Advances one time step for one sequence, updating `h` and `c` in place.
	fn forward(&self, x: &[f32], h: &mut [f32], c: &mut [f32]) {
		let hs = self.hidden_size;
		let mut gates: Vec<f32> = self.b_ih.iter().zip(&self.b_hh).map(|(a, b)| a + b).collect();
		matvec_add(&self.w_ih, self.input_size, x, &mut gates);
		matvec_add(&self.w_hh, hs, h, &mut gates);

		for j in 0..hs {
			let i = sigmoid(gates[j]);
			let f = sigmoid(gates[hs + j]);
			let g = gates[2 * hs + j].tanh();
			let o = sigmoid(gates[3 * hs + j]);
			c[j] = f * c[j] + i * g;
			h[j] = o * c[j].tanh();
		}
	}
}

/// Fully connected output layer mapping hidden features to logits.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Linear {
	in_features: usize,
	out_features: usize,
	weight: Vec<f32>,
	bias: Vec<f32>,
}

impl Linear {
	/// # Errors
	/// `ModelShape` if `weight` is not `out_features x in_features` or `bias`
	/// is not `out_features` long.
	pub fn new(in_features: usize, out_features: usize, weight: Vec<f32>, bias: Vec<f32>) -> Result<Self> {
		let linear = Self { in_features, out_features, weight, bias };
		linear.validate()?;
		Ok(linear)
	}

	pub fn zeros(in_features: usize, out_features: usize) -> Self {
		Self {
			in_features,
			out_features,
			weight: vec![0.0; in_features * out_features],
			bias: vec![0.0; out_features],
		}
	}

	fn validate(&self) -> Result<()> {
		check_nonzero("linear input features", self.in_features)?;
		check_nonzero("linear output features", self.out_features)?;
		check_len(self.in_features * self.out_features, self.weight.len())?;
		check_len(self.out_features, self.bias.len())
	}

	fn forward(&self, x: &[f32]) -> Vec<f32> {
		let mut out = self.bias.clone();
		matvec_add(&self.weight, self.in_features, x, &mut out);
		out
	}
}

/// Per-sequence recurrent state of an [`LstmModel`].
///
/// `h[layer]` and `c[layer]` hold `batch_size * hidden_size` values, one
/// contiguous block per sequence of the batch.
#[derive(Clone, Debug, PartialEq)]
pub struct LstmState {
	batch_size: usize,
	h: Vec<Vec<f32>>,
	c: Vec<Vec<f32>>,
}

impl LstmState {
	pub fn batch_size(&self) -> usize {
		self.batch_size
	}
}

/// Stacked LSTM followed by a linear head producing vocabulary logits.
///
/// This is the inference half of the trained character model: weights are
/// loaded from a postcard artifact and never modified.
///
/// # Invariants
/// - At least one layer
/// - `layers[i].input_size == layers[i - 1].hidden_size`
/// - `head.in_features` equals the hidden size of the last layer
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct LstmModel {
	layers: Vec<LstmLayer>,
	head: Linear,
}

impl LstmModel {
	/// Assembles a model from its layers.
	///
	/// # Errors
	/// `InvalidInput` for an empty stack, `ModelShape` when consecutive
	/// layers do not chain.
	pub fn new(layers: Vec<LstmLayer>, head: Linear) -> Result<Self> {
		let model = Self { layers, head };
		model.validate()?;
		Ok(model)
	}

	/// Loads a postcard-encoded model.
	pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
		let bytes = std::fs::read(&path)?;
		let model: Self = postcard::from_bytes(&bytes)?;
		model.validate()?;
		log::info!(
			"Loaded LSTM model from {} ({} layer(s), hidden size {})",
			path.as_ref().display(),
			model.layers.len(),
			model.hidden_size()
		);
		Ok(model)
	}

	/// Writes the model with postcard.
	pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
		let bytes = postcard::to_stdvec(self)?;
		std::fs::write(path, bytes)?;
		Ok(())
	}

	pub fn num_layers(&self) -> usize {
		self.layers.len()
	}

	pub fn hidden_size(&self) -> usize {
		self.layers.last().map_or(0, |l| l.hidden_size)
	}

	fn validate(&self) -> Result<()> {
		let first = self
			.layers
			.first()
			.ok_or_else(|| NameError::InvalidInput("LSTM model needs at least one layer".to_owned()))?;
		first.validate()?;
		for pair in self.layers.windows(2) {
			pair[1].validate()?;
			check_len(pair[0].hidden_size, pair[1].input_size)?;
		}
		self.head.validate()?;
		check_len(self.hidden_size(), self.head.in_features)
	}
}

impl SequenceModel for LstmModel {
	type State = LstmState;

	fn input_size(&self) -> usize {
		self.layers.first().map_or(0, |l| l.input_size)
	}

	fn output_size(&self) -> usize {
		self.head.out_features
	}

	fn init_state(&self, batch_size: usize) -> LstmState {
		LstmState {
			batch_size,
			h: self.layers.iter().map(|l| vec![0.0; batch_size * l.hidden_size]).collect(),
			c: self.layers.iter().map(|l| vec![0.0; batch_size * l.hidden_size]).collect(),
		}
	}

	fn step(&self, input: &[f32], mut state: LstmState) -> Result<(Vec<f32>, LstmState)> {
		let input_size = self.input_size();
		check_len(state.batch_size * input_size, input.len())?;
		check_len(self.layers.len(), state.h.len())?;
		check_len(self.layers.len(), state.c.len())?;
		for (l, layer) in self.layers.iter().enumerate() {
			check_len(state.batch_size * layer.hidden_size, state.h[l].len())?;
			check_len(state.batch_size * layer.hidden_size, state.c[l].len())?;
		}

		let mut logits = Vec::with_capacity(state.batch_size * self.output_size());
		for b in 0..state.batch_size {
			let mut x = input[b * input_size..(b + 1) * input_size].to_vec();
			for (l, layer) in self.layers.iter().enumerate() {
				let hs = layer.hidden_size;
				let h = &mut state.h[l][b * hs..(b + 1) * hs];
				let c = &mut state.c[l][b * hs..(b + 1) * hs];
				layer.forward(&x, h, c);
				x = h.to_vec();
			}
			logits.extend(self.head.forward(&x));
		}

		if logits.iter().any(|v| !v.is_finite()) {
			return Err(NameError::ModelInference("LSTM produced non-finite logits".to_owned()));
		}
		Ok((logits, state))
	}
}

fn check_nonzero(what: &str, size: usize) -> Result<()> {
	if size == 0 {
		return Err(NameError::InvalidInput(format!("{what} must be non-zero")));
	}
	Ok(())
}

fn check_len(expected: usize, found: usize) -> Result<()> {
	if expected != found {
		return Err(NameError::ModelShape { expected, found });
	}
	Ok(())
}

/// `out += weight * x`, with `weight` row-major and `cols` columns wide.
fn matvec_add(weight: &[f32], cols: usize, x: &[f32], out: &mut [f32]) {
	for (row, o) in weight.chunks_exact(cols).zip(out.iter_mut()) {
		*o += row.iter().zip(x).map(|(w, v)| w * v).sum::<f32>();
	}
}

fn sigmoid(x: f32) -> f32 {
	1.0 / (1.0 + (-x).exp())
}
