use crate::error::{NameError, Result};

/// One-hot encoder of a fixed width.
#[derive(Debug, Clone, Copy)]
pub struct OneHot {
	size: usize,
}

impl OneHot {
	pub fn new(size: usize) -> Self {
		Self { size }
	}

	pub fn size(&self) -> usize {
		self.size
	}

	/// Encodes a single index as a vector of `size` floats.
	///
	/// # Errors
	/// `UnknownIndex` if `index >= size`.
	pub fn encode(&self, index: usize) -> Result<Vec<f32>> {
		if index >= self.size {
			return Err(NameError::UnknownIndex(index));
		}
		let mut vector = vec![0.0; self.size];
		vector[index] = 1.0;
		Ok(vector)
	}

	/// Encodes an index sequence as a row-major `indexes.len() x size` matrix.
	pub fn encode_all(&self, indexes: &[usize]) -> Result<Vec<Vec<f32>>> {
		indexes.iter().map(|i| self.encode(*i)).collect()
	}
}

/// Builds model input vectors: character part, then race, then group.
///
/// The character part is either the one-hot seed letter or the sampled
/// one-hot vector of the previous step; race and group stay fixed for the
/// whole sequence.
#[derive(Debug, Clone, Copy)]
pub struct FeatureComposer {
	vocab_size: usize,
	race_size: usize,
	group_size: usize,
}

impl FeatureComposer {
	pub fn new(vocab_size: usize, race_size: usize, group_size: usize) -> Self {
		Self { vocab_size, race_size, group_size }
	}

	/// Width of a composed input vector.
	pub fn input_size(&self) -> usize {
		self.vocab_size + self.race_size + self.group_size
	}

	/// Concatenates the three parts along the feature axis.
	///
	/// # Errors
	/// `ModelShape` if a part does not have its expected width.
	pub fn compose(&self, chars: &[f32], race: &[f32], group: &[f32]) -> Result<Vec<f32>> {
		for (part, expected) in [
			(chars, self.vocab_size),
			(race, self.race_size),
			(group, self.group_size),
		] {
			if part.len() != expected {
				return Err(NameError::ModelShape { expected, found: part.len() });
			}
		}

		let mut input = Vec::with_capacity(self.input_size());
		input.extend_from_slice(chars);
		input.extend_from_slice(race);
		input.extend_from_slice(group);
		Ok(input)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn one_hot_sets_a_single_slot() {
		let onehot = OneHot::new(4);
		assert_eq!(onehot.encode(2).unwrap(), vec![0.0, 0.0, 1.0, 0.0]);
		assert!(matches!(onehot.encode(4), Err(NameError::UnknownIndex(4))));
	}

	#[test]
	fn one_hot_matrix_has_one_row_per_index() {
		let matrix = OneHot::new(3).encode_all(&[0, 2, 2]).unwrap();
		assert_eq!(matrix.len(), 3);
		assert_eq!(matrix[1], vec![0.0, 0.0, 1.0]);
	}

	#[test]
	fn compose_concatenates_in_order() {
		let composer = FeatureComposer::new(3, 2, 1);
		let input = composer.compose(&[0.0, 1.0, 0.0], &[1.0, 0.0], &[1.0]).unwrap();
		assert_eq!(input, vec![0.0, 1.0, 0.0, 1.0, 0.0, 1.0]);
		assert_eq!(composer.input_size(), 6);
	}

	#[test]
	fn compose_rejects_wrong_widths() {
		let composer = FeatureComposer::new(3, 2, 1);
		let err = composer.compose(&[0.0, 1.0], &[1.0, 0.0], &[1.0]).unwrap_err();
		assert!(matches!(err, NameError::ModelShape { expected: 3, found: 2 }));
	}
}
