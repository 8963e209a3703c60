use std::collections::HashMap;

use crate::error::{NameError, Result};

/// Reserved symbol terminating every name.
pub const END_CHAR: char = '.';

/// Bidirectional mapping between name characters and model indices.
///
/// The alphabet is `a-z`, `A-Z` and `-`, in that order, followed by the
/// reserved end symbol which always sits at index 0.
///
/// # Invariants
/// - `END_CHAR` maps to index 0
/// - Every other character maps to a unique index in `1..size()`
/// - `chars[i]` and `indices[&chars[i]] == i` agree for every `i`
#[derive(Debug, Clone)]
pub struct Vocabulary {
	chars: Vec<char>,
	indices: HashMap<char, usize>,
}

impl Vocabulary {
	/// Builds the fixed name alphabet.
	pub fn new() -> Self {
		let chars: Vec<char> = std::iter::once(END_CHAR)
			.chain('a'..='z')
			.chain('A'..='Z')
			.chain(std::iter::once('-'))
			.collect();
		let indices = chars.iter().enumerate().map(|(i, c)| (*c, i)).collect();
		Self { chars, indices }
	}

	/// Number of symbols, end symbol included.
	pub fn size(&self) -> usize {
		self.chars.len()
	}

	/// Returns the index of `c`.
	///
	/// # Errors
	/// `UnknownSymbol` if `c` is outside the alphabet.
	pub fn encode(&self, c: char) -> Result<usize> {
		self.indices.get(&c).copied().ok_or(NameError::UnknownSymbol(c))
	}

	/// Encodes every character of `s`.
	pub fn encode_str(&self, s: &str) -> Result<Vec<usize>> {
		s.chars().map(|c| self.encode(c)).collect()
	}

	/// Returns the character stored at `index`.
	///
	/// # Errors
	/// `UnknownIndex` if `index >= size()`.
	pub fn decode(&self, index: usize) -> Result<char> {
		self.chars.get(index).copied().ok_or(NameError::UnknownIndex(index))
	}

	/// Index of the end symbol (always 0).
	pub fn end_index(&self) -> usize {
		0
	}

	/// Letters a name may start with: uppercase only, so names come out
	/// capitalized.
	pub fn start_letters(&self) -> impl Iterator<Item = char> + '_ {
		self.chars.iter().copied().filter(char::is_ascii_uppercase)
	}

	pub fn is_start_letter(&self, c: char) -> bool {
		c.is_ascii_uppercase()
	}
}

impl Default for Vocabulary {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn end_symbol_is_index_zero() {
		let vocab = Vocabulary::new();
		assert_eq!(vocab.encode(END_CHAR).unwrap(), 0);
		assert_eq!(vocab.decode(0).unwrap(), END_CHAR);
		assert_eq!(vocab.end_index(), 0);
	}

	#[test]
	fn size_counts_letters_hyphen_and_end() {
		assert_eq!(Vocabulary::new().size(), 26 + 26 + 1 + 1);
	}

	#[test]
	fn encode_and_decode_are_inverse() {
		let vocab = Vocabulary::new();
		for index in 0..vocab.size() {
			let c = vocab.decode(index).unwrap();
			assert_eq!(vocab.encode(c).unwrap(), index);
		}
		for c in ('a'..='z').chain('A'..='Z').chain(['-']) {
			let index = vocab.encode(c).unwrap();
			assert!(index > 0);
			assert_eq!(vocab.decode(index).unwrap(), c);
		}
	}

	#[test]
	fn lookups_outside_alphabet_fail() {
		let vocab = Vocabulary::new();
		assert!(matches!(vocab.encode(' '), Err(NameError::UnknownSymbol(' '))));
		assert!(matches!(vocab.encode('é'), Err(NameError::UnknownSymbol('é'))));
		assert!(matches!(vocab.decode(54), Err(NameError::UnknownIndex(54))));
		assert!(vocab.encode_str("Gr0k").is_err());
	}

	#[test]
	fn start_letters_are_uppercase() {
		let vocab = Vocabulary::new();
		let letters: Vec<char> = vocab.start_letters().collect();
		assert_eq!(letters.len(), 26);
		assert_eq!(letters.first(), Some(&'A'));
		assert_eq!(letters.last(), Some(&'Z'));
		assert!(!vocab.is_start_letter('a'));
	}
}
