//! Reader for the plain-text training corpus.
//!
//! A corpus is a directory of `{race}_{group}.txt` files holding one name
//! per line. The model is trained elsewhere; this module only exposes the
//! names and their encoded training pairs.

use std::collections::HashSet;
use std::path::Path;

use crate::encoding::{CategoryEncoder, END_CHAR, Vocabulary};
use crate::error::{NameError, Result};
use crate::io;

/// File sitting next to the name lists that is not part of the corpus.
pub const EXCLUDED_FILE: &str = "baseball.txt";

/// One name and the category it was listed under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusEntry {
	pub name: String,
	pub race: String,
	pub group: String,
}

/// Encoded training pair for one name.
///
/// `targets[i]` is the character that follows `inputs[i]`; the last target
/// is the end symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainingSample {
	pub inputs: Vec<usize>,
	pub race: usize,
	pub group: usize,
	pub targets: Vec<usize>,
}

#[derive(Debug, Default)]
pub struct Corpus {
	entries: Vec<CorpusEntry>,
	known: HashSet<String>,
}

impl Corpus {
	/// Loads every `{race}_{group}.txt` file of `dir`.
	///
	/// # Errors
	/// - `Corpus` if a filename is not `{race}_{group}`
	/// - `UnknownCategory` if the race or group is not a known label
	/// - `Io` on read failure
	pub fn load<P: AsRef<Path>>(dir: P) -> Result<Self> {
		let folder = io::normalize_folder(dir.as_ref());
		if !folder.is_dir() {
			return Err(NameError::Corpus(format!("expected a directory, got: {}", folder.display())));
		}

		let races = CategoryEncoder::races();
		let groups = CategoryEncoder::groups();
		let mut corpus = Self::default();

		for file in io::list_files(&folder, "txt")? {
			if file == EXCLUDED_FILE {
				continue;
			}

			let stem = io::get_filename(&file)?;
			let (race, group) = stem
				.split_once('_')
				.filter(|(_, group)| !group.contains('_'))
				.ok_or_else(|| NameError::Corpus(format!("'{file}' is not named {{race}}_{{group}}.txt")))?;
			races.encode(race)?;
			groups.encode(group)?;

			for line in io::read_file(folder.join(&file))? {
				corpus.push(line.trim(), race, group);
			}
		}

		log::info!("Loaded {} names from {}", corpus.len(), folder.display());
		Ok(corpus)
	}

	fn push(&mut self, name: &str, race: &str, group: &str) {
		if name.is_empty() {
			return;
		}
		self.known.insert(name.to_lowercase());
		self.entries.push(CorpusEntry { name: name.to_owned(), race: race.to_owned(), group: group.to_owned() });
	}

	pub fn entries(&self) -> &[CorpusEntry] {
		&self.entries
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Case-insensitive lookup of a single name.
	pub fn contains(&self, name: &str) -> bool {
		self.known.contains(&name.to_lowercase())
	}

	/// Encodes every entry as a next-character prediction pair.
	///
	/// # Errors
	/// `UnknownSymbol` if a name uses a character outside the vocabulary.
	pub fn samples(&self, vocab: &Vocabulary) -> Result<Vec<TrainingSample>> {
		let races = CategoryEncoder::races();
		let groups = CategoryEncoder::groups();

		self.entries
			.iter()
			.map(|entry| {
				let inputs = vocab.encode_str(&entry.name)?;
				let mut targets = inputs[1..].to_vec();
				targets.push(vocab.encode(END_CHAR)?);
				Ok(TrainingSample {
					inputs,
					race: races.encode(&entry.race)?,
					group: groups.encode(&entry.group)?,
					targets,
				})
			})
			.collect()
	}
}

/// Rewrites a name list without duplicates, sorted. Returns the number of
/// names kept.
pub fn tidy_file<P: AsRef<Path>>(path: P) -> Result<usize> {
	let mut names: Vec<String> = io::read_file(&path)?.into_iter().map(|l| l.trim().to_owned()).collect();
	names.sort();
	names.dedup();
	io::write_lines(&path, &names)?;
	Ok(names.len())
}
