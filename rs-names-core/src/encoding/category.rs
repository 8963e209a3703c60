use crate::error::{NameError, Result};

/// Races known to the model, in index order.
pub const RACES: [&str; 6] = ["dwarf", "elf", "goblin", "halfling", "human", "orc"];

/// Groups known to the model, in index order.
///
/// `male` and `female` select the gender of a first name; `last` selects a
/// family name and is used for every last name regardless of gender.
pub const GROUPS: [&str; 3] = ["male", "female", "last"];

/// Group used when sampling family names.
pub const LAST_GROUP: &str = "last";

/// Race whose short names are never treated as degenerate.
pub const GOBLIN_RACE: &str = "goblin";

/// Maps a small ordered list of labels onto contiguous indices from 0.
#[derive(Debug, Clone)]
pub struct CategoryEncoder {
	labels: Vec<String>,
}

impl CategoryEncoder {
	pub fn new<I, S>(labels: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self { labels: labels.into_iter().map(Into::into).collect() }
	}

	/// The race encoder (`dwarf` .. `orc`).
	pub fn races() -> Self {
		Self::new(RACES)
	}

	/// The group encoder (`male`, `female`, `last`).
	pub fn groups() -> Self {
		Self::new(GROUPS)
	}

	pub fn size(&self) -> usize {
		self.labels.len()
	}

	pub fn labels(&self) -> &[String] {
		&self.labels
	}

	pub fn contains(&self, label: &str) -> bool {
		self.labels.iter().any(|l| l == label)
	}

	/// # Errors
	/// `UnknownCategory` if `label` is not one of the labels.
	pub fn encode(&self, label: &str) -> Result<usize> {
		self.labels
			.iter()
			.position(|l| l == label)
			.ok_or_else(|| NameError::UnknownCategory(label.to_owned()))
	}

	/// # Errors
	/// `UnknownIndex` if `index >= size()`.
	pub fn decode(&self, index: usize) -> Result<&str> {
		self.labels.get(index).map(String::as_str).ok_or(NameError::UnknownIndex(index))
	}
}
