use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{LaoGenError, LaoGenResult};

/// Parameters bounding multi-syllable composition.
///
/// The base subset is the pool of high-frequency syllables words are composed
/// from. It is a tunable parameter, not a linguistic ground truth: the first
/// `base_subset_size` single syllables whose length lies in
/// `[base_min_chars, base_max_chars]`.
///
/// # Notes
/// Enumeration is consonant-major, so with the built-in tables the default
/// subset is anchored on ກ alone and every composed word is built from ກ
/// syllables. Pass a curated list to
/// [`SyllableSpaceGenerator::with_base_syllables`](super::SyllableSpaceGenerator::with_base_syllables)
/// for words mixing consonants.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
	/// Maximum size of the base subset.
	pub base_subset_size: usize,

	/// Minimum syllable length (characters) to enter the base subset.
	base_min_chars: usize,

	/// Maximum syllable length (characters) to enter the base subset.
	base_max_chars: usize,

	/// Word limit per syllable count, used by `generate_syllable_space`.
	pub word_limits: BTreeMap<usize, usize>,
}

impl Default for GeneratorConfig {
	fn default() -> Self {
		Self {
			base_subset_size: 50,
			base_min_chars: 2,
			base_max_chars: 4,
			word_limits: BTreeMap::from([(2, 500), (3, 300), (4, 200)]),
		}
	}
}

impl GeneratorConfig {
	pub fn base_min_chars(&self) -> usize {
		self.base_min_chars
	}

	pub fn base_max_chars(&self) -> usize {
		self.base_max_chars
	}

	/// Sets the inclusive length window of the base subset.
	///
	/// # Errors
	/// Returns an error if `min` is 0 or greater than `max`.
	pub fn set_base_length(&mut self, min: usize, max: usize) -> LaoGenResult<()> {
		if min == 0 || min > max {
			return Err(LaoGenError::InvalidParameter(format!(
				"base syllable length window must satisfy 0 < min <= max, got {}..={}",
				min, max
			)));
		}
		self.base_min_chars = min;
		self.base_max_chars = max;
		Ok(())
	}

	/// Re-checks invariants after deserialization.
	///
	/// # Errors
	/// Same conditions as the setters.
	pub fn validate(&self) -> LaoGenResult<()> {
		let mut copy = self.clone();
		copy.set_base_length(self.base_min_chars, self.base_max_chars)?;
		if self.word_limits.keys().any(|n| *n < 2) {
			return Err(LaoGenError::InvalidParameter("word_limits keys must be >= 2 syllables".to_owned()));
		}
		Ok(())
	}
}
