//! Additive confidence point system.
//!
//! Every weight used by the segmenter lives in one versioned table so that
//! tuning shows up as a new version instead of scattered literal edits.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SentenceWeights {
	pub base: f64,
	pub initial_bonus: f64,
	pub terminal_bonus: f64,
	pub multi_word_bonus: f64,
	pub script_bonus: f64,
	pub short_penalty: f64,
	pub short_below: usize,
	pub long_penalty: f64,
	pub long_above: usize,
	pub floor: f64,
	pub ceiling: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhraseWeights {
	pub base: f64,
	pub particle_bonus: f64,
	pub word_count_bonus: f64,
	pub min_words: usize,
	pub max_words: usize,
	pub script_bonus: f64,
	pub all_script_bonus: f64,
	pub single_word_penalty: f64,
	pub long_word_penalty: f64,
	pub long_word_above: usize,
	pub floor: f64,
	pub ceiling: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WordWeights {
	pub base: f64,
	pub script_bonus: f64,
	pub pure_script_bonus: f64,
	pub length_bonus: f64,
	pub min_len: usize,
	pub max_len: usize,
	pub common_bonus: f64,
	pub empty_penalty: f64,
	pub long_penalty: f64,
	pub long_above: usize,
	pub numeric_penalty: f64,
	pub floor: f64,
	pub ceiling: f64,
}

/// Confidences assigned without scoring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedConfidence {
	pub paragraph: f64,
	pub connector_phrase: f64,
	pub compound: f64,
	pub synthetic_phrase: f64,
	pub bisection_fragment: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfidenceWeights {
	pub version: u32,
	pub sentence: SentenceWeights,
	pub phrase: PhraseWeights,
	pub word: WordWeights,
	pub fixed: FixedConfidence,
	/// Chunks scoring below this are dropped by the quality filter.
	pub min_confidence: f64,
}

impl ConfidenceWeights {
	pub const V1: ConfidenceWeights = ConfidenceWeights {
		version: 1,
		sentence: SentenceWeights {
			base: 0.6,
			initial_bonus: 0.1,
			terminal_bonus: 0.1,
			multi_word_bonus: 0.1,
			script_bonus: 0.1,
			short_penalty: 0.1,
			short_below: 5,
			long_penalty: 0.1,
			long_above: 300,
			floor: 0.2,
			ceiling: 1.0,
		},
		phrase: PhraseWeights {
			base: 0.5,
			particle_bonus: 0.2,
			word_count_bonus: 0.1,
			min_words: 2,
			max_words: 7,
			script_bonus: 0.2,
			all_script_bonus: 0.1,
			single_word_penalty: 0.1,
			long_word_penalty: 0.05,
			long_word_above: 20,
			floor: 0.2,
			ceiling: 1.0,
		},
		word: WordWeights {
			base: 0.5,
			script_bonus: 0.3,
			pure_script_bonus: 0.1,
			length_bonus: 0.1,
			min_len: 2,
			max_len: 15,
			common_bonus: 0.1,
			empty_penalty: 0.2,
			long_penalty: 0.1,
			long_above: 25,
			numeric_penalty: 0.05,
			floor: 0.1,
			ceiling: 1.0,
		},
		fixed: FixedConfidence {
			paragraph: 1.0,
			connector_phrase: 0.8,
			compound: 0.7,
			synthetic_phrase: 0.6,
			bisection_fragment: 0.5,
		},
		min_confidence: 0.2,
	};

	/// The table currently in use.
	pub const CURRENT: ConfidenceWeights = Self::V1;
}

impl Default for ConfidenceWeights {
	fn default() -> Self {
		Self::CURRENT
	}
}
