use serde::{Deserialize, Serialize};

use crate::error::{LaoGenError, LaoGenResult};

/// Bounds that keep segmentation time proportional to a bounded prefix of the input.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmenterConfig {
	/// Characters kept after normalization; the rest is dropped with a notice.
	pub max_chars: usize,

	/// Non-empty lines processed.
	pub max_lines: usize,

	/// Lines longer than this are wrapped at whitespace before processing.
	pub max_line_chars: usize,

	/// Line processing stops once more chunks than this were extracted.
	pub max_chunks: usize,

	/// Synthetic augmentation only runs below this many extracted chunks.
	pub synthetic_threshold: usize,

	/// Sentences must be strictly longer than this to become chunks.
	pub min_sentence_chars: usize,

	/// Maximum synthetic phrases per document.
	pub synthetic_limit: usize,

	/// How many source words lead a pair.
	pub synthetic_lead_words: usize,

	/// How many following words each lead word is paired with.
	pub synthetic_window: usize,

	/// How many qualifying words feed augmentation.
	pub synthetic_source_words: usize,

	/// Longest synthetic phrase kept.
	pub synthetic_max_chars: usize,
}

impl Default for SegmenterConfig {
	fn default() -> Self {
		Self {
			max_chars: 5000,
			max_lines: 50,
			max_line_chars: 200,
			max_chunks: 1000,
			synthetic_threshold: 500,
			min_sentence_chars: 10,
			synthetic_limit: 20,
			synthetic_lead_words: 5,
			synthetic_window: 2,
			synthetic_source_words: 10,
			synthetic_max_chars: 25,
		}
	}
}

impl SegmenterConfig {
	/// # Errors
	/// Returns an error if a cap is zero.
	pub fn validate(&self) -> LaoGenResult<()> {
		let caps = [
			("max_chars", self.max_chars),
			("max_lines", self.max_lines),
			("max_line_chars", self.max_line_chars),
			("max_chunks", self.max_chunks),
		];
		for (name, value) in caps {
			if value == 0 {
				return Err(LaoGenError::InvalidParameter(format!("{name} must be > 0")));
			}
		}
		Ok(())
	}
}
