use serde::{Deserialize, Serialize};

use crate::script;

/// Granularity of a chunk.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ChunkType {
	Word,
	Phrase,
	Sentence,
	Paragraph,
	Compound,
	Fragment,
}

/// Where a chunk came from.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ChunkSource {
	/// Taken verbatim from the input (whole lines).
	Original,
	/// Produced by a boundary scan.
	Segmented,
	/// Produced by a linguistic rule (connectors, compounds).
	Analyzed,
	/// Recombined from other chunks.
	Synthetic,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
	Simple,
	Medium,
	Complex,
}

/// Optional descriptive data; missing counts are filled in by the quality pass.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct ChunkMetadata {
	pub syllable_count: Option<usize>,
	pub word_count: Option<usize>,
	pub has_numbers: Option<bool>,
	pub has_mixed_script: Option<bool>,
	pub complexity: Option<Complexity>,
}

/// A candidate text span with granularity, provenance and a quality score.
///
/// # Invariants
/// - `length` is the character count of `text`
/// - `confidence` lies in `[0.0, 1.0]`
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct TextChunk {
	pub text: String,
	pub chunk_type: ChunkType,
	pub length: usize,
	pub source: ChunkSource,
	pub confidence: f64,
	pub metadata: ChunkMetadata,
}

impl TextChunk {
	/// Creates a chunk; the confidence is clamped into `[0.0, 1.0]`.
	pub fn new(text: impl Into<String>, chunk_type: ChunkType, source: ChunkSource, confidence: f64) -> Self {
		let text = text.into();
		Self {
			length: script::char_len(&text),
			text,
			chunk_type,
			source,
			confidence: confidence.clamp(0.0, 1.0),
			metadata: ChunkMetadata::default(),
		}
	}

	pub fn with_metadata(mut self, metadata: ChunkMetadata) -> Self {
		self.metadata = metadata;
		self
	}

	/// Fills in syllable and word counts when absent.
	pub(crate) fn complete_metadata(&mut self) {
		if self.metadata.syllable_count.is_none() {
			self.metadata.syllable_count = Some(script::count_syllables(&self.text));
		}
		if self.metadata.word_count.is_none() {
			self.metadata.word_count = Some(script::count_words(&self.text));
		}
	}
}
