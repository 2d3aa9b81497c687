//! Synthetic Lao text generation for OCR training corpora.
//!
//! This crate provides the corpus synthesis side of a dataset pipeline:
//! - Rule-based enumeration of the Lao syllable space (`syllable`)
//! - Multi-granularity segmentation of free text into scored chunks (`segment`)
//! - A sampling pool serving draws with anti-repetition and category balance (`pool`)
//!
//! Rendering, image effects and export are handled by the embedding application.
//! Everything here is in-memory and synchronous.

/// Codepoint classification for the Lao block.
///
/// Shared by every component; all "contains target script" checks go through here.
pub mod script;

/// Syllable space enumeration from consonant, vowel and tone rule tables.
pub mod syllable;

/// Raw text normalization and chunk extraction.
pub mod segment;

/// Candidate pool and draw policy.
pub mod pool;

/// Aggregated configuration, loadable from TOML.
pub mod config;

/// Crate error type.
pub mod error;

/// File helpers for documents and configuration.
pub mod io;

pub use config::CorpusConfig;
pub use error::{LaoGenError, LaoGenResult};
pub use pool::{Draw, SamplingPool, SharedSamplingPool};
pub use segment::{ChunkType, FilterOptions, TextChunk, TextSegmenter};
pub use syllable::{SyllableSpace, SyllableSpaceGenerator};

/// Enumerates the full syllable space from the built-in Lao tables.
pub fn generate_syllable_space() -> SyllableSpace {
	SyllableSpaceGenerator::lao().generate_syllable_space()
}

/// Segments raw text with the default segmenter configuration.
///
/// Synthetic augmentation is seeded from the thread RNG; use
/// [`TextSegmenter::process_text_with_seed`] for reproducible output.
pub fn process_text(raw: &str) -> Vec<TextChunk> {
	TextSegmenter::default().process_text(raw)
}

/// Order-preserving chunk filter, see [`segment::filter_chunks`].
pub fn filter_chunks(chunks: &[TextChunk], options: &FilterOptions) -> Vec<TextChunk> {
	segment::filter_chunks(chunks, options)
}
