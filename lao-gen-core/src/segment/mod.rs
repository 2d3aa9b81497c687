//! Free-text segmentation into scored chunks.
//!
//! Pipeline, each stage pure:
//! 1. Normalize (whitespace, quotes, dashes, allow-list)
//! 2. Split into a bounded number of lines
//! 3. Per line: paragraph, sentences, phrases, words, compounds
//! 4. Seeded synthetic augmentation
//! 5. Case-insensitive dedup
//! 6. Quality filter
//! 7. Sort by confidence, then length

/// `TextChunk` and its enums.
pub mod chunk;

/// Versioned confidence weight table.
pub mod weights;

/// Segmenter limits.
pub mod config;

/// The pipeline driver.
pub mod segmenter;

/// Caller-side filtering and balanced selection.
pub mod filter;

pub(crate) mod lexicon;
mod normalize;
mod phrase;
mod sentence;
mod word;

pub use chunk::{ChunkMetadata, ChunkSource, ChunkType, Complexity, TextChunk};
pub use config::SegmenterConfig;
pub use filter::{FilterOptions, ProcessingOptions, balanced_selection, filter_chunks};
pub use segmenter::{LineChunks, TextAnalysis, TextSegmenter, remove_duplicates, sort_chunks};
pub use weights::ConfidenceWeights;
