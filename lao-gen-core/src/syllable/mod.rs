//! Syllable space enumeration.
//!
//! This module builds every written syllable reachable from a closed set of
//! rule tables:
//! - Consonant anchors (single letters and clusters)
//! - Vowel templates with their attachment pattern (suffix, circumfix, prefix)
//! - Tone marks, stacked after the first consonant-class grapheme
//!
//! On top of the single syllables it composes bounded multi-syllable words,
//! documented spelling variants and a small set of template phrases.

/// Rule tables: consonants, vowel templates, tones, variants, phrase lexicon.
///
/// All tables are serde types so alternative tables can be loaded from TOML.
pub mod rules;

/// Generator parameters (base subset bounds, per-length word limits).
pub mod config;

/// The enumerator itself.
pub mod generator;

pub use config::GeneratorConfig;
pub use generator::{
	ConsonantBatch, SpaceStats, SpecialVariant, Syllable, SyllableSpace, SyllableSpaceGenerator,
};
pub use rules::{Attachment, ConsonantEntry, ConsonantKind, RuleTables, ToneMark, VowelGroup, VowelTemplate};
