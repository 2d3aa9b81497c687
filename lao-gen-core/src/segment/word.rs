use std::sync::LazyLock;

use regex::Regex;

use super::chunk::{ChunkMetadata, ChunkSource, ChunkType, Complexity, TextChunk};
use super::lexicon::{is_common_word, is_word_boundary};
use super::weights::{FixedConfidence, WordWeights};
use crate::script;

/// Syllable shapes tried in order: consonant with trailing vowels and tones,
/// consonant-cluster-consonant, consonant-prefix vowel-consonant.
static SYLLABLE_PATTERNS: LazyLock<[Regex; 3]> = LazyLock::new(|| {
	[
		r"[\x{0E81}-\x{0EAE}][\x{0EB0}-\x{0EBD}\x{0EC0}-\x{0EC4}\x{0EC6}\x{0EC8}-\x{0ECD}]*",
		r"[\x{0E81}-\x{0EAE}][\x{0EBA}\x{0EBB}][\x{0E81}-\x{0EAE}]",
		r"[\x{0E81}-\x{0EAE}][\x{0EC0}-\x{0EC4}][\x{0E81}-\x{0EAE}]",
	]
	.map(|pattern| Regex::new(pattern).expect("static syllable pattern"))
});

const DECOMPOSE_ABOVE_CHARS: usize = 6;
const DECOMPOSE_ABOVE_SYLLABLES: usize = 2;
const BISECT_ABOVE_CHARS: usize = 8;
const MIN_FRAGMENT_CHARS: usize = 2;
const MAX_COMPOUND_CHARS: usize = 15;

/// Trims anything that is neither Lao nor an ASCII letter from both ends.
fn clean_word(token: &str) -> &str {
	token.trim_matches(|c: char| !(script::is_lao(c) || c.is_ascii_alphabetic()))
}

/// Splits a line on word boundaries into cleaned, non-empty words.
pub(crate) fn split_words(line: &str) -> Vec<&str> {
	line.split(is_word_boundary).map(clean_word).filter(|w| !w.is_empty()).collect()
}

/// Word chunks for every word of the line, followed by the fragments of
/// the words long enough to decompose.
pub(crate) fn segment_words(words: &[&str], w: &WordWeights, fixed: &FixedConfidence) -> Vec<TextChunk> {
	let mut chunks = Vec::with_capacity(words.len());
	for word in words {
		let syllables = script::count_syllables(word);
		let complexity = match syllables {
			s if s > 3 => Complexity::Complex,
			s if s > 1 => Complexity::Medium,
			_ => Complexity::Simple,
		};
		let metadata = ChunkMetadata {
			syllable_count: Some(syllables),
			has_numbers: Some(script::has_numbers(word)),
			complexity: Some(complexity),
			..Default::default()
		};
		chunks.push(TextChunk::new(*word, ChunkType::Word, ChunkSource::Segmented, word_confidence(word, w)).with_metadata(metadata));

		if script::char_len(word) > DECOMPOSE_ABOVE_CHARS && syllables > DECOMPOSE_ABOVE_SYLLABLES {
			chunks.extend(fragments(word, w, fixed));
		}
	}
	chunks
}

fn fragments(word: &str, w: &WordWeights, fixed: &FixedConfidence) -> Vec<TextChunk> {
	let pieces = split_syllables(word);
	if !pieces.is_empty() {
		return pieces
			.into_iter()
			.map(|piece| {
				let confidence = word_confidence(piece, w);
				TextChunk::new(piece, ChunkType::Fragment, ChunkSource::Segmented, confidence)
			})
			.collect();
	}
	if script::char_len(word) > BISECT_ABOVE_CHARS {
		let (left, right) = bisect(word);
		return [left, right]
			.into_iter()
			.filter(|half| script::char_len(half) >= MIN_FRAGMENT_CHARS)
			.map(|half| TextChunk::new(half, ChunkType::Fragment, ChunkSource::Segmented, fixed.bisection_fragment))
			.collect();
	}
	Vec::new()
}

/// Matches of the first pattern yielding more than one match, keeping those
/// of at least two characters.
pub(crate) fn split_syllables(word: &str) -> Vec<&str> {
	for pattern in SYLLABLE_PATTERNS.iter() {
		let matches: Vec<&str> = pattern.find_iter(word).map(|m| m.as_str()).collect();
		if matches.len() > 1 {
			return matches.into_iter().filter(|m| script::char_len(m) >= MIN_FRAGMENT_CHARS).collect();
		}
	}
	Vec::new()
}

/// Splits at the middle character.
fn bisect(word: &str) -> (&str, &str) {
	let middle = script::char_len(word) / 2;
	let cut = word.char_indices().nth(middle).map_or(word.len(), |(i, _)| i);
	word.split_at(cut)
}

/// Adjacent word pairs glued together.
pub(crate) fn compounds(words: &[&str], confidence: f64) -> Vec<TextChunk> {
	words
		.windows(2)
		.filter_map(|pair| {
			let (a, b) = (pair[0], pair[1]);
			let (len_a, len_b) = (script::char_len(a), script::char_len(b));
			let ok = len_a >= 2
				&& len_b >= 2
				&& len_a + len_b <= MAX_COMPOUND_CHARS
				&& script::contains_lao(a)
				&& script::contains_lao(b);
			ok.then(|| {
				let metadata = ChunkMetadata { word_count: Some(2), ..Default::default() };
				TextChunk::new(format!("{a}{b}"), ChunkType::Compound, ChunkSource::Analyzed, confidence).with_metadata(metadata)
			})
		})
		.collect()
}

pub(crate) fn word_confidence(word: &str, w: &WordWeights) -> f64 {
	let len = script::char_len(word);
	let mut confidence = w.base;
	if script::contains_lao(word) {
		confidence += w.script_bonus;
		if script::is_pure_lao(word) {
			confidence += w.pure_script_bonus;
		}
	}
	if (w.min_len..=w.max_len).contains(&len) {
		confidence += w.length_bonus;
	}
	if is_common_word(word) {
		confidence += w.common_bonus;
	}
	if len == 0 {
		confidence -= w.empty_penalty;
	}
	if len > w.long_above {
		confidence -= w.long_penalty;
	}
	// bare ASCII numbers only
	if len > 0 && word.chars().all(|c| c.is_ascii_digit()) {
		confidence -= w.numeric_penalty;
	}
	confidence.clamp(w.floor, w.ceiling)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::segment::weights::ConfidenceWeights;

	#[test]
	fn test_split_words_trims_and_splits() {
		assert_eq!(split_words("\"ລາວ\", ດີ!  abc-2"), vec!["ລາວ", "ດີ", "abc"]);
		assert_eq!(split_words("ປີ2024."), vec!["ປີ"]);
		assert_eq!(split_words("2024 ໄປ"), vec!["ໄປ"]);
		assert!(split_words(" ... ").is_empty());
	}

	#[test]
	fn test_word_confidence() {
		let w = ConfidenceWeights::V1.word;
		// 0.5 + script + pure + length + common
		assert!((word_confidence("ແລະ", &w) - 1.0).abs() < 1e-9);
		// 0.5 + length
		assert!((word_confidence("hello", &w) - 0.6).abs() < 1e-9);
		// 0.5 + script + length, digits inside a Lao word cost nothing
		assert!((word_confidence("ປີ2024", &w) - 0.9).abs() < 1e-9);
		// 0.5 + length - numeric
		assert!((word_confidence("2024", &w) - 0.55).abs() < 1e-9);
		// Lao digits are pure Lao, not a bare number
		assert!((word_confidence("໒໐໒໔", &w) - 1.0).abs() < 1e-9);
		assert!((word_confidence("", &w) - 0.3).abs() < 1e-9);
	}

	#[test]
	fn test_split_syllables() {
		assert_eq!(split_syllables("ສະບາຍດີ"), vec!["ສະ", "ບາ", "ດີ"]);
		assert!(split_syllables("ກກກກກກກກກ").is_empty());
		assert!(split_syllables("abc").is_empty());
	}

	#[test]
	fn test_fragments_from_long_word() {
		let weights = ConfidenceWeights::V1;
		let chunks = segment_words(&["ສະບາຍດີຫຼາຍໆ"], &weights.word, &weights.fixed);
		assert_eq!(chunks[0].chunk_type, ChunkType::Word);
		assert!(chunks[1..].iter().all(|c| c.chunk_type == ChunkType::Fragment));
		assert!(chunks.len() > 1);
	}

	#[test]
	fn test_bisection_fallback() {
		let weights = ConfidenceWeights::V1;
		let chunks = segment_words(&["ກກກກກກກກກກ"], &weights.word, &weights.fixed);
		assert_eq!(chunks.len(), 3);
		assert_eq!(chunks[1].text, "ກກກກກ");
		assert_eq!(chunks[2].text, "ກກກກກ");
		assert_eq!(chunks[1].confidence, 0.5);
	}

	#[test]
	fn test_short_word_not_decomposed() {
		let weights = ConfidenceWeights::V1;
		let chunks = segment_words(&["ລາວ"], &weights.word, &weights.fixed);
		assert_eq!(chunks.len(), 1);
	}

	#[test]
	fn test_compounds() {
		let chunks = compounds(&["ສະບາຍ", "ດີ", "a", "ລາວ"], 0.7);
		assert_eq!(chunks.len(), 1);
		assert_eq!(chunks[0].text, "ສະບາຍດີ");
		assert_eq!(chunks[0].chunk_type, ChunkType::Compound);
	}
}
