use super::chunk::{ChunkMetadata, ChunkSource, ChunkType, Complexity, TextChunk};
use super::lexicon::{CONNECTORS, is_common_word};
use super::weights::PhraseWeights;
use crate::script;

const MIN_NGRAM_CHARS: usize = 5;
const MAX_NGRAM_CHARS: usize = 120;
const CONNECTOR_CONTEXT_WORDS: usize = 3;
const MIN_CONNECTOR_CHARS: usize = 10;
const MAX_CONNECTOR_CHARS: usize = 100;

/// Sliding word n-grams of every size from `min_words` to `max_words`.
pub(crate) fn ngram_phrases(sentence: &str, w: &PhraseWeights) -> Vec<TextChunk> {
	let words: Vec<&str> = sentence.split_whitespace().collect();
	let mut phrases = Vec::new();
	for n in w.min_words..=w.max_words.min(words.len()) {
		for window in words.windows(n) {
			let phrase = window.join(" ");
			let len = script::char_len(&phrase);
			if !(MIN_NGRAM_CHARS..=MAX_NGRAM_CHARS).contains(&len) {
				continue;
			}
			let complexity = match n {
				n if n > 4 => Complexity::Complex,
				n if n > 2 => Complexity::Medium,
				_ => Complexity::Simple,
			};
			let metadata = ChunkMetadata {
				word_count: Some(n),
				syllable_count: Some(script::count_syllables(&phrase)),
				complexity: Some(complexity),
				..Default::default()
			};
			let confidence = phrase_confidence(&phrase, w);
			phrases.push(TextChunk::new(phrase, ChunkType::Phrase, ChunkSource::Segmented, confidence).with_metadata(metadata));
		}
	}
	phrases
}

/// Joins the words around every connector occurrence of a sentence into one
/// phrase. Occurrences without a word on both sides are skipped.
pub(crate) fn connector_phrases(sentence: &str, confidence: f64) -> Vec<TextChunk> {
	let mut phrases = Vec::new();
	for connector in CONNECTORS {
		for (at, _) in sentence.match_indices(connector) {
			let before: Vec<&str> = sentence[..at].split_whitespace().collect();
			let after: Vec<&str> = sentence[at + connector.len()..].split_whitespace().take(CONNECTOR_CONTEXT_WORDS).collect();
			if before.is_empty() || after.is_empty() {
				continue;
			}
			let parts: Vec<&str> = before[before.len().saturating_sub(CONNECTOR_CONTEXT_WORDS)..]
				.iter()
				.copied()
				.chain(std::iter::once(connector))
				.chain(after)
				.collect();
			let phrase = parts.join(" ");
			let len = script::char_len(&phrase);
			if !(MIN_CONNECTOR_CHARS..=MAX_CONNECTOR_CHARS).contains(&len) {
				continue;
			}
			let metadata = ChunkMetadata {
				word_count: Some(parts.len()),
				complexity: Some(Complexity::Medium),
				..Default::default()
			};
			phrases.push(TextChunk::new(phrase, ChunkType::Phrase, ChunkSource::Analyzed, confidence).with_metadata(metadata));
		}
	}
	phrases
}

pub(crate) fn phrase_confidence(phrase: &str, w: &PhraseWeights) -> f64 {
	let words: Vec<&str> = phrase.split_whitespace().collect();
	let mut confidence = w.base;
	if words.iter().any(|word| is_common_word(word)) {
		confidence += w.particle_bonus;
	}
	if (w.min_words..=w.max_words).contains(&words.len()) {
		confidence += w.word_count_bonus;
	}
	if script::contains_lao(phrase) {
		confidence += w.script_bonus;
		if words.iter().all(|word| script::contains_lao(word)) {
			confidence += w.all_script_bonus;
		}
	}
	if words.len() == 1 {
		confidence -= w.single_word_penalty;
	}
	if words.iter().any(|word| script::char_len(word) > w.long_word_above) {
		confidence -= w.long_word_penalty;
	}
	confidence.clamp(w.floor, w.ceiling)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::segment::weights::ConfidenceWeights;

	#[test]
	fn test_ngram_sizes_and_lengths() {
		let w = ConfidenceWeights::V1.phrase;
		let phrases = ngram_phrases("ຂ້ອຍ ໄປ ຮຽນ ທີ່ ໂຮງຮຽນ", &w);
		// 4 bigrams + 3 trigrams + 2 four-grams + 1 five-gram
		assert_eq!(phrases.len(), 10);
		assert!(phrases.iter().all(|p| p.chunk_type == ChunkType::Phrase));
		assert!(phrases.iter().all(|p| (5..=120).contains(&p.length)));
		let longest = phrases.last().unwrap();
		assert_eq!(longest.metadata.word_count, Some(5));
		assert_eq!(longest.metadata.complexity, Some(Complexity::Complex));
	}

	#[test]
	fn test_ngram_drops_short_phrases() {
		let w = ConfidenceWeights::V1.phrase;
		assert!(ngram_phrases("a b", &w).is_empty());
		assert!(ngram_phrases("ລາວ", &w).is_empty());
	}

	#[test]
	fn test_phrase_confidence() {
		let w = ConfidenceWeights::V1.phrase;
		// 0.5 + particle + count + script + all-script
		assert!((phrase_confidence("ຂ້ອຍ ແລະ ເຈົ້າ", &w) - 1.0).abs() < 1e-9);
		// 0.5 + count
		assert!((phrase_confidence("hello world", &w) - 0.6).abs() < 1e-9);
		// 0.5 - single word
		assert!((phrase_confidence("hello", &w) - 0.4).abs() < 1e-9);
	}

	#[test]
	fn test_phrase_confidence_punctuation_and_connectors() {
		let w = ConfidenceWeights::V1.phrase;
		// trailing punctuation keeps the all-Lao bonus
		assert!((phrase_confidence("ສະບາຍ ດີ.", &w) - 0.9).abs() < 1e-9);
		// connectors are not common words
		assert!((phrase_confidence("ສະບາຍ ແຕ່", &w) - 0.9).abs() < 1e-9);
		// one Latin word drops the all-Lao bonus
		assert!((phrase_confidence("ສະບາຍ ok", &w) - 0.8).abs() < 1e-9);
	}

	#[test]
	fn test_connector_phrases() {
		let phrases = connector_phrases("ຂ້ອຍ ມັກ ກິນ ເຂົ້າ ແລະ ດື່ມ ນ້ຳ ຫຼາຍ ໆ ມື້", 0.8);
		let joined = phrases.iter().find(|p| p.text.contains(" ແລະ ")).unwrap();
		assert_eq!(joined.text, "ມັກ ກິນ ເຂົ້າ ແລະ ດື່ມ ນ້ຳ ຫຼາຍ");
		assert_eq!(joined.source, ChunkSource::Analyzed);
		assert_eq!(joined.confidence, 0.8);
		assert_eq!(joined.metadata.word_count, Some(7));
	}

	#[test]
	fn test_connector_needs_context_on_both_sides() {
		assert!(connector_phrases("ແລະ ດື່ມ ນ້ຳ ຫຼາຍ", 0.8).is_empty());
		assert!(connector_phrases("ຂ້ອຍ ກິນ ເຂົ້າ ແລະ", 0.8).is_empty());
	}
}
