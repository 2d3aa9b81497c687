use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use super::chunk::{ChunkMetadata, ChunkSource, ChunkType, Complexity, TextChunk};
use super::config::SegmenterConfig;
use super::lexicon::GARBLED_PATTERNS;
use super::weights::ConfidenceWeights;
use super::{normalize, phrase, sentence, word};
use crate::script;

const MAX_CHUNK_CHARS: usize = 200;
const NON_SCRIPT_MAX_CHARS: usize = 5;
const SYNTHETIC_MIN_WORD: usize = 3;
const SYNTHETIC_MAX_WORD: usize = 8;

/// Document-level features computed once per input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextAnalysis {
	pub has_numbers: bool,
	pub has_mixed_script: bool,
	pub avg_word_length: f64,
	pub complexity: Complexity,
}

impl TextAnalysis {
	pub fn of(text: &str) -> Self {
		let words: Vec<&str> = text.split_whitespace().collect();
		let avg_word_length = if words.is_empty() {
			0.0
		} else {
			words.iter().map(|w| script::char_len(w)).sum::<usize>() as f64 / words.len() as f64
		};
		let has_numbers = script::has_numbers(text);
		let has_mixed_script = script::has_mixed_script(text);
		let complexity = if avg_word_length > 8.0 || has_mixed_script {
			Complexity::Complex
		} else if avg_word_length > 5.0 || has_numbers {
			Complexity::Medium
		} else {
			Complexity::Simple
		};
		Self { has_numbers, has_mixed_script, avg_word_length, complexity }
	}
}

/// Turns free-form text into deduplicated, scored chunks of every granularity.
///
/// # Responsibilities
/// - Normalize and bound the input
/// - Extract paragraphs, sentences, phrases, words, fragments and compounds per line
/// - Add seeded synthetic phrases when the document is small
/// - Deduplicate, filter on quality and sort by confidence
///
/// # Notes
/// Every stage except augmentation is deterministic.
#[derive(Debug, Clone, Default)]
pub struct TextSegmenter {
	config: SegmenterConfig,
	weights: ConfidenceWeights,
}

impl TextSegmenter {
	pub fn new(config: SegmenterConfig, weights: ConfidenceWeights) -> Self {
		Self { config, weights }
	}

	pub fn config(&self) -> &SegmenterConfig {
		&self.config
	}

	pub fn weights(&self) -> &ConfidenceWeights {
		&self.weights
	}

	/// Normalizes raw text and keeps at most `max_chars` characters of it.
	pub fn normalize(&self, raw: &str) -> String {
		let normalized = normalize::normalize(raw);
		normalize::truncate_chars(&normalized, self.config.max_chars).to_owned()
	}

	pub fn analyze(&self, text: &str) -> TextAnalysis {
		TextAnalysis::of(text)
	}

	/// Iterates over the chunks of each line of the normalized input.
	///
	/// # Notes
	/// - At most `max_lines` lines are produced; longer lines are wrapped first.
	/// - Chunks are raw extractions: no dedup, filter or sort.
	pub fn lines(&self, raw: &str) -> LineChunks<'_> {
		let text = self.normalize(raw);
		let analysis = self.analyze(&text);
		let lines = normalize::split_lines(&text, self.config.max_lines, self.config.max_line_chars);
		LineChunks { segmenter: self, lines: lines.into_iter(), analysis }
	}

	/// Extracts every chunk of one normalized line.
	///
	/// Order: paragraph, sentences with their n-gram and connector phrases,
	/// words with their fragments, compounds.
	pub fn process_line(&self, line: &str, analysis: &TextAnalysis) -> Vec<TextChunk> {
		let w = &self.weights;
		let mut chunks = Vec::new();

		let paragraph = ChunkMetadata {
			word_count: Some(script::count_words(line)),
			has_numbers: Some(analysis.has_numbers),
			has_mixed_script: Some(analysis.has_mixed_script),
			complexity: Some(analysis.complexity),
			..Default::default()
		};
		chunks.push(TextChunk::new(line, ChunkType::Paragraph, ChunkSource::Original, w.fixed.paragraph).with_metadata(paragraph));

		for s in sentence::split_sentences(line) {
			if script::char_len(&s) > self.config.min_sentence_chars {
				let metadata = ChunkMetadata {
					word_count: Some(script::count_words(&s)),
					has_numbers: Some(script::has_numbers(&s)),
					has_mixed_script: Some(script::has_mixed_script(&s)),
					complexity: Some(analysis.complexity),
					..Default::default()
				};
				let confidence = sentence::sentence_confidence(&s, &w.sentence);
				chunks.push(TextChunk::new(s.as_str(), ChunkType::Sentence, ChunkSource::Segmented, confidence).with_metadata(metadata));
			}
			chunks.extend(phrase::ngram_phrases(&s, &w.phrase));
			chunks.extend(phrase::connector_phrases(&s, w.fixed.connector_phrase));
		}

		let words = word::split_words(line);
		chunks.extend(word::segment_words(&words, &w.word, &w.fixed));
		chunks.extend(word::compounds(&words, w.fixed.compound));

		chunks
	}

	/// Runs line extraction until the input is exhausted or more than
	/// `max_chunks` chunks were produced.
	pub fn extract(&self, raw: &str) -> Vec<TextChunk> {
		let mut chunks = Vec::new();
		for batch in self.lines(raw) {
			chunks.extend(batch);
			if chunks.len() > self.config.max_chunks {
				info!("Chunk limit of {} reached, remaining lines skipped", self.config.max_chunks);
				break;
			}
		}
		chunks
	}

	/// Pairs nearby words into synthetic two-word phrases.
	///
	/// # Parameters
	/// - `chunks`: Already extracted chunks; only `Word` chunks of 3 to 8
	///   characters are used, first `synthetic_source_words` distinct ones.
	/// - `rng`: Shuffles the source words before pairing.
	///
	/// # Notes
	/// - Each of the first `synthetic_lead_words` source words (never the
	///   last one) is paired with the `synthetic_window` words following it.
	/// - At most `synthetic_limit` phrases of at most `synthetic_max_chars` characters.
	pub fn augment<R: Rng + ?Sized>(&self, chunks: &[TextChunk], rng: &mut R) -> Vec<TextChunk> {
		let config = &self.config;
		let mut seen = HashSet::new();
		let mut sources: Vec<&str> = chunks
			.iter()
			.filter(|c| c.chunk_type == ChunkType::Word && (SYNTHETIC_MIN_WORD..=SYNTHETIC_MAX_WORD).contains(&c.length))
			.map(|c| c.text.as_str())
			.filter(|text| seen.insert(*text))
			.take(config.synthetic_source_words)
			.collect();
		sources.shuffle(rng);

		let mut synthetic = Vec::new();
		let leads = sources.len().saturating_sub(1).min(config.synthetic_lead_words);
		'outer: for i in 0..leads {
			for j in (i + 1)..=(i + config.synthetic_window) {
				let Some(second) = sources.get(j) else { break };
				if synthetic.len() >= config.synthetic_limit {
					break 'outer;
				}
				let text = format!("{} {}", sources[i], second);
				if script::char_len(&text) > config.synthetic_max_chars {
					continue;
				}
				let metadata = ChunkMetadata { word_count: Some(2), ..Default::default() };
				synthetic.push(
					TextChunk::new(text, ChunkType::Phrase, ChunkSource::Synthetic, self.weights.fixed.synthetic_phrase).with_metadata(metadata),
				);
			}
		}
		synthetic
	}

	/// Drops low-quality chunks and completes the metadata of the survivors.
	///
	/// A chunk is dropped when its confidence is below the minimum, it is
	/// empty or longer than 200 characters, it carries a known garbled
	/// substring, or it has no Lao and more than five non-space characters.
	pub fn quality_filter(&self, chunks: Vec<TextChunk>) -> Vec<TextChunk> {
		chunks
			.into_iter()
			.filter(|c| {
				c.confidence >= self.weights.min_confidence
					&& c.length > 0
					&& c.length <= MAX_CHUNK_CHARS
					&& !GARBLED_PATTERNS.iter().any(|p| c.text.contains(p))
					&& (script::contains_lao(&c.text) || c.text.chars().filter(|ch| !ch.is_whitespace()).count() <= NON_SCRIPT_MAX_CHARS)
			})
			.map(|mut c| {
				c.complete_metadata();
				c
			})
			.collect()
	}

	/// Segments raw text, seeding augmentation from `seed`.
	///
	/// Identical input and seed always give identical output.
	pub fn process_text_with_seed(&self, raw: &str, seed: u64) -> Vec<TextChunk> {
		let mut chunks = self.extract(raw);
		let extracted = chunks.len();
		if extracted < self.config.synthetic_threshold {
			let mut rng = StdRng::seed_from_u64(seed);
			let synthetic = self.augment(&chunks, &mut rng);
			chunks.extend(synthetic);
		}
		let total = chunks.len();

		let unique = remove_duplicates(chunks);
		let deduplicated = unique.len();
		let mut kept = self.quality_filter(unique);
		sort_chunks(&mut kept);

		debug!(
			"Segmented {} chunks ({} synthetic), {} after dedup, {} after quality filter",
			total,
			total - extracted,
			deduplicated,
			kept.len()
		);
		kept
	}

	/// Segments raw text with a fresh random augmentation seed.
	pub fn process_text(&self, raw: &str) -> Vec<TextChunk> {
		self.process_text_with_seed(raw, rand::rng().random())
	}
}

/// Per-line chunk batches, see [`TextSegmenter::lines`].
#[derive(Debug)]
pub struct LineChunks<'a> {
	segmenter: &'a TextSegmenter,
	lines: std::vec::IntoIter<String>,
	analysis: TextAnalysis,
}

impl LineChunks<'_> {
	pub fn analysis(&self) -> &TextAnalysis {
		&self.analysis
	}
}

impl Iterator for LineChunks<'_> {
	type Item = Vec<TextChunk>;

	fn next(&mut self) -> Option<Self::Item> {
		let line = self.lines.next()?;
		Some(self.segmenter.process_line(&line, &self.analysis))
	}
}

/// Case-insensitive exact dedup; the first occurrence wins and blank texts are dropped.
pub fn remove_duplicates(chunks: Vec<TextChunk>) -> Vec<TextChunk> {
	let mut seen = HashSet::new();
	chunks
		.into_iter()
		.filter(|c| {
			let key = c.text.trim().to_lowercase();
			!key.is_empty() && seen.insert(key)
		})
		.collect()
}

/// Confidence descending, then length ascending. Stable.
pub fn sort_chunks(chunks: &mut [TextChunk]) {
	chunks.sort_by(|a, b| b.confidence.total_cmp(&a.confidence).then(a.length.cmp(&b.length)));
}
