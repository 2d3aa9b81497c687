use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};
use serde::{Deserialize, Serialize};

use super::chunk::{ChunkType, Complexity, TextChunk};

/// Criteria for [`filter_chunks`]. `None` and empty lists mean "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterOptions {
	pub types: Option<Vec<ChunkType>>,
	pub min_length: Option<usize>,
	pub max_length: Option<usize>,
	pub min_confidence: Option<f64>,
	/// Chunks without a complexity never match a non-empty list.
	pub complexity: Option<Vec<Complexity>>,
	/// Applied after every other criterion.
	pub max_count: Option<usize>,
}

impl FilterOptions {
	fn accepts(&self, chunk: &TextChunk) -> bool {
		if let Some(types) = self.types.as_ref().filter(|t| !t.is_empty()) {
			if !types.contains(&chunk.chunk_type) {
				return false;
			}
		}
		if self.min_length.is_some_and(|min| chunk.length < min) {
			return false;
		}
		if self.max_length.is_some_and(|max| chunk.length > max) {
			return false;
		}
		if self.min_confidence.is_some_and(|min| chunk.confidence < min) {
			return false;
		}
		if let Some(levels) = self.complexity.as_ref().filter(|c| !c.is_empty()) {
			if !chunk.metadata.complexity.is_some_and(|c| levels.contains(&c)) {
				return false;
			}
		}
		true
	}
}

/// Keeps the chunks matching every criterion, in their original order,
/// then truncates to `max_count`.
pub fn filter_chunks(chunks: &[TextChunk], options: &FilterOptions) -> Vec<TextChunk> {
	chunks
		.iter()
		.filter(|c| options.accepts(c))
		.take(options.max_count.unwrap_or(usize::MAX))
		.cloned()
		.collect()
}

/// Caller-facing toggles for turning a segmented document into pool candidates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingOptions {
	/// Words and their fragments.
	pub words: bool,
	pub phrases: bool,
	/// Sentences and whole lines.
	pub sentences: bool,
	pub compounds: bool,
	pub min_length: usize,
	pub max_length: usize,
	pub min_confidence: f64,
	pub complexity: Vec<Complexity>,
	pub max_count: usize,
}

impl Default for ProcessingOptions {
	fn default() -> Self {
		Self {
			words: true,
			phrases: true,
			sentences: true,
			compounds: true,
			min_length: 1,
			max_length: 150,
			min_confidence: 0.1,
			complexity: vec![Complexity::Simple, Complexity::Medium, Complexity::Complex],
			max_count: 500,
		}
	}
}

impl From<&ProcessingOptions> for FilterOptions {
	fn from(options: &ProcessingOptions) -> Self {
		let mut types = Vec::new();
		if options.words {
			types.extend([ChunkType::Word, ChunkType::Fragment]);
		}
		if options.phrases {
			types.push(ChunkType::Phrase);
		}
		if options.sentences {
			types.extend([ChunkType::Sentence, ChunkType::Paragraph]);
		}
		if options.compounds {
			types.push(ChunkType::Compound);
		}
		Self {
			types: Some(types),
			min_length: Some(options.min_length),
			max_length: Some(options.max_length),
			min_confidence: Some(options.min_confidence),
			complexity: Some(options.complexity.clone()),
			max_count: Some(options.max_count),
		}
	}
}

/// Draws a mixed selection of `total` texts: 40% words, 30% phrases,
/// 20% sentences and the remainder paragraphs.
///
/// # Notes
/// - Each type is sampled without replacement, so a type with too few
///   chunks contributes fewer texts and the result may be shorter than `total`.
/// - The result is shuffled.
pub fn balanced_selection<R: Rng + ?Sized>(chunks: &[TextChunk], total: usize, rng: &mut R) -> Vec<String> {
	let words = total * 4 / 10;
	let phrases = total * 3 / 10;
	let sentences = total * 2 / 10;
	let paragraphs = total - words - phrases - sentences;

	let mut selection = Vec::with_capacity(total);
	for (chunk_type, count) in [
		(ChunkType::Word, words),
		(ChunkType::Phrase, phrases),
		(ChunkType::Sentence, sentences),
		(ChunkType::Paragraph, paragraphs),
	] {
		let candidates: Vec<&TextChunk> = chunks.iter().filter(|c| c.chunk_type == chunk_type).collect();
		selection.extend(candidates.choose_multiple(rng, count).map(|c| c.text.clone()));
	}
	selection.shuffle(rng);
	selection
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	use super::*;
	use crate::segment::chunk::{ChunkMetadata, ChunkSource};

	fn chunk(text: &str, chunk_type: ChunkType, confidence: f64, complexity: Option<Complexity>) -> TextChunk {
		TextChunk::new(text, chunk_type, ChunkSource::Segmented, confidence)
			.with_metadata(ChunkMetadata { complexity, ..Default::default() })
	}

	fn sample() -> Vec<TextChunk> {
		vec![
			chunk("ລາວ", ChunkType::Word, 0.9, Some(Complexity::Simple)),
			chunk("ສະບາຍດີ ທ່ານ", ChunkType::Phrase, 0.7, Some(Complexity::Medium)),
			chunk("ກາ", ChunkType::Fragment, 0.3, None),
			chunk("ຂ້ອຍໄປຮຽນທີ່ໂຮງຮຽນ.", ChunkType::Sentence, 0.8, Some(Complexity::Complex)),
		]
	}

	#[test]
	fn test_empty_options_keep_everything() {
		let chunks = sample();
		assert_eq!(filter_chunks(&chunks, &FilterOptions::default()), chunks);
		let empty_lists = FilterOptions { types: Some(vec![]), complexity: Some(vec![]), ..Default::default() };
		assert_eq!(filter_chunks(&chunks, &empty_lists).len(), 4);
	}

	#[test]
	fn test_criteria() {
		let chunks = sample();
		let by_type = FilterOptions { types: Some(vec![ChunkType::Word, ChunkType::Fragment]), ..Default::default() };
		assert_eq!(filter_chunks(&chunks, &by_type).len(), 2);

		let by_length = FilterOptions { min_length: Some(3), max_length: Some(12), ..Default::default() };
		let texts: Vec<String> = filter_chunks(&chunks, &by_length).into_iter().map(|c| c.text).collect();
		assert_eq!(texts, vec!["ລາວ", "ສະບາຍດີ ທ່ານ"]);

		let by_confidence = FilterOptions { min_confidence: Some(0.75), ..Default::default() };
		assert_eq!(filter_chunks(&chunks, &by_confidence).len(), 2);

		let by_complexity = FilterOptions { complexity: Some(vec![Complexity::Simple, Complexity::Complex]), ..Default::default() };
		assert_eq!(filter_chunks(&chunks, &by_complexity).len(), 2);
	}

	#[test]
	fn test_truncation_is_last_and_order_preserved() {
		let chunks = sample();
		let options = FilterOptions { min_confidence: Some(0.5), max_count: Some(2), ..Default::default() };
		let texts: Vec<String> = filter_chunks(&chunks, &options).into_iter().map(|c| c.text).collect();
		assert_eq!(texts, vec!["ລາວ", "ສະບາຍດີ ທ່ານ"]);
		let zero = FilterOptions { max_count: Some(0), ..Default::default() };
		assert!(filter_chunks(&chunks, &zero).is_empty());
	}

	#[test]
	fn test_processing_options_expand_types() {
		let options = ProcessingOptions { phrases: false, compounds: false, ..Default::default() };
		let filter = FilterOptions::from(&options);
		assert_eq!(
			filter.types,
			Some(vec![ChunkType::Word, ChunkType::Fragment, ChunkType::Sentence, ChunkType::Paragraph])
		);
		assert_eq!(filter.max_count, Some(500));
	}

	#[test]
	fn test_balanced_selection_shares() {
		let mut chunks = Vec::new();
		for (chunk_type, n) in [(ChunkType::Word, 20), (ChunkType::Phrase, 20), (ChunkType::Sentence, 20), (ChunkType::Paragraph, 20)] {
			for i in 0..n {
				chunks.push(chunk(&format!("{chunk_type:?}{i}"), chunk_type, 0.9, None));
			}
		}
		let mut rng = StdRng::seed_from_u64(3);
		let selection = balanced_selection(&chunks, 10, &mut rng);
		assert_eq!(selection.len(), 10);
		assert_eq!(selection.iter().filter(|t| t.starts_with("Word")).count(), 4);
		assert_eq!(selection.iter().filter(|t| t.starts_with("Phrase")).count(), 3);
		assert_eq!(selection.iter().filter(|t| t.starts_with("Sentence")).count(), 2);
		assert_eq!(selection.iter().filter(|t| t.starts_with("Paragraph")).count(), 1);
	}

	#[test]
	fn test_balanced_selection_short_supply() {
		let chunks = vec![chunk("ລາວ", ChunkType::Word, 0.9, None)];
		let mut rng = StdRng::seed_from_u64(3);
		assert_eq!(balanced_selection(&chunks, 10, &mut rng), vec!["ລາວ"]);
	}
}
