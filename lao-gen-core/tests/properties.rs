//! Property tests over arbitrary documents, filter options and pool states.

use lao_gen_core::pool::{PoolConfig, SamplingPool};
use lao_gen_core::script;
use lao_gen_core::segment::segmenter::remove_duplicates;
use lao_gen_core::segment::{ChunkType, FilterOptions, TextSegmenter, filter_chunks};
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

/// Word-ish pieces, separators and the usual troublemakers.
fn arb_fragment() -> impl Strategy<Value = String> {
	prop_oneof![
		Just("ສະບາຍດີ"),
		Just("ລາວ"),
		Just("ແລະ"),
		Just("ຂ້ອຍ"),
		Just("ໂຮງຮຽນ"),
		Just("ເຂົ້າໜຽວ"),
		Just("ໆ"),
		Just(" "),
		Just("  "),
		Just("\n"),
		Just("\r\n"),
		Just("\t"),
		Just(". "),
		Just("!"),
		Just("\""),
		Just("«"),
		Just("3.5"),
		Just("Lao"),
		Just("A."),
		Just("◊"),
	]
	.prop_map(str::to_owned)
}

fn arb_text() -> impl Strategy<Value = String> {
	prop_oneof![
		prop::collection::vec(arb_fragment(), 0..80).prop_map(|parts| parts.concat()),
		"[\\x{0E80}-\\x{0EFF} a-zA-Z0-9.!?\n]{0,200}",
	]
}

fn arb_filter_options() -> impl Strategy<Value = FilterOptions> {
	let types = prop::sample::subsequence(
		vec![
			ChunkType::Word,
			ChunkType::Phrase,
			ChunkType::Sentence,
			ChunkType::Paragraph,
			ChunkType::Compound,
			ChunkType::Fragment,
		],
		0..=6,
	);
	(
		prop::option::of(types),
		prop::option::of(0usize..10),
		prop::option::of(5usize..200),
		prop::option::of(0.0f64..1.0),
		prop::option::of(0usize..40),
	)
		.prop_map(|(types, min_length, max_length, min_confidence, max_count)| FilterOptions {
			types,
			min_length,
			max_length,
			min_confidence,
			complexity: None,
			max_count,
		})
}

/// 27 short, 27 medium and 27 long clean Lao texts.
fn spread_texts() -> Vec<String> {
	let consonants = "ກຂຄງຈຊຍດຕຖທນບປຜຝພຟມຢຣລວສຫອຮ";
	let mut texts = Vec::new();
	for c in consonants.chars() {
		texts.push(format!("{c}າ"));
		texts.push(format!("{c}າ").repeat(5));
		texts.push(format!("{c}າ ").repeat(10).trim().to_owned());
	}
	texts
}

// ---------------------------------------------------------------------------
// Segmentation
// ---------------------------------------------------------------------------

proptest! {
	#[test]
	fn confidence_stays_in_unit_interval(text in arb_text(), seed in any::<u64>()) {
		let segmenter = TextSegmenter::default();
		for chunk in segmenter.extract(&text).iter().chain(&segmenter.process_text_with_seed(&text, seed)) {
			prop_assert!((0.0..=1.0).contains(&chunk.confidence));
			prop_assert_eq!(chunk.length, chunk.text.chars().count());
		}
	}

	#[test]
	fn lao_input_always_yields_a_paragraph(text in arb_text(), seed in any::<u64>()) {
		let input = format!("ລາວ {text}");
		let chunks = TextSegmenter::default().process_text_with_seed(&input, seed);
		prop_assert!(chunks.iter().any(|c| c.chunk_type == ChunkType::Paragraph));
	}

	#[test]
	fn same_seed_same_output(text in arb_text(), seed in any::<u64>()) {
		let segmenter = TextSegmenter::default();
		prop_assert_eq!(segmenter.process_text_with_seed(&text, seed), segmenter.process_text_with_seed(&text, seed));
	}

	#[test]
	fn dedup_is_idempotent(text in arb_text()) {
		let once = remove_duplicates(TextSegmenter::default().extract(&text));
		let twice = remove_duplicates(once.clone());
		prop_assert_eq!(once, twice);
	}

	#[test]
	fn filter_is_an_ordered_subset(text in arb_text(), options in arb_filter_options()) {
		let chunks = TextSegmenter::default().process_text_with_seed(&text, 0);
		let filtered = filter_chunks(&chunks, &options);

		// subsequence of the input
		let mut rest = chunks.iter();
		for chunk in &filtered {
			prop_assert!(rest.any(|c| c == chunk));
		}

		let unbounded = filter_chunks(&chunks, &FilterOptions { max_count: None, ..options.clone() });
		match options.max_count {
			Some(max) if unbounded.len() > max => prop_assert_eq!(filtered.len(), max),
			_ => prop_assert_eq!(filtered.len(), unbounded.len()),
		}
	}
}

// ---------------------------------------------------------------------------
// Sampling pool
// ---------------------------------------------------------------------------

proptest! {
	#[test]
	fn draw_is_never_empty_or_non_lao(
		builtin in prop::collection::vec(arb_text(), 0..20),
		custom in prop::collection::vec(arb_text(), 0..20),
		seed in any::<u64>(),
		n in 1usize..60,
	) {
		let mut pool = SamplingPool::with_seed(PoolConfig::default(), seed);
		pool.add_texts(&builtin);
		pool.add_custom_texts(&custom);
		for draw in pool.draw_many(n) {
			prop_assert!(!draw.text.is_empty());
			prop_assert!(script::contains_lao(&draw.text));
		}
	}

	#[test]
	fn caps_spread_draws_over_a_large_pool(seed in any::<u64>()) {
		let config = PoolConfig::default();
		let cap = config.default_cap;
		let texts = spread_texts();
		let mut pool = SamplingPool::with_seed(config, seed);
		prop_assert_eq!(pool.add_texts(&texts), 81);

		pool.draw_many(60);
		let max_usage = texts.iter().map(|t| pool.usage(t)).max().unwrap_or(0);
		prop_assert!(max_usage <= cap + 1);
	}
}
