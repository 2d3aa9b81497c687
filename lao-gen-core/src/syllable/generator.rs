use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::config::GeneratorConfig;
use super::rules::{Attachment, ConsonantEntry, ConsonantKind, RuleTables, ToneMark, VowelTemplate};
use crate::script;

/// One written syllable and the rule triple that produced it.
///
/// Indices point into the generator's `RuleTables`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Syllable {
	pub text: String,
	pub consonant: usize,
	pub vowel: usize,
	pub tone: usize,
}

/// A syllable spelled with a canonical or an alternate grapheme.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct SpecialVariant {
	pub text: String,
	/// Canonical grapheme of the variant group.
	pub canonical: String,
	/// Grapheme actually used in `text`.
	pub grapheme: String,
	pub is_canonical: bool,
	pub vowel: usize,
	pub tone: usize,
}

/// All syllables anchored on one consonant.
///
/// Batches are the natural yield point of the enumeration: a caller can
/// interleave other work between two batches.
#[derive(Clone, Debug)]
pub struct ConsonantBatch {
	pub consonant: usize,
	pub syllables: Vec<Syllable>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct SpaceStats {
	pub consonants: usize,
	pub vowels: usize,
	pub tones: usize,
	pub total_possible: usize,
	pub total_generated: usize,
	/// Triples that produced no syllable (malformed entry, composition gap, duplicate).
	pub skipped: usize,
	/// Multi-syllable word count per syllable count.
	pub multi_syllable: BTreeMap<usize, usize>,
	pub special_variants: usize,
	pub template_phrases: usize,
	pub grand_total: usize,
}

/// Everything the generator produces in one call.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct SyllableSpace {
	pub syllables: Vec<Syllable>,
	pub words_by_length: BTreeMap<usize, Vec<String>>,
	pub special_variants: Vec<SpecialVariant>,
	pub template_phrases: Vec<String>,
	pub by_consonant: BTreeMap<String, Vec<String>>,
	pub by_vowel: BTreeMap<String, Vec<String>>,
	pub by_tone: BTreeMap<String, Vec<String>>,
	pub stats: SpaceStats,
}

impl SyllableSpace {
	/// Multi-syllable words made of `n` syllables, empty if none were generated.
	pub fn words(&self, n: usize) -> &[String] {
		self.words_by_length.get(&n).map(Vec::as_slice).unwrap_or(&[])
	}

	pub fn syllable_texts(&self) -> impl Iterator<Item = &str> {
		self.syllables.iter().map(|s| s.text.as_str())
	}
}

/// Deterministic enumerator of the syllable space.
///
/// # Responsibilities
/// - Compose consonant + vowel template + tone into written syllables
/// - Enumerate consonants outer, vowels middle, tones inner
/// - Compose bounded multi-syllable words from a high-frequency subset
/// - Emit documented spelling variants
///
/// # Invariants
/// - Identical tables and config always give identical output (order and content)
/// - Every syllable holds one consonant anchor and only Lao codepoints
/// - No method mutates the generator; all are re-entrant
#[derive(Debug, Clone)]
pub struct SyllableSpaceGenerator {
	tables: RuleTables,
	config: GeneratorConfig,
	base_override: Option<Vec<String>>,
}

impl SyllableSpaceGenerator {
	pub fn new(tables: RuleTables, config: GeneratorConfig) -> Self {
		Self { tables, config, base_override: None }
	}

	/// Generator over the built-in Lao tables with default parameters.
	pub fn lao() -> Self {
		Self::new(RuleTables::lao(), GeneratorConfig::default())
	}

	/// Replaces the computed high-frequency subset with a caller-supplied one.
	///
	/// Entries that are not pure Lao are dropped.
	pub fn with_base_syllables(mut self, base: Vec<String>) -> Self {
		self.base_override = Some(base.into_iter().filter(|s| script::is_pure_lao(s)).collect());
		self
	}

	pub fn tables(&self) -> &RuleTables {
		&self.tables
	}

	pub fn config(&self) -> &GeneratorConfig {
		&self.config
	}

	/// Builds the syllable core from a consonant and a vowel template.
	///
	/// - Suffix vowels are appended
	/// - Circumfix vowels wrap the consonant (prefix + consonant + suffix)
	/// - Prefix-only vowels are prepended
	///
	/// Returns `None` when either entry is malformed.
	pub fn apply_vowel_to_consonant(consonant: &ConsonantEntry, vowel: &VowelTemplate) -> Option<String> {
		consonant.check().ok()?;
		vowel.check().ok()?;
		let c = consonant.grapheme.as_str();
		let core = match &vowel.attachment {
			Attachment::Suffix { suffix } => format!("{c}{suffix}"),
			Attachment::Circumfix { prefix, suffix } => format!("{prefix}{c}{suffix}"),
			Attachment::Prefix { prefix } => format!("{prefix}{c}"),
		};
		Some(core)
	}

	/// Inserts a tone mark right after the first consonant-class grapheme.
	///
	/// The grapheme is the first consonant-class letter plus the non-spacing
	/// vowel marks stacked on it, so the tone lands above them as written
	/// (ກິ + ່ gives ກິ່, not ກ່ິ).
	///
	/// Returns `None` when the tone is malformed, the core has no consonant
	/// to carry the mark, or the core already carries a tone.
	pub fn insert_tone(core: &str, tone: &ToneMark) -> Option<String> {
		tone.check().ok()?;
		if tone.symbol.is_empty() {
			return Some(core.to_owned());
		}
		if core.chars().any(script::is_tone_mark) {
			return None;
		}

		let mut chars = core.char_indices().skip_while(|(_, c)| !script::is_consonant_class(*c));
		let (anchor, anchor_char) = chars.next()?;
		let mut position = anchor + anchor_char.len_utf8();
		for (i, c) in chars {
			if !script::is_combining(c) {
				break;
			}
			position = i + c.len_utf8();
		}

		let mut syllable = String::with_capacity(core.len() + tone.symbol.len());
		syllable.push_str(&core[..position]);
		syllable.push_str(&tone.symbol);
		syllable.push_str(&core[position..]);
		Some(syllable)
	}

	/// Lazily enumerates syllables one consonant at a time.
	///
	/// Malformed vowel and tone entries are logged once here and skipped;
	/// malformed consonants are logged and skipped as they are reached.
	pub fn syllables_by_consonant(&self) -> ConsonantBatches<'_> {
		ConsonantBatches {
			tables: &self.tables,
			vowels: valid_indices(&self.tables.vowels, VowelTemplate::check, "vowel template"),
			tones: valid_indices(&self.tables.tones, ToneMark::check, "tone"),
			next: 0,
			seen: HashSet::new(),
		}
	}

	/// All single syllables in consonant, vowel, tone order.
	///
	/// At most `|C| x |V| x |T|` entries; combinations that fail composition
	/// are skipped, never padded.
	pub fn generate_single_syllables(&self) -> Vec<Syllable> {
		self.syllables_by_consonant().flat_map(|batch| batch.syllables).collect()
	}

	/// The high-frequency subset multi-syllable words are composed from.
	///
	/// Only enumerates as many consonants as needed to fill the subset.
	pub fn base_syllables(&self) -> Vec<String> {
		if let Some(base) = &self.base_override {
			return base.clone();
		}
		let (min, max) = (self.config.base_min_chars(), self.config.base_max_chars());
		self.syllables_by_consonant()
			.flat_map(|batch| batch.syllables)
			.map(|s| s.text)
			.filter(|s| (min..=max).contains(&script::char_len(s)))
			.take(self.config.base_subset_size)
			.collect()
	}

	/// Composes words of `n` base syllables, in lexicographic order over the
	/// base subset, stopping at `limit` words.
	///
	/// Work is proportional to `limit * n`, independent of the size of the
	/// full syllable space.
	pub fn generate_multi_syllable_words(&self, n: usize, limit: usize) -> Vec<String> {
		if n == 0 || limit == 0 {
			return Vec::new();
		}
		let base = self.base_syllables();
		if base.is_empty() {
			return Vec::new();
		}

		let mut words = Vec::with_capacity(limit.min(1024));
		let mut seen = HashSet::new();
		let mut indices = vec![0usize; n];
		'odometer: loop {
			let word: String = indices.iter().map(|i| base[*i].as_str()).collect();
			if seen.insert(word.clone()) {
				words.push(word);
				if words.len() >= limit {
					break;
				}
			}

			// Advance the rightmost position, carrying to the left
			let mut position = n;
			loop {
				if position == 0 {
					break 'odometer;
				}
				position -= 1;
				indices[position] += 1;
				if indices[position] < base.len() {
					break;
				}
				indices[position] = 0;
			}
		}
		words
	}

	/// For every variant group, one syllable per (vowel, tone) pair for the
	/// canonical grapheme followed by each alternate.
	pub fn generate_special_variants(&self) -> Vec<SpecialVariant> {
		let vowels = valid_indices(&self.tables.vowels, VowelTemplate::check, "vowel template");
		let tones = valid_indices(&self.tables.tones, ToneMark::check, "tone");
		let mut variants = Vec::new();

		for group in &self.tables.variants {
			let spellings: Vec<(&str, bool)> = std::iter::once((group.canonical.as_str(), true))
				.chain(group.alternates.iter().map(|a| (a.as_str(), false)))
				.collect();

			for &vi in &vowels {
				for &ti in &tones {
					for &(grapheme, is_canonical) in &spellings {
						let kind = if script::char_len(grapheme) > 1 { ConsonantKind::Cluster } else { ConsonantKind::Single };
						let entry = ConsonantEntry { grapheme: grapheme.to_owned(), kind };
						let text = Self::apply_vowel_to_consonant(&entry, &self.tables.vowels[vi])
							.and_then(|core| Self::insert_tone(&core, &self.tables.tones[ti]));
						match text {
							Some(text) => variants.push(SpecialVariant {
								text,
								canonical: group.canonical.clone(),
								grapheme: grapheme.to_owned(),
								is_canonical,
								vowel: vi,
								tone: ti,
							}),
							None => debug!("Variant {:?} cannot take vowel {} tone {}, skipped", grapheme, vi, ti),
						}
					}
				}
			}
		}
		variants
	}

	/// Subject + verb + object sentences followed by the greeting list.
	pub fn generate_template_phrases(&self) -> Vec<String> {
		let lexicon = &self.tables.phrases;
		let clean = |words: &[String]| -> Vec<String> {
			words
				.iter()
				.filter(|w| {
					let ok = script::is_pure_lao(w);
					if !ok {
						warn!("Phrase lexicon entry {:?} is not pure Lao, skipped", w);
					}
					ok
				})
				.cloned()
				.collect()
		};
		let (subjects, verbs, objects) = (clean(&lexicon.subjects), clean(&lexicon.verbs), clean(&lexicon.objects));

		let mut phrases = Vec::with_capacity(subjects.len() * verbs.len() * objects.len() + lexicon.greetings.len());
		for subject in &subjects {
			for verb in &verbs {
				for object in &objects {
					phrases.push(format!("{subject} {verb} {object}"));
				}
			}
		}
		phrases.extend(clean(&lexicon.greetings));
		phrases
	}

	/// Runs every enumeration and gathers organisation indices and statistics.
	pub fn generate_syllable_space(&self) -> SyllableSpace {
		let mut space = SyllableSpace::default();

		for batch in self.syllables_by_consonant() {
			let consonant = &self.tables.consonants[batch.consonant].grapheme;
			for syllable in batch.syllables {
				let text = &syllable.text;
				space.by_consonant.entry(consonant.clone()).or_default().push(text.clone());
				space.by_vowel.entry(self.tables.vowels[syllable.vowel].form.clone()).or_default().push(text.clone());
				space.by_tone.entry(self.tables.tones[syllable.tone].name.clone()).or_default().push(text.clone());
				space.syllables.push(syllable);
			}
		}

		for (&n, &limit) in &self.config.word_limits {
			let words = self.generate_multi_syllable_words(n, limit);
			space.stats.multi_syllable.insert(n, words.len());
			space.words_by_length.insert(n, words);
		}

		space.special_variants = self.generate_special_variants();
		space.template_phrases = self.generate_template_phrases();

		let stats = &mut space.stats;
		stats.consonants = self.tables.consonants.len();
		stats.vowels = self.tables.vowels.len();
		stats.tones = self.tables.tones.len();
		stats.total_possible = self.tables.total_possible();
		stats.total_generated = space.syllables.len();
		stats.skipped = stats.total_possible - stats.total_generated;
		stats.special_variants = space.special_variants.len();
		stats.template_phrases = space.template_phrases.len();
		stats.grand_total = stats.total_generated
			+ stats.multi_syllable.values().sum::<usize>()
			+ stats.special_variants
			+ stats.template_phrases;

		info!(
			"Syllable space: {} syllables ({} skipped), {} words, {} variants, {} phrases",
			stats.total_generated,
			stats.skipped,
			stats.multi_syllable.values().sum::<usize>(),
			stats.special_variants,
			stats.template_phrases
		);
		space
	}
}

/// Indices of the entries passing `check`, logging the others.
fn valid_indices<T>(entries: &[T], check: fn(&T) -> Result<(), String>, what: &str) -> Vec<usize> {
	entries
		.iter()
		.enumerate()
		.filter_map(|(i, entry)| match check(entry) {
			Ok(()) => Some(i),
			Err(reason) => {
				warn!("Skipping malformed {} #{}: {}", what, i, reason);
				None
			}
		})
		.collect()
}

/// Iterator returned by [`SyllableSpaceGenerator::syllables_by_consonant`].
pub struct ConsonantBatches<'a> {
	tables: &'a RuleTables,
	vowels: Vec<usize>,
	tones: Vec<usize>,
	next: usize,
	seen: HashSet<String>,
}

impl Iterator for ConsonantBatches<'_> {
	type Item = ConsonantBatch;

	fn next(&mut self) -> Option<Self::Item> {
		while self.next < self.tables.consonants.len() {
			let ci = self.next;
			self.next += 1;

			let consonant = &self.tables.consonants[ci];
			if let Err(reason) = consonant.check() {
				warn!("Skipping malformed consonant #{}: {}", ci, reason);
				continue;
			}

			let mut syllables = Vec::with_capacity(self.vowels.len() * self.tones.len());
			for &vi in &self.vowels {
				let vowel = &self.tables.vowels[vi];
				let Some(core) = SyllableSpaceGenerator::apply_vowel_to_consonant(consonant, vowel) else {
					warn!("No composition for {:?} + {:?}", consonant.grapheme, vowel.form);
					continue;
				};
				for &ti in &self.tones {
					let tone = &self.tables.tones[ti];
					match SyllableSpaceGenerator::insert_tone(&core, tone) {
						Some(text) => {
							if self.seen.insert(text.clone()) {
								syllables.push(Syllable { text, consonant: ci, vowel: vi, tone: ti });
							} else {
								debug!("Duplicate syllable {:?} from ({}, {}, {}), skipped", text, ci, vi, ti);
							}
						}
						None => warn!("No tone placement for {:?} + {:?}", core, tone.name_en),
					}
				}
			}
			return Some(ConsonantBatch { consonant: ci, syllables });
		}
		None
	}
}
