use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::config::PoolConfig;
use crate::script;
use crate::segment::TextChunk;
use crate::segment::lexicon::GARBLED_PATTERNS;
use crate::syllable::SyllableSpace;

const CUSTOM_MIN_CHARS: usize = 2;
const CUSTOM_MAX_CHARS: usize = 50;

/// Which slice of the pool a draw targeted.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PoolCategory {
	/// Caller-supplied texts.
	Custom,
	/// Everything that is not custom.
	Builtin,
	Short,
	Medium,
	Long,
}

/// Step of the fallback chain that produced a draw.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FallbackStep {
	/// Same category, usage cap ignored.
	IgnoreCap,
	/// Whole pool, usage cap ignored.
	WholePool,
	/// One of the configured fallback texts.
	Guaranteed,
}

/// Rendering capability reported by the caller, forwarded untouched on each draw.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderSupport {
	/// Whether the active font renders Lao adequately.
	pub script_supported: bool,
}

impl Default for RenderSupport {
	fn default() -> Self {
		Self { script_supported: true }
	}
}

/// One served text.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Draw {
	pub text: String,
	pub category: PoolCategory,
	/// `None` when the text came from the preferred category under its cap.
	pub fallback: Option<FallbackStep>,
	pub script_supported: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct PoolStats {
	pub custom: usize,
	pub short: usize,
	pub medium: usize,
	pub long: usize,
	/// Draws served since the last session reset.
	pub draws: u64,
	/// Draws of the session that needed a fallback step.
	pub fallbacks: u64,
}

/// Candidate texts, built-in ones split by length.
#[derive(Debug, Default)]
struct Candidates {
	custom: Vec<String>,
	short: Vec<String>,
	medium: Vec<String>,
	long: Vec<String>,
	seen: HashSet<String>,
}

impl Candidates {
	fn members(&self, category: PoolCategory) -> Box<dyn Iterator<Item = &String> + '_> {
		match category {
			PoolCategory::Custom => Box::new(self.custom.iter()),
			PoolCategory::Short => Box::new(self.short.iter()),
			PoolCategory::Medium => Box::new(self.medium.iter()),
			PoolCategory::Long => Box::new(self.long.iter()),
			PoolCategory::Builtin => Box::new(self.short.iter().chain(&self.medium).chain(&self.long)),
		}
	}

	fn all(&self) -> impl Iterator<Item = &String> {
		self.custom.iter().chain(self.members(PoolCategory::Builtin))
	}
}

/// Uniform choice among `members` whose usage is below `cap` (any usage if `None`).
fn pick<'a>(
	members: impl Iterator<Item = &'a String>,
	usage: &HashMap<String, u32>,
	cap: Option<u32>,
	rng: &mut StdRng,
) -> Option<String> {
	let eligible: Vec<&String> = members
		.filter(|text| cap.is_none_or(|cap| usage.get(*text).copied().unwrap_or(0) < cap))
		.collect();
	eligible.choose(rng).map(|text| (*text).clone())
}

/// Custom texts must contain Lao, be 2 to 50 characters long, hold only Lao,
/// whitespace or ASCII punctuation and carry no garbled substring.
pub fn is_valid_custom_text(text: &str) -> bool {
	let allowed = |c: char| script::is_lao(c) || c.is_whitespace() || (' '..='/').contains(&c) || (':'..='@').contains(&c);
	script::contains_lao(text)
		&& (CUSTOM_MIN_CHARS..=CUSTOM_MAX_CHARS).contains(&script::char_len(text))
		&& text.chars().all(allowed)
		&& !GARBLED_PATTERNS.iter().any(|p| text.contains(p))
}

/// The merged candidate universe and the per-session usage counters.
///
/// # Responsibilities
/// - Merge generated, built-in and custom candidates without duplicates
/// - Serve draws balanced between custom texts or length buckets
/// - Deprioritize overused texts, never returning nothing
///
/// # Invariants
/// - Every candidate contains Lao
/// - `usage` only grows until [`reset_session`](Self::reset_session)
/// - [`draw`](Self::draw) always returns a non-empty text containing Lao
#[derive(Debug)]
pub struct SamplingPool {
	config: PoolConfig,
	candidates: Candidates,
	usage: HashMap<String, u32>,
	rng: StdRng,
	render: RenderSupport,
	draws: u64,
	fallbacks: u64,
}

impl Default for SamplingPool {
	fn default() -> Self {
		Self::new(PoolConfig::default())
	}
}

impl SamplingPool {
	/// Creates an empty pool seeded from the thread RNG.
	pub fn new(config: PoolConfig) -> Self {
		Self::with_rng(config, StdRng::from_rng(&mut rand::rng()))
	}

	/// Creates an empty pool whose draws are reproducible for a given seed.
	pub fn with_seed(config: PoolConfig, seed: u64) -> Self {
		Self::with_rng(config, StdRng::seed_from_u64(seed))
	}

	fn with_rng(config: PoolConfig, rng: StdRng) -> Self {
		Self {
			config,
			candidates: Candidates::default(),
			usage: HashMap::new(),
			rng,
			render: RenderSupport::default(),
			draws: 0,
			fallbacks: 0,
		}
	}

	pub fn config(&self) -> &PoolConfig {
		&self.config
	}

	pub fn set_render_support(&mut self, render: RenderSupport) {
		self.render = render;
	}

	pub fn len(&self) -> usize {
		self.candidates.seen.len()
	}

	pub fn is_empty(&self) -> bool {
		self.candidates.seen.is_empty()
	}

	fn insert_builtin(&mut self, text: &str) -> bool {
		let text = text.trim();
		if !script::is_clean_lao(text) || !self.candidates.seen.insert(text.to_owned()) {
			return false;
		}
		let len = script::char_len(text);
		let bucket = if len <= self.config.short_max() {
			&mut self.candidates.short
		} else if len <= self.config.medium_max() {
			&mut self.candidates.medium
		} else {
			&mut self.candidates.long
		};
		bucket.push(text.to_owned());
		true
	}

	fn insert_custom(&mut self, text: &str) -> bool {
		let text = text.trim();
		if !is_valid_custom_text(text) || !self.candidates.seen.insert(text.to_owned()) {
			return false;
		}
		self.candidates.custom.push(text.to_owned());
		true
	}

	/// Adds built-in candidates; returns how many were accepted.
	///
	/// # Notes
	/// Texts are trimmed; anything that is not clean Lao (Lao and whitespace
	/// only) or already pooled is ignored.
	pub fn add_texts<I, S>(&mut self, texts: I) -> usize
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		texts.into_iter().filter(|t| self.insert_builtin(t.as_ref())).count()
	}

	/// Adds every text of a generated syllable space as built-in candidates.
	pub fn add_generated(&mut self, space: &SyllableSpace) -> usize {
		let mut added = self.add_texts(space.syllable_texts());
		added += self.add_texts(space.words_by_length.values().flatten());
		added += self.add_texts(space.special_variants.iter().map(|v| v.text.as_str()));
		added += self.add_texts(&space.template_phrases);
		added
	}

	/// Adds caller-supplied texts; returns how many passed validation.
	///
	/// See [`is_valid_custom_text`].
	pub fn add_custom_texts<I, S>(&mut self, texts: I) -> usize
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		texts.into_iter().filter(|t| self.insert_custom(t.as_ref())).count()
	}

	/// Adds the texts of segmented chunks as custom texts.
	pub fn add_chunks(&mut self, chunks: &[TextChunk]) -> usize {
		self.add_custom_texts(chunks.iter().map(|c| c.text.as_str()))
	}

	/// Draw count of `text` in the current session.
	pub fn usage(&self, text: &str) -> u32 {
		self.usage.get(text).copied().unwrap_or(0)
	}

	/// Clears usage counters and session statistics; candidates are kept.
	pub fn reset_session(&mut self) {
		info!("Sampling session reset after {} draws", self.draws);
		self.usage.clear();
		self.draws = 0;
		self.fallbacks = 0;
	}

	pub fn stats(&self) -> PoolStats {
		PoolStats {
			custom: self.candidates.custom.len(),
			short: self.candidates.short.len(),
			medium: self.candidates.medium.len(),
			long: self.candidates.long.len(),
			draws: self.draws,
			fallbacks: self.fallbacks,
		}
	}

	/// Chooses the preferred category and its usage cap.
	fn roll_category(&mut self) -> (PoolCategory, u32) {
		let roll: f64 = self.rng.random();
		if !self.candidates.custom.is_empty() {
			if roll < self.config.custom_share() {
				(PoolCategory::Custom, self.config.custom_cap)
			} else {
				(PoolCategory::Builtin, self.config.default_cap)
			}
		} else if roll < self.config.short_share() {
			(PoolCategory::Short, self.config.default_cap)
		} else if roll < self.config.short_share() + self.config.medium_share() {
			(PoolCategory::Medium, self.config.default_cap)
		} else {
			(PoolCategory::Long, self.config.default_cap)
		}
	}

	fn guaranteed_text(&mut self) -> String {
		self.config
			.fallback_texts()
			.iter()
			.filter(|t| script::contains_lao(t))
			.collect::<Vec<_>>()
			.choose(&mut self.rng)
			.map(|t| (*t).clone())
			.unwrap_or_else(|| "ລາວ".to_owned())
	}

	/// Serves one text and records its use.
	///
	/// # Behavior
	/// - With custom texts: `custom_share` of the draws prefer custom texts
	///   under `custom_cap`, the others prefer built-in texts under `default_cap`.
	/// - Otherwise: short, medium and long built-in texts by their shares,
	///   each under `default_cap`.
	/// - When the preferred slice has nothing under its cap, the fallback chain
	///   runs: same slice ignoring the cap, then the whole pool ignoring caps,
	///   then the configured fallback texts.
	///
	/// # Notes
	/// Never fails and never returns an empty or non-Lao text.
	pub fn draw(&mut self) -> Draw {
		let (category, cap) = self.roll_category();

		let mut fallback = None;
		let mut text = pick(self.candidates.members(category), &self.usage, Some(cap), &mut self.rng);
		if text.is_none() {
			fallback = Some(FallbackStep::IgnoreCap);
			text = pick(self.candidates.members(category), &self.usage, None, &mut self.rng);
		}
		if text.is_none() {
			fallback = Some(FallbackStep::WholePool);
			text = pick(self.candidates.all(), &self.usage, None, &mut self.rng);
		}
		let text = match text.filter(|t| script::contains_lao(t)) {
			Some(text) => text,
			None => {
				fallback = Some(FallbackStep::Guaranteed);
				self.guaranteed_text()
			}
		};

		let count = self.usage.entry(text.clone()).or_insert(0);
		*count += 1;
		self.draws += 1;
		if fallback.is_some() {
			self.fallbacks += 1;
		}
		debug!("Drew {:?} from {:?} (usage {}, fallback {:?})", text, category, count, fallback);

		Draw { text, category, fallback, script_supported: self.render.script_supported }
	}

	/// Serves `n` draws in a row.
	pub fn draw_many(&mut self, n: usize) -> Vec<Draw> {
		(0..n).map(|_| self.draw()).collect()
	}
}

/// A [`SamplingPool`] behind a mutex, for callers drawing from several threads.
///
/// Each draw holds the lock for its whole filter-then-increment sequence.
#[derive(Debug, Clone)]
pub struct SharedSamplingPool {
	inner: Arc<Mutex<SamplingPool>>,
}

impl SharedSamplingPool {
	pub fn new(pool: SamplingPool) -> Self {
		Self { inner: Arc::new(Mutex::new(pool)) }
	}

	/// A panic in another holder does not invalidate the counters, so a
	/// poisoned lock is recovered.
	fn lock(&self) -> MutexGuard<'_, SamplingPool> {
		self.inner.lock().unwrap_or_else(PoisonError::into_inner)
	}

	pub fn draw(&self) -> Draw {
		self.lock().draw()
	}

	pub fn reset_session(&self) {
		self.lock().reset_session();
	}

	pub fn usage(&self, text: &str) -> u32 {
		self.lock().usage(text)
	}

	/// Runs `f` with exclusive access to the pool.
	pub fn with<R>(&self, f: impl FnOnce(&mut SamplingPool) -> R) -> R {
		f(&mut self.lock())
	}
}

impl From<SamplingPool> for SharedSamplingPool {
	fn from(pool: SamplingPool) -> Self {
		Self::new(pool)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::segment::{ChunkSource, ChunkType};

	fn pool(seed: u64) -> SamplingPool {
		SamplingPool::with_seed(PoolConfig::default(), seed)
	}

	#[test]
	fn test_custom_validation() {
		assert!(is_valid_custom_text("ສະບາຍດີ, ທ່ານ!"));
		assert!(!is_valid_custom_text("ກ"));
		assert!(!is_valid_custom_text("hello"));
		assert!(!is_valid_custom_text("ລາວ abc"));
		assert!(!is_valid_custom_text("ລາວ 2024"));
		assert!(!is_valid_custom_text("ລາວ◊"));
		assert!(!is_valid_custom_text(&"ກ".repeat(51)));
	}

	#[test]
	fn test_admission_and_buckets() {
		let mut pool = pool(1);
		let added = pool.add_texts(["ລາວ", "ລາວ", "abc", "ລາວ!", " ສະບາຍດີທ່ານ ", "ຂ້ອຍ ມັກ ກິນ ເຂົ້າໜຽວ ແລະ ປີ້ງໄກ່ ຫຼາຍ"]);
		assert_eq!(added, 3);
		let stats = pool.stats();
		assert_eq!((stats.short, stats.medium, stats.long), (1, 1, 1));
		assert_eq!(pool.add_custom_texts(["ລາວ", "ຂອບໃຈຫຼາຍໆ"]), 1);
		assert_eq!(pool.len(), 4);
	}

	#[test]
	fn test_add_chunks_validates() {
		let mut pool = pool(1);
		let chunks = [
			TextChunk::new("ສະບາຍດີ", ChunkType::Word, ChunkSource::Segmented, 0.9),
			TextChunk::new("Lao PDR", ChunkType::Phrase, ChunkSource::Segmented, 0.9),
		];
		assert_eq!(pool.add_chunks(&chunks), 1);
		assert_eq!(pool.stats().custom, 1);
	}

	#[test]
	fn test_empty_pool_uses_guaranteed_texts() {
		let mut pool = pool(9);
		for _ in 0..20 {
			let draw = pool.draw();
			assert_eq!(draw.fallback, Some(FallbackStep::Guaranteed));
			assert!(pool.config().fallback_texts().contains(&draw.text));
		}
		assert_eq!(pool.stats().fallbacks, 20);
	}

	#[test]
	fn test_single_candidate_over_cap_still_drawn() {
		let mut pool = pool(4);
		pool.add_custom_texts(["ກາ"]);
		assert_eq!(pool.draw().text, "ກາ");
		assert_eq!(pool.draw().text, "ກາ");
		assert_eq!(pool.usage("ກາ"), 2);
		let draw = pool.draw();
		assert_eq!(draw.text, "ກາ");
		assert!(draw.fallback.is_some());
		assert_eq!(pool.usage("ກາ"), 3);
	}

	#[test]
	fn test_usage_is_monotonic_until_reset() {
		let mut pool = pool(5);
		pool.add_texts(["ກາ", "ຂາ", "ຄາ"]);
		let mut last = 0;
		for _ in 0..30 {
			pool.draw();
			let total: u32 = ["ກາ", "ຂາ", "ຄາ"].iter().map(|t| pool.usage(t)).sum();
			assert_eq!(total, last + 1);
			last = total;
		}
		pool.reset_session();
		assert_eq!(pool.usage("ກາ"), 0);
		assert_eq!(pool.stats().draws, 0);
		assert_eq!(pool.len(), 3);
	}

	#[test]
	fn test_cap_spreads_draws() {
		let mut config = PoolConfig::default();
		config.set_length_shares(1.0, 0.0).unwrap();
		let mut pool = SamplingPool::with_seed(config, 6);
		pool.add_texts(["ກາ", "ຂາ", "ຄາ", "ງາ"]);
		// 4 texts under a cap of 3: the first 12 draws use each exactly 3 times
		let draws = pool.draw_many(12);
		assert!(draws.iter().all(|d| d.category == PoolCategory::Short && d.fallback.is_none()));
		for text in ["ກາ", "ຂາ", "ຄາ", "ງາ"] {
			assert_eq!(pool.usage(text), 3);
		}
		assert_eq!(pool.draw().fallback, Some(FallbackStep::IgnoreCap));
	}

	#[test]
	fn test_seeded_pools_agree() {
		let texts = ["ກາ", "ຂາ", "ຄາ", "ສະບາຍດີທ່ານ", "ຂ້ອຍ ມັກ ກິນ ເຂົ້າໜຽວ ແລະ ປີ້ງໄກ່ ຫຼາຍ"];
		let mut a = pool(11);
		let mut b = pool(11);
		a.add_texts(texts);
		b.add_texts(texts);
		assert_eq!(a.draw_many(50), b.draw_many(50));
	}

	#[test]
	fn test_render_support_passthrough() {
		let mut pool = pool(2);
		assert!(pool.draw().script_supported);
		pool.set_render_support(RenderSupport { script_supported: false });
		assert!(!pool.draw().script_supported);
	}

	#[test]
	fn test_shared_pool_serializes_draws() {
		let mut inner = pool(3);
		inner.add_texts(["ກາ", "ຂາ", "ຄາ"]);
		let shared = SharedSamplingPool::new(inner);
		let handles: Vec<_> = (0..4)
			.map(|_| {
				let shared = shared.clone();
				std::thread::spawn(move || {
					for _ in 0..25 {
						shared.draw();
					}
				})
			})
			.collect();
		for handle in handles {
			handle.join().unwrap();
		}
		let total: u32 = ["ກາ", "ຂາ", "ຄາ"].iter().map(|t| shared.usage(t)).sum();
		assert_eq!(total, 100);
		assert_eq!(shared.with(|p| p.stats().draws), 100);
	}
}
