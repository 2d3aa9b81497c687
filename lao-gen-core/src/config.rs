use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{LaoGenError, LaoGenResult};
use crate::pool::{PoolConfig, SamplingPool};
use crate::segment::{ConfidenceWeights, SegmenterConfig, TextSegmenter};
use crate::syllable::{GeneratorConfig, RuleTables, SyllableSpaceGenerator};

/// Every tunable of the three components, one TOML table each.
///
/// ```toml
/// [generator]
/// base_subset_size = 50
///
/// [segmenter]
/// max_lines = 50
///
/// [pool]
/// custom_share = 0.5
/// ```
///
/// Missing tables and keys take their default values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CorpusConfig {
	pub generator: GeneratorConfig,
	pub segmenter: SegmenterConfig,
	pub pool: PoolConfig,
}

impl CorpusConfig {
	/// Parses and validates a TOML document.
	///
	/// # Errors
	/// Returns `ConfigParse` on malformed TOML and `InvalidParameter` when a
	/// value breaks an invariant.
	pub fn from_toml_str(source: &str) -> LaoGenResult<Self> {
		Self::parse(source, "<inline>")
	}

	/// Loads a configuration file; a missing file yields the defaults.
	///
	/// # Errors
	/// Returns an error if the file cannot be read, parsed or validated.
	pub fn load<P: AsRef<Path>>(path: P) -> LaoGenResult<Self> {
		let path = path.as_ref();
		if !path.exists() {
			info!("No configuration at {}, using defaults", path.display());
			return Ok(Self::default());
		}
		let content = std::fs::read_to_string(path)?;
		let config = Self::parse(&content, &path.display().to_string())?;
		info!("Configuration loaded from {}", path.display());
		Ok(config)
	}

	fn parse(source: &str, origin: &str) -> LaoGenResult<Self> {
		let config: Self = toml::from_str(source).map_err(|e| LaoGenError::ConfigParse {
			path: origin.to_owned(),
			reason: e.to_string(),
		})?;
		config.validate()?;
		Ok(config)
	}

	/// # Errors
	/// Returns the first invariant violation found.
	pub fn validate(&self) -> LaoGenResult<()> {
		self.generator.validate()?;
		self.segmenter.validate()?;
		self.pool.validate()
	}

	/// Generator over the built-in Lao tables.
	pub fn build_generator(&self) -> SyllableSpaceGenerator {
		SyllableSpaceGenerator::new(RuleTables::lao(), self.generator.clone())
	}

	pub fn build_segmenter(&self) -> TextSegmenter {
		TextSegmenter::new(self.segmenter.clone(), ConfidenceWeights::CURRENT)
	}

	/// Empty pool; reproducible when `seed` is given.
	pub fn build_pool(&self, seed: Option<u64>) -> SamplingPool {
		match seed {
			Some(seed) => SamplingPool::with_seed(self.pool.clone(), seed),
			None => SamplingPool::new(self.pool.clone()),
		}
	}
}
