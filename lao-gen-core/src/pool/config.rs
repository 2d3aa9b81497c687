use serde::{Deserialize, Serialize};

use crate::error::{LaoGenError, LaoGenResult};
use crate::script;

/// Draw policy of a [`SamplingPool`](super::SamplingPool).
///
/// # Invariants
/// - Shares are probabilities in `[0.0, 1.0]`; `short_share + medium_share <= 1.0`
/// - `0 < short_max < medium_max`
/// - `fallback_texts` is non-empty and every entry is clean Lao
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
	/// Share of draws that prefer custom texts when any exist.
	custom_share: f64,

	/// Usage count from which a custom text is deprioritized.
	pub custom_cap: u32,

	/// Usage count from which any other text is deprioritized.
	pub default_cap: u32,

	/// Longest "short" candidate, in characters.
	short_max: usize,

	/// Longest "medium" candidate, in characters.
	medium_max: usize,

	/// Share of short draws when no custom text exists.
	short_share: f64,

	/// Share of medium draws when no custom text exists; long gets the rest.
	medium_share: f64,

	/// Guaranteed-valid texts served when the pool has nothing to offer.
	fallback_texts: Vec<String>,
}

impl Default for PoolConfig {
	fn default() -> Self {
		Self {
			custom_share: 0.5,
			custom_cap: 2,
			default_cap: 3,
			short_max: 8,
			medium_max: 25,
			short_share: 0.4,
			medium_share: 0.3,
			fallback_texts: ["ສະບາຍດີ", "ຂອບໃຈ", "ລາວ", "ການສຶກສາ", "ຄອບຄົວ"].map(str::to_owned).to_vec(),
		}
	}
}

fn check_probability(name: &str, value: f64) -> LaoGenResult<()> {
	if !(0.0..=1.0).contains(&value) {
		return Err(LaoGenError::InvalidParameter(format!("{name} must be between 0.0 and 1.0, got {value}")));
	}
	Ok(())
}

impl PoolConfig {
	pub fn custom_share(&self) -> f64 {
		self.custom_share
	}

	pub fn short_max(&self) -> usize {
		self.short_max
	}

	pub fn medium_max(&self) -> usize {
		self.medium_max
	}

	pub fn short_share(&self) -> f64 {
		self.short_share
	}

	pub fn medium_share(&self) -> f64 {
		self.medium_share
	}

	pub fn fallback_texts(&self) -> &[String] {
		&self.fallback_texts
	}

	/// Sets the share of draws preferring custom texts (0.0..1.0).
	///
	/// # Errors
	/// Returns an error if the value is outside the valid range.
	pub fn set_custom_share(&mut self, share: f64) -> LaoGenResult<()> {
		check_probability("custom_share", share)?;
		self.custom_share = share;
		Ok(())
	}

	/// Sets the short and medium shares; long draws get `1 - short - medium`.
	///
	/// # Errors
	/// Returns an error if a share is outside `[0.0, 1.0]` or their sum exceeds 1.0.
	pub fn set_length_shares(&mut self, short: f64, medium: f64) -> LaoGenResult<()> {
		check_probability("short_share", short)?;
		check_probability("medium_share", medium)?;
		if short + medium > 1.0 {
			return Err(LaoGenError::InvalidParameter(format!(
				"short_share + medium_share must not exceed 1.0, got {}",
				short + medium
			)));
		}
		self.short_share = short;
		self.medium_share = medium;
		Ok(())
	}

	/// Sets the length bucket bounds.
	///
	/// # Errors
	/// Returns an error unless `0 < short_max < medium_max`.
	pub fn set_length_bounds(&mut self, short_max: usize, medium_max: usize) -> LaoGenResult<()> {
		if short_max == 0 || short_max >= medium_max {
			return Err(LaoGenError::InvalidParameter(format!(
				"length bounds must satisfy 0 < short_max < medium_max, got {} and {}",
				short_max, medium_max
			)));
		}
		self.short_max = short_max;
		self.medium_max = medium_max;
		Ok(())
	}

	/// Replaces the guaranteed fallback texts.
	///
	/// # Errors
	/// Returns an error if the list is empty or an entry is not clean Lao.
	pub fn set_fallback_texts(&mut self, texts: Vec<String>) -> LaoGenResult<()> {
		if texts.is_empty() {
			return Err(LaoGenError::InvalidParameter("fallback_texts must not be empty".to_owned()));
		}
		if let Some(bad) = texts.iter().find(|t| !script::is_clean_lao(t)) {
			return Err(LaoGenError::InvalidParameter(format!("fallback text {bad:?} is not clean Lao")));
		}
		self.fallback_texts = texts;
		Ok(())
	}

	/// Re-checks invariants after deserialization.
	///
	/// # Errors
	/// Same conditions as the setters, plus zero caps.
	pub fn validate(&self) -> LaoGenResult<()> {
		let mut copy = self.clone();
		copy.set_custom_share(self.custom_share)?;
		copy.set_length_shares(self.short_share, self.medium_share)?;
		copy.set_length_bounds(self.short_max, self.medium_max)?;
		copy.set_fallback_texts(self.fallback_texts.clone())?;
		if self.custom_cap == 0 || self.default_cap == 0 {
			return Err(LaoGenError::InvalidParameter("usage caps must be > 0".to_owned()));
		}
		Ok(())
	}
}
