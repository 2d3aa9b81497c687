use thiserror::Error;

/// Errors surfaced at the configuration and I/O edges.
///
/// Generation, segmentation, filtering and drawing never fail; malformed
/// rule entries, oversized input and exhausted pools are handled internally.
#[derive(Error, Debug)]
pub enum LaoGenError {
	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),

	#[error("Config parse error: {path} - {reason}")]
	ConfigParse { path: String, reason: String },

	#[error("Invalid rule table: {0}")]
	InvalidRuleTable(String),

	#[error("Invalid parameter: {0}")]
	InvalidParameter(String),

	#[error("No Lao text found in {0}")]
	NoScriptText(String),
}

pub type LaoGenResult<T> = Result<T, LaoGenError>;
