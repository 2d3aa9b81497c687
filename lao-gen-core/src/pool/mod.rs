//! Merged candidate pool serving a long stream of draws.
//!
//! The pool owns its usage counters: one instance is one session. Draws are
//! biased away from overused texts but never come back empty.

/// Draw policy parameters.
pub mod config;

/// The pool, its draw policy and the mutex-guarded wrapper.
pub mod sampling_pool;

pub use config::PoolConfig;
pub use sampling_pool::{
	Draw, FallbackStep, PoolCategory, PoolStats, RenderSupport, SamplingPool, SharedSamplingPool, is_valid_custom_text,
};
