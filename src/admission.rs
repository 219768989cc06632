//! Request admission: per-operation token buckets placed in front of the session manager.
//!
//! Signup and login each own an independent [`RateLimiter`]; logout and validate bypass
//! admission entirely so the hot read path never queues behind a delayed login.

pub mod gate;
pub mod limiter;

pub use gate::*;
pub use limiter::*;

// self
use crate::_prelude::*;

/// What a limiter does with a call that finds its bucket empty.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LimitPolicy {
	/// Fail immediately with [`Error::RateLimited`].
	Erroring,
	/// Hold the caller until a token is available.
	Delaying,
}
