//! Crate-level error types shared by the store, session manager, and admission layer.

// self
use crate::{_prelude::*, obs::SessionOp};

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Canonical error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Signup attempted for a username that already owns a credential.
	#[error("User already exists.")]
	AlreadyExists,
	/// Authentication or session check failed.
	///
	/// Covers unknown users, wrong passwords, and stale or foreign tokens alike so callers
	/// cannot probe which accounts exist.
	#[error("Bad auth.")]
	BadAuth,
	/// The admission layer rejected the call before it reached the store.
	#[error("Operation `{operation}` is rate limited; retry after {retry_after:?}.")]
	RateLimited {
		/// Operation whose limiter rejected the call.
		operation: SessionOp,
		/// Time until the limiter expects a token to be available.
		retry_after: Duration,
	},
	/// Backing store failed; the call was not retried.
	#[error("{0}")]
	StoreUnavailable(
		#[from]
		#[source]
		crate::store::StoreError,
	),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
}
impl Error {
	/// Returns a stable label for span and metric fields.
	pub const fn kind(&self) -> &'static str {
		match self {
			Error::AlreadyExists => "already_exists",
			Error::BadAuth => "bad_auth",
			Error::RateLimited { .. } => "rate_limited",
			Error::StoreUnavailable(_) => "store_unavailable",
			Error::Config(_) => "config",
		}
	}
}

/// Configuration parsing and validation failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// Configuration payload is not valid JSON for the expected shape.
	#[error("Admission config could not be parsed at `{path}`.")]
	Parse {
		/// Path of the offending field inside the document.
		path: String,
		/// Structured parsing failure.
		#[source]
		source: serde_json::Error,
	},
	/// A bucket was configured with no capacity.
	#[error("Limiter for `{operation}` must have a capacity of at least 1.")]
	ZeroCapacity {
		/// Operation whose limiter is misconfigured.
		operation: SessionOp,
	},
	/// A bucket was configured with a non-positive or non-finite refill rate.
	#[error("Limiter for `{operation}` must refill at a positive, finite rate.")]
	InvalidRefill {
		/// Operation whose limiter is misconfigured.
		operation: SessionOp,
	},
}
impl From<serde_path_to_error::Error<serde_json::Error>> for ConfigError {
	fn from(e: serde_path_to_error::Error<serde_json::Error>) -> Self {
		let path = e.path().to_string();

		Self::Parse { path, source: e.into_inner() }
	}
}
