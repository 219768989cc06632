//! Admission limits, deserializable from JSON and validated before use.

// self
use crate::{_prelude::*, admission::LimitPolicy, error::ConfigError, obs::SessionOp};

/// Token-bucket settings for one operation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BucketConfig {
	/// Maximum burst size; the bucket starts full.
	pub capacity: u32,
	/// Tokens added per second.
	pub refill_per_second: f64,
	/// Behavior when the bucket is empty.
	pub policy: LimitPolicy,
	/// Longest a delaying policy may wait before rejecting instead; unbounded when absent.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub max_delay_ms: Option<u64>,
}
impl BucketConfig {
	/// Bucket that rejects calls once empty.
	pub const fn erroring(capacity: u32, refill_per_second: f64) -> Self {
		Self { capacity, refill_per_second, policy: LimitPolicy::Erroring, max_delay_ms: None }
	}

	/// Bucket that delays calls until a token is available.
	pub const fn delaying(capacity: u32, refill_per_second: f64) -> Self {
		Self { capacity, refill_per_second, policy: LimitPolicy::Delaying, max_delay_ms: None }
	}

	/// Bounds how long a delaying bucket may hold a caller.
	pub fn with_max_delay(mut self, max_delay: Duration) -> Self {
		self.max_delay_ms = Some(max_delay.as_millis() as u64);

		self
	}

	/// Returns [`BucketConfig::max_delay_ms`] as a [`Duration`].
	pub fn max_delay(&self) -> Option<Duration> {
		self.max_delay_ms.map(Duration::from_millis)
	}

	/// Checks capacity and refill bounds.
	pub fn validate(&self, operation: SessionOp) -> Result<(), ConfigError> {
		if self.capacity == 0 {
			return Err(ConfigError::ZeroCapacity { operation });
		}
		if !self.refill_per_second.is_finite() || self.refill_per_second <= 0. {
			return Err(ConfigError::InvalidRefill { operation });
		}

		Ok(())
	}
}

/// Limits applied by [`SessionGate`](crate::admission::SessionGate).
///
/// Defaults: signup bursts 3 and refills 3/s, rejecting when empty; login bursts 3 and
/// refills 1/s, delaying when empty. Logout and validate are never limited.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AdmissionConfig {
	/// Limiter guarding signup.
	pub signup: BucketConfig,
	/// Limiter guarding login.
	pub login: BucketConfig,
}
impl AdmissionConfig {
	/// Parses and validates a JSON document; missing sections keep their defaults.
	pub fn from_json_str(payload: &str) -> Result<Self, ConfigError> {
		let mut de = serde_json::Deserializer::from_str(payload);
		let config: Self = serde_path_to_error::deserialize(&mut de)?;

		config.validate()?;

		Ok(config)
	}

	/// Checks both buckets.
	pub fn validate(&self) -> Result<(), ConfigError> {
		self.signup.validate(SessionOp::Signup)?;
		self.login.validate(SessionOp::Login)
	}
}
impl Default for AdmissionConfig {
	fn default() -> Self {
		Self { signup: BucketConfig::erroring(3, 3.), login: BucketConfig::delaying(3, 1.) }
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn defaults_match_documented_limits() {
		let config = AdmissionConfig::default();

		assert_eq!(config.signup, BucketConfig::erroring(3, 3.));
		assert_eq!(config.login, BucketConfig::delaying(3, 1.));
		config.validate().expect("Default admission config should validate.");
	}

	#[test]
	fn json_overrides_single_section() {
		let config = AdmissionConfig::from_json_str(
			r#"{ "login": { "capacity": 5, "refill_per_second": 2.5, "policy": "delaying", "max_delay_ms": 1500 } }"#,
		)
		.expect("Partial admission config should parse.");

		assert_eq!(config.signup, BucketConfig::erroring(3, 3.));
		assert_eq!(config.login.capacity, 5);
		assert_eq!(config.login.max_delay(), Some(Duration::from_millis(1_500)));
	}

	#[test]
	fn parse_errors_report_path() {
		let err = AdmissionConfig::from_json_str(
			r#"{ "signup": { "capacity": "three", "refill_per_second": 3, "policy": "erroring" } }"#,
		)
		.expect_err("Non-numeric capacity should be rejected.");

		match err {
			ConfigError::Parse { path, .. } => assert_eq!(path, "signup.capacity"),
			other => panic!("Unexpected config error: {other:?}"),
		}
	}

	#[test]
	fn invalid_buckets_are_rejected() {
		let err = AdmissionConfig::from_json_str(
			r#"{ "signup": { "capacity": 0, "refill_per_second": 3, "policy": "erroring" } }"#,
		)
		.expect_err("Zero capacity should be rejected.");

		assert!(matches!(err, ConfigError::ZeroCapacity { operation: SessionOp::Signup }));

		let bad_refill = AdmissionConfig {
			login: BucketConfig::delaying(3, 0.),
			..AdmissionConfig::default()
		};

		assert!(matches!(
			bad_refill.validate(),
			Err(ConfigError::InvalidRefill { operation: SessionOp::Login })
		));
	}
}
