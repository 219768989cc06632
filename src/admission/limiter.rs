//! Token-bucket limiter with erroring and delaying policies.

// crates.io
use tokio::time::{self, Instant};
// self
use crate::{
	_prelude::*,
	admission::LimitPolicy,
	config::BucketConfig,
	error::ConfigError,
	obs::{self, SessionOp},
};

/// Shared token bucket guarding one operation.
///
/// State is a token count that may go negative while delayed callers hold reservations.
/// The lock is held only for arithmetic, never across a sleep. Timing follows the tokio
/// clock, so delaying callers need a tokio runtime with the time driver enabled.
///
/// A delayed caller sleeps until the deadline computed when it reserved. When another
/// waiter gives up, its token is credited to the bucket and shortens the wait of later
/// reservations only; callers already asleep keep their original deadline.
#[derive(Debug)]
pub struct RateLimiter {
	operation: SessionOp,
	policy: LimitPolicy,
	capacity: f64,
	refill_per_second: f64,
	max_delay: Option<Duration>,
	state: Mutex<BucketState>,
}
impl RateLimiter {
	/// Builds a full bucket from validated settings.
	pub fn new(operation: SessionOp, config: &BucketConfig) -> Result<Self, ConfigError> {
		config.validate(operation)?;

		let capacity = f64::from(config.capacity);

		Ok(Self {
			operation,
			policy: config.policy,
			capacity,
			refill_per_second: config.refill_per_second,
			max_delay: config.max_delay(),
			state: Mutex::new(BucketState { tokens: capacity, updated_at: Instant::now() }),
		})
	}

	/// Operation this limiter guards.
	pub fn operation(&self) -> SessionOp {
		self.operation
	}

	/// Policy applied when the bucket is empty.
	pub fn policy(&self) -> LimitPolicy {
		self.policy
	}

	/// Admits one call according to the configured policy.
	pub async fn acquire(&self) -> Result<()> {
		match self.policy {
			LimitPolicy::Erroring => self.try_acquire(),
			LimitPolicy::Delaying => self.wait().await,
		}
	}

	/// Takes a token if one is available right now, regardless of policy.
	pub fn try_acquire(&self) -> Result<()> {
		let now = Instant::now();
		let mut state = self.state.lock();

		self.refill(&mut state, now);

		if state.tokens >= 1. {
			state.tokens -= 1.;

			return Ok(());
		}

		let retry_after = self.time_to_fill(1. - state.tokens);

		drop(state);

		Err(self.reject(retry_after))
	}

	/// Tokens available at this instant; negative while reservations are outstanding.
	pub fn snapshot(&self) -> f64 {
		let mut state = self.state.lock();

		self.refill(&mut state, Instant::now());

		state.tokens
	}

	async fn wait(&self) -> Result<()> {
		let delay = self.reserve();

		if delay.is_zero() {
			return Ok(());
		}

		// Dropping the reservation before `commit` hands the token back.
		let reservation = Reservation { limiter: self, committed: false };

		if self.max_delay.is_some_and(|max| delay > max) {
			drop(reservation);

			return Err(self.reject(delay));
		}

		#[cfg(feature = "tracing")]
		tracing::debug!(
			op = self.operation.as_str(),
			delay_ms = delay.as_millis() as u64,
			"delaying call"
		);

		time::sleep(delay).await;
		reservation.commit();

		Ok(())
	}

	fn reserve(&self) -> Duration {
		let mut state = self.state.lock();

		self.refill(&mut state, Instant::now());

		state.tokens -= 1.;

		if state.tokens >= 0. { Duration::ZERO } else { self.time_to_fill(-state.tokens) }
	}

	fn cancel_reservation(&self) {
		let mut state = self.state.lock();

		self.refill(&mut state, Instant::now());

		state.tokens = (state.tokens + 1.).min(self.capacity);
	}

	fn refill(&self, state: &mut BucketState, now: Instant) {
		let elapsed = now.saturating_duration_since(state.updated_at).as_secs_f64();

		state.tokens = (state.tokens + elapsed * self.refill_per_second).min(self.capacity);
		state.updated_at = now;
	}

	fn time_to_fill(&self, missing: f64) -> Duration {
		// Saturates for refill rates so slow that the wait overflows a `Duration`.
		Duration::try_from_secs_f64(missing.max(0.) / self.refill_per_second)
			.unwrap_or(Duration::MAX)
	}

	fn reject(&self, retry_after: Duration) -> Error {
		#[cfg(feature = "tracing")]
		tracing::warn!(
			op = self.operation.as_str(),
			retry_after_ms = retry_after.as_millis() as u64,
			"rate limited"
		);
		obs::record_rate_limited(self.operation);

		Error::RateLimited { operation: self.operation, retry_after }
	}
}

#[derive(Debug)]
struct BucketState {
	tokens: f64,
	updated_at: Instant,
}

struct Reservation<'a> {
	limiter: &'a RateLimiter,
	committed: bool,
}
impl Reservation<'_> {
	fn commit(mut self) {
		self.committed = true;
	}
}
impl Drop for Reservation<'_> {
	fn drop(&mut self) {
		if !self.committed {
			self.limiter.cancel_reservation();
		}
	}
}
