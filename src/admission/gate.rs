//! Rate-limited facade over the session manager.

// self
use crate::{
	_prelude::*,
	admission::RateLimiter,
	auth::SessionToken,
	config::AdmissionConfig,
	error::ConfigError,
	obs::{self, OpOutcome, OpSpan, SessionOp},
	session::SessionManager,
	validator::Validator,
};

/// Session operations with admission control applied.
///
/// Each gate owns its limiters, so separate instances never share budgets. Signup and
/// login consult their limiter before reaching the store; logout and validate go straight
/// to the manager.
#[derive(Debug)]
pub struct SessionGate {
	manager: SessionManager,
	signup_limiter: RateLimiter,
	login_limiter: RateLimiter,
}
impl SessionGate {
	/// Wraps `manager` with limiters built from `config`.
	pub fn new(manager: SessionManager, config: AdmissionConfig) -> Result<Self, ConfigError> {
		Ok(Self {
			signup_limiter: RateLimiter::new(SessionOp::Signup, &config.signup)?,
			login_limiter: RateLimiter::new(SessionOp::Login, &config.login)?,
			manager,
		})
	}

	/// Creates a credential once the signup limiter admits the call.
	pub async fn signup(&self, username: &str, password: &str) -> Result<()> {
		admit(&self.signup_limiter, username).await?;
		self.manager.signup(username, password).await
	}

	/// Logs in once the login limiter admits the call.
	///
	/// Dropping the returned future while it waits on the limiter abandons the call without
	/// consuming a token.
	pub async fn login(&self, username: &str, password: &str) -> Result<SessionToken> {
		admit(&self.login_limiter, username).await?;
		self.manager.login(username, password).await
	}

	/// Revokes a session; never rate limited.
	pub async fn logout(&self, username: &str, token: &str) -> Result<()> {
		self.manager.logout(username, token).await
	}

	/// Checks a session; never rate limited.
	pub async fn validate(&self, username: &str, token: &str) -> Result<()> {
		self.manager.validate(username, token).await
	}

	/// Returns the read-only capability handed to dependent services.
	pub fn validator(&self) -> Arc<dyn Validator> {
		self.manager.validator()
	}

	/// Underlying manager, bypassing admission.
	pub fn manager(&self) -> &SessionManager {
		&self.manager
	}

	/// Limiter guarding `operation`, if it is limited at all.
	pub fn limiter(&self, operation: SessionOp) -> Option<&RateLimiter> {
		match operation {
			SessionOp::Signup => Some(&self.signup_limiter),
			SessionOp::Login => Some(&self.login_limiter),
			SessionOp::Logout | SessionOp::Validate => None,
		}
	}
}

// A rejected call never reaches the manager, so its span and counters are recorded here.
async fn admit(limiter: &RateLimiter, username: &str) -> Result<()> {
	let admitted = limiter.acquire().await;

	if admitted.is_err() {
		let op = limiter.operation();
		let span = OpSpan::new(op, username);

		obs::record_op_outcome(op, OpOutcome::Attempt);
		span.record(&admitted);
		obs::record_op_outcome(op, OpOutcome::Failure);
	}

	admitted
}
