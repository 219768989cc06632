//! Session manager: signup, login, logout, and validate over a [`CredentialStore`].

// self
use crate::{
	_prelude::*,
	auth::{Password, SessionToken, Username},
	obs::{self, OpOutcome, OpSpan, SessionOp},
	store::CredentialStore,
	validator::{ValidateFuture, Validator},
};

/// Thin orchestration over a store that records every call's outcome.
///
/// Each method delegates to exactly one store operation and returns its result unchanged.
/// Observability is attached on every exit path: a `session_gate.op` span carrying the
/// operation, username, and outcome, plus the per-operation outcome counter.
#[derive(Clone)]
pub struct SessionManager {
	store: Arc<dyn CredentialStore>,
}
impl SessionManager {
	/// Creates a manager over the provided store.
	pub fn new(store: Arc<dyn CredentialStore>) -> Self {
		Self { store }
	}

	/// Creates a credential. The user still needs to log in.
	pub async fn signup(&self, username: &str, password: &str) -> Result<()> {
		Self::observe(SessionOp::Signup, username, async {
			let username = Username::new(username);

			self.store.create(&username, Password::new(password)).await
		})
		.await
	}

	/// Logs the user in, returning a token that replaces any earlier one.
	pub async fn login(&self, username: &str, password: &str) -> Result<SessionToken> {
		Self::observe(SessionOp::Login, username, async {
			let username = Username::new(username);

			self.store.authenticate(&username, password).await
		})
		.await
	}

	/// Revokes the session when `token` is the user's live token.
	pub async fn logout(&self, username: &str, token: &str) -> Result<()> {
		Self::observe(SessionOp::Logout, username, async {
			let username = Username::new(username);

			self.store.invalidate(&username, token).await
		})
		.await
	}

	/// Succeeds when `token` is the user's live token.
	pub async fn validate(&self, username: &str, token: &str) -> Result<()> {
		Self::observe(SessionOp::Validate, username, async {
			let username = Username::new(username);

			self.store.check(&username, token).await
		})
		.await
	}

	/// Returns the read-only capability handed to dependent services.
	pub fn validator(&self) -> Arc<dyn Validator> {
		Arc::new(self.clone())
	}

	async fn observe<T, Fut>(op: SessionOp, username: &str, call: Fut) -> Result<T>
	where
		Fut: Future<Output = Result<T>>,
	{
		let span = OpSpan::new(op, username);

		obs::record_op_outcome(op, OpOutcome::Attempt);

		let result = span.instrument(call).await;

		span.record(&result);
		obs::record_op_outcome(op, OpOutcome::of(&result));

		result
	}
}
impl Validator for SessionManager {
	fn validate<'a>(&'a self, username: &'a str, token: &'a str) -> ValidateFuture<'a> {
		Box::pin(SessionManager::validate(self, username, token))
	}
}
impl Debug for SessionManager {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("SessionManager(..)")
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::{_preludet::*, store::MemoryStore};

	fn manager() -> SessionManager {
		build_test_manager().0
	}

	#[tokio::test]
	async fn full_flow() {
		let manager = manager();

		manager.signup("peter", "123456").await.expect("Signup should succeed.");

		let token = manager.login("peter", "123456").await.expect("Login should succeed.");

		manager.validate("peter", token.expose()).await.expect("Validate should succeed.");
		manager.logout("peter", token.expose()).await.expect("Logout should succeed.");
		assert!(matches!(manager.validate("peter", token.expose()).await, Err(Error::BadAuth)));
	}

	#[tokio::test]
	async fn unusual_usernames_follow_the_same_rules() {
		let manager = manager();

		for name in ["", "bob smith", " padded "] {
			manager.signup(name, "x").await.expect("Any username should sign up once.");
			assert!(matches!(manager.signup(name, "y").await, Err(Error::AlreadyExists)));

			let token = manager.login(name, "x").await.expect("Login should succeed.");

			manager.validate(name, token.expose()).await.expect("Token should validate.");
		}

		assert!(matches!(manager.login("bob", "x").await, Err(Error::BadAuth)));
	}

	#[tokio::test]
	async fn validator_capability_delegates() {
		let manager = manager();
		let validator = manager.validator();

		manager.signup("bob", "x").await.expect("Signup should succeed.");

		let token = manager.login("bob", "x").await.expect("Login should succeed.");

		validator.validate("bob", token.expose()).await.expect("Capability should validate.");
		assert!(matches!(validator.validate("bob", "stale").await, Err(Error::BadAuth)));
	}

	#[tokio::test]
	async fn login_returns_store_token_unchanged() {
		let store =
			MemoryStore::default().with_generator(Arc::new(SequentialTokenGenerator::default()));
		let backend = Arc::new(store);
		let manager = SessionManager::new(backend.clone());
		let bob = Username::new("bob");

		manager.signup("bob", "x").await.expect("Signup should succeed.");

		let first = manager.login("bob", "x").await.expect("First login should succeed.");
		let second = manager.login("bob", "x").await.expect("Second login should succeed.");

		assert_eq!(first.expose(), "token-0");
		assert_eq!(second.expose(), "token-1");
		assert_eq!(backend.session_token(&bob), Some(second));
	}
}
