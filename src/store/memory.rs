//! Thread-safe in-memory [`CredentialStore`] implementation for local development and tests.

// self
use crate::{
	_prelude::*,
	auth::{CredentialVerifier, Password, SessionToken, TokenGenerator, Username},
	store::{CredentialStore, IssuePolicy, SessionTables, StoreFuture},
};

/// Thread-safe storage backend that keeps both tables in-process.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
	tables: Arc<RwLock<SessionTables>>,
	policy: IssuePolicy,
}
impl MemoryStore {
	/// Creates an empty store using the provided issue policy.
	pub fn with_policy(policy: IssuePolicy) -> Self {
		Self { tables: Default::default(), policy }
	}

	/// Replaces the token generator.
	pub fn with_generator(mut self, generator: Arc<dyn TokenGenerator>) -> Self {
		self.policy = self.policy.with_generator(generator);

		self
	}

	/// Replaces the credential verifier.
	pub fn with_verifier(mut self, verifier: Arc<dyn CredentialVerifier>) -> Self {
		self.policy = self.policy.with_verifier(verifier);

		self
	}

	/// Returns a copy of the live session token for `username`, for inspection in tests.
	pub fn session_token(&self, username: &Username) -> Option<SessionToken> {
		self.tables.read().session(username).map(|session| session.token.clone())
	}
}
impl CredentialStore for MemoryStore {
	fn create<'a>(&'a self, username: &'a Username, password: Password) -> StoreFuture<'a, ()> {
		Box::pin(async move { self.tables.write().create(username, password) })
	}

	fn authenticate<'a>(
		&'a self,
		username: &'a Username,
		password: &'a str,
	) -> StoreFuture<'a, SessionToken> {
		Box::pin(async move { self.tables.write().authenticate(username, password, &self.policy) })
	}

	fn invalidate<'a>(&'a self, username: &'a Username, token: &'a str) -> StoreFuture<'a, ()> {
		Box::pin(async move { self.tables.write().invalidate(username, token).map(|_| ()) })
	}

	fn check<'a>(&'a self, username: &'a Username, token: &'a str) -> StoreFuture<'a, ()> {
		Box::pin(async move { self.tables.read().check(username, token) })
	}
}
