//! Storage contract and built-in backends for credentials and sessions.

pub mod file;
pub mod memory;
pub mod tables;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use tables::SessionTables;

// self
use crate::{
	_prelude::*,
	auth::{
		CredentialVerifier, Password, PlaintextVerifier, RandomTokenGenerator, SessionToken,
		TokenGenerator, Username,
	},
};

/// Boxed future returned by every [`CredentialStore`] operation.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + 'a + Send>>;

/// Storage backend contract; the only component allowed to mutate either table.
///
/// Every operation is a single atomic read-modify-write against the backend. Failures are
/// terminal for the call and never retried here.
pub trait CredentialStore
where
	Self: Send + Sync,
{
	/// Inserts a credential, failing with [`Error::AlreadyExists`] if the username is taken.
	fn create<'a>(&'a self, username: &'a Username, password: Password) -> StoreFuture<'a, ()>;

	/// Verifies the password and replaces any existing session with a freshly minted token.
	fn authenticate<'a>(
		&'a self,
		username: &'a Username,
		password: &'a str,
	) -> StoreFuture<'a, SessionToken>;

	/// Deletes the session when `token` is the live token for `username`.
	fn invalidate<'a>(&'a self, username: &'a Username, token: &'a str) -> StoreFuture<'a, ()>;

	/// Succeeds when `token` is the live token for `username`; never mutates.
	fn check<'a>(&'a self, username: &'a Username, token: &'a str) -> StoreFuture<'a, ()>;
}

/// Backend-level failure surfaced as [`Error::StoreUnavailable`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum StoreError {
	/// Serialization failures surfaced by the backend.
	#[error("Serialization error: {message}.")]
	Serialization {
		/// Human-readable error payload.
		message: String,
	},
	/// Backend-level failure for the storage engine.
	#[error("Backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}

/// Token minting and password comparison used by a store during login.
#[derive(Clone)]
pub struct IssuePolicy {
	/// Source of new session tokens.
	pub generator: Arc<dyn TokenGenerator>,
	/// Password comparison strategy.
	pub verifier: Arc<dyn CredentialVerifier>,
}
impl IssuePolicy {
	/// Replaces the token generator.
	pub fn with_generator(mut self, generator: Arc<dyn TokenGenerator>) -> Self {
		self.generator = generator;

		self
	}

	/// Replaces the credential verifier.
	pub fn with_verifier(mut self, verifier: Arc<dyn CredentialVerifier>) -> Self {
		self.verifier = verifier;

		self
	}
}
impl Default for IssuePolicy {
	fn default() -> Self {
		Self { generator: Arc::new(RandomTokenGenerator), verifier: Arc::new(PlaintextVerifier) }
	}
}
impl Debug for IssuePolicy {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("IssuePolicy(..)")
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn store_error_converts_into_crate_error_with_source() {
		let store_error = StoreError::Backend { message: "disk unplugged".into() };
		let error: Error = store_error.clone().into();

		assert!(matches!(error, Error::StoreUnavailable(_)));
		assert_eq!(error.kind(), "store_unavailable");
		assert!(error.to_string().contains("disk unplugged"));

		let source = StdError::source(&error)
			.expect("Crate error should expose the original store error as its source.");

		assert_eq!(source.to_string(), store_error.to_string());
	}
}
