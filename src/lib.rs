//! Credential storage, opaque session tokens, and rate-limited admission for small auth
//! services, with a read-only validation capability for dependent services.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod admission;
pub mod auth;
pub mod config;
pub mod error;
pub mod obs;
pub mod session;
pub mod store;
pub mod validator;
#[cfg(any(test, feature = "test"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		admission::SessionGate,
		auth::{SessionToken, TokenGenerator},
		config::AdmissionConfig,
		session::SessionManager,
		store::{CredentialStore, MemoryStore},
	};

	/// Token generator that yields `token-0`, `token-1`, ... so tests can predict values.
	#[derive(Debug, Default)]
	pub struct SequentialTokenGenerator(std::sync::atomic::AtomicU64);
	impl TokenGenerator for SequentialTokenGenerator {
		fn generate(&self) -> SessionToken {
			let n = self.0.fetch_add(1, std::sync::atomic::Ordering::Relaxed);

			SessionToken::new(format!("token-{n}"))
		}
	}

	/// Builds a [`SessionManager`] over a fresh in-memory store.
	pub fn build_test_manager() -> (SessionManager, Arc<MemoryStore>) {
		let backend = Arc::new(MemoryStore::default());
		let store: Arc<dyn CredentialStore> = backend.clone();

		(SessionManager::new(store), backend)
	}

	/// Builds a [`SessionGate`] with the default admission limits over a fresh in-memory store.
	pub fn build_test_gate() -> SessionGate {
		let (manager, _) = build_test_manager();

		SessionGate::new(manager, AdmissionConfig::default())
			.expect("Default admission config should always validate.")
	}
}

mod _prelude {
	pub use std::{
		collections::HashMap,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
		time::Duration,
	};

	pub use parking_lot::{Mutex, RwLock};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::OffsetDateTime;

	pub use crate::error::{Error, Result};
}

pub use error::{ConfigError, Error, Result};
