//! Simple file-backed [`CredentialStore`] for lightweight deployments.

// std
use std::{
	fs::{self, File},
	io::Write,
	path::{Path, PathBuf},
};
// self
use crate::{
	_prelude::*,
	auth::{CredentialVerifier, Password, SessionToken, TokenGenerator, Username},
	store::{
		CredentialStore, IssuePolicy, SessionTables, StoreError, StoreFuture,
		tables::TablesSnapshot,
	},
};

/// Persists both tables to a JSON file before each mutation is acknowledged.
///
/// A mutation whose snapshot cannot be written is rolled back in memory, so the in-process
/// view never runs ahead of the file.
///
/// The snapshot is written and fsynced with blocking I/O while the write lock is held, so
/// concurrent `check` calls stall behind every mutation. Suits low-traffic deployments; use
/// [`MemoryStore`](crate::store::MemoryStore) or a custom backend when reads must not wait.
#[derive(Clone, Debug)]
pub struct FileStore {
	path: PathBuf,
	inner: Arc<RwLock<SessionTables>>,
	policy: IssuePolicy,
}
impl FileStore {
	/// Opens (or creates) a store at the provided path, eagerly loading existing data.
	pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
		let path = path.into();

		Self::ensure_parent_exists(&path)?;

		let tables = Self::load_snapshot(&path)?;

		Ok(Self { path, inner: Arc::new(RwLock::new(tables)), policy: IssuePolicy::default() })
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

	/// Location of the JSON snapshot.
	pub fn path(&self) -> &Path {
		&self.path
	}

	fn load_snapshot(path: &Path) -> Result<SessionTables, StoreError> {
		if !path.exists() {
			return Ok(SessionTables::default());
		}

		let metadata = path.metadata().map_err(|e| StoreError::Backend {
			message: format!("Failed to inspect {}: {e}", path.display()),
		})?;

		if metadata.len() == 0 {
			return Ok(SessionTables::default());
		}

		let bytes = fs::read(path).map_err(|e| StoreError::Backend {
			message: format!("Failed to read {}: {e}", path.display()),
		})?;
		let snapshot: TablesSnapshot =
			serde_json::from_slice(&bytes).map_err(|e| StoreError::Serialization {
				message: format!("Failed to parse {}: {e}", path.display()),
			})?;

		SessionTables::from_snapshot(snapshot)
	}

	fn ensure_parent_exists(path: &Path) -> Result<(), StoreError> {
		if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
			fs::create_dir_all(parent).map_err(|e| StoreError::Backend {
				message: format!("Failed to create store directory {}: {e}", parent.display()),
			})?;
		}

		Ok(())
	}

	fn persist_locked(&self, tables: &SessionTables) -> Result<(), StoreError> {
		Self::ensure_parent_exists(&self.path)?;

		let serialized = serde_json::to_vec_pretty(&tables.snapshot()).map_err(|e| {
			StoreError::Serialization { message: format!("Failed to serialize store snapshot: {e}") }
		})?;
		let mut tmp_path = self.path.clone();

		tmp_path.set_extension("tmp");

		{
			let mut file = File::create(&tmp_path).map_err(|e| StoreError::Backend {
				message: format!("Failed to create {}: {e}", tmp_path.display()),
			})?;

			file.write_all(&serialized).map_err(|e| StoreError::Backend {
				message: format!("Failed to write {}: {e}", tmp_path.display()),
			})?;
			file.sync_all().map_err(|e| StoreError::Backend {
				message: format!("Failed to sync {}: {e}", tmp_path.display()),
			})?;
		}

		fs::rename(&tmp_path, &self.path).map_err(|e| StoreError::Backend {
			message: format!("Failed to replace {}: {e}", self.path.display()),
		})
	}
}
impl CredentialStore for FileStore {
	fn create<'a>(&'a self, username: &'a Username, password: Password) -> StoreFuture<'a, ()> {
		Box::pin(async move {
			let mut guard = self.inner.write();

			guard.create(username, password)?;

			if let Err(e) = self.persist_locked(&guard) {
				guard.remove_credential(username);

				return Err(e.into());
			}

			Ok(())
		})
	}

	fn authenticate<'a>(
		&'a self,
		username: &'a Username,
		password: &'a str,
	) -> StoreFuture<'a, SessionToken> {
		Box::pin(async move {
			let mut guard = self.inner.write();
			let previous = guard.session(username).cloned();
			let token = guard.authenticate(username, password, &self.policy)?;

			if let Err(e) = self.persist_locked(&guard) {
				guard.restore_session(username, previous);

				return Err(e.into());
			}

			Ok(token)
		})
	}

	fn invalidate<'a>(&'a self, username: &'a Username, token: &'a str) -> StoreFuture<'a, ()> {
		Box::pin(async move {
			let mut guard = self.inner.write();
			let removed = guard.invalidate(username, token)?;

			if let Err(e) = self.persist_locked(&guard) {
				guard.restore_session(username, Some(removed));

				return Err(e.into());
			}

			Ok(())
		})
	}

	fn check<'a>(&'a self, username: &'a Username, token: &'a str) -> StoreFuture<'a, ()> {
		Box::pin(async move { self.inner.read().check(username, token) })
	}
}

#[cfg(test)]
mod tests {
	// std
	use std::{env, process};
	// crates.io
	use tokio::runtime::Runtime;
	// self
	use super::*;

	fn temp_path(tag: &str) -> PathBuf {
		let unique = format!(
			"session_gate_file_store_{tag}_{}_{}.json",
			process::id(),
			OffsetDateTime::now_utc().unix_timestamp_nanos(),
		);

		env::temp_dir().join(unique)
	}

	fn bob() -> Username {
		Username::new("bob")
	}

	#[test]
	fn sessions_survive_reopen() {
		let path = temp_path("reopen");
		let store = FileStore::open(&path).expect("Failed to open file store snapshot.");
		let rt = Runtime::new().expect("Failed to build Tokio runtime for file store test.");
		let user = bob();

		rt.block_on(store.create(&user, Password::new("qwerty")))
			.expect("Signup should persist to the file store.");

		let token = rt
			.block_on(store.authenticate(&user, "qwerty"))
			.expect("Login should persist to the file store.");

		drop(store);

		let reopened = FileStore::open(&path).expect("Failed to reopen file store snapshot.");

		rt.block_on(reopened.check(&user, token.expose()))
			.expect("File store lost the session after reopen.");
		assert!(matches!(
			rt.block_on(reopened.create(&user, Password::new("other"))),
			Err(Error::AlreadyExists)
		));
		assert!(matches!(rt.block_on(reopened.authenticate(&user, "bad")), Err(Error::BadAuth)));

		rt.block_on(reopened.invalidate(&user, token.expose()))
			.expect("Logout should persist to the file store.");
		drop(reopened);

		let reopened = FileStore::open(&path).expect("Failed to reopen file store snapshot.");

		assert!(matches!(rt.block_on(reopened.check(&user, token.expose())), Err(Error::BadAuth)));

		fs::remove_file(&path).unwrap_or_else(|e| {
			panic!("Failed to remove temporary file store snapshot {}: {e}", path.display())
		});
	}

	#[test]
	fn failed_persist_rolls_back_memory() {
		let dir = temp_path("rollback");
		let store = FileStore::open(dir.join("auth.json")).expect("Failed to open file store.");
		let rt = Runtime::new().expect("Failed to build Tokio runtime for file store test.");
		let user = bob();

		// Replacing the parent directory with a plain file makes every write fail.
		fs::remove_dir_all(&dir).expect("Failed to clear store directory.");
		fs::write(&dir, b"not a directory").expect("Failed to plant blocking file.");

		assert!(matches!(
			rt.block_on(store.create(&user, Password::new("x"))),
			Err(Error::StoreUnavailable(StoreError::Backend { .. }))
		));
		assert!(!store.inner.read().has_credential(&user), "Rolled back signup must not linger.");

		fs::remove_file(&dir).unwrap_or_else(|e| {
			panic!("Failed to remove blocking file {}: {e}", dir.display())
		});
	}

	#[test]
	fn corrupt_snapshot_is_rejected() {
		let path = temp_path("corrupt");

		fs::write(&path, b"{ not json").expect("Failed to write corrupt snapshot.");

		assert!(matches!(FileStore::open(&path), Err(StoreError::Serialization { .. })));

		fs::remove_file(&path).unwrap_or_else(|e| {
			panic!("Failed to remove corrupt snapshot {}: {e}", path.display())
		});
	}
}
