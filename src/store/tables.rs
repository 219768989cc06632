//! Credential and session tables shared by the built-in backends.

// self
use crate::{
	_prelude::*,
	auth::{Credential, Password, SessionRecord, SessionToken, Username},
	store::{IssuePolicy, StoreError},
};

/// In-process copy of both logical tables.
///
/// Callers hold an exclusive lock for mutations and a shared lock for [`check`](Self::check),
/// which makes each method one atomic step of the owning backend.
#[derive(Clone, Debug, Default)]
pub struct SessionTables {
	credentials: HashMap<Username, Credential>,
	sessions: HashMap<Username, SessionRecord>,
}
impl SessionTables {
	/// Inserts a new credential.
	pub fn create(&mut self, username: &Username, password: Password) -> Result<()> {
		if self.credentials.contains_key(username) {
			return Err(Error::AlreadyExists);
		}

		self.credentials.insert(username.clone(), Credential::new(username.clone(), password));

		Ok(())
	}

	/// Verifies the password and installs a new session, replacing any previous one.
	pub fn authenticate(
		&mut self,
		username: &Username,
		password: &str,
		policy: &IssuePolicy,
	) -> Result<SessionToken> {
		let credential = match self.credentials.get(username) {
			Some(credential) if policy.verifier.verify(&credential.password, password) =>
				credential,
			_ => return Err(Error::BadAuth),
		};
		let session = SessionRecord::issue(credential, policy.generator.generate());
		let token = session.token.clone();

		self.sessions.insert(username.clone(), session);

		Ok(token)
	}

	/// Removes the session when the token matches, returning the removed row.
	pub fn invalidate(&mut self, username: &Username, token: &str) -> Result<SessionRecord> {
		self.check(username, token)?;

		self.sessions.remove(username).ok_or(Error::BadAuth)
	}

	/// Succeeds when `token` is the live token for `username`.
	pub fn check(&self, username: &Username, token: &str) -> Result<()> {
		match self.sessions.get(username) {
			Some(session) if session.matches(token) => Ok(()),
			_ => Err(Error::BadAuth),
		}
	}

	/// Returns the live session row for `username`, if any.
	pub fn session(&self, username: &Username) -> Option<&SessionRecord> {
		self.sessions.get(username)
	}

	#[cfg(test)]
	pub(crate) fn has_credential(&self, username: &Username) -> bool {
		self.credentials.contains_key(username)
	}

	/// Undoes a [`create`](Self::create) whose persistence failed.
	pub fn remove_credential(&mut self, username: &Username) {
		self.sessions.remove(username);
		self.credentials.remove(username);
	}

	/// Puts back the session row observed before a failed mutation.
	pub fn restore_session(&mut self, username: &Username, previous: Option<SessionRecord>) {
		match previous {
			Some(session) => self.sessions.insert(username.clone(), session),
			None => self.sessions.remove(username),
		};
	}

	/// Flattens both tables into a serializable snapshot with stable ordering.
	pub fn snapshot(&self) -> TablesSnapshot {
		let mut credentials: Vec<_> = self.credentials.values().cloned().collect();
		let mut sessions: Vec<_> = self.sessions.values().cloned().collect();

		credentials.sort_by(|a, b| a.username.cmp(&b.username));
		sessions.sort_by(|a, b| a.username.cmp(&b.username));

		TablesSnapshot { credentials, sessions }
	}

	/// Rebuilds tables from a snapshot, rejecting rows that break the table invariants.
	pub fn from_snapshot(snapshot: TablesSnapshot) -> Result<Self, StoreError> {
		let mut tables = Self::default();

		for credential in snapshot.credentials {
			if tables.credentials.contains_key(&credential.username) {
				return Err(StoreError::Serialization {
					message: format!("Duplicate credential for {}", credential.username),
				});
			}

			tables.credentials.insert(credential.username.clone(), credential);
		}
		for session in snapshot.sessions {
			let Some(credential) = tables.credentials.get(&session.username) else {
				return Err(StoreError::Serialization {
					message: format!("Session for {} has no credential", session.username),
				});
			};

			if session.issued_at <= credential.created_at {
				return Err(StoreError::Serialization {
					message: format!("Session for {} predates its credential", session.username),
				});
			}
			if tables.sessions.contains_key(&session.username) {
				return Err(StoreError::Serialization {
					message: format!("Duplicate session for {}", session.username),
				});
			}

			tables.sessions.insert(session.username.clone(), session);
		}

		Ok(tables)
	}
}

/// Serialized layout of both tables.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TablesSnapshot {
	/// Credential rows ordered by username.
	pub credentials: Vec<Credential>,
	/// Session rows ordered by username.
	pub sessions: Vec<SessionRecord>,
}
