//! Credential and session rows held by the store.

// self
use crate::{
	_prelude::*,
	auth::{SessionToken, Username},
};

/// Stored password; redacted in every formatter.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Password(String);
impl Password {
	/// Wraps a password string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the inner password. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}
}
impl Debug for Password {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("Password").field(&"<redacted>").finish()
	}
}
impl Display for Password {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

/// Username/password pair created at signup and never mutated afterwards.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Credential {
	/// Primary key.
	pub username: Username,
	/// Stored secret compared by the store's verifier.
	pub password: Password,
	/// Signup instant.
	pub created_at: OffsetDateTime,
}
impl Credential {
	/// Creates a credential stamped with the current UTC instant.
	pub fn new(username: Username, password: Password) -> Self {
		Self { username, password, created_at: OffsetDateTime::now_utc() }
	}
}

/// The single live session for a username.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionRecord {
	/// Owner of the session; always has a credential.
	pub username: Username,
	/// Token the caller must present.
	pub token: SessionToken,
	/// Login instant, strictly after the owning credential's `created_at`.
	pub issued_at: OffsetDateTime,
}
impl SessionRecord {
	/// Creates a session for `credential`, clamping `issued_at` to follow the signup instant.
	pub fn issue(credential: &Credential, token: SessionToken) -> Self {
		let now = OffsetDateTime::now_utc();
		let floor = credential.created_at + time::Duration::NANOSECOND;
		let issued_at = if now < floor { floor } else { now };

		Self { username: credential.username.clone(), token, issued_at }
	}

	/// Returns `true` when the presented pair identifies this session.
	pub fn matches(&self, token: &str) -> bool {
		self.token.matches(token)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn password_formatters_redact() {
		let password = Password::new("hunter2");

		assert_eq!(format!("{password:?}"), "Password(\"<redacted>\")");
		assert_eq!(format!("{password}"), "<redacted>");
	}

	#[test]
	fn session_is_issued_after_credential() {
		let username = Username::new("bob");
		let mut credential = Credential::new(username, Password::new("x"));

		// A clock that went backwards must not produce a session older than its credential.
		credential.created_at = OffsetDateTime::now_utc() + time::Duration::hours(1);

		let session = SessionRecord::issue(&credential, SessionToken::new("t"));

		assert!(session.issued_at > credential.created_at);
		assert!(session.matches("t"));
	}
}
