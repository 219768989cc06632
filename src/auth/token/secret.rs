//! Opaque session token wrapper that redacts its value.

// self
use crate::_prelude::*;

/// Opaque proof of an active session; redacted in every formatter.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);
impl SessionToken {
	/// Wraps a token string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the inner token value. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}

	/// Compares against a caller-supplied token.
	pub fn matches(&self, candidate: &str) -> bool {
		self.0 == candidate
	}
}
impl AsRef<str> for SessionToken {
	fn as_ref(&self) -> &str {
		self.expose()
	}
}
impl From<SessionToken> for String {
	fn from(value: SessionToken) -> Self {
		value.0
	}
}
impl Debug for SessionToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("SessionToken").field(&"<redacted>").finish()
	}
}
impl Display for SessionToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn token_formatters_redact() {
		let token = SessionToken::new("super-secret");

		assert_eq!(format!("{token:?}"), "SessionToken(\"<redacted>\")");
		assert_eq!(format!("{token}"), "<redacted>");
		assert!(token.matches("super-secret"));
		assert!(!token.matches("super-secre"));
	}

	#[test]
	fn token_serializes_as_plain_string() {
		let token = SessionToken::new("abc");
		let payload = serde_json::to_string(&token).expect("Token should serialize to JSON.");

		assert_eq!(payload, "\"abc\"");
	}
}
