//! Pluggable password comparison used by stores during login.

// self
use crate::auth::Password;

/// Decides whether a presented password satisfies a stored one.
pub trait CredentialVerifier
where
	Self: Send + Sync,
{
	/// Returns `true` when `presented` matches `stored`.
	fn verify(&self, stored: &Password, presented: &str) -> bool;
}

/// Exact string comparison against the stored plaintext.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlaintextVerifier;
impl CredentialVerifier for PlaintextVerifier {
	fn verify(&self, stored: &Password, presented: &str) -> bool {
		stored.expose() == presented
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn plaintext_requires_exact_match() {
		let stored = Password::new("qwerty");

		assert!(PlaintextVerifier.verify(&stored, "qwerty"));
		assert!(!PlaintextVerifier.verify(&stored, "Qwerty"));
		assert!(!PlaintextVerifier.verify(&stored, ""));
	}
}
