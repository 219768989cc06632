//! Random token generation for new sessions.

// crates.io
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::RngCore;
// self
use crate::{_prelude::*, auth::SessionToken};

/// Bytes of entropy per generated token.
pub const TOKEN_ENTROPY_BYTES: usize = 16;

/// Source of fresh session tokens.
pub trait TokenGenerator
where
	Self: Send + Sync,
{
	/// Returns a new token; no two calls may plausibly collide.
	fn generate(&self) -> SessionToken;
}

/// Generator backed by the thread-local CSPRNG, producing base64url tokens.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomTokenGenerator;
impl TokenGenerator for RandomTokenGenerator {
	fn generate(&self) -> SessionToken {
		let mut bytes = [0_u8; TOKEN_ENTROPY_BYTES];

		rand::rng().fill_bytes(&mut bytes);

		SessionToken::new(URL_SAFE_NO_PAD.encode(bytes))
	}
}
