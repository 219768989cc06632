//! Read-only capability handed to services that trust this one for access control.

// self
use crate::_prelude::*;

/// Boxed future returned by [`Validator::validate`].
pub type ValidateFuture<'a> = Pin<Box<dyn Future<Output = Result<()>> + 'a + Send>>;

/// Checks that `token` is the live session token for `username`.
///
/// This is the only operation a dependent service receives; it cannot sign users up, log
/// them in, or revoke their sessions.
pub trait Validator
where
	Self: Send + Sync,
{
	/// Resolves to `Ok(())` for a live session and [`Error::BadAuth`] otherwise.
	fn validate<'a>(&'a self, username: &'a str, token: &'a str) -> ValidateFuture<'a>;
}
impl<V> Validator for Arc<V>
where
	V: ?Sized + Validator,
{
	fn validate<'a>(&'a self, username: &'a str, token: &'a str) -> ValidateFuture<'a> {
		(**self).validate(username, token)
	}
}
