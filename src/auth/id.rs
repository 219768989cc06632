//! Username type used as the primary key of both tables.

// std
use std::{borrow::Borrow, ops::Deref};
// self
use crate::_prelude::*;

/// Unique account name; one credential and at most one session per value.
///
/// Any string is a valid username, including the empty string.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Username(String);
impl Username {
	/// Wraps an account name.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}
}
impl Deref for Username {
	type Target = str;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
impl AsRef<str> for Username {
	fn as_ref(&self) -> &str {
		&self.0
	}
}
impl From<Username> for String {
	fn from(value: Username) -> Self {
		value.0
	}
}
impl From<String> for Username {
	fn from(value: String) -> Self {
		Self(value)
	}
}
impl From<&str> for Username {
	fn from(value: &str) -> Self {
		Self(value.to_owned())
	}
}
impl Borrow<str> for Username {
	fn borrow(&self) -> &str {
		&self.0
	}
}
impl Debug for Username {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "Username({:?})", self.0)
	}
}
impl Display for Username {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn any_string_is_a_username() {
		assert_eq!(Username::new("").as_ref(), "");
		assert_eq!(Username::new("bob smith").as_ref(), "bob smith");
		assert_eq!(format!("{:?}", Username::new("bob")), "Username(\"bob\")");
		assert_eq!(Username::new("a".repeat(4_096)).len(), 4_096);
	}

	#[test]
	fn serde_is_a_plain_string() {
		let user: Username =
			serde_json::from_str("\" spaced \"").expect("Username should deserialize.");

		assert_eq!(user.as_ref(), " spaced ");
		assert_eq!(
			serde_json::to_string(&user).expect("Username should serialize."),
			"\" spaced \""
		);
	}

	#[test]
	fn borrow_supports_fast_lookup() {
		let map: HashMap<Username, u8> = HashMap::from_iter([(Username::new("alice"), 7_u8)]);

		assert_eq!(map.get("alice"), Some(&7));
	}
}
