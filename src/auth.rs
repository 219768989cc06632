//! Auth-domain identifiers, credential rows, session tokens, and verifiers.

pub mod credential;
pub mod id;
pub mod token;
pub mod verifier;

pub use credential::*;
pub use id::*;
pub use token::{generator::*, secret::*};
pub use verifier::*;
