//! Identity-provider and credential-verification contracts consumed by the adapter.
//!
//! Password hashing is a backend concern: the adapter only asks a verifier whether a supplied
//! password matches what the provider stored.

pub mod memory;

pub use memory::*;

// self
use crate::{_prelude::*, auth::User};

/// Boxed future returned by [`IdentityProvider`] lookups.
pub type IdentityFuture<'a, T> =
	Pin<Box<dyn Future<Output = Result<T, IdentityError>> + 'a + Send>>;

/// Loads resource owners by username.
pub trait IdentityProvider
where
	Self: Send + Sync,
{
	/// Loads a user, failing with [`IdentityError::UserNotFound`] when none exists.
	fn load_by_username<'a>(&'a self, username: &'a str) -> IdentityFuture<'a, Arc<User>>;
}

/// Checks a supplied password against stored credentials.
pub trait CredentialVerifier
where
	Self: Send + Sync,
{
	/// Returns `true` if `supplied` matches the stored password under the given salt.
	fn verify(&self, stored: &str, supplied: &str, salt: Option<&str>) -> bool;
}

/// Picks the verifier responsible for a given user.
pub trait CredentialVerifierFactory
where
	Self: Send + Sync,
{
	/// Returns the verifier matching the user's password scheme.
	fn verifier_for(&self, user: &User) -> Arc<dyn CredentialVerifier>;
}

/// Failures raised by identity providers.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum IdentityError {
	/// No user is registered under the username.
	#[error("User `{username}` was not found.")]
	UserNotFound {
		/// Username that failed to resolve.
		username: String,
	},
	/// Provider backend failure (directory unreachable, corrupt record).
	#[error("Identity backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}
impl IdentityError {
	/// Returns `true` for the unknown-user outcome.
	pub fn is_user_not_found(&self) -> bool {
		matches!(self, Self::UserNotFound { .. })
	}
}
