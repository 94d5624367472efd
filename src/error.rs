//! Adapter-level error types shared across the storage adapter, stores, and identity backends.

// self
use crate::_prelude::*;

/// Adapter-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Canonical adapter error exposed by public APIs.
///
/// Negative outcomes the protocol engine expects (missing entities, bad credentials, unknown
/// users) are never represented here; they surface as `None` or
/// [`UserCredentials::Invalid`](crate::storage::UserCredentials::Invalid).
#[derive(Debug, ThisError)]
pub enum Error {
	/// Storage-layer failure.
	#[error(transparent)]
	Storage(#[from] crate::store::StoreError),
	/// Identity-provider failure other than an unknown user.
	#[error(transparent)]
	Identity(#[from] crate::identity::IdentityError),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),

	/// Caller handed over a client object the adapter cannot work with.
	///
	/// This is a contract violation by the protocol engine and should map to a server-side
	/// error rather than an authentication failure.
	#[error("Expected a `{expected}` client but received `{found}`.")]
	TypeMismatch {
		/// Concrete client type the adapter requires.
		expected: &'static str,
		/// Type name of the client that was actually supplied.
		found: &'static str,
	},
}
impl Error {
	/// Returns `true` when the error signals a caller contract violation.
	pub fn is_type_mismatch(&self) -> bool {
		matches!(self, Self::TypeMismatch { .. })
	}
}

/// Configuration failures raised while wiring the adapter.
#[derive(Debug, PartialEq, Eq, ThisError)]
pub enum ConfigError {
	/// A required collaborator was never supplied to the builder.
	#[error("Storage adapter is missing the `{name}` collaborator.")]
	MissingCollaborator {
		/// Builder slot that was left empty.
		name: &'static str,
	},
}
