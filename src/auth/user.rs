//! Resource owners loaded from the identity provider.

// self
use crate::{
	_prelude::*,
	auth::{Secret, Username},
};

/// Authenticated resource owner.
///
/// Owned by the identity provider; the adapter only passes it through.
#[derive(Clone, Debug, Serialize)]
pub struct User {
	/// Login name.
	pub username: Username,
	/// Stored password (hash or plaintext, backend-defined).
	#[serde(skip)]
	pub password: Secret,
	/// Optional backend-defined salt.
	#[serde(skip)]
	pub salt: Option<Secret>,
}
impl User {
	/// Creates a user record.
	pub fn new(username: Username, password: impl Into<String>, salt: Option<String>) -> Self {
		Self { username, password: Secret::new(password), salt: salt.map(Secret::new) }
	}

	/// Stored password value as handed to credential verifiers.
	pub fn password(&self) -> &str {
		self.password.expose()
	}

	/// Stored salt, if any.
	pub fn salt(&self) -> Option<&str> {
		self.salt.as_ref().map(Secret::expose)
	}
}
