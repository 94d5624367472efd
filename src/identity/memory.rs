//! In-process identity provider and plaintext verifier for development and tests.

// crates.io
use constant_time_eq::constant_time_eq;
// self
use crate::{
	_prelude::*,
	auth::{User, Username},
	identity::{
		CredentialVerifier, CredentialVerifierFactory, IdentityError, IdentityFuture,
		IdentityProvider,
	},
};

type UserMap = Arc<RwLock<HashMap<Username, Arc<User>>>>;

/// Thread-safe user directory kept in-process.
#[derive(Clone, Debug, Default)]
pub struct MemoryIdentityProvider(UserMap);
impl MemoryIdentityProvider {
	/// Registers (or replaces) a user.
	pub fn insert(&self, user: Arc<User>) {
		self.0.write().insert(user.username.clone(), user);
	}

	fn load_now(map: UserMap, username: &str) -> Result<Arc<User>, IdentityError> {
		map.read()
			.get(username)
			.cloned()
			.ok_or_else(|| IdentityError::UserNotFound { username: username.to_owned() })
	}
}
impl IdentityProvider for MemoryIdentityProvider {
	fn load_by_username<'a>(&'a self, username: &'a str) -> IdentityFuture<'a, Arc<User>> {
		let map = self.0.clone();

		Box::pin(async move { Self::load_now(map, username) })
	}
}

/// Verifier for stores that keep passwords unhashed.
///
/// The stored value is compared against the supplied password merged with the salt as
/// `password{salt}`, or the bare password when no salt is set.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlaintextVerifier;
impl PlaintextVerifier {
	/// Merges a raw password with its salt.
	pub fn merge(password: &str, salt: Option<&str>) -> String {
		match salt.filter(|salt| !salt.is_empty()) {
			Some(salt) => format!("{password}{{{salt}}}"),
			None => password.to_owned(),
		}
	}
}
impl CredentialVerifier for PlaintextVerifier {
	fn verify(&self, stored: &str, supplied: &str, salt: Option<&str>) -> bool {
		constant_time_eq(stored.as_bytes(), Self::merge(supplied, salt).as_bytes())
	}
}

/// Factory handing out the same verifier for every user.
#[derive(Clone)]
pub struct SingleVerifierFactory(Arc<dyn CredentialVerifier>);
impl SingleVerifierFactory {
	/// Wraps a verifier.
	pub fn new(verifier: impl 'static + CredentialVerifier) -> Self {
		Self(Arc::new(verifier))
	}
}
impl CredentialVerifierFactory for SingleVerifierFactory {
	fn verifier_for(&self, _: &User) -> Arc<dyn CredentialVerifier> {
		self.0.clone()
	}
}
impl Debug for SingleVerifierFactory {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("SingleVerifierFactory(..)")
	}
}
