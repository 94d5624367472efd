//! Registered client applications and the capability seam the protocol engine sees them
//! through.

// std
use std::borrow::Cow;
// self
use crate::{
	_prelude::*,
	auth::{RandomId, Secret},
};

/// Type-erasure helpers backing [`OAuth2Client`] downcasts.
///
/// Blanket-implemented for every `'static` type, so implementors of [`OAuth2Client`] never
/// write these by hand.
pub trait AsAny: 'static + Any + Send + Sync {
	/// Borrows the value as [`Any`].
	fn as_any(&self) -> &dyn Any;

	/// Converts a shared handle into a shared [`Any`] handle without copying.
	fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;
}
impl<T> AsAny for T
where
	T: Any + Send + Sync,
{
	fn as_any(&self) -> &dyn Any {
		self
	}

	fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
		self
	}
}

/// Generic client capability the protocol engine works with.
///
/// The protocol engine may hand over any implementor; the adapter only accepts [`Client`] and
/// rejects everything else with [`Error::TypeMismatch`].
pub trait OAuth2Client: 'static + AsAny {
	/// Public identifier the client presents on the wire.
	fn public_id(&self) -> String;

	/// Redirect URIs registered for the client.
	fn redirect_uris(&self) -> &[String];

	/// Concrete type label used in contract-violation diagnostics.
	fn type_label(&self) -> &'static str {
		std::any::type_name::<Self>()
	}
}

/// OAuth 2.0 grant-type identifier.
///
/// Identifiers are opaque strings so extension grants (URIs) are representable; the
/// associated constants cover the RFC 6749 flows.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GrantType(Cow<'static, str>);
impl GrantType {
	/// Authorization Code grant.
	pub const AUTHORIZATION_CODE: Self = Self(Cow::Borrowed("authorization_code"));
	/// Client Credentials grant.
	pub const CLIENT_CREDENTIALS: Self = Self(Cow::Borrowed("client_credentials"));
	/// Implicit grant.
	pub const IMPLICIT: Self = Self(Cow::Borrowed("token"));
	/// Resource Owner Password Credentials grant.
	pub const PASSWORD: Self = Self(Cow::Borrowed("password"));
	/// Refresh Token grant.
	pub const REFRESH_TOKEN: Self = Self(Cow::Borrowed("refresh_token"));

	/// Returns the identifier string.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}
impl From<&str> for GrantType {
	fn from(value: &str) -> Self {
		Self(Cow::Owned(value.to_owned()))
	}
}
impl From<String> for GrantType {
	fn from(value: String) -> Self {
		Self(Cow::Owned(value))
	}
}
impl Debug for GrantType {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "GrantType({})", self.0)
	}
}
impl Display for GrantType {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}

/// Registered OAuth 2.0 client owned by the client backend.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Client {
	/// Backend-assigned numeric identifier.
	pub id: u64,
	/// Random half of the public identifier.
	pub random_id: RandomId,
	/// Client secret; compared byte-for-byte.
	pub secret: Secret,
	/// Registered redirect URIs.
	pub redirect_uris: Vec<String>,
	/// Grant types this client may use.
	pub allowed_grant_types: Vec<GrantType>,
}
impl Client {
	/// Creates a client with a freshly generated random id and secret and no allowed grants.
	pub fn new(id: u64) -> Self {
		Self {
			id,
			random_id: RandomId::generate(),
			secret: Secret::generate(),
			redirect_uris: Vec::new(),
			allowed_grant_types: Vec::new(),
		}
	}

	/// Replaces the client secret.
	pub fn set_secret(&mut self, secret: impl Into<String>) {
		self.secret = Secret::new(secret);
	}

	/// Replaces the allowed grant types.
	pub fn set_allowed_grant_types<I>(&mut self, grants: I)
	where
		I: IntoIterator<Item = GrantType>,
	{
		self.allowed_grant_types = grants.into_iter().collect();
	}

	/// Replaces the registered redirect URIs.
	pub fn set_redirect_uris<I, S>(&mut self, uris: I)
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.redirect_uris = uris.into_iter().map(Into::into).collect();
	}

	/// Exact, case-sensitive secret comparison.
	pub fn check_secret(&self, secret: &str) -> bool {
		self.secret.matches(secret)
	}

	/// Returns `true` if `grant_type` is one of the allowed grant types.
	pub fn allows_grant_type(&self, grant_type: &str) -> bool {
		self.allowed_grant_types.iter().any(|allowed| allowed.as_str() == grant_type)
	}
}
impl OAuth2Client for Client {
	/// Returns `"{id}_{random_id}"`.
	fn public_id(&self) -> String {
		format!("{}_{}", self.id, self.random_id)
	}

	fn redirect_uris(&self) -> &[String] {
		&self.redirect_uris
	}

	fn type_label(&self) -> &'static str {
		"Client"
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	struct ForeignClient;
	impl OAuth2Client for ForeignClient {
		fn public_id(&self) -> String {
			"foreign".into()
		}

		fn redirect_uris(&self) -> &[String] {
			&[]
		}
	}

	#[test]
	fn new_clients_get_random_credentials() {
		let a = Client::new(1);
		let b = Client::new(1);

		assert_ne!(a.random_id, b.random_id);
		assert!(!a.secret.is_empty());
		assert!(a.allowed_grant_types.is_empty());
		assert_eq!(a.public_id(), format!("1_{}", a.random_id));
	}

	#[test]
	fn secret_check_is_exact() {
		let mut client = Client::new(1);

		client.set_secret("dummy");

		assert!(client.check_secret("dummy"));
		assert!(!client.check_secret("passe"));
		assert!(!client.check_secret("DUMMY"));
	}

	#[test]
	fn grant_membership_uses_identifier_strings() {
		let mut client = Client::new(1);

		client.set_allowed_grant_types([GrantType::from("foo"), GrantType::PASSWORD]);

		assert!(client.allows_grant_type("foo"));
		assert!(client.allows_grant_type("password"));
		assert!(!client.allows_grant_type("baz"));
		assert_eq!(GrantType::from("password"), GrantType::PASSWORD);
	}

	#[test]
	fn downcast_only_accepts_concrete_clients() {
		let native: Arc<dyn OAuth2Client> = Arc::new(Client::new(3));
		let foreign: Arc<dyn OAuth2Client> = Arc::new(ForeignClient);

		assert!(AsAny::as_any(native.as_ref()).downcast_ref::<Client>().is_some());
		assert!(AsAny::as_any(foreign.as_ref()).downcast_ref::<Client>().is_none());
		assert!(foreign.type_label().ends_with("ForeignClient"));
		assert_eq!(native.type_label(), "Client");
	}

	#[test]
	fn grant_types_serialize_as_plain_strings() {
		let payload = serde_json::to_string(&vec![GrantType::AUTHORIZATION_CODE])
			.expect("Grant types should serialize to JSON.");

		assert_eq!(payload, "[\"authorization_code\"]");
	}
}
