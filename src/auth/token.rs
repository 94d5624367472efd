//! Issued grant entities: access tokens, refresh tokens, and authorization codes.
//!
//! Every entity starts out empty (allocated by its store), gets populated by the adapter, and
//! is then persisted by the same store. Entities hold their [`Client`] by shared reference.

// self
use crate::{
	_prelude::*,
	auth::{Client, Secret},
};

/// Marker trait distinguishing token kinds at the type level.
pub trait TokenKind
where
	Self: 'static + Send + Sync,
{
	/// Stable label used in diagnostics.
	const LABEL: &'static str;
}

/// Access-token kind marker.
#[derive(Clone, Copy, Debug)]
pub enum Access {}
impl TokenKind for Access {
	const LABEL: &'static str = "AccessToken";
}

/// Refresh-token kind marker.
#[derive(Clone, Copy, Debug)]
pub enum Refresh {}
impl TokenKind for Refresh {
	const LABEL: &'static str = "RefreshToken";
}

/// Access token bound to a client.
pub type AccessToken = Token<Access>;
/// Refresh token bound to a client.
pub type RefreshToken = Token<Refresh>;

macro_rules! impl_expiry {
	($name:ident $(<$param:ident: $bound:ident>)?) => {
		impl$(<$param: $bound>)? $name$(<$param>)? {
			/// Seconds left until expiry at `now` (negative once expired), or `None` when the
			/// entity never expires.
			pub fn expires_in_at(&self, now: i64) -> Option<i64> {
				self.expires_at.map(|expires_at| expires_at - now)
			}

			/// Seconds left until expiry relative to the current clock.
			pub fn expires_in(&self) -> Option<i64> {
				self.expires_in_at(OffsetDateTime::now_utc().unix_timestamp())
			}

			/// Returns `true` if the entity is past its expiry at `now`.
			pub fn has_expired_at(&self, now: i64) -> bool {
				self.expires_at.is_some_and(|expires_at| now > expires_at)
			}

			/// Returns `true` if the entity is past its expiry relative to the current clock.
			pub fn has_expired(&self) -> bool {
				self.has_expired_at(OffsetDateTime::now_utc().unix_timestamp())
			}

			/// Public identifier of the owning client, if one is attached.
			pub fn client_id(&self) -> Option<String> {
				self.client
					.as_ref()
					.map(|client| crate::auth::OAuth2Client::public_id(client.as_ref()))
			}
		}
	};
}

/// Token entity shared by access and refresh tokens.
pub struct Token<K>
where
	K: TokenKind,
{
	/// Opaque token string.
	pub token: Secret,
	/// Owning client; `None` only while the entity is still empty.
	pub client: Option<Arc<Client>>,
	/// Opaque caller-supplied payload.
	pub data: Value,
	/// UNIX timestamp (seconds) after which the token is no longer valid.
	pub expires_at: Option<i64>,
	/// Space-delimited scope string, passed through untouched.
	pub scope: Option<String>,
	kind: PhantomData<fn() -> K>,
}
impl<K> Token<K>
where
	K: TokenKind,
{
	/// Allocates an empty token.
	pub fn empty() -> Self {
		Self {
			token: Secret::default(),
			client: None,
			data: Value::Null,
			expires_at: None,
			scope: None,
			kind: PhantomData,
		}
	}
}
impl<K> Default for Token<K>
where
	K: TokenKind,
{
	fn default() -> Self {
		Self::empty()
	}
}
impl<K> Clone for Token<K>
where
	K: TokenKind,
{
	fn clone(&self) -> Self {
		Self {
			token: self.token.clone(),
			client: self.client.clone(),
			data: self.data.clone(),
			expires_at: self.expires_at,
			scope: self.scope.clone(),
			kind: PhantomData,
		}
	}
}
impl<K> Debug for Token<K>
where
	K: TokenKind,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct(K::LABEL)
			.field("token", &self.token)
			.field("client", &self.client_id())
			.field("data", &self.data)
			.field("expires_at", &self.expires_at)
			.field("scope", &self.scope)
			.finish()
	}
}
impl_expiry!(Token<K: TokenKind>);

/// Authorization code bound to a client and the redirect URI it was issued for.
#[derive(Clone, Default)]
pub struct AuthCode {
	/// Opaque code string.
	pub token: Secret,
	/// Owning client; `None` only while the entity is still empty.
	pub client: Option<Arc<Client>>,
	/// Opaque caller-supplied payload.
	pub data: Value,
	/// Redirect URI the code was issued for, stored verbatim.
	pub redirect_uri: Option<String>,
	/// UNIX timestamp (seconds) after which the code is no longer valid.
	pub expires_at: Option<i64>,
	/// Space-delimited scope string, passed through untouched.
	pub scope: Option<String>,
}
impl Debug for AuthCode {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AuthCode")
			.field("token", &self.token)
			.field("client", &self.client_id())
			.field("data", &self.data)
			.field("redirect_uri", &self.redirect_uri)
			.field("expires_at", &self.expires_at)
			.field("scope", &self.scope)
			.finish()
	}
}
impl_expiry!(AuthCode);

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn empty_tokens_have_no_owner_or_expiry() {
		let token = AccessToken::empty();

		assert!(token.token.is_empty());
		assert!(token.client.is_none());
		assert_eq!(token.data, Value::Null);
		assert_eq!(token.expires_in(), None);
		assert!(!token.has_expired());
	}

	#[test]
	fn expiry_helpers_compare_against_now() {
		let mut token = RefreshToken::empty();

		token.expires_at = Some(100);

		assert_eq!(token.expires_in_at(40), Some(60));
		assert_eq!(token.expires_in_at(130), Some(-30));
		assert!(!token.has_expired_at(100));
		assert!(token.has_expired_at(101));
		assert!(token.has_expired());

		let mut code = AuthCode::default();

		code.expires_at = Some(OffsetDateTime::now_utc().unix_timestamp() + 3_600);

		assert!(!code.has_expired());
		assert!(code.expires_in().is_some_and(|left| left > 3_500));
	}

	#[test]
	fn debug_redacts_token_strings() {
		let mut token = AccessToken::empty();

		token.token = Secret::new("very-secret-token");
		token.client = Some(Arc::new(Client::new(9)));

		let rendered = format!("{token:?}");

		assert!(rendered.starts_with("AccessToken"));
		assert!(!rendered.contains("very-secret-token"));
		assert!(rendered.contains("9_"));
	}
}
