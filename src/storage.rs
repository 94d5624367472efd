//! The storage adapter the OAuth 2.0 protocol engine talks to.
//!
//! [`OAuthStorage`] translates protocol-level storage calls into manager operations. Every
//! operation that receives a client first checks that it is a concrete [`Client`]; anything
//! else is a caller bug and fails with [`Error::TypeMismatch`] before a collaborator is
//! touched. Expected negative outcomes (missing entities, wrong secrets, unknown users) come
//! back as `None`, `false`, or [`UserCredentials::Invalid`] instead of errors.
//!
//! Creation follows a fixed sequence per call: allocate an empty entity from the store,
//! populate it, persist it, and hand the very same instance back to the caller.

/// Builder wiring collaborators into [`OAuthStorage`].
pub mod builder;

pub use builder::*;

// self
use crate::{
	_prelude::*,
	auth::{
		AccessToken, AsAny, AuthCode, Client, OAuth2Client, RefreshToken, Secret, Token,
		TokenKind, User,
	},
	identity::{CredentialVerifierFactory, IdentityError, IdentityProvider},
	obs::{self, StorageOp},
	store::{AuthCodeStore, ClientLookup, TokenStore},
};

/// Boxed future returned by [`GrantStorage`] operations.
pub type StorageFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + 'a + Send>>;

/// Outcome of a resource-owner password check.
#[derive(Clone, Debug)]
pub enum UserCredentials {
	/// Credentials matched; `data` carries the authenticated user so the protocol engine can
	/// thread it into token creation.
	Valid {
		/// Authenticated user.
		data: Arc<User>,
	},
	/// Unknown user or wrong password.
	Invalid,
}
impl UserCredentials {
	/// Returns `true` for [`UserCredentials::Valid`].
	pub fn is_valid(&self) -> bool {
		matches!(self, Self::Valid { .. })
	}

	/// Authenticated user, if any.
	pub fn user(&self) -> Option<&Arc<User>> {
		match self {
			Self::Valid { data } => Some(data),
			Self::Invalid => None,
		}
	}
}

/// Storage capability set the protocol engine drives grant flows through.
pub trait GrantStorage
where
	Self: Send + Sync,
{
	/// Looks up a client by public id.
	fn get_client<'a>(&'a self, public_id: &'a str) -> StorageFuture<'a, Option<Arc<Client>>>;

	/// Compares the client's secret with `secret`.
	fn check_client_credentials(&self, client: &dyn OAuth2Client, secret: &str) -> Result<bool>;

	/// Looks up an access token.
	fn get_access_token<'a>(
		&'a self,
		token: &'a str,
	) -> StorageFuture<'a, Option<Arc<AccessToken>>>;

	/// Issues and persists an access token.
	fn create_access_token<'a>(
		&'a self,
		token: &'a str,
		client: Arc<dyn OAuth2Client>,
		data: Value,
		expires_at: i64,
		scope: Option<&'a str>,
	) -> StorageFuture<'a, Arc<AccessToken>>;

	/// Looks up a refresh token.
	fn get_refresh_token<'a>(
		&'a self,
		token: &'a str,
	) -> StorageFuture<'a, Option<Arc<RefreshToken>>>;

	/// Issues and persists a refresh token.
	fn create_refresh_token<'a>(
		&'a self,
		token: &'a str,
		client: Arc<dyn OAuth2Client>,
		data: Value,
		expires_at: i64,
		scope: Option<&'a str>,
	) -> StorageFuture<'a, Arc<RefreshToken>>;

	/// Removes a refresh token once it has been rotated.
	fn unset_refresh_token<'a>(&'a self, token: &'a str) -> StorageFuture<'a, ()>;

	/// Checks whether the client may use `grant_type`.
	fn check_restricted_grant_type(
		&self,
		client: &dyn OAuth2Client,
		grant_type: &str,
	) -> Result<bool>;

	/// Verifies resource-owner credentials.
	fn check_user_credentials<'a>(
		&'a self,
		client: &'a dyn OAuth2Client,
		username: &'a str,
		password: &'a str,
	) -> StorageFuture<'a, UserCredentials>;

	/// Issues and persists an authorization code.
	fn create_auth_code<'a>(
		&'a self,
		code: &'a str,
		client: Arc<dyn OAuth2Client>,
		data: Value,
		redirect_uri: &'a str,
		expires_at: i64,
		scope: Option<&'a str>,
	) -> StorageFuture<'a, Arc<AuthCode>>;

	/// Looks up an authorization code.
	fn get_auth_code<'a>(&'a self, code: &'a str) -> StorageFuture<'a, Option<Arc<AuthCode>>>;

	/// Consumes an authorization code so it cannot be exchanged twice.
	fn mark_auth_code_as_used<'a>(&'a self, code: &'a str) -> StorageFuture<'a, ()>;
}

/// Stateless adapter over injected client, token, auth-code, and identity collaborators.
///
/// Holds only shared handles, so clones are cheap and concurrent calls never contend on
/// adapter-owned state.
#[derive(Clone)]
pub struct OAuthStorage {
	clients: Arc<dyn ClientLookup>,
	access_tokens: Arc<dyn TokenStore<crate::auth::Access>>,
	refresh_tokens: Arc<dyn TokenStore<crate::auth::Refresh>>,
	auth_codes: Arc<dyn AuthCodeStore>,
	identity: Arc<dyn IdentityProvider>,
	verifiers: Arc<dyn CredentialVerifierFactory>,
}
impl OAuthStorage {
	/// Returns a builder for wiring collaborators.
	pub fn builder() -> OAuthStorageBuilder {
		OAuthStorageBuilder::default()
	}

	/// Looks up a client by public id; `None` when the backend has no match.
	pub async fn get_client(&self, public_id: &str) -> Result<Option<Arc<Client>>> {
		obs::observe(StorageOp::GetClient, async move {
			Ok(self.clients.find_by_public_id(public_id).await?)
		})
		.await
	}

	/// Compares the client's secret with `secret` (exact, case-sensitive).
	pub fn check_client_credentials(
		&self,
		client: &dyn OAuth2Client,
		secret: &str,
	) -> Result<bool> {
		obs::observe_sync(StorageOp::CheckClientCredentials, || {
			Ok(expect_client(client)?.check_secret(secret))
		})
	}

	/// Looks up an access token; `None` when the backend has no match.
	pub async fn get_access_token(&self, token: &str) -> Result<Option<Arc<AccessToken>>> {
		obs::observe(StorageOp::GetAccessToken, async move {
			Ok(self.access_tokens.find_by_token(token).await?)
		})
		.await
	}

	/// Issues an access token: allocate, populate, persist, and return the persisted instance.
	pub async fn create_access_token(
		&self,
		token: &str,
		client: Arc<dyn OAuth2Client>,
		data: Value,
		expires_at: i64,
		scope: Option<&str>,
	) -> Result<Arc<AccessToken>> {
		obs::observe(StorageOp::CreateAccessToken, async move {
			let client = expect_shared_client(client)?;

			issue_token(self.access_tokens.as_ref(), token, client, data, expires_at, scope).await
		})
		.await
	}

	/// Looks up a refresh token; `None` when the backend has no match.
	pub async fn get_refresh_token(&self, token: &str) -> Result<Option<Arc<RefreshToken>>> {
		obs::observe(StorageOp::GetRefreshToken, async move {
			Ok(self.refresh_tokens.find_by_token(token).await?)
		})
		.await
	}

	/// Issues a refresh token: allocate, populate, persist, and return the persisted instance.
	pub async fn create_refresh_token(
		&self,
		token: &str,
		client: Arc<dyn OAuth2Client>,
		data: Value,
		expires_at: i64,
		scope: Option<&str>,
	) -> Result<Arc<RefreshToken>> {
		obs::observe(StorageOp::CreateRefreshToken, async move {
			let client = expect_shared_client(client)?;

			issue_token(self.refresh_tokens.as_ref(), token, client, data, expires_at, scope).await
		})
		.await
	}

	/// Deletes a refresh token if it exists; unknown tokens are ignored.
	pub async fn unset_refresh_token(&self, token: &str) -> Result<()> {
		obs::observe(StorageOp::UnsetRefreshToken, async move {
			if let Some(found) = self.refresh_tokens.find_by_token(token).await? {
				self.refresh_tokens.delete(found).await?;
			}

			Ok(())
		})
		.await
	}

	/// Returns `true` iff `grant_type` is one of the client's allowed grant types.
	pub fn check_restricted_grant_type(
		&self,
		client: &dyn OAuth2Client,
		grant_type: &str,
	) -> Result<bool> {
		obs::observe_sync(StorageOp::CheckRestrictedGrantType, || {
			Ok(expect_client(client)?.allows_grant_type(grant_type))
		})
	}

	/// Verifies resource-owner credentials.
	///
	/// An unknown username is reported as [`UserCredentials::Invalid`]; every other identity
	/// failure propagates as [`Error::Identity`]. The client is only type-checked.
	pub async fn check_user_credentials(
		&self,
		client: &dyn OAuth2Client,
		username: &str,
		password: &str,
	) -> Result<UserCredentials> {
		const OP: StorageOp = StorageOp::CheckUserCredentials;

		obs::observe(OP, async move {
			expect_client(client)?;

			let user = match self.identity.load_by_username(username).await {
				Ok(user) => user,
				Err(IdentityError::UserNotFound { .. }) => {
					obs::trace_unknown_user(OP);

					return Ok(UserCredentials::Invalid);
				},
				Err(e) => return Err(e.into()),
			};
			let verifier = self.verifiers.verifier_for(&user);

			if verifier.verify(user.password(), password, user.salt()) {
				Ok(UserCredentials::Valid { data: user })
			} else {
				Ok(UserCredentials::Invalid)
			}
		})
		.await
	}

	/// Issues an authorization code: allocate, populate, persist, and return the persisted
	/// instance. `redirect_uri` is stored verbatim.
	pub async fn create_auth_code(
		&self,
		code: &str,
		client: Arc<dyn OAuth2Client>,
		data: Value,
		redirect_uri: &str,
		expires_at: i64,
		scope: Option<&str>,
	) -> Result<Arc<AuthCode>> {
		obs::observe(StorageOp::CreateAuthCode, async move {
			let client = expect_shared_client(client)?;
			let mut entity = self.auth_codes.create_empty();

			entity.token = Secret::new(code);
			entity.client = Some(client);
			entity.data = data;
			entity.redirect_uri = Some(redirect_uri.to_owned());
			entity.expires_at = Some(expires_at);
			entity.scope = scope.map(str::to_owned);

			let entity = Arc::new(entity);

			self.auth_codes.persist(entity.clone()).await?;

			Ok(entity)
		})
		.await
	}

	/// Looks up an authorization code; `None` when the backend has no match.
	pub async fn get_auth_code(&self, code: &str) -> Result<Option<Arc<AuthCode>>> {
		obs::observe(StorageOp::GetAuthCode, async move {
			Ok(self.auth_codes.find_by_token(code).await?)
		})
		.await
	}

	/// Deletes an authorization code if it exists; unknown codes are ignored.
	pub async fn mark_auth_code_as_used(&self, code: &str) -> Result<()> {
		obs::observe(StorageOp::MarkAuthCodeAsUsed, async move {
			if let Some(found) = self.auth_codes.find_by_token(code).await? {
				self.auth_codes.delete(found).await?;
			}

			Ok(())
		})
		.await
	}
}
impl Debug for OAuthStorage {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("OAuthStorage(..)")
	}
}
impl GrantStorage for OAuthStorage {
	fn get_client<'a>(&'a self, public_id: &'a str) -> StorageFuture<'a, Option<Arc<Client>>> {
		Box::pin(OAuthStorage::get_client(self, public_id))
	}

	fn check_client_credentials(&self, client: &dyn OAuth2Client, secret: &str) -> Result<bool> {
		OAuthStorage::check_client_credentials(self, client, secret)
	}

	fn get_access_token<'a>(
		&'a self,
		token: &'a str,
	) -> StorageFuture<'a, Option<Arc<AccessToken>>> {
		Box::pin(OAuthStorage::get_access_token(self, token))
	}

	fn create_access_token<'a>(
		&'a self,
		token: &'a str,
		client: Arc<dyn OAuth2Client>,
		data: Value,
		expires_at: i64,
		scope: Option<&'a str>,
	) -> StorageFuture<'a, Arc<AccessToken>> {
		Box::pin(OAuthStorage::create_access_token(self, token, client, data, expires_at, scope))
	}

	fn get_refresh_token<'a>(
		&'a self,
		token: &'a str,
	) -> StorageFuture<'a, Option<Arc<RefreshToken>>> {
		Box::pin(OAuthStorage::get_refresh_token(self, token))
	}

	fn create_refresh_token<'a>(
		&'a self,
		token: &'a str,
		client: Arc<dyn OAuth2Client>,
		data: Value,
		expires_at: i64,
		scope: Option<&'a str>,
	) -> StorageFuture<'a, Arc<RefreshToken>> {
		Box::pin(OAuthStorage::create_refresh_token(self, token, client, data, expires_at, scope))
	}

	fn unset_refresh_token<'a>(&'a self, token: &'a str) -> StorageFuture<'a, ()> {
		Box::pin(OAuthStorage::unset_refresh_token(self, token))
	}

	fn check_restricted_grant_type(
		&self,
		client: &dyn OAuth2Client,
		grant_type: &str,
	) -> Result<bool> {
		OAuthStorage::check_restricted_grant_type(self, client, grant_type)
	}

	fn check_user_credentials<'a>(
		&'a self,
		client: &'a dyn OAuth2Client,
		username: &'a str,
		password: &'a str,
	) -> StorageFuture<'a, UserCredentials> {
		Box::pin(OAuthStorage::check_user_credentials(self, client, username, password))
	}

	fn create_auth_code<'a>(
		&'a self,
		code: &'a str,
		client: Arc<dyn OAuth2Client>,
		data: Value,
		redirect_uri: &'a str,
		expires_at: i64,
		scope: Option<&'a str>,
	) -> StorageFuture<'a, Arc<AuthCode>> {
		Box::pin(OAuthStorage::create_auth_code(
			self,
			code,
			client,
			data,
			redirect_uri,
			expires_at,
			scope,
		))
	}

	fn get_auth_code<'a>(&'a self, code: &'a str) -> StorageFuture<'a, Option<Arc<AuthCode>>> {
		Box::pin(OAuthStorage::get_auth_code(self, code))
	}

	fn mark_auth_code_as_used<'a>(&'a self, code: &'a str) -> StorageFuture<'a, ()> {
		Box::pin(OAuthStorage::mark_auth_code_as_used(self, code))
	}
}

fn type_mismatch(client: &dyn OAuth2Client) -> Error {
	Error::TypeMismatch { expected: "Client", found: client.type_label() }
}

fn expect_client(client: &dyn OAuth2Client) -> Result<&Client> {
	AsAny::as_any(client).downcast_ref::<Client>().ok_or_else(|| type_mismatch(client))
}

fn expect_shared_client(client: Arc<dyn OAuth2Client>) -> Result<Arc<Client>> {
	let found = client.type_label();

	AsAny::into_any(client)
		.downcast::<Client>()
		.map_err(|_| Error::TypeMismatch { expected: "Client", found })
}

async fn issue_token<K>(
	store: &dyn TokenStore<K>,
	token: &str,
	client: Arc<Client>,
	data: Value,
	expires_at: i64,
	scope: Option<&str>,
) -> Result<Arc<Token<K>>>
where
	K: TokenKind,
{
	let mut entity = store.create_empty();

	entity.token = Secret::new(token);
	entity.client = Some(client);
	entity.data = data;
	entity.expires_at = Some(expires_at);
	entity.scope = scope.map(str::to_owned);

	let entity = Arc::new(entity);

	store.persist(entity.clone()).await?;

	Ok(entity)
}
