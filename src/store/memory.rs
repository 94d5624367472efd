//! Thread-safe in-memory store implementations for local development and tests.

// self
use crate::{
	_prelude::*,
	auth::{AuthCode, Client, OAuth2Client, Token, TokenKind},
	store::{AuthCodeStore, ClientLookup, StoreError, StoreFuture, TokenStore},
};

type EntityMap<T> = Arc<RwLock<HashMap<String, Arc<T>>>>;

fn insert_now<T>(map: EntityMap<T>, key: String, entity: Arc<T>) -> Result<(), StoreError> {
	if key.is_empty() {
		return Err(StoreError::Backend { message: "Refusing to persist an empty key".into() });
	}

	map.write().insert(key, entity);

	Ok(())
}

fn fetch_now<T>(map: EntityMap<T>, key: &str) -> Option<Arc<T>> {
	map.read().get(key).cloned()
}

fn remove_now<T>(map: EntityMap<T>, key: &str) {
	map.write().remove(key);
}

/// Client registry keyed by public identifier.
#[derive(Clone, Debug, Default)]
pub struct MemoryClientStore(EntityMap<Client>);
impl MemoryClientStore {
	/// Registers (or replaces) a client under its public identifier.
	pub fn insert(&self, client: Arc<Client>) {
		self.0.write().insert(client.public_id(), client);
	}

	/// Number of registered clients.
	pub fn len(&self) -> usize {
		self.0.read().len()
	}

	/// Returns `true` if no clients are registered.
	pub fn is_empty(&self) -> bool {
		self.0.read().is_empty()
	}
}
impl ClientLookup for MemoryClientStore {
	fn find_by_public_id<'a>(
		&'a self,
		public_id: &'a str,
	) -> StoreFuture<'a, Option<Arc<Client>>> {
		let map = self.0.clone();

		Box::pin(async move { Ok(fetch_now(map, public_id)) })
	}
}

/// Token store keyed by token string.
pub struct MemoryTokenStore<K>
where
	K: TokenKind,
{
	map: EntityMap<Token<K>>,
}
impl<K> MemoryTokenStore<K>
where
	K: TokenKind,
{
	/// Number of stored tokens.
	pub fn len(&self) -> usize {
		self.map.read().len()
	}

	/// Returns `true` if no tokens are stored.
	pub fn is_empty(&self) -> bool {
		self.map.read().is_empty()
	}
}
impl<K> Default for MemoryTokenStore<K>
where
	K: TokenKind,
{
	fn default() -> Self {
		Self { map: Default::default() }
	}
}
impl<K> Clone for MemoryTokenStore<K>
where
	K: TokenKind,
{
	fn clone(&self) -> Self {
		Self { map: self.map.clone() }
	}
}
impl<K> Debug for MemoryTokenStore<K>
where
	K: TokenKind,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("MemoryTokenStore")
			.field("kind", &K::LABEL)
			.field("len", &self.len())
			.finish()
	}
}
impl<K> TokenStore<K> for MemoryTokenStore<K>
where
	K: TokenKind,
{
	fn create_empty(&self) -> Token<K> {
		Token::empty()
	}

	fn persist(&self, token: Arc<Token<K>>) -> StoreFuture<'_, ()> {
		let map = self.map.clone();

		Box::pin(async move { insert_now(map, token.token.expose().to_owned(), token) })
	}

	fn find_by_token<'a>(&'a self, token: &'a str) -> StoreFuture<'a, Option<Arc<Token<K>>>> {
		let map = self.map.clone();

		Box::pin(async move { Ok(fetch_now(map, token)) })
	}

	fn delete(&self, token: Arc<Token<K>>) -> StoreFuture<'_, ()> {
		let map = self.map.clone();

		Box::pin(async move {
			remove_now(map, token.token.expose());

			Ok(())
		})
	}
}

/// Authorization-code store keyed by code string.
#[derive(Clone, Debug, Default)]
pub struct MemoryAuthCodeStore(EntityMap<AuthCode>);
impl MemoryAuthCodeStore {
	/// Number of stored codes.
	pub fn len(&self) -> usize {
		self.0.read().len()
	}

	/// Returns `true` if no codes are stored.
	pub fn is_empty(&self) -> bool {
		self.0.read().is_empty()
	}
}
impl AuthCodeStore for MemoryAuthCodeStore {
	fn create_empty(&self) -> AuthCode {
		AuthCode::default()
	}

	fn persist(&self, code: Arc<AuthCode>) -> StoreFuture<'_, ()> {
		let map = self.0.clone();

		Box::pin(async move { insert_now(map, code.token.expose().to_owned(), code) })
	}

	fn find_by_token<'a>(&'a self, code: &'a str) -> StoreFuture<'a, Option<Arc<AuthCode>>> {
		let map = self.0.clone();

		Box::pin(async move { Ok(fetch_now(map, code)) })
	}

	fn delete(&self, code: Arc<AuthCode>) -> StoreFuture<'_, ()> {
		let map = self.0.clone();

		Box::pin(async move {
			remove_now(map, code.token.expose());

			Ok(())
		})
	}
}
