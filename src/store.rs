//! Persistence contracts the adapter consumes, plus built-in in-memory implementations.
//!
//! Each manager is a narrow trait so backends (in-memory, relational, document store) can be
//! swapped independently. Lookups return `Ok(None)` for missing entities; `Err` is reserved for
//! backend failures.

pub mod memory;

pub use memory::*;

// self
use crate::{
	_prelude::*,
	auth::{AuthCode, Client, Token, TokenKind},
};

/// Boxed future returned by every store operation.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + 'a + Send>>;

/// Client registry lookup.
pub trait ClientLookup
where
	Self: Send + Sync,
{
	/// Finds a client by its public identifier.
	fn find_by_public_id<'a>(
		&'a self,
		public_id: &'a str,
	) -> StoreFuture<'a, Option<Arc<Client>>>;
}

/// Token manager for a single token kind (access or refresh).
pub trait TokenStore<K>
where
	Self: Send + Sync,
	K: TokenKind,
{
	/// Allocates a fresh, empty token entity. Nothing is persisted yet.
	fn create_empty(&self) -> Token<K>;

	/// Persists (inserts or replaces) a populated token.
	fn persist(&self, token: Arc<Token<K>>) -> StoreFuture<'_, ()>;

	/// Finds a token by its token string.
	fn find_by_token<'a>(&'a self, token: &'a str) -> StoreFuture<'a, Option<Arc<Token<K>>>>;

	/// Removes a token.
	fn delete(&self, token: Arc<Token<K>>) -> StoreFuture<'_, ()>;
}

/// Authorization-code manager.
pub trait AuthCodeStore
where
	Self: Send + Sync,
{
	/// Allocates a fresh, empty authorization code. Nothing is persisted yet.
	fn create_empty(&self) -> AuthCode;

	/// Persists (inserts or replaces) a populated authorization code.
	fn persist(&self, code: Arc<AuthCode>) -> StoreFuture<'_, ()>;

	/// Finds an authorization code by its code string.
	fn find_by_token<'a>(&'a self, code: &'a str) -> StoreFuture<'a, Option<Arc<AuthCode>>>;

	/// Removes an authorization code.
	fn delete(&self, code: Arc<AuthCode>) -> StoreFuture<'_, ()>;
}

/// Error type produced by store implementations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum StoreError {
	/// Serialization failures surfaced by the backend.
	#[error("Serialization error: {message}.")]
	Serialization {
		/// Human-readable error payload.
		message: String,
	},
	/// Backend-level failure for the storage engine.
	#[error("Backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}
