//! OAuth 2.0 authorization-server storage adapter.
//!
//! Translates a protocol engine's storage calls into pluggable client, token, auth-code, and
//! identity backends without leaking backend behavior into the protocol layer.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod error;
pub mod identity;
pub mod obs;
pub mod storage;
pub mod store;
#[cfg(any(test, feature = "test"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		auth::{Client, GrantType, User},
		identity::{MemoryIdentityProvider, PlaintextVerifier, SingleVerifierFactory},
		storage::OAuthStorage,
		store::{MemoryAuthCodeStore, MemoryClientStore, MemoryTokenStore},
	};

	/// In-memory collaborators wired into a test [`OAuthStorage`].
	#[derive(Clone, Debug)]
	pub struct MemoryBackends {
		/// Client registry.
		pub clients: Arc<MemoryClientStore>,
		/// Access-token store.
		pub access_tokens: Arc<MemoryTokenStore<crate::auth::Access>>,
		/// Refresh-token store.
		pub refresh_tokens: Arc<MemoryTokenStore<crate::auth::Refresh>>,
		/// Authorization-code store.
		pub auth_codes: Arc<MemoryAuthCodeStore>,
		/// User directory.
		pub identity: Arc<MemoryIdentityProvider>,
	}

	/// Builds a client fixture with a fixed secret and the provided grant types.
	pub fn client_fixture(secret: &str, grants: &[&str]) -> Arc<Client> {
		let mut client = Client::new(7);

		client.set_secret(secret);
		client.set_allowed_grant_types(grants.iter().copied().map(GrantType::from));

		Arc::new(client)
	}

	/// Builds a user fixture with the provided stored password + salt.
	pub fn user_fixture(username: &str, password: &str, salt: Option<&str>) -> Arc<User> {
		let username = crate::auth::Username::new(username)
			.expect("Username fixture should be valid for tests.");

		Arc::new(User::new(username, password, salt.map(str::to_owned)))
	}

	/// Constructs an [`OAuthStorage`] backed entirely by in-memory collaborators and the
	/// plaintext verifier.
	pub fn build_memory_storage() -> (OAuthStorage, MemoryBackends) {
		let backends = MemoryBackends {
			clients: Arc::new(MemoryClientStore::default()),
			access_tokens: Arc::new(MemoryTokenStore::default()),
			refresh_tokens: Arc::new(MemoryTokenStore::default()),
			auth_codes: Arc::new(MemoryAuthCodeStore::default()),
			identity: Arc::new(MemoryIdentityProvider::default()),
		};
		let storage = OAuthStorage::builder()
			.clients(backends.clients.clone())
			.access_tokens(backends.access_tokens.clone())
			.refresh_tokens(backends.refresh_tokens.clone())
			.auth_codes(backends.auth_codes.clone())
			.identity(backends.identity.clone())
			.verifiers(Arc::new(SingleVerifierFactory::new(PlaintextVerifier)))
			.build()
			.expect("In-memory storage should build with every collaborator wired.");

		(storage, backends)
	}
}

mod _prelude {
	pub use std::{
		any::Any,
		collections::HashMap,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		marker::PhantomData,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	pub use parking_lot::{Mutex, RwLock};
	pub use serde::{Deserialize, Serialize};
	pub use serde_json::Value;
	pub use thiserror::Error as ThisError;
	pub use time::OffsetDateTime;

	pub use crate::error::{Error, Result};
}

#[cfg(test)] use tokio as _;
