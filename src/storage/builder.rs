// self
use crate::{
	_prelude::*,
	auth::{Access, Refresh},
	error::ConfigError,
	identity::{CredentialVerifierFactory, IdentityProvider},
	storage::OAuthStorage,
	store::{AuthCodeStore, ClientLookup, TokenStore},
};

/// Builder for [`OAuthStorage`].
///
/// Every collaborator is required; [`build`](Self::build) names the first missing one.
#[derive(Default)]
pub struct OAuthStorageBuilder {
	/// Client registry.
	pub clients: Option<Arc<dyn ClientLookup>>,
	/// Access-token manager.
	pub access_tokens: Option<Arc<dyn TokenStore<Access>>>,
	/// Refresh-token manager.
	pub refresh_tokens: Option<Arc<dyn TokenStore<Refresh>>>,
	/// Authorization-code manager.
	pub auth_codes: Option<Arc<dyn AuthCodeStore>>,
	/// User directory.
	pub identity: Option<Arc<dyn IdentityProvider>>,
	/// Password verifier lookup.
	pub verifiers: Option<Arc<dyn CredentialVerifierFactory>>,
}
impl OAuthStorageBuilder {
	/// Sets the client registry.
	pub fn clients(mut self, clients: Arc<dyn ClientLookup>) -> Self {
		self.clients = Some(clients);

		self
	}

	/// Sets the access-token manager.
	pub fn access_tokens(mut self, store: Arc<dyn TokenStore<Access>>) -> Self {
		self.access_tokens = Some(store);

		self
	}

	/// Sets the refresh-token manager.
	pub fn refresh_tokens(mut self, store: Arc<dyn TokenStore<Refresh>>) -> Self {
		self.refresh_tokens = Some(store);

		self
	}

	/// Sets the authorization-code manager.
	pub fn auth_codes(mut self, store: Arc<dyn AuthCodeStore>) -> Self {
		self.auth_codes = Some(store);

		self
	}

	/// Sets the identity provider.
	pub fn identity(mut self, identity: Arc<dyn IdentityProvider>) -> Self {
		self.identity = Some(identity);

		self
	}

	/// Sets the credential-verifier factory.
	pub fn verifiers(mut self, verifiers: Arc<dyn CredentialVerifierFactory>) -> Self {
		self.verifiers = Some(verifiers);

		self
	}

	/// Consumes the builder and produces an [`OAuthStorage`].
	pub fn build(self) -> Result<OAuthStorage, ConfigError> {
		Ok(OAuthStorage {
			clients: self.clients.ok_or_else(|| missing("clients"))?,
			access_tokens: self.access_tokens.ok_or_else(|| missing("access_tokens"))?,
			refresh_tokens: self.refresh_tokens.ok_or_else(|| missing("refresh_tokens"))?,
			auth_codes: self.auth_codes.ok_or_else(|| missing("auth_codes"))?,
			identity: self.identity.ok_or_else(|| missing("identity"))?,
			verifiers: self.verifiers.ok_or_else(|| missing("verifiers"))?,
		})
	}
}
impl Debug for OAuthStorageBuilder {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("OAuthStorageBuilder")
			.field("clients", &self.clients.is_some())
			.field("access_tokens", &self.access_tokens.is_some())
			.field("refresh_tokens", &self.refresh_tokens.is_some())
			.field("auth_codes", &self.auth_codes.is_some())
			.field("identity", &self.identity.is_some())
			.field("verifiers", &self.verifiers.is_some())
			.finish()
	}
}

fn missing(name: &'static str) -> ConfigError {
	ConfigError::MissingCollaborator { name }
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::{
		identity::{MemoryIdentityProvider, PlaintextVerifier, SingleVerifierFactory},
		store::{MemoryAuthCodeStore, MemoryClientStore, MemoryTokenStore},
	};

	#[test]
	fn build_reports_first_missing_collaborator() {
		let err = OAuthStorage::builder()
			.clients(Arc::new(MemoryClientStore::default()))
			.access_tokens(Arc::new(MemoryTokenStore::<Access>::default()))
			.build()
			.expect_err("Builder must reject missing collaborators.");

		assert_eq!(err, ConfigError::MissingCollaborator { name: "refresh_tokens" });
	}

	#[test]
	fn build_succeeds_when_fully_wired() {
		let builder = OAuthStorage::builder()
			.clients(Arc::new(MemoryClientStore::default()))
			.access_tokens(Arc::new(MemoryTokenStore::<Access>::default()))
			.refresh_tokens(Arc::new(MemoryTokenStore::<Refresh>::default()))
			.auth_codes(Arc::new(MemoryAuthCodeStore::default()))
			.identity(Arc::new(MemoryIdentityProvider::default()))
			.verifiers(Arc::new(SingleVerifierFactory::new(PlaintextVerifier)));

		assert!(format!("{builder:?}").contains("verifiers: true"));

		builder.build().expect("Fully wired builder should succeed.");
	}
}
