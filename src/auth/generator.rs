//! Random token generation for client identifiers and secrets.

// crates.io
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::RngCore;
use sha2::{Digest, Sha256};

const ENTROPY_LEN: usize = 32;

/// Generates a URL-safe random token.
///
/// 32 bytes from the thread-local CSPRNG are hashed with SHA-256 and encoded as base64url
/// without padding, yielding a 43-character string.
pub fn generate_token() -> String {
	let mut entropy = [0_u8; ENTROPY_LEN];

	rand::rng().fill_bytes(&mut entropy);

	let mut hasher = Sha256::new();

	hasher.update(entropy);

	URL_SAFE_NO_PAD.encode(hasher.finalize())
}
