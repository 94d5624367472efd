//! Secure secret wrapper that redacts sensitive material.

// crates.io
use constant_time_eq::constant_time_eq;
// self
use crate::{_prelude::*, auth::generator::generate_token};

/// Redacted secret wrapper keeping client secrets, token strings, and password hashes out of
/// logs.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Secret(String);
impl Secret {
	/// Wraps a new secret string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Generates a fresh random secret.
	pub fn generate() -> Self {
		Self(generate_token())
	}

	/// Returns the inner value. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}

	/// Returns `true` if the secret holds no characters.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Exact, case-sensitive comparison against a candidate value.
	///
	/// No trimming or normalization is applied; the comparison time does not depend on where
	/// the first differing byte sits.
	pub fn matches(&self, candidate: &str) -> bool {
		constant_time_eq(self.0.as_bytes(), candidate.as_bytes())
	}
}
impl AsRef<str> for Secret {
	fn as_ref(&self) -> &str {
		self.expose()
	}
}
impl Debug for Secret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("Secret").field(&"<redacted>").finish()
	}
}
impl Display for Secret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn secret_formatters_redact() {
		let secret = Secret::new("super-secret");

		assert_eq!(format!("{secret:?}"), "Secret(\"<redacted>\")");
		assert_eq!(format!("{secret}"), "<redacted>");
	}

	#[test]
	fn matches_is_exact() {
		let secret = Secret::new("dummy");

		assert!(secret.matches("dummy"));
		assert!(!secret.matches("Dummy"));
		assert!(!secret.matches("dummy "));
		assert!(!secret.matches("dumm"));
		assert!(!secret.matches(""));
		assert!(Secret::default().matches(""));
	}
}
