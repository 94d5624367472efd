//! Strongly typed identifiers enforced across the adapter domain.

// std
use std::{borrow::Borrow, ops::Deref};
// self
use crate::{_prelude::*, auth::generator::generate_token};

macro_rules! def_id {
	($name:ident, $doc:literal, $kind:literal) => {
		#[doc = $doc]
		#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
		#[serde(try_from = "String", into = "String")]
		pub struct $name(String);
		impl $name {
			/// Creates a new identifier after validation.
			pub fn new(value: impl AsRef<str>) -> Result<Self, IdentifierError> {
				let view = value.as_ref();

				validate_view($kind, view)?;

				Ok(Self(view.to_owned()))
			}
		}
		impl Deref for $name {
			type Target = str;

			fn deref(&self) -> &Self::Target {
				&self.0
			}
		}
		impl AsRef<str> for $name {
			fn as_ref(&self) -> &str {
				&self.0
			}
		}
		impl From<$name> for String {
			fn from(value: $name) -> Self {
				value.0
			}
		}
		impl TryFrom<String> for $name {
			type Error = IdentifierError;

			fn try_from(value: String) -> Result<Self, Self::Error> {
				validate_view($kind, &value)?;

				Ok(Self(value))
			}
		}
		impl Borrow<str> for $name {
			fn borrow(&self) -> &str {
				&self.0
			}
		}
		impl Debug for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				write!(f, concat!($kind, "({})"), self.0)
			}
		}
		impl Display for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				f.write_str(&self.0)
			}
		}
		impl FromStr for $name {
			type Err = IdentifierError;

			fn from_str(s: &str) -> Result<Self, Self::Err> {
				Self::new(s)
			}
		}
	};
}

const IDENTIFIER_MAX_LEN: usize = 255;

/// Error returned when identifier validation fails.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum IdentifierError {
	/// The identifier was empty.
	#[error("{kind} identifier cannot be empty.")]
	Empty {
		/// Kind of identifier (username, random id).
		kind: &'static str,
	},
	/// The identifier contains whitespace characters.
	#[error("{kind} identifier contains whitespace.")]
	ContainsWhitespace {
		/// Kind of identifier (username, random id).
		kind: &'static str,
	},
	/// The identifier exceeded the allowed byte count.
	#[error("{kind} identifier exceeds {max} bytes.")]
	TooLong {
		/// Kind of identifier (username, random id).
		kind: &'static str,
		/// Maximum permitted byte count.
		max: usize,
	},
}

def_id! { Username, "Login name a user authenticates with.", "Username" }
def_id! { RandomId, "Random half of a client's public identifier.", "RandomId" }
impl RandomId {
	/// Generates a fresh random identifier.
	pub fn generate() -> Self {
		Self(generate_token())
	}
}

fn validate_view(kind: &'static str, view: &str) -> Result<(), IdentifierError> {
	if view.is_empty() {
		return Err(IdentifierError::Empty { kind });
	}
	if view.chars().any(char::is_whitespace) {
		return Err(IdentifierError::ContainsWhitespace { kind });
	}
	if view.len() > IDENTIFIER_MAX_LEN {
		return Err(IdentifierError::TooLong { kind, max: IDENTIFIER_MAX_LEN });
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn identifiers_reject_padding_and_empty_values() {
		assert!(Username::new(" joe").is_err(), "Leading whitespace must be rejected.");
		assert!(Username::new("joe ").is_err(), "Trailing whitespace must be rejected.");
		assert!(Username::new("").is_err());
		assert!(RandomId::new("with space").is_err());

		let username = Username::new("Joe").expect("Username fixture should be considered valid.");

		assert_eq!(username.as_ref(), "Joe");
		assert_eq!(format!("{username:?}"), "Username(Joe)");
	}

	#[test]
	fn validation_errors_name_the_identifier_kind() {
		assert_eq!(
			Username::new("").expect_err("Empty usernames must be rejected.").to_string(),
			"Username identifier cannot be empty."
		);
		assert_eq!(
			RandomId::new("a b").expect_err("Whitespace must be rejected."),
			IdentifierError::ContainsWhitespace { kind: "RandomId" }
		);
	}

	#[test]
	fn serde_round_trip_enforces_validation() {
		let username: Username =
			serde_json::from_str("\"alice\"").expect("Username should deserialize successfully.");

		assert_eq!(username.as_ref(), "alice");
		assert!(serde_json::from_str::<Username>("\"with space\"").is_err());
		assert!(serde_json::from_str::<Username>("\"\"").is_err());
	}

	#[test]
	fn length_limit_is_enforced() {
		let exact = "a".repeat(IDENTIFIER_MAX_LEN);

		Username::new(&exact).expect("Exact length should succeed.");

		let too_long = "a".repeat(IDENTIFIER_MAX_LEN + 1);

		assert!(matches!(
			Username::new(&too_long),
			Err(IdentifierError::TooLong { kind: "Username", max: IDENTIFIER_MAX_LEN })
		));
	}

	#[test]
	fn borrow_supports_fast_lookup() {
		let map: HashMap<Username, u8> = HashMap::from_iter([(
			Username::new("Joe").expect("Username used for lookup should be valid."),
			7_u8,
		)]);

		assert_eq!(map.get("Joe"), Some(&7));
		assert_eq!(map.get("joe"), None, "Lookups must stay case-sensitive.");
	}
}
