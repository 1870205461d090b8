//! Credential value object - salted password hashing.
//!
//! A credential is a `(hash, salt)` pair where the hash is the lowercase
//! hex HMAC-SHA512 of the password keyed by the salt. Passwords are never
//! stored; verification recomputes the digest and compares in constant
//! time.

use hmac::{Hmac, Mac};
use rand::{rngs::OsRng, RngCore};
use sha2::Sha512;

use crate::config::SALT_LENGTH;

type HmacSha512 = Hmac<Sha512>;

/// Salted one-way hash of a password.
///
/// Value object - immutable, compared by value. A password change
/// produces a whole new credential (fresh salt included); the pair is
/// never mutated in place.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    hash: String,
    salt: String,
}

// Don't expose credential material in debug output
impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("hash", &"[REDACTED]")
            .field("salt", &"[REDACTED]")
            .finish()
    }
}

/// Generate a cryptographically random string of exactly `length`
/// lowercase hex characters.
///
/// Draws `ceil(length / 2)` bytes from the OS entropy source and trims
/// the hex expansion down to the requested length.
pub fn generate_salt(length: usize) -> String {
    let mut bytes = vec![0u8; length.div_ceil(2)];
    OsRng.fill_bytes(&mut bytes);

    let mut salt = hex::encode(bytes);
    salt.truncate(length);
    salt
}

impl Credential {
    /// Hash a password with a freshly generated salt.
    pub fn new(password: &str) -> Self {
        Self::sha512(password, &generate_salt(SALT_LENGTH))
    }

    /// Compute the keyed hash of `password` using `salt` as the HMAC key.
    ///
    /// Deterministic given its inputs. Empty passwords and salts are
    /// hashed like any other string; callers enforce non-empty passwords
    /// upstream if they need to.
    pub fn sha512(password: &str, salt: &str) -> Self {
        let mut mac = HmacSha512::new_from_slice(salt.as_bytes())
            .expect("hmac accepts keys of any length");
        mac.update(password.as_bytes());

        Self {
            hash: hex::encode(mac.finalize().into_bytes()),
            salt: salt.to_string(),
        }
    }

    /// Reconstruct a credential from stored `(hash, salt)` parts.
    pub fn from_parts(hash: String, salt: String) -> Self {
        Self { hash, salt }
    }

    /// A credential that no password verifies against.
    ///
    /// Used to keep the login path doing the same amount of work whether
    /// or not the looked-up user exists.
    pub fn placeholder() -> Self {
        Self {
            hash: "0".repeat(128),
            salt: "0".repeat(SALT_LENGTH),
        }
    }

    /// Verify a password against this credential in constant time.
    pub fn matches(&self, password: &str) -> bool {
        let Ok(digest) = hex::decode(&self.hash) else {
            return false;
        };

        let mut mac = HmacSha512::new_from_slice(self.salt.as_bytes())
            .expect("hmac accepts keys of any length");
        mac.update(password.as_bytes());

        // verify_slice compares in constant time
        mac.verify_slice(&digest).is_ok()
    }

    /// Hex-encoded digest for storage.
    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// Salt the digest was keyed with.
    pub fn salt(&self) -> &str {
        &self.salt
    }
}
