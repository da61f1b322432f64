//! Password value object - hashing and verification.
//!
//! Encapsulates Argon2id hashing so that plaintext never leaves the
//! construction scope. The stored form is a PHC string which carries its own
//! salt and cost parameters, so verification works for any cost.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};

use crate::constants::{
    DEFAULT_HASH_ITERATIONS, DEFAULT_HASH_MEMORY_KIB, DEFAULT_HASH_PARALLELISM,
    MAX_PASSWORD_BYTES,
};
use crate::error::{DomainError, DomainResult};

/// Tunable Argon2 cost parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashCost {
    /// Memory cost in KiB
    pub memory_kib: u32,
    /// Number of passes over memory
    pub iterations: u32,
    /// Degree of parallelism (lanes)
    pub parallelism: u32,
}

impl HashCost {
    pub fn new(memory_kib: u32, iterations: u32, parallelism: u32) -> Self {
        Self {
            memory_kib,
            iterations,
            parallelism,
        }
    }

    /// Check that Argon2 accepts these parameters.
    ///
    /// # Errors
    /// Returns [`DomainError::PasswordHash`] naming the rejected parameter.
    pub fn validate(&self) -> DomainResult<()> {
        self.hasher().map(|_| ())
    }

    /// Build an Argon2id hasher for these parameters.
    fn hasher(&self) -> DomainResult<Argon2<'static>> {
        let params = Params::new(self.memory_kib, self.iterations, self.parallelism, None)
            .map_err(|e| DomainError::password_hash(format!("invalid hash cost: {}", e)))?;
        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }
}

impl Default for HashCost {
    fn default() -> Self {
        Self {
            memory_kib: DEFAULT_HASH_MEMORY_KIB,
            iterations: DEFAULT_HASH_ITERATIONS,
            parallelism: DEFAULT_HASH_PARALLELISM,
        }
    }
}

/// Hashed password.
#[derive(Clone)]
pub struct Password {
    hash: String,
}

// Don't expose hash in debug output
impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("hash", &"[REDACTED]")
            .finish()
    }
}

impl Password {
    /// Hash a plaintext password with the default cost.
    ///
    /// # Errors
    /// Returns [`DomainError::PasswordHash`] if hashing fails.
    pub fn new(plain_text: &str) -> DomainResult<Self> {
        Self::with_cost(plain_text, &HashCost::default())
    }

    /// Hash a plaintext password with an explicit cost.
    ///
    /// # Errors
    /// Returns [`DomainError::PasswordHash`] when the password is longer than
    /// [`MAX_PASSWORD_BYTES`], the cost parameters are invalid, or Argon2
    /// itself fails.
    pub fn with_cost(plain_text: &str, cost: &HashCost) -> DomainResult<Self> {
        if plain_text.len() > MAX_PASSWORD_BYTES {
            return Err(DomainError::password_hash(format!(
                "password exceeds {} bytes",
                MAX_PASSWORD_BYTES
            )));
        }

        let salt = SaltString::generate(&mut OsRng);
        let hash = cost
            .hasher()?
            .hash_password(plain_text.as_bytes(), &salt)
            .map_err(|e| DomainError::password_hash(format!("hash failed: {}", e)))?;

        Ok(Self {
            hash: hash.to_string(),
        })
    }

    /// Wrap an existing hash (from storage).
    pub fn from_hash(hash: impl Into<String>) -> Self {
        Self { hash: hash.into() }
    }

    /// Get the hash string for storage.
    pub fn as_str(&self) -> &str {
        &self.hash
    }

    /// Check a candidate plaintext against this hash.
    ///
    /// Any failure, including an unparsable stored hash, is a mismatch.
    pub fn verify(&self, plain_text: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(&self.hash) else {
            return false;
        };

        // Cost and salt are read from the PHC string itself
        Argon2::default()
            .verify_password(plain_text.as_bytes(), &parsed)
            .is_ok()
    }
}

impl PartialEq for Password {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash
    }
}

impl Eq for Password {}
