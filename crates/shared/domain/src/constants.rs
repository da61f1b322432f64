//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// Password hashing
// =============================================================================

/// Longest accepted plaintext password, in bytes
pub const MAX_PASSWORD_BYTES: usize = 4096;

/// Default Argon2 memory cost in KiB (19 MiB)
pub const DEFAULT_HASH_MEMORY_KIB: u32 = 19 * 1024;

/// Default Argon2 iteration count
pub const DEFAULT_HASH_ITERATIONS: u32 = 2;

/// Default Argon2 degree of parallelism
pub const DEFAULT_HASH_PARALLELISM: u32 = 1;

// =============================================================================
// Authentication
// =============================================================================

/// Default token lifetime in seconds
pub const DEFAULT_JWT_EXPIRES_IN_SECONDS: i64 = 300;

/// Longest accepted token lifetime in seconds (one year)
pub const MAX_JWT_EXPIRES_IN_SECONDS: i64 = 365 * 24 * 60 * 60;

/// Minimum JWT secret length (security requirement)
pub const MIN_JWT_SECRET_LENGTH: usize = 32;

/// Authorization header prefix for Bearer tokens
pub const BEARER_TOKEN_PREFIX: &str = "Bearer ";

/// JWT token type identifier
pub const TOKEN_TYPE_BEARER: &str = "Bearer";

// =============================================================================
// Listing
// =============================================================================

/// Sort keyword for descending creation order
pub const SORT_DESC: &str = "desc";
