//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// User Roles
// =============================================================================

/// Stored value of the standard (read-only) role
pub const ROLE_USER: &str = "user";

/// Stored value of the administrator role
pub const ROLE_ADMIN: &str = "admin";

// =============================================================================
// Products
// =============================================================================

/// Reorder level applied when a product is added without one
pub const DEFAULT_REORDER_LEVEL: i64 = 5;

/// Default quantity for a new product
pub const DEFAULT_QUANTITY: i64 = 0;

/// Default price for a new product
pub const DEFAULT_PRICE: i64 = 0;

// =============================================================================
// Seed Accounts
// =============================================================================

/// Username of the administrator created on first initialization
pub const DEFAULT_ADMIN_USERNAME: &str = "admin";

/// Password of the administrator created on first initialization
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

/// Username of the standard user created on first initialization
pub const DEFAULT_USER_USERNAME: &str = "user";

/// Password of the standard user created on first initialization
pub const DEFAULT_USER_PASSWORD: &str = "user123";

// =============================================================================
// Authentication
// =============================================================================

/// Default session token lifetime in hours
pub const DEFAULT_JWT_EXPIRATION_HOURS: i64 = 24;

/// Longest accepted session token lifetime in hours (one year)
pub const MAX_JWT_EXPIRATION_HOURS: i64 = 24 * 365;

/// Minimum JWT secret length (security requirement)
pub const MIN_JWT_SECRET_LENGTH: usize = 32;

/// Authorization header prefix for Bearer tokens
pub const BEARER_TOKEN_PREFIX: &str = "Bearer ";

/// JWT token type identifier
pub const TOKEN_TYPE_BEARER: &str = "Bearer";
