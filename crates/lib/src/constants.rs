//! Constants used throughout the estate-session library.
//!
//! Central definitions for collection names and default routes so callers and
//! tests agree on the same strings.

/// Document-store collection holding profile records, keyed by identity id.
pub const PROFILES: &str = "users";

/// Default route unauthenticated visitors are redirected to.
pub const LOGIN_ROUTE: &str = "/login";

/// Default route authenticated visitors land on after leaving an auth page.
pub const DASHBOARD_ROUTE: &str = "/dashboard";

/// Minimum accepted password length, enforced by both the form validators and
/// the in-memory identity provider.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Minimum accepted contact-form message length after trimming.
pub const MIN_MESSAGE_LENGTH: usize = 10;
