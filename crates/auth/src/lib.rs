//! Session-token authentication gate for Vitrine.
//!
//! A single configured credential pair buys a bearer token; the token is
//! the precondition for every administrative operation. Sessions live in
//! process memory only — a restart revokes everything.

pub mod gate;
pub mod session;

pub use gate::{AuthGate, CredentialVerifier, StaticCredentials};
pub use session::{Session, SessionStore};
