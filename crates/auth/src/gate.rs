//! The authentication gate: issues, validates, and revokes session tokens
//! against an injected credential verifier.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::RngCore;
use tracing::{info, warn};

use crate::session::SessionStore;
use vitrine_core::error::AuthError;
use vitrine_config::AdminConfig;

/// Verifies a credential pair. The gate is polymorphic over this so
/// multi-user support can be added without touching call sites.
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, username: &str, password: &str) -> bool;
}

/// The single configured credential pair.
pub struct StaticCredentials {
    username: String,
    password: String,
}

impl StaticCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl From<&AdminConfig> for StaticCredentials {
    fn from(config: &AdminConfig) -> Self {
        Self::new(&config.username, &config.password)
    }
}

impl CredentialVerifier for StaticCredentials {
    fn verify(&self, username: &str, password: &str) -> bool {
        username == self.username && password == self.password
    }
}

/// Issues, validates, and revokes tokens. Side effects confined to the
/// in-process [`SessionStore`].
pub struct AuthGate {
    verifier: Box<dyn CredentialVerifier>,
    sessions: SessionStore,
}

impl AuthGate {
    pub fn new(verifier: impl CredentialVerifier + 'static) -> Self {
        Self {
            verifier: Box::new(verifier),
            sessions: SessionStore::new(),
        }
    }

    /// Exchange the credential pair for a fresh bearer token.
    ///
    /// The token carries 256 bits from the OS CSPRNG, URL-safe base64
    /// encoded. On mismatch the error never reveals which field was wrong.
    pub fn login(&self, username: &str, password: &str) -> Result<String, AuthError> {
        if !self.verifier.verify(username, password) {
            warn!(username, "Rejected login attempt");
            return Err(AuthError::InvalidCredentials);
        }

        let mut bytes = [0u8; 32];
        rand::rng().fill_bytes(&mut bytes);
        let token = URL_SAFE_NO_PAD.encode(bytes);

        self.sessions.insert(token.clone(), username.to_string());
        info!(username, "Session opened");
        Ok(token)
    }

    /// Revoke a token. Idempotent: revoking an unknown token succeeds.
    pub fn logout(&self, token: &str) {
        if self.sessions.remove(token) {
            info!("Session closed");
        }
    }

    /// Check a token and return its owner. Pure lookup, no expiry check.
    pub fn verify(&self, token: &str) -> Result<String, AuthError> {
        self.sessions
            .get(token)
            .map(|session| session.owner)
            .ok_or(AuthError::InvalidToken)
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate() -> AuthGate {
        AuthGate::new(StaticCredentials::new("admin", "correct-horse"))
    }

    #[test]
    fn login_with_correct_pair_issues_fresh_tokens() {
        let gate = gate();
        let first = gate.login("admin", "correct-horse").unwrap();
        let second = gate.login("admin", "correct-horse").unwrap();

        // 256 bits → 43 chars of unpadded URL-safe base64
        assert_eq!(first.len(), 43);
        assert_ne!(first, second);
        // Both sessions are independently valid
        assert_eq!(gate.verify(&first).unwrap(), "admin");
        assert_eq!(gate.verify(&second).unwrap(), "admin");
    }

    #[test]
    fn login_rejects_any_other_pair() {
        let gate = gate();
        assert!(matches!(
            gate.login("admin", "wrong"),
            Err(AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            gate.login("intruder", "correct-horse"),
            Err(AuthError::InvalidCredentials)
        ));
        assert_eq!(gate.session_count(), 0);
    }

    #[test]
    fn verify_succeeds_iff_token_present() {
        let gate = gate();
        assert!(matches!(
            gate.verify("never-issued"),
            Err(AuthError::InvalidToken)
        ));

        let token = gate.login("admin", "correct-horse").unwrap();
        assert!(gate.verify(&token).is_ok());
    }

    #[test]
    fn logout_is_idempotent_and_invalidates() {
        let gate = gate();
        let token = gate.login("admin", "correct-horse").unwrap();

        gate.logout(&token);
        assert!(matches!(gate.verify(&token), Err(AuthError::InvalidToken)));
        // Second logout causes no error
        gate.logout(&token);
    }
}
