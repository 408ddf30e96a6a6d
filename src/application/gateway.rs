use crate::domain::error::DomainError;
use crate::domain::models::{Admin, AdminIdentity};
use crate::infrastructure::security::SESSION_TOKEN_PREFIX;
use tracing::warn;

/// Resolves tokens and credentials on every protected operation. All checks
/// are read-only.
///
/// The session check is a format check on the fixed prefix and nothing more:
/// it does not bind the request to an account, and the caller-supplied email
/// in the payload is trusted as the acting identity. That weak contract is
/// intentional and load-bearing for API compatibility.
pub struct AccessGateway {
    admins: Vec<Admin>,
}

impl AccessGateway {
    pub fn new(admins: Vec<Admin>) -> Self {
        Self { admins }
    }

    pub fn session_token_is_valid(&self, token: &str) -> bool {
        token.starts_with(SESSION_TOKEN_PREFIX)
    }

    /// Gate for the endpoints that answer 401 on a bad token.
    pub fn require_session(&self, token: &str) -> Result<(), DomainError> {
        if self.session_token_is_valid(token) {
            Ok(())
        } else {
            Err(DomainError::unauthorized("Unauthorized"))
        }
    }

    /// Matches an admin record by trimmed, case-insensitive email and exact
    /// comparison against the stored password value.
    pub fn admin_login(&self, email: &str, password: &str) -> Result<AdminIdentity, DomainError> {
        let email = email.trim().to_lowercase();
        let password = password.trim();
        let admin = self
            .admins
            .iter()
            .find(|a| a.email.to_lowercase() == email && a.password == password);
        match admin {
            Some(admin) => Ok(AdminIdentity {
                email: admin.email.clone(),
                is_admin: true,
            }),
            None => {
                warn!(email = %email, "Invalid admin credentials");
                Err(DomainError::unauthorized("Invalid admin credentials"))
            }
        }
    }

    /// Fee-lookup gate: succeeds iff some admin's stored token equals the
    /// presented one exactly. Denied with 403, unlike the session gates.
    pub fn check_admin_token(&self, token: &str) -> Result<(), DomainError> {
        let matched = !token.is_empty()
            && self
                .admins
                .iter()
                .any(|a| a.token.as_deref() == Some(token));
        if matched {
            Ok(())
        } else {
            Err(DomainError::Forbidden("Unauthorized".to_string()))
        }
    }
}
