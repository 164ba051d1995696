use crate::errors::AppError;

/// Stateless shared-secret check. No sessions or tokens are issued;
/// the boolean outcome is the entire result and the client gates its
/// own admin UI on it.
#[derive(Clone)]
pub struct AdminGate {
    secret: Option<String>,
}

impl AdminGate {
    pub fn new(secret: Option<String>) -> Self {
        AdminGate { secret }
    }

    /// An unset secret is a server misconfiguration and is rejected
    /// before any comparison, regardless of what was submitted.
    pub fn verify(&self, submitted: &str) -> Result<(), AppError> {
        let secret = self
            .secret
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| AppError::Misconfiguration("ADMIN_PASSWORD is not set".to_string()))?;

        if submitted.trim() == secret.trim() {
            Ok(())
        } else {
            Err(AppError::InvalidCredentials)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_password_succeeds() {
        let gate = AdminGate::new(Some("hunter2".to_string()));
        assert!(gate.verify("hunter2").is_ok());
    }

    #[test]
    fn surrounding_whitespace_is_ignored_on_both_sides() {
        let gate = AdminGate::new(Some("  hunter2\n".to_string()));
        assert!(gate.verify(" hunter2 ").is_ok());
    }

    #[test]
    fn wrong_password_is_unauthorized() {
        let gate = AdminGate::new(Some("hunter2".to_string()));
        assert!(matches!(gate.verify("letmein"), Err(AppError::InvalidCredentials)));
    }

    #[test]
    fn missing_secret_is_a_misconfiguration_even_for_empty_submission() {
        let gate = AdminGate::new(None);
        assert!(matches!(gate.verify(""), Err(AppError::Misconfiguration(_))));

        let blank = AdminGate::new(Some("   ".to_string()));
        assert!(matches!(blank.verify("   "), Err(AppError::Misconfiguration(_))));
    }
}
