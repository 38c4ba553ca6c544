//! # Admin Gate
//!
//! Local password check in front of the content mutation surface. The admin
//! page renders a login form until the gate is unlocked.

use tracing::{info, warn};

use crate::error::{AppError, AppResult};

/// Guards admin-only actions for one session.
#[derive(Debug, Clone)]
pub struct AdminGate {
    password: String,
    unlocked: bool,
}

impl AdminGate {
    pub fn new(password: impl Into<String>) -> Self {
        AdminGate {
            password: password.into(),
            unlocked: false,
        }
    }

    /// Unlocks the gate if `attempt` matches the configured password.
    pub fn login(&mut self, attempt: &str) -> AppResult<()> {
        if attempt == self.password {
            self.unlocked = true;
            info!("Admin session unlocked");
            Ok(())
        } else {
            warn!("Admin login rejected");
            Err(AppError::Unauthorized)
        }
    }

    pub fn logout(&mut self) {
        self.unlocked = false;
    }

    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }

    /// Fails unless the gate is unlocked.
    pub fn require(&self) -> AppResult<()> {
        if self.unlocked {
            Ok(())
        } else {
            Err(AppError::Unauthorized)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrong_password_rejected() {
        let mut gate = AdminGate::new("admin123");
        assert!(matches!(gate.login("admin"), Err(AppError::Unauthorized)));
        assert!(!gate.is_unlocked());
        assert!(gate.require().is_err());
    }

    #[test]
    fn test_configured_password_unlocks() {
        let mut gate = AdminGate::new("s3cret");
        gate.login("s3cret").unwrap();
        assert!(gate.require().is_ok());

        gate.logout();
        assert!(gate.require().is_err());
    }
}
