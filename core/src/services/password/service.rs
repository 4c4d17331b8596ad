//! bcrypt hashing, run off the async executor

use tokio::task;
use tracing::warn;

use crate::errors::DomainError;

/// One-way password hashing with a configurable cost factor
#[derive(Debug, Clone)]
pub struct PasswordService {
    cost: u32,
}

impl PasswordService {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    pub async fn hash(&self, plaintext: &str) -> Result<String, DomainError> {
        let plaintext = plaintext.to_owned();
        let cost = self.cost;

        task::spawn_blocking(move || bcrypt::hash(plaintext, cost))
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Password hashing task failed: {}", e),
            })?
            .map_err(|e| DomainError::Internal {
                message: format!("Password hashing failed: {}", e),
            })
    }

    /// False for a mismatch and for a malformed stored hash
    pub async fn verify(&self, plaintext: &str, hash: &str) -> Result<bool, DomainError> {
        let plaintext = plaintext.to_owned();
        let hash = hash.to_owned();

        let outcome = task::spawn_blocking(move || bcrypt::verify(plaintext, &hash))
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Password verification task failed: {}", e),
            })?;

        match outcome {
            Ok(matches) => Ok(matches),
            Err(e) => {
                warn!(error = %e, "Stored password hash could not be parsed");
                Ok(false)
            }
        }
    }
}

impl Default for PasswordService {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}
