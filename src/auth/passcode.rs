//! bcrypt passcode hashing.
//!
//! Hashing is slow on purpose, so both operations run on tokio's blocking
//! pool instead of a runtime worker.

use tokio::task;

use crate::errors::AppError;

/// bcrypt work factor for stored passcodes.
pub const PASSCODE_COST: u32 = 10;

/// Hash a passcode for storage.
pub async fn hash_passcode(passcode: &str) -> Result<String, AppError> {
    let passcode = passcode.to_string();
    task::spawn_blocking(move || bcrypt::hash(passcode, PASSCODE_COST))
        .await
        .map_err(|e| AppError::Internal(format!("Passcode hashing task failed: {}", e)))?
        .map_err(AppError::from)
}

/// Check a passcode against the stored hash of the account it names.
///
/// `stored` is `None` when no account matched. The passcode is then hashed
/// once anyway, so the call takes about as long as a wrong passcode, and the
/// result is `false`.
pub async fn verify_passcode(passcode: &str, stored: Option<&str>) -> Result<bool, AppError> {
    let passcode = passcode.to_string();
    let stored = stored.map(str::to_string);
    task::spawn_blocking(move || match stored {
        Some(hash) => bcrypt::verify(passcode, &hash).unwrap_or_else(|e| {
            tracing::warn!("Unreadable passcode hash: {}", e);
            false
        }),
        None => {
            let _ = bcrypt::hash(passcode, PASSCODE_COST);
            false
        }
    })
    .await
    .map_err(|e| AppError::Internal(format!("Passcode check task failed: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[tokio::test]
    async fn test_hash_and_verify() {
        let stored = hash_passcode("open-sesame").await.unwrap();
        assert!(stored.starts_with("$2b$10$"));
        assert!(verify_passcode("open-sesame", Some(&stored)).await.unwrap());
        assert!(!verify_passcode("open-sesame!", Some(&stored)).await.unwrap());
    }

    #[tokio::test]
    async fn test_same_passcode_gets_different_salts() {
        let first = hash_passcode("hunter22").await.unwrap();
        let second = hash_passcode("hunter22").await.unwrap();
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_malformed_stored_value_never_verifies() {
        assert!(!verify_passcode("anything", Some("no-separator")).await.unwrap());
        assert!(!verify_passcode("", Some("")).await.unwrap());
    }

    #[tokio::test]
    async fn test_unknown_account_takes_as_long_as_wrong_passcode() {
        let stored = hash_passcode("open-sesame").await.unwrap();

        let started = Instant::now();
        assert!(!verify_passcode("guess", Some(&stored)).await.unwrap());
        let wrong_passcode = started.elapsed();

        let started = Instant::now();
        assert!(!verify_passcode("guess", None).await.unwrap());
        let unknown_account = started.elapsed();

        assert!(
            unknown_account * 4 >= wrong_passcode,
            "unknown account took {:?}, wrong passcode took {:?}",
            unknown_account,
            wrong_passcode
        );
    }
}
