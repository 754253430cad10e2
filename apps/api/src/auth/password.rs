use anyhow::Context;

use crate::errors::AppError;

/// Hashes a password with bcrypt on the blocking pool.
pub async fn hash_password(password: String) -> Result<String, AppError> {
    hash_password_with_cost(password, bcrypt::DEFAULT_COST).await
}

pub async fn hash_password_with_cost(password: String, cost: u32) -> Result<String, AppError> {
    let hash = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .context("password hashing task failed")?
        .context("failed to hash password")?;
    Ok(hash)
}

/// Checks a password against a stored bcrypt hash on the blocking pool.
pub async fn verify_password(password: String, hash: String) -> Result<bool, AppError> {
    let matches = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .context("password verification task failed")?
        .context("stored password hash is malformed")?;
    Ok(matches)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_hash_then_verify() {
        let hash = hash_password_with_cost("hunter22".to_string(), 4).await.unwrap();
        assert_ne!(hash, "hunter22");
        assert!(verify_password("hunter22".to_string(), hash.clone()).await.unwrap());
        assert!(!verify_password("hunter23".to_string(), hash).await.unwrap());
    }

    #[tokio::test]
    async fn test_malformed_hash_is_an_error() {
        let result = verify_password("pw".to_string(), "plaintext".to_string()).await;
        assert!(matches!(result, Err(AppError::Internal(_))));
    }
}
