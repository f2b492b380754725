use anyhow::Context;
use argon2::{
    password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;

/// Runs memory-hard work on the blocking pool so request workers stay free.
async fn off_runtime<T, F>(work: F) -> anyhow::Result<T>
where
    F: FnOnce() -> anyhow::Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .context("password hashing task failed")?
}

/// Argon2id with a fresh random salt, encoded as a PHC string.
pub async fn hash_password(plain: &str) -> anyhow::Result<String> {
    let plain = plain.to_owned();
    off_runtime(move || {
        let salt = SaltString::generate(&mut OsRng);
        let phc = Argon2::default()
            .hash_password(plain.as_bytes(), &salt)
            .map_err(|e| anyhow::anyhow!("argon2 hash: {e}"))?;
        Ok(phc.to_string())
    })
    .await
}

/// `Ok(false)` on mismatch. Errors mean the stored hash is unusable
/// (not a PHC string, unknown algorithm, bad params).
pub async fn verify_password(plain: &str, stored: &str) -> anyhow::Result<bool> {
    let plain = plain.to_owned();
    let stored = stored.to_owned();
    off_runtime(move || {
        let parsed =
            PasswordHash::new(&stored).map_err(|e| anyhow::anyhow!("stored hash unreadable: {e}"))?;
        match Argon2::default().verify_password(plain.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(e) => Err(anyhow::anyhow!("argon2 verify: {e}")),
        }
    })
    .await
}
