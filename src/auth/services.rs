use tracing::{info, warn};

use crate::{
    auth::{
        jwt::JwtKeys,
        password::{hash_password, verify_password},
        repo::{StoreError, UserStore},
        repo_types::User,
        validation::Credentials,
    },
    error::AuthError,
};

/// Creates the user and returns an access token for it.
///
/// Uniqueness is left to the store's atomic insert, so two racing signups
/// for one email yield one token and one `CredentialsConflict`.
pub async fn signup(
    users: &dyn UserStore,
    keys: &JwtKeys,
    creds: &Credentials,
) -> Result<String, AuthError> {
    let hash = hash_password(&creds.password).await?;
    let user = match users.insert(&creds.email, &hash).await {
        Ok(u) => u,
        Err(StoreError::Duplicate) => {
            warn!(email = %creds.email, "signup with taken email");
            return Err(AuthError::CredentialsConflict);
        }
        Err(StoreError::Other(e)) => return Err(AuthError::Internal(e)),
    };
    info!(user_id = %user.id, email = %user.email, "user signed up");
    sign_token(keys, &user)
}

/// Unknown email and wrong password fail with the same error.
pub async fn login(
    users: &dyn UserStore,
    keys: &JwtKeys,
    creds: &Credentials,
) -> Result<String, AuthError> {
    let Some(user) = users.find_by_email(&creds.email).await? else {
        warn!(email = %creds.email, "login unknown email");
        return Err(AuthError::CredentialsInvalid);
    };

    if !verify_password(&creds.password, &user.password_hash).await? {
        warn!(email = %creds.email, user_id = %user.id, "login invalid password");
        return Err(AuthError::CredentialsInvalid);
    }

    info!(user_id = %user.id, email = %user.email, "user logged in");
    sign_token(keys, &user)
}

pub fn sign_token(keys: &JwtKeys, user: &User) -> Result<String, AuthError> {
    Ok(keys.sign(user)?)
}
