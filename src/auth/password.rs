use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
};

use crate::error::{AppError, AppResult};

/// Argon2id hash in PHC string form, keyed with the server secret.
pub fn hash_password(password: &str, secret: &[u8]) -> AppResult<String> {
    let argon2 = Argon2::new_with_secret(secret, Algorithm::Argon2id, Version::V0x13, Params::default())
        .map_err(|e| AppError::PasswordHash(e.to_string()))?;
    let salt = SaltString::generate(&mut OsRng);

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::PasswordHash(e.to_string()))
}

#[cfg(test)]
pub fn verify_password(password: &str, hashed: &str, secret: &[u8]) -> bool {
    use argon2::password_hash::{PasswordHash, PasswordVerifier};

    let Ok(argon2) =
        Argon2::new_with_secret(secret, Algorithm::Argon2id, Version::V0x13, Params::default())
    else {
        return false;
    };
    let Ok(parsed) = PasswordHash::new(hashed) else {
        return false;
    };

    argon2.verify_password(password.as_bytes(), &parsed).is_ok()
}
