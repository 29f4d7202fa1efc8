use base64::{engine::general_purpose, Engine as _};
use constant_time_eq::constant_time_eq;
use pbkdf2::hmac::Hmac;
use pbkdf2::pbkdf2;
use rand::RngCore;
use sha2::Sha256;

pub const DEFAULT_ITERATIONS: u32 = 100_000;
const PREFIX: &str = "pbkdf2_sha256";
const SALT_LEN: usize = 16;
const HASH_LEN: usize = 32;

#[derive(Debug, thiserror::Error)]
#[error("password hashing failed")]
pub struct HashError;

/// Hashes a password as `pbkdf2_sha256$<iterations>$<salt>$<base64 hash>`.
pub fn hash_password(password: &str, iterations: u32) -> Result<String, HashError> {
    let mut salt_bytes = [0u8; SALT_LEN];
    rand::thread_rng().fill_bytes(&mut salt_bytes);
    let salt = general_purpose::URL_SAFE_NO_PAD.encode(salt_bytes);

    let hash = derive(password, &salt, iterations)?;
    Ok(format!("{}${}${}${}", PREFIX, iterations, salt, hash))
}

/// Returns false for malformed hashes instead of failing.
pub fn verify_password(password: &str, stored: &str) -> bool {
    let parts: Vec<&str> = stored.split('$').collect();
    if parts.len() != 4 || parts[0] != PREFIX {
        return false;
    }

    let iterations: u32 = match parts[1].parse() {
        Ok(i) if i > 0 => i,
        _ => return false,
    };

    match derive(password, parts[2], iterations) {
        Ok(computed) => constant_time_eq(computed.as_bytes(), parts[3].as_bytes()),
        Err(_) => false,
    }
}

fn derive(password: &str, salt: &str, iterations: u32) -> Result<String, HashError> {
    let mut output = [0u8; HASH_LEN];
    pbkdf2::<Hmac<Sha256>>(password.as_bytes(), salt.as_bytes(), iterations, &mut output)
        .map_err(|_| HashError)?;
    Ok(general_purpose::STANDARD.encode(output))
}
