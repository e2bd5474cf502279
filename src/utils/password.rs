use argon2::password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

pub enum Error {
    UnexpectedError,
}

pub fn hash(password: &str) -> Result<String, Error> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| {
            tracing::error!("Error occurred while hashing a password: {}", err);
            Error::UnexpectedError
        })
}

pub fn verify(stored_hash: &str, password: &str) -> bool {
    match PasswordHash::new(stored_hash) {
        Ok(parsed_hash) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok(),
        Err(err) => {
            tracing::error!("Invalid password hash in storage: {}", err);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_round_trip() {
        let hashed = hash("hunter2").ok().unwrap();
        assert_ne!(hashed, "hunter2");
        assert!(verify(&hashed, "hunter2"));
        assert!(!verify(&hashed, "hunter3"));
    }

    #[test]
    fn garbage_stored_hash_never_verifies() {
        assert!(!verify("not-a-phc-string", "hunter2"));
    }
}
