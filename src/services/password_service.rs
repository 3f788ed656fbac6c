use bcrypt::{hash, verify, DEFAULT_COST};

use crate::utils::errors::AppError;

/// Hash bcrypt con el coste por defecto
pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash_password_with_cost(password, DEFAULT_COST)
}

pub fn hash_password_with_cost(password: &str, cost: u32) -> Result<String, AppError> {
    hash(password, cost).map_err(|e| AppError::Internal(format!("Error hashing password: {}", e)))
}

/// Un hash corrupto se trata como contraseña incorrecta
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    match verify(password, password_hash) {
        Ok(valid) => valid,
        Err(e) => {
            tracing::warn!("⚠️ Hash de contraseña ilegible: {}", e);
            false
        }
    }
}
