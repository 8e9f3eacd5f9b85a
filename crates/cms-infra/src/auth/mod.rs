//! Authentication implementations.

mod jwt;
mod password;

pub use jwt::{JwtConfig, JwtTokenService, PLACEHOLDER_SECRET};
pub use password::Argon2PasswordService;
