//! Credentials and sessions.
//!
//! Passwords are stored as Argon2id PHC strings; sessions are stateless HS256 tokens that
//! carry the username and expire after [`token::TOKEN_TTL_SECS`]. There is no server-side
//! session table, so a token stays valid until it expires.

pub mod password;
pub mod token;

pub use token::{Claims, TokenIssuer};

/// The authenticated caller, attached to a request by the access guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub username: String,
}

impl From<Claims> for Identity {
    fn from(claims: Claims) -> Self {
        Self {
            username: claims.username,
        }
    }
}
