use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, errors::Error, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Two days.
pub const TOKEN_TTL_SECS: i64 = 2 * 24 * 60 * 60;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    pub username: String,
    pub iat: i64,
    pub exp: i64,
}

/// Signs and verifies bearer tokens with a server-held secret.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenIssuer {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }

    pub fn issue(&self, username: &str) -> Result<String, Error> {
        self.issue_at(username, Utc::now())
    }

    fn issue_at(&self, username: &str, now: DateTime<Utc>) -> Result<String, Error> {
        let claims = Claims {
            username: username.to_owned(),
            iat: now.timestamp(),
            exp: now.timestamp() + TOKEN_TTL_SECS,
        };
        encode(&Header::default(), &claims, &self.encoding)
    }

    /// Fails on a bad signature, a malformed token or an expired one.
    pub fn verify(&self, token: &str) -> Result<Claims, Error> {
        decode::<Claims>(token, &self.decoding, &Validation::default()).map(|data| data.claims)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    #[test]
    fn issued_token_carries_username_and_two_day_expiry() {
        let issuer = TokenIssuer::new(b"secret");
        let token = issuer.issue("alice").unwrap();
        let claims = issuer.verify(&token).unwrap();
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.exp - claims.iat, TOKEN_TTL_SECS);
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let token = TokenIssuer::new(b"secret").issue("alice").unwrap();
        assert!(TokenIssuer::new(b"another").verify(&token).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let issuer = TokenIssuer::new(b"secret");
        let token = issuer
            .issue_at("alice", Utc::now() - Duration::days(3))
            .unwrap();
        assert!(issuer.verify(&token).is_err());
    }

    #[test]
    fn garbage_is_rejected() {
        let issuer = TokenIssuer::new(b"secret");
        assert!(issuer.verify("not.a.token").is_err());
        assert!(issuer.verify("").is_err());
    }
}
