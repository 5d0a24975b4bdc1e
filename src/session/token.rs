use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use tracing::{debug, instrument};

use super::types::SessionClaims;
use crate::shared::AppError;

/// Signs and checks the bearer tokens that point players at their game.
///
/// Keys are derived once from the shared secret; a token stays valid for
/// `lifetime_days` after it is issued, matching the stored session expiry.
#[derive(Clone)]
pub struct SessionTokens {
    signing: EncodingKey,
    verifying: DecodingKey,
    validation: Validation,
    lifetime_days: i64,
}

impl SessionTokens {
    pub fn new(secret: &str, lifetime_days: i64) -> Self {
        Self {
            signing: EncodingKey::from_secret(secret.as_bytes()),
            verifying: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::default(),
            lifetime_days,
        }
    }

    pub fn lifetime_days(&self) -> i64 {
        self.lifetime_days
    }

    #[instrument(skip(self))]
    pub fn issue(&self, session_id: &str) -> Result<String, AppError> {
        let claims = self.claims_for(session_id);

        encode(&Header::default(), &claims, &self.signing).map_err(|e| {
            debug!(error = %e, "Could not sign session token");
            AppError::JwtError(e.to_string())
        })
    }

    /// Returns the claims of a token signed with our secret that has not expired yet
    #[instrument(skip_all)]
    pub fn verify(&self, token: &str) -> Result<SessionClaims, AppError> {
        let data = decode::<SessionClaims>(token, &self.verifying, &self.validation).map_err(
            |e| {
                debug!(error = %e, "Rejected session token");
                AppError::JwtError(e.to_string())
            },
        )?;

        debug!(session_id = %data.claims.session_id, exp = data.claims.exp, "Session token accepted");
        Ok(data.claims)
    }

    fn claims_for(&self, session_id: &str) -> SessionClaims {
        let issued_at = Utc::now();
        let expires_at = issued_at + Duration::days(self.lifetime_days);

        SessionClaims {
            session_id: session_id.to_string(),
            exp: expires_at.timestamp() as usize,
            iat: issued_at.timestamp() as usize,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_issued_token_carries_session_id() {
        let tokens = SessionTokens::new("test-secret", 1);

        let token = tokens.issue("game-42").unwrap();
        let claims = tokens.verify(&token).unwrap();

        assert_eq!(claims.session_id, "game-42");
        assert_eq!(claims.exp - claims.iat, 86_400);
    }

    #[rstest]
    #[case::garbage("invalid.token.here")]
    #[case::empty("")]
    #[case::not_a_jwt("Bearer abc")]
    fn test_malformed_tokens_are_rejected(#[case] token: &str) {
        let tokens = SessionTokens::new("test-secret", 1);
        assert!(matches!(tokens.verify(token), Err(AppError::JwtError(_))));
    }

    #[test]
    fn test_token_from_another_secret_is_rejected() {
        let ours = SessionTokens::new("secret-one", 1);
        let theirs = SessionTokens::new("secret-two", 1);

        let token = theirs.issue("session").unwrap();

        assert!(matches!(ours.verify(&token), Err(AppError::JwtError(_))));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        // Negative lifetime puts exp well past the default leeway
        let tokens = SessionTokens::new("test-secret", -1);
        let token = tokens.issue("session").unwrap();

        assert!(matches!(tokens.verify(&token), Err(AppError::JwtError(_))));
    }
}
