//! Access token verification.

use crate::auth::identity::UserId;
use crate::config::TokenSettings;
use crate::error::{AppError, AppResult};
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde_json::{Map, Value};

/// Checks signature and lifetime of access tokens and pulls out the user id.
///
/// The token type is not inspected: any token signed with the shared key and still
/// within its lifetime identifies its user.
#[derive(Clone)]
pub struct TokenVerifier {
    key: DecodingKey,
    validation: Validation,
    user_id_claim: String,
}

impl TokenVerifier {
    pub fn new(settings: &TokenSettings) -> Self {
        let mut validation = Validation::new(settings.algorithm);
        validation.leeway = settings.leeway_secs;
        validation.validate_exp = true;
        validation.validate_nbf = true;

        let mut required = vec!["exp"];
        match &settings.audience {
            Some(aud) => {
                validation.set_audience(&[aud]);
                required.push("aud");
            }
            None => validation.validate_aud = false,
        }
        if let Some(iss) = &settings.issuer {
            validation.set_issuer(&[iss]);
            required.push("iss");
        }
        validation.set_required_spec_claims(&required);

        Self {
            key: DecodingKey::from_secret(settings.secret.as_bytes()),
            validation,
            user_id_claim: settings.user_id_claim.clone(),
        }
    }

    pub fn verify(&self, token: &str) -> AppResult<UserId> {
        let data = decode::<Map<String, Value>>(token, &self.key, &self.validation)?;
        data.claims
            .get(&self.user_id_claim)
            .and_then(UserId::from_claim)
            .ok_or_else(|| {
                AppError::Auth(format!("token has no usable '{}' claim", self.user_id_claim))
            })
    }
}
