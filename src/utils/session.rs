use jsonwebtoken::{encode, decode, Header, Validation, EncodingKey, DecodingKey};
use serde::{Deserialize, Serialize};
use chrono::{Utc, Duration};

const TOKEN_LIFETIME_DAYS: i64 = 30;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Hex ObjectId of the user.
    pub sub: String,
    pub exp: usize,
}

pub fn create_token(user_id: &str, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
    let expiration = (Utc::now() + Duration::days(TOKEN_LIFETIME_DAYS)).timestamp();

    let claims = Claims {
        sub: user_id.to_string(),
        exp: expiration as usize,
    };

    encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_bytes()))
}

pub fn verify_token(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_carries_subject() {
        let token = create_token("65f0c0ffee", "s3cret").unwrap();
        let claims = verify_token(&token, "s3cret").unwrap();

        assert_eq!(claims.sub, "65f0c0ffee");
        assert!(claims.exp as i64 > Utc::now().timestamp() + 29 * 24 * 3600);
    }

    #[test]
    fn wrong_secret_fails() {
        let token = create_token("65f0c0ffee", "s3cret").unwrap();
        assert!(verify_token(&token, "other").is_err());
    }

    #[test]
    fn expired_token_fails() {
        let claims = Claims {
            sub: "65f0c0ffee".into(),
            exp: (Utc::now() - Duration::hours(1)).timestamp() as usize,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"s3cret"),
        )
        .unwrap();

        assert!(verify_token(&token, "s3cret").is_err());
    }
}
