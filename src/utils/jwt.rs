use crate::config::JwtConfig;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

pub const ACCESS_TOKEN: &str = "access";
pub const REFRESH_TOKEN: &str = "refresh";

// JWT Claims 结构体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,        // Subject (user ID)
    pub role: String,       // 用户角色
    pub token_type: String, // token类型: "access" 或 "refresh"
    pub exp: usize,         // Expiration time (时间戳)
    pub iat: usize,         // Issued at (签发时间)
}

impl Claims {
    pub fn user_id(&self) -> Option<i64> {
        self.sub.parse().ok()
    }
}

// Token 对
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

pub struct JwtUtils;

impl JwtUtils {
    // 生成 Access Token
    pub fn generate_access_token(
        config: &JwtConfig,
        user_id: i64,
        role: &str,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        Self::generate_token_with_expiry(
            config,
            user_id,
            role,
            ACCESS_TOKEN,
            chrono::Duration::minutes(config.access_token_expiry),
        )
    }

    // 生成 Refresh Token
    pub fn generate_refresh_token(
        config: &JwtConfig,
        user_id: i64,
        role: &str,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        Self::generate_token_with_expiry(
            config,
            user_id,
            role,
            REFRESH_TOKEN,
            chrono::Duration::days(config.refresh_token_expiry),
        )
    }

    // 生成带自定义过期时间的 Token
    pub fn generate_token_with_expiry(
        config: &JwtConfig,
        user_id: i64,
        role: &str,
        token_type: &str,
        expiry_duration: chrono::Duration,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = chrono::Utc::now();
        let expiration = now + expiry_duration;

        let claims = Claims {
            sub: user_id.to_string(),
            role: role.to_string(),
            token_type: token_type.to_string(),
            exp: expiration.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        encode(&Header::default(), &claims, &encoding_key)
    }

    // 生成 access 和 refresh token
    pub fn generate_token_pair(
        config: &JwtConfig,
        user_id: i64,
        role: &str,
    ) -> Result<TokenPair, jsonwebtoken::errors::Error> {
        let access_token = Self::generate_access_token(config, user_id, role)?;
        let refresh_token = Self::generate_refresh_token(config, user_id, role)?;

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    // 验证 JWT token
    pub fn verify_token(
        config: &JwtConfig,
        token: &str,
    ) -> Result<Claims, jsonwebtoken::errors::Error> {
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());
        let validation = Validation::default();

        decode::<Claims>(token, &decoding_key, &validation).map(|token_data| token_data.claims)
    }

    // 验证 token 是否为指定类型
    pub fn verify_token_type(
        config: &JwtConfig,
        token: &str,
        expected_type: &str,
    ) -> Result<Claims, jsonwebtoken::errors::Error> {
        let claims = Self::verify_token(config, token)?;
        if claims.token_type != expected_type {
            return Err(jsonwebtoken::errors::Error::from(
                jsonwebtoken::errors::ErrorKind::InvalidToken,
            ));
        }
        Ok(claims)
    }

    // 验证 Access Token
    pub fn verify_access_token(
        config: &JwtConfig,
        token: &str,
    ) -> Result<Claims, jsonwebtoken::errors::Error> {
        Self::verify_token_type(config, token, ACCESS_TOKEN)
    }

    // 验证 Refresh Token
    pub fn verify_refresh_token(
        config: &JwtConfig,
        token: &str,
    ) -> Result<Claims, jsonwebtoken::errors::Error> {
        Self::verify_token_type(config, token, REFRESH_TOKEN)
    }

    // 使用 Refresh Token 生成新的 Access Token
    pub fn refresh_access_token(
        config: &JwtConfig,
        refresh_token: &str,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let claims = Self::verify_refresh_token(config, refresh_token)?;
        let user_id = claims
            .user_id()
            .ok_or(jsonwebtoken::errors::ErrorKind::InvalidToken)?;
        Self::generate_access_token(config, user_id, &claims.role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> JwtConfig {
        JwtConfig {
            secret: "unit-test-secret".to_string(),
            access_token_expiry: 5,
            refresh_token_expiry: 1,
        }
    }

    #[test]
    fn test_token_pair_types() {
        let config = config();
        let pair = JwtUtils::generate_token_pair(&config, 42, "teacher").unwrap();

        let access = JwtUtils::verify_access_token(&config, &pair.access_token).unwrap();
        assert_eq!(access.user_id(), Some(42));
        assert_eq!(access.role, "teacher");

        assert!(JwtUtils::verify_access_token(&config, &pair.refresh_token).is_err());
        assert!(JwtUtils::verify_refresh_token(&config, &pair.access_token).is_err());
    }

    #[test]
    fn test_refresh_issues_access_token() {
        let config = config();
        let refresh = JwtUtils::generate_refresh_token(&config, 7, "student").unwrap();
        let access = JwtUtils::refresh_access_token(&config, &refresh).unwrap();

        let claims = JwtUtils::verify_access_token(&config, &access).unwrap();
        assert_eq!(claims.sub, "7");
        assert_eq!(claims.token_type, ACCESS_TOKEN);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let config = config();
        let token = JwtUtils::generate_access_token(&config, 1, "student").unwrap();

        let other = JwtConfig {
            secret: "another-secret".to_string(),
            ..config
        };
        assert!(JwtUtils::verify_access_token(&other, &token).is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let config = config();
        let token = JwtUtils::generate_token_with_expiry(
            &config,
            1,
            "student",
            ACCESS_TOKEN,
            chrono::Duration::minutes(-10),
        )
        .unwrap();
        assert!(JwtUtils::verify_access_token(&config, &token).is_err());
    }
}
