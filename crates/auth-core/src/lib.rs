//! monopilot-auth-core - 认证核心库
//!
//! 只负责校验身份服务签发的访问令牌并解析出租户范围。

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use monopilot_common::{TenantId, UserId, parse_canonical_uuid};
use monopilot_errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const ACCESS_TOKEN_TYPE: &str = "access";

/// JWT Claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Tenant (organization) ID
    pub tenant_id: String,
    /// Expiration time
    pub exp: i64,
    /// Issued at
    pub iat: i64,
    /// JWT ID
    pub jti: String,
    #[serde(default)]
    pub iss: String,
    #[serde(default)]
    pub aud: String,
    /// access / refresh
    #[serde(default)]
    pub token_type: String,
}

impl Claims {
    pub fn new(
        user_id: &UserId,
        tenant_id: &TenantId,
        expires_in_secs: i64,
        token_type: &str,
        issuer: &str,
        audience: &str,
    ) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id.0.to_string(),
            tenant_id: tenant_id.0.to_string(),
            exp: (now + Duration::seconds(expires_in_secs)).timestamp(),
            iat: now.timestamp(),
            jti: Uuid::now_v7().to_string(),
            iss: issuer.to_string(),
            aud: audience.to_string(),
            token_type: token_type.to_string(),
        }
    }

    pub fn user_id(&self) -> AppResult<UserId> {
        Uuid::parse_str(&self.sub)
            .map(UserId::from_uuid)
            .map_err(|_| AppError::unauthorized("Invalid user ID in token"))
    }

    /// 租户 ID 必须是规范格式的 UUID，否则视为身份无效
    pub fn tenant_id(&self) -> AppResult<TenantId> {
        parse_canonical_uuid(&self.tenant_id)
            .map(TenantId::from_uuid)
            .ok_or_else(|| AppError::unauthorized("Invalid tenant ID in token"))
    }

    pub fn is_access_token(&self) -> bool {
        self.token_type == ACCESS_TOKEN_TYPE
    }
}

/// Token 服务
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_token_expires_in: i64,
    issuer: String,
    audience: String,
}

impl TokenService {
    pub fn new(
        secret: &str,
        access_token_expires_in: i64,
        issuer: impl Into<String>,
        audience: impl Into<String>,
    ) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            access_token_expires_in,
            issuer: issuer.into(),
            audience: audience.into(),
        }
    }

    /// 生成访问令牌（测试和本地联调用）
    pub fn generate_access_token(
        &self,
        user_id: &UserId,
        tenant_id: &TenantId,
    ) -> AppResult<String> {
        let claims = Claims::new(
            user_id,
            tenant_id,
            self.access_token_expires_in,
            ACCESS_TOKEN_TYPE,
            &self.issuer,
            &self.audience,
        );

        self.encode_claims(&claims)
    }

    pub fn encode_claims(&self, claims: &Claims) -> AppResult<String> {
        encode(&Header::default(), claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))
    }

    /// 验证访问令牌
    pub fn validate_access_token(&self, token: &str) -> AppResult<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[&self.audience]);
        validation.validate_exp = true;
        validation.leeway = 0;

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| AppError::unauthorized(format!("Invalid token: {}", e)))?
            .claims;

        if claims.jti.is_empty() {
            return Err(AppError::unauthorized("Token ID (jti) missing"));
        }

        if !claims.is_access_token() {
            return Err(AppError::unauthorized("Not an access token"));
        }

        Ok(claims)
    }
}
