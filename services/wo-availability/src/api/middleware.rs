//! 中间件

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use monopilot_auth_core::TokenService;
use monopilot_common::{TenantId, UserId};
use monopilot_errors::AppError;
use tracing::{debug, warn};

use super::error::ApiError;

/// 已认证调用方
#[derive(Debug, Clone, Copy)]
pub struct CallerContext {
    pub user_id: UserId,
    pub tenant_id: TenantId,
}

/// 认证上下文提取器
///
/// 应该在 auth_middleware 之后使用
pub struct AuthCaller(pub CallerContext);

impl<S> FromRequestParts<S> for AuthCaller
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CallerContext>()
            .copied()
            .map(AuthCaller)
            .ok_or_else(|| ApiError(AppError::unauthorized("Missing caller identity")))
    }
}

/// JWT 认证中间件
///
/// 验证 Bearer token，解析出租户范围并注入到请求扩展中
pub async fn auth_middleware(
    State(token_service): State<TokenService>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .ok_or_else(|| {
            warn!("Missing or invalid authorization header");
            AppError::unauthorized("Missing bearer token")
        })?;

    debug!("Validating JWT token");
    let claims = token_service.validate_access_token(token)?;
    let caller = CallerContext {
        user_id: claims.user_id()?,
        tenant_id: claims.tenant_id()?,
    };

    debug!(
        user_id = %caller.user_id,
        tenant_id = %caller.tenant_id,
        "Token validated successfully"
    );

    request.extensions_mut().insert(caller);
    Ok(next.run(request).await)
}
