//! monopilot-errors - 统一错误处理
//!
//! 基于 RFC 7807 Problem Details 规范，附带机器可读的 `code`

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 5xx 响应对外只给出这段文字
pub const GENERIC_INTERNAL_MESSAGE: &str = "Internal server error";

/// 应用错误类型
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid identifier: {0}")]
    InvalidId(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("External service error: {0}")]
    ExternalService(String),
}

impl AppError {
    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::Unauthorized(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub fn external_service(msg: impl Into<String>) -> Self {
        Self::ExternalService(msg.into())
    }

    /// 机器可读错误码
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidId(_) => "INVALID_ID",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Internal(_) | Self::Database(_) | Self::ExternalService(_) => "INTERNAL",
        }
    }

    /// 转换为 HTTP 状态码
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidId(_) => 400,
            Self::Validation(_) => 400,
            Self::Unauthorized(_) => 401,
            Self::NotFound(_) => 404,
            Self::Internal(_) => 500,
            Self::Database(_) => 500,
            Self::ExternalService(_) => 500,
        }
    }

    pub fn is_server_error(&self) -> bool {
        self.status_code() >= 500
    }

    /// 转换为 Problem Details
    ///
    /// 5xx 的 detail 固定为通用文字，不暴露后端存储的错误信息。
    pub fn to_problem_details(&self) -> ProblemDetails {
        let detail = if self.is_server_error() {
            GENERIC_INTERNAL_MESSAGE.to_string()
        } else {
            self.message().to_string()
        };

        ProblemDetails {
            r#type: self.problem_type(),
            title: self.problem_title().to_string(),
            status: self.status_code(),
            code: self.code().to_string(),
            detail,
        }
    }

    fn message(&self) -> &str {
        match self {
            Self::InvalidId(m)
            | Self::Validation(m)
            | Self::Unauthorized(m)
            | Self::NotFound(m)
            | Self::Internal(m)
            | Self::Database(m)
            | Self::ExternalService(m) => m,
        }
    }

    fn problem_type(&self) -> String {
        let slug = match self {
            Self::InvalidId(_) => "invalid-id",
            Self::Validation(_) => "validation",
            Self::Unauthorized(_) => "unauthorized",
            Self::NotFound(_) => "not-found",
            Self::Internal(_) | Self::Database(_) | Self::ExternalService(_) => "internal",
        };
        format!("https://api.monopilot.app/problems/{}", slug)
    }

    fn problem_title(&self) -> &'static str {
        match self {
            Self::InvalidId(_) => "Invalid Identifier",
            Self::Validation(_) => "Validation Error",
            Self::Unauthorized(_) => "Unauthorized",
            Self::NotFound(_) => "Resource Not Found",
            Self::Internal(_) | Self::Database(_) | Self::ExternalService(_) => {
                "Internal Server Error"
            }
        }
    }
}

/// RFC 7807 Problem Details
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProblemDetails {
    pub r#type: String,
    pub title: String,
    pub status: u16,
    pub code: String,
    pub detail: String,
}

/// Result 类型别名
pub type AppResult<T> = Result<T, AppError>;
