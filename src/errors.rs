// 应用错误类型定义
// 统一业务错误与HTTP状态码的映射关系

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

/// 统一的应用错误类型
///
/// 业务规则失败对请求来说是终态，不做内部重试。
#[derive(Debug, Error)]
pub enum AppError {
    /// 输入格式或取值非法
    #[error("{0}")]
    Validation(String),

    /// 资源不存在
    #[error("{0} not found")]
    NotFound(&'static str),

    /// 金币余额不足
    #[error("Insufficient coin balance")]
    InsufficientFunds,

    /// 优惠券不可用
    #[error("Voucher is not usable: {0}")]
    VoucherInvalid(&'static str),

    /// 回调签名校验失败
    #[error("Invalid callback signature")]
    SignatureMismatch,

    /// 缺少或无效的认证凭证
    #[error("Missing or invalid bearer token")]
    Unauthorized,

    /// 已认证但无权访问目标资源
    #[error("Access to this resource is not allowed")]
    Forbidden,

    /// 支付网关调用失败
    #[error("Payment gateway error: {0}")]
    Gateway(String),

    /// 未预期的内部错误
    #[error("Internal server error")]
    Unexpected(anyhow::Error),
}

/// 错误响应体 (与ApiResponse结构保持一致)
#[derive(Debug, Serialize)]
struct ErrorBody {
    code: i32,
    message: String,
    data: Option<()>,
    timestamp: chrono::DateTime<chrono::Utc>,
}

impl AppError {
    /// 包装任意内部错误
    pub fn internal<E: Into<anyhow::Error>>(err: E) -> Self {
        AppError::Unexpected(err.into())
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Unexpected(err.into())
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Unexpected(err)
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InsufficientFunds
            | AppError::VoucherInvalid(_)
            | AppError::SignatureMismatch => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::Gateway(_) => StatusCode::BAD_GATEWAY,
            AppError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            // 签名错误按安全事件记录
            AppError::SignatureMismatch => {
                log::warn!("Security event: callback signature mismatch");
            }
            // 内部错误记录完整错误链，对外只返回通用消息
            AppError::Unexpected(source) => {
                log::error!("Unexpected error: {:#}", source);
            }
            _ => {}
        }

        let status = self.status_code();
        let message = match self {
            AppError::Unexpected(_) => "Internal server error".to_string(),
            other => other.to_string(),
        };

        HttpResponse::build(status).json(ErrorBody {
            code: status.as_u16() as i32,
            message,
            data: None,
            timestamp: chrono::Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code_mapping() {
        assert_eq!(
            AppError::Validation("bad".into()).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(AppError::NotFound("voucher").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::InsufficientFunds.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::VoucherInvalid("expired").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::SignatureMismatch.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AppError::Unexpected(anyhow::anyhow!("boom")).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_internal_error_hides_details() {
        let err = AppError::internal(anyhow::anyhow!("connection refused to db"));
        let resp = err.error_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
