// 认证工具函数
// 当前用户统一通过Bearer令牌解析，不支持其他回退方式

use actix_web::HttpRequest;
use sqlx::PgPool;
use uuid::Uuid;
use crate::errors::AppError;
use crate::models::{Store, User};

/// 从HTTP请求中提取Bearer令牌
pub fn extract_bearer_token(req: &HttpRequest) -> Result<String, AppError> {
    let auth_header = req
        .headers()
        .get("Authorization")
        .and_then(|value| value.to_str().ok())
        .ok_or(AppError::Unauthorized)?;

    match auth_header.strip_prefix("Bearer ") {
        Some(token) if !token.is_empty() => Ok(token.to_string()),
        _ => Err(AppError::Unauthorized),
    }
}

/// 解析当前请求的用户
///
/// 令牌对应users.api_token，仅接受active状态的用户。
pub async fn authenticate(req: &HttpRequest, pool: &PgPool) -> Result<User, AppError> {
    let token = extract_bearer_token(req)?;

    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, name, email, api_token, status, created_at
        FROM users
        WHERE api_token = $1 AND status = 'active'
        "#,
    )
    .bind(&token)
    .fetch_optional(pool)
    .await?;

    user.ok_or(AppError::Unauthorized)
}

/// 查询店铺并校验归属
///
/// 店铺不存在返回NotFound；require_owner为真时非店主返回Forbidden。
pub async fn load_store(
    pool: &PgPool,
    store_id: Uuid,
    user_id: Uuid,
    require_owner: bool,
) -> Result<Store, AppError> {
    let store = sqlx::query_as::<_, Store>(
        r#"
        SELECT id, owner_id, name, slug, created_at
        FROM stores
        WHERE id = $1
        "#,
    )
    .bind(store_id)
    .fetch_optional(pool)
    .await?
    .ok_or(AppError::NotFound("store"))?;

    if require_owner && store.owner_id != user_id {
        return Err(AppError::Forbidden);
    }

    Ok(store)
}
