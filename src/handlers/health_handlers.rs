// 健康检查和系统状态API处理器
// 提供服务健康状态与版本信息查询接口

use actix_web::{web, HttpResponse, Result as ActixResult};
use serde::Serialize;
use crate::models::ApiResponse;
use crate::state::AppState;

/// 系统健康检查响应
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// 服务状态
    pub status: String,
    /// 版本信息
    pub version: String,
    /// 数据库连接状态
    pub database: String,
    /// 当前时间戳
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// 版本信息响应
#[derive(Debug, Serialize)]
pub struct VersionResponse {
    /// 服务名称
    pub name: String,
    /// 版本号
    pub version: String,
}

/// 基础健康检查
///
/// GET /health
///
/// 无需认证
pub async fn health_check(data: web::Data<AppState>) -> ActixResult<HttpResponse> {
    let mut health = HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: "unknown".to_string(),
        timestamp: chrono::Utc::now(),
    };

    // 检查数据库连接
    match sqlx::query("SELECT 1").fetch_one(&data.db_pool).await {
        Ok(_) => {
            health.database = "connected".to_string();
        }
        Err(e) => {
            log::error!("Database health check failed: {}", e);
            health.database = "disconnected".to_string();
            health.status = "unhealthy".to_string();
        }
    }

    if health.status == "healthy" {
        Ok(HttpResponse::Ok().json(ApiResponse::success(health)))
    } else {
        Ok(HttpResponse::ServiceUnavailable().json(ApiResponse::success(health)))
    }
}

/// 版本信息
///
/// GET /api/v1/version
///
/// 无需认证
pub async fn version_info() -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(ApiResponse::success(VersionResponse {
        name: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })))
}
