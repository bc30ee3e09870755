// 用户与店铺数据模型
// 用户凭Bearer令牌认证，店铺用于优惠券的多租户归属

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use chrono::{DateTime, Utc};

/// 用户模型
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct User {
    /// 用户唯一标识符
    pub id: Uuid,
    /// 用户名称
    pub name: String,
    /// 邮箱地址
    pub email: String,
    /// API访问令牌 (Bearer认证)
    #[serde(skip_serializing)]
    pub api_token: String,
    /// 用户状态
    pub status: UserStatus,
    /// 创建时间
    pub created_at: DateTime<Utc>,
}

/// 用户状态枚举
#[derive(Debug, Serialize, Deserialize, sqlx::Type, Clone, PartialEq)]
#[sqlx(type_name = "varchar")]
pub enum UserStatus {
    /// 正常
    #[sqlx(rename = "active")]
    #[serde(rename = "active")]
    Active,
    /// 已停用
    #[sqlx(rename = "suspended")]
    #[serde(rename = "suspended")]
    Suspended,
}

/// 店铺模型
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Store {
    /// 店铺唯一标识符
    pub id: Uuid,
    /// 店主用户ID
    pub owner_id: Uuid,
    /// 店铺名称
    pub name: String,
    /// 店铺子域名标识
    pub slug: String,
    /// 创建时间
    pub created_at: DateTime<Utc>,
}
