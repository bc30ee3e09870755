// 金币账本数据模型
// 账本为只追加流水，余额由成功流水的贷方减借方推导

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use chrono::{DateTime, Utc};

/// 金币流水模型 (只追加，创建后不再修改)
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct CoinTransaction {
    /// 流水唯一标识符
    pub id: Uuid,
    /// 所属用户ID
    pub user_id: Uuid,
    /// 流水说明
    pub description: String,
    /// 贷方金额 (入账金币数，>=0)
    pub credit_amount: i64,
    /// 借方金额 (出账金币数，>=0)
    pub debit_amount: i64,
    /// 流水状态 (余额只统计success)
    pub status: CoinTxStatus,
    /// 创建时间
    pub created_at: DateTime<Utc>,
}

/// 金币流水状态枚举
#[derive(Debug, Serialize, Deserialize, sqlx::Type, Clone, PartialEq)]
#[sqlx(type_name = "varchar")]
pub enum CoinTxStatus {
    /// 已入账
    #[sqlx(rename = "success")]
    #[serde(rename = "success")]
    Success,
    /// 处理中
    #[sqlx(rename = "pending")]
    #[serde(rename = "pending")]
    Pending,
    /// 已失败
    #[sqlx(rename = "failed")]
    #[serde(rename = "failed")]
    Failed,
}

/// 消费金币请求
#[derive(Debug, Deserialize)]
pub struct SpendCoinsRequest {
    /// 消费金币数量
    pub amount: i64,
    /// 消费说明 (记录金币用途)
    pub description: String,
}

/// 余额查询参数
#[derive(Debug, Deserialize)]
pub struct CoinBalanceQuery {
    /// 统计起始时间 (可选)
    pub start_date: Option<DateTime<Utc>>,
    /// 统计结束时间 (可选)
    pub end_date: Option<DateTime<Utc>>,
}

/// 余额查询响应
#[derive(Debug, Serialize)]
pub struct CoinBalanceResponse {
    /// 当前余额 (金币数)
    pub balance: i64,
}

/// 消费金币响应
#[derive(Debug, Serialize)]
pub struct SpendCoinsResponse {
    /// 新写入的借方流水ID
    pub transaction_id: Uuid,
    /// 消费后的余额
    pub balance: i64,
}

/// 流水列表查询参数
#[derive(Debug, Deserialize)]
pub struct CoinHistoryQuery {
    /// 页码 (从1开始)
    pub page: Option<u32>,
    /// 每页数量 (默认20，最大100)
    pub limit: Option<u32>,
    /// 统计起始时间
    pub start_date: Option<DateTime<Utc>>,
    /// 统计结束时间
    pub end_date: Option<DateTime<Utc>>,
}

impl CoinHistoryQuery {
    /// 获取分页偏移量
    pub fn offset(&self) -> u64 {
        let page = self.page.unwrap_or(1).max(1);
        (page as u64 - 1) * self.limit() as u64
    }

    /// 获取每页限制数量
    pub fn limit(&self) -> u32 {
        self.limit.unwrap_or(20).clamp(1, 100)
    }
}

/// 流水列表响应
#[derive(Debug, Serialize)]
pub struct CoinHistoryResponse {
    /// 流水列表
    pub transactions: Vec<CoinTransaction>,
    /// 分页信息
    pub pagination: super::PaginationInfo,
}
