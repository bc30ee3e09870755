// 充值订单数据模型
// 定义支付交易的状态机与Duitku回调载荷

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use chrono::{DateTime, Utc};

/// 充值订单模型
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct PaymentTransaction {
    /// 订单唯一标识符
    pub id: Uuid,
    /// 所属用户ID
    pub user_id: Uuid,
    /// 商户订单号 (全局唯一，回调按它定位订单)
    pub merchant_order_id: String,
    /// 网关返回的交易参考号
    pub reference: Option<String>,
    /// 支付金额 (印尼盾)
    pub amount: i64,
    /// 购买的金币数量
    pub coin_amount: i64,
    /// 订单状态
    pub status: PaymentStatus,
    /// 网关结果码
    pub result_code: Option<String>,
    /// 创建时间
    pub created_at: DateTime<Utc>,
    /// 更新时间
    pub updated_at: DateTime<Utc>,
}

/// 订单状态枚举
///
/// 状态机: pending -> {success, failed, expired}，终态不再迁移。
#[derive(Debug, Serialize, Deserialize, sqlx::Type, Clone, PartialEq)]
#[sqlx(type_name = "varchar")]
pub enum PaymentStatus {
    /// 待支付状态
    #[sqlx(rename = "pending")]
    #[serde(rename = "pending")]
    Pending,
    /// 支付成功状态
    #[sqlx(rename = "success")]
    #[serde(rename = "success")]
    Success,
    /// 支付失败状态
    #[sqlx(rename = "failed")]
    #[serde(rename = "failed")]
    Failed,
    /// 已过期状态
    #[sqlx(rename = "expired")]
    #[serde(rename = "expired")]
    Expired,
}

impl PaymentStatus {
    /// 是否为终态
    pub fn is_terminal(&self) -> bool {
        !matches!(self, PaymentStatus::Pending)
    }

    /// 根据网关结果码映射订单状态
    ///
    /// "00"表示支付成功，"02"表示订单过期，其余一律视为失败。
    pub fn from_result_code(result_code: &str) -> Self {
        match result_code {
            "00" => PaymentStatus::Success,
            "02" => PaymentStatus::Expired,
            _ => PaymentStatus::Failed,
        }
    }
}

/// 创建充值订单请求
#[derive(Debug, Deserialize)]
pub struct CreateTopupRequest {
    /// 购买金币数量
    pub coin_amount: i64,
}

/// 创建充值订单响应
#[derive(Debug, Serialize)]
pub struct CreateTopupResponse {
    /// 商户订单号
    pub merchant_order_id: String,
    /// 网关交易参考号
    pub reference: String,
    /// 支付页面URL (引导用户跳转)
    pub payment_url: String,
    /// 支付金额 (印尼盾)
    pub amount: i64,
    /// 购买金币数量
    pub coin_amount: i64,
}

/// 订单查询响应
#[derive(Debug, Serialize)]
pub struct PaymentResponse {
    /// 订单ID
    pub id: Uuid,
    /// 商户订单号
    pub merchant_order_id: String,
    /// 网关交易参考号
    pub reference: Option<String>,
    /// 支付金额 (印尼盾)
    pub amount: i64,
    /// 购买金币数量
    pub coin_amount: i64,
    /// 订单状态
    pub status: PaymentStatus,
    /// 网关结果码
    pub result_code: Option<String>,
    /// 创建时间
    pub created_at: DateTime<Utc>,
    /// 更新时间
    pub updated_at: DateTime<Utc>,
}

impl PaymentTransaction {
    /// 转换为API响应格式
    pub fn to_response(&self) -> PaymentResponse {
        PaymentResponse {
            id: self.id,
            merchant_order_id: self.merchant_order_id.clone(),
            reference: self.reference.clone(),
            amount: self.amount,
            coin_amount: self.coin_amount,
            status: self.status.clone(),
            result_code: self.result_code.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// 订单列表查询参数
#[derive(Debug, Deserialize)]
pub struct PaymentListQuery {
    /// 页码 (从1开始)
    pub page: Option<u32>,
    /// 每页数量 (默认20，最大100)
    pub limit: Option<u32>,
    /// 状态过滤
    pub status: Option<PaymentStatus>,
}

impl PaymentListQuery {
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

/// 订单列表响应
#[derive(Debug, Serialize)]
pub struct PaymentListResponse {
    /// 订单列表
    pub payments: Vec<PaymentResponse>,
    /// 分页信息
    pub pagination: super::PaginationInfo,
}

/// Duitku回调载荷 (网关以表单编码POST)
#[derive(Debug, Deserialize, Clone)]
pub struct DuitkuCallback {
    /// 商户代码
    #[serde(rename = "merchantCode")]
    pub merchant_code: String,
    /// 支付金额 (印尼盾，签名按原始字符串参与计算)
    pub amount: String,
    /// 商户订单号
    #[serde(rename = "merchantOrderId")]
    pub merchant_order_id: String,
    /// 结果码
    #[serde(rename = "resultCode")]
    pub result_code: String,
    /// 网关交易参考号
    pub reference: Option<String>,
    /// 回调签名
    pub signature: String,
}

/// 回调处理结果
#[derive(Debug, Serialize)]
pub struct CallbackAck {
    /// 商户订单号
    pub merchant_order_id: String,
    /// 处理后的订单状态
    pub status: PaymentStatus,
    /// 本次回调是否为重复投递 (重复投递不再记账)
    pub replayed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_query_huge_page_does_not_overflow() {
        let query = PaymentListQuery {
            page: Some(u32::MAX),
            limit: Some(100),
            status: None,
        };
        assert_eq!(query.offset(), (u32::MAX as u64 - 1) * 100);
    }

    #[test]
    fn test_result_code_mapping() {
        assert_eq!(PaymentStatus::from_result_code("00"), PaymentStatus::Success);
        assert_eq!(PaymentStatus::from_result_code("02"), PaymentStatus::Expired);
        assert_eq!(PaymentStatus::from_result_code("01"), PaymentStatus::Failed);
        assert_eq!(PaymentStatus::from_result_code("EE"), PaymentStatus::Failed);
    }

    #[test]
    fn test_terminal_states() {
        assert!(!PaymentStatus::Pending.is_terminal());
        assert!(PaymentStatus::Success.is_terminal());
        assert!(PaymentStatus::Failed.is_terminal());
        assert!(PaymentStatus::Expired.is_terminal());
    }
}
