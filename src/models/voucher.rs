// 优惠券数据模型
// 定义优惠券的有效性判定与折扣计算逻辑

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

/// 优惠券模型
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Voucher {
    /// 优惠券唯一标识符
    pub id: Uuid,
    /// 所属店铺ID
    pub store_id: Uuid,
    /// 优惠码 (店铺内唯一，统一大写存储)
    pub code: String,
    /// 总发放配额
    pub quota: i32,
    /// 已使用配额
    pub quota_used: i32,
    /// 生效日期
    pub start_date: NaiveDate,
    /// 失效日期 (含当天)
    pub end_date: NaiveDate,
    /// 优惠券状态
    pub status: VoucherStatus,
    /// 折扣对象
    pub discount_kind: DiscountKind,
    /// 折扣方式
    pub discount_type: DiscountType,
    /// 折扣值 (百分比或固定金额)
    pub discount_value: Decimal,
    /// 最低消费金额
    pub min_purchase: Option<Decimal>,
    /// 百分比折扣的封顶金额
    pub max_discount: Option<Decimal>,
    /// 创建时间
    pub created_at: DateTime<Utc>,
    /// 更新时间
    pub updated_at: DateTime<Utc>,
}

/// 优惠券状态枚举
#[derive(Debug, Serialize, Deserialize, sqlx::Type, Clone, PartialEq)]
#[sqlx(type_name = "varchar")]
pub enum VoucherStatus {
    /// 生效中
    #[sqlx(rename = "active")]
    #[serde(rename = "active")]
    Active,
    /// 已停用
    #[sqlx(rename = "inactive")]
    #[serde(rename = "inactive")]
    Inactive,
    /// 已过期
    #[sqlx(rename = "expired")]
    #[serde(rename = "expired")]
    Expired,
}

/// 折扣对象枚举
#[derive(Debug, Serialize, Deserialize, sqlx::Type, Clone, Copy, PartialEq)]
#[sqlx(type_name = "varchar")]
pub enum DiscountKind {
    /// 运费减免
    #[sqlx(rename = "shipping")]
    #[serde(rename = "shipping")]
    Shipping,
    /// 商品价格减免
    #[sqlx(rename = "price_cut")]
    #[serde(rename = "price_cut")]
    PriceCut,
}

/// 折扣方式枚举
#[derive(Debug, Serialize, Deserialize, sqlx::Type, Clone, Copy, PartialEq)]
#[sqlx(type_name = "varchar")]
pub enum DiscountType {
    /// 按订单金额百分比
    #[sqlx(rename = "percent")]
    #[serde(rename = "percent")]
    Percent,
    /// 固定金额
    #[sqlx(rename = "fixed")]
    #[serde(rename = "fixed")]
    Fixed,
}

/// 校验优惠券请求
#[derive(Debug, Deserialize)]
pub struct ValidateVoucherRequest {
    /// 优惠码
    pub code: String,
    /// 购物车小计金额
    pub subtotal: Decimal,
}

/// 校验优惠券响应
#[derive(Debug, Serialize)]
pub struct VoucherDiscountResponse {
    /// 计算出的折扣金额
    pub discount: Decimal,
    /// 折扣对象
    pub kind: DiscountKind,
    /// 优惠券快照
    pub voucher: VoucherResponse,
}

/// 优惠券API展示格式
#[derive(Debug, Serialize)]
pub struct VoucherResponse {
    /// 优惠券ID
    pub id: Uuid,
    /// 优惠码
    pub code: String,
    /// 总配额
    pub quota: i32,
    /// 已使用配额
    pub quota_used: i32,
    /// 生效日期
    pub start_date: NaiveDate,
    /// 失效日期
    pub end_date: NaiveDate,
    /// 状态
    pub status: VoucherStatus,
    /// 折扣对象
    pub discount_kind: DiscountKind,
    /// 折扣方式
    pub discount_type: DiscountType,
    /// 折扣值
    pub discount_value: Decimal,
    /// 最低消费
    pub min_purchase: Option<Decimal>,
    /// 折扣封顶
    pub max_discount: Option<Decimal>,
}

/// 创建优惠券请求
#[derive(Debug, Deserialize)]
pub struct CreateVoucherRequest {
    /// 优惠码
    pub code: String,
    /// 总配额
    pub quota: i32,
    /// 生效日期
    pub start_date: NaiveDate,
    /// 失效日期
    pub end_date: NaiveDate,
    /// 折扣对象
    pub discount_kind: DiscountKind,
    /// 折扣方式
    pub discount_type: DiscountType,
    /// 折扣值
    pub discount_value: Decimal,
    /// 最低消费金额 (可选)
    pub min_purchase: Option<Decimal>,
    /// 折扣封顶金额 (可选，仅百分比折扣有意义)
    pub max_discount: Option<Decimal>,
}

/// 优惠券列表查询参数
#[derive(Debug, Deserialize)]
pub struct VoucherListQuery {
    /// 页码 (从1开始)
    pub page: Option<u32>,
    /// 每页数量 (默认20，最大100)
    pub limit: Option<u32>,
    /// 状态过滤
    pub status: Option<VoucherStatus>,
}

impl VoucherListQuery {
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

/// 优惠券列表响应
#[derive(Debug, Serialize)]
pub struct VoucherListResponse {
    /// 优惠券列表
    pub vouchers: Vec<VoucherResponse>,
    /// 分页信息
    pub pagination: super::PaginationInfo,
}

/// 优惠券不可用的具体原因
#[derive(Debug, PartialEq)]
pub enum VoucherRejection {
    /// 已被停用
    Inactive,
    /// 尚未到生效日期
    NotStarted,
    /// 已过失效日期
    Ended,
    /// 配额已用完
    QuotaExhausted,
    /// 订单金额低于最低消费
    BelowMinPurchase,
}

impl VoucherRejection {
    /// 转换为面向调用方的提示文案
    pub fn reason(&self) -> &'static str {
        match self {
            VoucherRejection::Inactive => "voucher is inactive",
            VoucherRejection::NotStarted => "voucher is not active yet",
            VoucherRejection::Ended => "voucher has expired",
            VoucherRejection::QuotaExhausted => "voucher quota has been exhausted",
            VoucherRejection::BelowMinPurchase => "subtotal is below the minimum purchase",
        }
    }
}

impl Voucher {
    /// 检查优惠券在给定日期、给定订单金额下是否可用
    ///
    /// 校验本身没有副作用，配额扣减发生在订单确认阶段。
    pub fn check_usable(&self, today: NaiveDate, subtotal: Decimal) -> Result<(), VoucherRejection> {
        match self.status {
            VoucherStatus::Active => {}
            VoucherStatus::Inactive => return Err(VoucherRejection::Inactive),
            VoucherStatus::Expired => return Err(VoucherRejection::Ended),
        }

        if today < self.start_date {
            return Err(VoucherRejection::NotStarted);
        }

        if today > self.end_date {
            return Err(VoucherRejection::Ended);
        }

        if self.quota_used >= self.quota {
            return Err(VoucherRejection::QuotaExhausted);
        }

        if let Some(min_purchase) = self.min_purchase {
            if subtotal < min_purchase {
                return Err(VoucherRejection::BelowMinPurchase);
            }
        }

        Ok(())
    }

    /// 计算折扣金额
    ///
    /// 运费券固定减免discount_value；价格券按百分比或固定金额计算，
    /// 百分比折扣受max_discount封顶。折扣不会超过订单小计。
    pub fn compute_discount(&self, subtotal: Decimal) -> Decimal {
        let discount = match (self.discount_kind, self.discount_type) {
            (DiscountKind::Shipping, _) => self.discount_value,
            (DiscountKind::PriceCut, DiscountType::Percent) => {
                let raw = subtotal * self.discount_value / Decimal::from(100);
                match self.max_discount {
                    Some(cap) if raw > cap => cap,
                    _ => raw,
                }
            }
            (DiscountKind::PriceCut, DiscountType::Fixed) => self.discount_value,
        };

        // 价格减免不超过订单小计
        if self.discount_kind == DiscountKind::PriceCut && discount > subtotal {
            subtotal
        } else {
            discount
        }
    }

    /// 转换为API响应格式
    pub fn to_response(&self) -> VoucherResponse {
        VoucherResponse {
            id: self.id,
            code: self.code.clone(),
            quota: self.quota,
            quota_used: self.quota_used,
            start_date: self.start_date,
            end_date: self.end_date,
            status: self.status.clone(),
            discount_kind: self.discount_kind,
            discount_type: self.discount_type,
            discount_value: self.discount_value,
            min_purchase: self.min_purchase,
            max_discount: self.max_discount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_voucher() -> Voucher {
        Voucher {
            id: Uuid::new_v4(),
            store_id: Uuid::new_v4(),
            code: "HEMAT10".to_string(),
            quota: 100,
            quota_used: 0,
            start_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 12, 31).unwrap(),
            status: VoucherStatus::Active,
            discount_kind: DiscountKind::PriceCut,
            discount_type: DiscountType::Percent,
            discount_value: Decimal::from(10),
            min_purchase: None,
            max_discount: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn mid_year() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 6, 15).unwrap()
    }

    #[test]
    fn test_percent_discount_clamped_to_max_discount() {
        let mut voucher = sample_voucher();
        voucher.max_discount = Some(Decimal::from(50_000));

        // 10% of 1,000,000 = 100,000，封顶为50,000
        let discount = voucher.compute_discount(Decimal::from(1_000_000));
        assert_eq!(discount, Decimal::from(50_000));
    }

    #[test]
    fn test_percent_discount_below_cap_unchanged() {
        let mut voucher = sample_voucher();
        voucher.max_discount = Some(Decimal::from(50_000));

        let discount = voucher.compute_discount(Decimal::from(200_000));
        assert_eq!(discount, Decimal::from(20_000));
    }

    #[test]
    fn test_fixed_discount_ignores_cap() {
        let mut voucher = sample_voucher();
        voucher.discount_type = DiscountType::Fixed;
        voucher.discount_value = Decimal::from(15_000);
        voucher.max_discount = Some(Decimal::from(5_000));

        let discount = voucher.compute_discount(Decimal::from(100_000));
        assert_eq!(discount, Decimal::from(15_000));
    }

    #[test]
    fn test_fixed_discount_never_exceeds_subtotal() {
        let mut voucher = sample_voucher();
        voucher.discount_type = DiscountType::Fixed;
        voucher.discount_value = Decimal::from(15_000);

        let discount = voucher.compute_discount(Decimal::from(10_000));
        assert_eq!(discount, Decimal::from(10_000));
    }

    #[test]
    fn test_shipping_discount_is_flat() {
        let mut voucher = sample_voucher();
        voucher.discount_kind = DiscountKind::Shipping;
        voucher.discount_type = DiscountType::Fixed;
        voucher.discount_value = Decimal::from(9_000);

        let discount = voucher.compute_discount(Decimal::from(3_000));
        assert_eq!(discount, Decimal::from(9_000));
    }

    #[test]
    fn test_check_usable_happy_path() {
        let voucher = sample_voucher();
        assert!(voucher.check_usable(mid_year(), Decimal::from(10_000)).is_ok());
    }

    #[test]
    fn test_check_usable_rejects_inactive() {
        let mut voucher = sample_voucher();
        voucher.status = VoucherStatus::Inactive;
        assert_eq!(
            voucher.check_usable(mid_year(), Decimal::from(10_000)),
            Err(VoucherRejection::Inactive)
        );
    }

    #[test]
    fn test_check_usable_rejects_outside_date_range() {
        let voucher = sample_voucher();

        let before = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
        assert_eq!(
            voucher.check_usable(before, Decimal::from(10_000)),
            Err(VoucherRejection::NotStarted)
        );

        let after = NaiveDate::from_ymd_opt(2027, 1, 1).unwrap();
        assert_eq!(
            voucher.check_usable(after, Decimal::from(10_000)),
            Err(VoucherRejection::Ended)
        );
    }

    #[test]
    fn test_check_usable_boundary_dates_inclusive() {
        let voucher = sample_voucher();
        assert!(voucher
            .check_usable(voucher.start_date, Decimal::from(10_000))
            .is_ok());
        assert!(voucher
            .check_usable(voucher.end_date, Decimal::from(10_000))
            .is_ok());
    }

    #[test]
    fn test_check_usable_rejects_exhausted_quota() {
        let mut voucher = sample_voucher();
        voucher.quota = 5;
        voucher.quota_used = 5;
        assert_eq!(
            voucher.check_usable(mid_year(), Decimal::from(10_000)),
            Err(VoucherRejection::QuotaExhausted)
        );
    }

    #[test]
    fn test_check_usable_rejects_below_min_purchase() {
        let mut voucher = sample_voucher();
        voucher.min_purchase = Some(Decimal::from(50_000));
        assert_eq!(
            voucher.check_usable(mid_year(), Decimal::from(49_999)),
            Err(VoucherRejection::BelowMinPurchase)
        );
        assert!(voucher.check_usable(mid_year(), Decimal::from(50_000)).is_ok());
    }

    #[test]
    fn test_list_query_pagination_defaults() {
        let query = VoucherListQuery {
            page: None,
            limit: Some(500),
            status: None,
        };
        assert_eq!(query.limit(), 100);
        assert_eq!(query.offset(), 0);
    }

    #[test]
    fn test_list_query_huge_page_does_not_overflow() {
        let query = VoucherListQuery {
            page: Some(u32::MAX),
            limit: Some(100),
            status: None,
        };
        assert_eq!(query.offset(), (u32::MAX as u64 - 1) * 100);
    }
}
