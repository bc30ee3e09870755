// 数据验证工具函数
// 提供输入数据验证和格式检查功能

use regex::Regex;
use rust_decimal::Decimal;
use crate::errors::AppError;
use crate::models::{CreateVoucherRequest, DiscountType};

/// 验证优惠码格式
///
/// 允许3-32位大写字母、数字、连字符，存储前统一转大写。
pub fn validate_voucher_code(code: &str) -> Result<String, AppError> {
    let normalized = code.trim().to_uppercase();

    let code_regex = Regex::new(r"^[A-Z0-9-]{3,32}$").expect("static regex");
    if !code_regex.is_match(&normalized) {
        return Err(AppError::Validation(
            "Voucher code must be 3-32 characters of letters, digits or '-'".to_string(),
        ));
    }

    Ok(normalized)
}

/// 验证创建优惠券请求
pub fn validate_create_voucher(request: &CreateVoucherRequest) -> Result<(), AppError> {
    if request.quota <= 0 {
        return Err(AppError::Validation("Quota must be positive".to_string()));
    }

    if request.end_date < request.start_date {
        return Err(AppError::Validation(
            "End date must not precede start date".to_string(),
        ));
    }

    if request.discount_value <= Decimal::ZERO {
        return Err(AppError::Validation(
            "Discount value must be positive".to_string(),
        ));
    }

    if request.discount_type == DiscountType::Percent && request.discount_value > Decimal::from(100)
    {
        return Err(AppError::Validation(
            "Percent discount cannot exceed 100".to_string(),
        ));
    }

    if let Some(min_purchase) = request.min_purchase {
        if min_purchase < Decimal::ZERO {
            return Err(AppError::Validation(
                "Minimum purchase cannot be negative".to_string(),
            ));
        }
    }

    if let Some(max_discount) = request.max_discount {
        if max_discount <= Decimal::ZERO {
            return Err(AppError::Validation(
                "Maximum discount must be positive".to_string(),
            ));
        }
    }

    Ok(())
}

/// 验证订单小计金额
pub fn validate_subtotal(subtotal: Decimal) -> Result<(), AppError> {
    if subtotal < Decimal::ZERO {
        return Err(AppError::Validation(
            "Subtotal cannot be negative".to_string(),
        ));
    }
    Ok(())
}

/// 验证金币消费数量与说明
pub fn validate_spend_request(amount: i64, description: &str) -> Result<(), AppError> {
    if amount <= 0 {
        return Err(AppError::Validation(
            "Spend amount must be positive".to_string(),
        ));
    }

    if description.trim().is_empty() {
        return Err(AppError::Validation(
            "Description is required".to_string(),
        ));
    }

    if description.len() > 255 {
        return Err(AppError::Validation(
            "Description is too long (max 255 characters)".to_string(),
        ));
    }

    Ok(())
}

/// 验证充值金币数量是否在配置的区间内
pub fn validate_topup_amount(coin_amount: i64, min: i64, max: i64) -> Result<(), AppError> {
    if coin_amount < min || coin_amount > max {
        return Err(AppError::Validation(format!(
            "Coin amount must be between {} and {}",
            min, max
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use crate::models::DiscountKind;

    fn sample_request() -> CreateVoucherRequest {
        CreateVoucherRequest {
            code: "HEMAT10".to_string(),
            quota: 100,
            start_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 12, 31).unwrap(),
            discount_kind: DiscountKind::PriceCut,
            discount_type: DiscountType::Percent,
            discount_value: Decimal::from(10),
            min_purchase: None,
            max_discount: Some(Decimal::from(50_000)),
        }
    }

    #[test]
    fn test_voucher_code_normalized_to_uppercase() {
        assert_eq!(validate_voucher_code(" hemat10 ").unwrap(), "HEMAT10");
    }

    #[test]
    fn test_voucher_code_rejects_bad_characters() {
        assert!(validate_voucher_code("ab").is_err());
        assert!(validate_voucher_code("CODE WITH SPACE").is_err());
        assert!(validate_voucher_code("kode_garis").is_err());
    }

    #[test]
    fn test_create_voucher_valid() {
        assert!(validate_create_voucher(&sample_request()).is_ok());
    }

    #[test]
    fn test_create_voucher_rejects_reversed_dates() {
        let mut request = sample_request();
        request.end_date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        assert!(validate_create_voucher(&request).is_err());
    }

    #[test]
    fn test_create_voucher_rejects_percent_over_100() {
        let mut request = sample_request();
        request.discount_value = Decimal::from(150);
        assert!(validate_create_voucher(&request).is_err());
    }

    #[test]
    fn test_create_voucher_rejects_zero_quota() {
        let mut request = sample_request();
        request.quota = 0;
        assert!(validate_create_voucher(&request).is_err());
    }

    #[test]
    fn test_spend_request_validation() {
        assert!(validate_spend_request(5, "AI logo generation").is_ok());
        assert!(validate_spend_request(0, "AI logo generation").is_err());
        assert!(validate_spend_request(-3, "AI logo generation").is_err());
        assert!(validate_spend_request(5, "   ").is_err());
        assert!(validate_spend_request(5, &"x".repeat(300)).is_err());
    }

    #[test]
    fn test_topup_amount_bounds() {
        assert!(validate_topup_amount(10, 10, 100).is_ok());
        assert!(validate_topup_amount(100, 10, 100).is_ok());
        assert!(validate_topup_amount(9, 10, 100).is_err());
        assert!(validate_topup_amount(101, 10, 100).is_err());
    }
}
