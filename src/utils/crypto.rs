// 签名工具函数
// 提供Duitku回调签名计算与常量时间校验

use sha2::{Digest, Sha256};
use rand::{distributions::Alphanumeric, Rng};

/// 计算回调签名
///
/// 签名 = hex(sha256(merchant_code + amount + merchant_order_id + api_key))，
/// amount按网关发送的原始字符串参与拼接。
pub fn callback_signature(
    merchant_code: &str,
    amount: &str,
    merchant_order_id: &str,
    api_key: &str,
) -> String {
    let mut hasher = Sha256::new();
    hasher.update(merchant_code.as_bytes());
    hasher.update(amount.as_bytes());
    hasher.update(merchant_order_id.as_bytes());
    hasher.update(api_key.as_bytes());
    hex::encode(hasher.finalize())
}

/// 校验回调签名
///
/// 大小写不敏感 (网关侧十六进制大小写不稳定)，比较使用常量时间实现。
pub fn verify_callback_signature(
    merchant_code: &str,
    amount: &str,
    merchant_order_id: &str,
    api_key: &str,
    signature: &str,
) -> bool {
    let expected = callback_signature(merchant_code, amount, merchant_order_id, api_key);
    constant_time_eq(&expected, &signature.to_lowercase())
}

/// 计算交易请求签名 (创建订单时发往网关)
///
/// 签名 = hex(sha256(merchant_code + merchant_order_id + amount + api_key))。
pub fn inquiry_signature(
    merchant_code: &str,
    merchant_order_id: &str,
    amount: i64,
    api_key: &str,
) -> String {
    let mut hasher = Sha256::new();
    hasher.update(merchant_code.as_bytes());
    hasher.update(merchant_order_id.as_bytes());
    hasher.update(amount.to_string().as_bytes());
    hasher.update(api_key.as_bytes());
    hex::encode(hasher.finalize())
}

/// 常量时间字符串比较 (防止时序攻击)
fn constant_time_eq(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (byte_a, byte_b) in a.bytes().zip(b.bytes()) {
        result |= byte_a ^ byte_b;
    }

    result == 0
}

/// 生成商户订单号
///
/// 格式: TOPUP-<UTC时间戳>-<8位随机后缀>，随机后缀避免同秒冲突，
/// 唯一性最终由数据库唯一索引保证。
pub fn generate_merchant_order_id() -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(8)
        .map(char::from)
        .collect();

    format!(
        "TOPUP-{}-{}",
        chrono::Utc::now().format("%Y%m%d%H%M%S"),
        suffix.to_uppercase()
    )
}
