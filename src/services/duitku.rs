// Duitku支付网关客户端
// 负责创建支付链接，网关按不透明HTTP服务对待

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use crate::config::DuitkuConfig;
use crate::errors::AppError;
use crate::utils::inquiry_signature;

/// 网关发起交易请求
#[derive(Debug, Serialize)]
struct InquiryRequest {
    #[serde(rename = "merchantCode")]
    merchant_code: String,
    #[serde(rename = "paymentAmount")]
    payment_amount: i64,
    #[serde(rename = "merchantOrderId")]
    merchant_order_id: String,
    #[serde(rename = "productDetails")]
    product_details: String,
    email: String,
    #[serde(rename = "callbackUrl")]
    callback_url: String,
    #[serde(rename = "returnUrl")]
    return_url: String,
    #[serde(rename = "expiryPeriod")]
    expiry_period: u32,
    signature: String,
}

/// 网关发起交易响应
#[derive(Debug, Deserialize)]
struct InquiryResponse {
    #[serde(rename = "statusCode")]
    status_code: String,
    #[serde(rename = "statusMessage")]
    status_message: Option<String>,
    reference: Option<String>,
    #[serde(rename = "paymentUrl")]
    payment_url: Option<String>,
}

/// 创建好的网关交易
#[derive(Debug, Clone)]
pub struct GatewayInvoice {
    /// 网关交易参考号
    pub reference: String,
    /// 支付页面URL
    pub payment_url: String,
}

/// Duitku网关客户端
#[derive(Clone)]
pub struct DuitkuClient {
    client: Client,
    config: DuitkuConfig,
}

impl DuitkuClient {
    /// 创建新的网关客户端实例
    ///
    /// 请求超时受配置约束，调用失败直接上抛，不做内部重试。
    pub fn new(config: DuitkuConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .user_agent("TokoPay/1.0")
            .build()
            .map_err(AppError::internal)?;

        Ok(Self { client, config })
    }

    /// 在网关侧创建支付交易
    ///
    /// # Arguments
    /// * `merchant_order_id` - 商户订单号
    /// * `amount` - 支付金额 (印尼盾)
    /// * `product_details` - 商品说明
    /// * `email` - 付款人邮箱
    pub async fn create_invoice(
        &self,
        merchant_order_id: &str,
        amount: i64,
        product_details: &str,
        email: &str,
    ) -> Result<GatewayInvoice, AppError> {
        let signature = inquiry_signature(
            &self.config.merchant_code,
            merchant_order_id,
            amount,
            &self.config.api_key,
        );

        let request = InquiryRequest {
            merchant_code: self.config.merchant_code.clone(),
            payment_amount: amount,
            merchant_order_id: merchant_order_id.to_string(),
            product_details: product_details.to_string(),
            email: email.to_string(),
            callback_url: self.config.callback_url.clone(),
            return_url: self.config.return_url.clone(),
            expiry_period: self.config.expiry_minutes,
            signature,
        };

        let url = format!("{}/merchant/v2/inquiry", self.config.base_url);

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::Gateway(format!("inquiry request failed: {}", e)))?;

        let http_status = response.status();
        if !http_status.is_success() {
            return Err(AppError::Gateway(format!(
                "inquiry returned HTTP {}",
                http_status
            )));
        }

        let body: InquiryResponse = response
            .json()
            .await
            .map_err(|e| AppError::Gateway(format!("invalid inquiry response: {}", e)))?;

        if body.status_code != "00" {
            let message = body
                .status_message
                .unwrap_or_else(|| "unknown gateway error".to_string());
            return Err(AppError::Gateway(format!(
                "inquiry rejected ({}): {}",
                body.status_code, message
            )));
        }

        let reference = body
            .reference
            .ok_or_else(|| AppError::Gateway("inquiry response missing reference".to_string()))?;
        let payment_url = body
            .payment_url
            .ok_or_else(|| AppError::Gateway("inquiry response missing payment URL".to_string()))?;

        Ok(GatewayInvoice {
            reference,
            payment_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn test_client_creation() {
        let config = Config::default();
        assert!(DuitkuClient::new(config.duitku).is_ok());
    }

    #[test]
    fn test_inquiry_request_serialization_uses_gateway_field_names() {
        let request = InquiryRequest {
            merchant_code: "DS12345".to_string(),
            payment_amount: 150_000,
            merchant_order_id: "TOPUP-001".to_string(),
            product_details: "150 coins".to_string(),
            email: "buyer@example.com".to_string(),
            callback_url: "https://example.com/callback".to_string(),
            return_url: "https://example.com/finish".to_string(),
            expiry_period: 60,
            signature: "abc".to_string(),
        };

        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("merchantCode"));
        assert!(json.contains("paymentAmount"));
        assert!(json.contains("merchantOrderId"));
        assert!(json.contains("expiryPeriod"));
    }
}
