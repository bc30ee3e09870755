// 支付网关回调处理器
// 处理Duitku的支付结果通知，回调入口不走Bearer认证

use actix_web::{web, HttpResponse};
use crate::errors::AppError;
use crate::models::{ApiResponse, DuitkuCallback};
use crate::services::{DuitkuClient, PaymentService};
use crate::state::AppState;

/// 接收网关支付结果回调
///
/// POST /api/v1/payments/callback
///
/// 无需认证，安全性由载荷签名保证：
/// - 验签失败返回400且不改变任何状态
/// - 未知订单返回404
/// - 重复投递幂等应答200，不会重复记账
pub async fn payment_callback(
    data: web::Data<AppState>,
    form: web::Form<DuitkuCallback>,
) -> Result<HttpResponse, AppError> {
    let callback = form.into_inner();

    log::info!(
        "Received gateway callback for order {} (result code {})",
        callback.merchant_order_id,
        callback.result_code
    );

    let duitku = DuitkuClient::new(data.config.duitku.clone())?;
    let service = PaymentService::new(data.db_pool.clone(), duitku, data.config.clone());

    let ack = service.process_callback(callback).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(ack)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};
    use crate::state::AppState;

    #[actix_web::test]
    #[ignore = "requires a live Postgres instance"]
    async fn test_callback_with_bad_signature_returns_400() {
        let app_state = AppState::new_for_test().await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(app_state))
                .route("/payments/callback", web::post().to(payment_callback)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/payments/callback")
            .set_form(&[
                ("merchantCode", "DS12345"),
                ("amount", "150000"),
                ("merchantOrderId", "TOPUP-001"),
                ("resultCode", "00"),
                ("signature", "deadbeef"),
            ])
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 400);
    }
}
