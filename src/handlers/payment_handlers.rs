// 充值订单API处理器
// 处理充值订单创建与查询的HTTP请求

use actix_web::{web, HttpRequest, HttpResponse};
use crate::errors::AppError;
use crate::models::{ApiResponse, CreateTopupRequest, PaymentListQuery};
use crate::services::{DuitkuClient, PaymentService};
use crate::state::AppState;
use crate::utils::authenticate;

/// 创建金币充值订单
///
/// POST /api/v1/payments/topup
///
/// 需要Bearer认证
/// 请求体: CreateTopupRequest
/// 响应: CreateTopupResponse (含网关支付链接)
pub async fn create_topup(
    data: web::Data<AppState>,
    request: web::Json<CreateTopupRequest>,
    req: HttpRequest,
) -> Result<HttpResponse, AppError> {
    let user = authenticate(&req, &data.db_pool).await?;

    let duitku = DuitkuClient::new(data.config.duitku.clone())?;
    let service = PaymentService::new(data.db_pool.clone(), duitku, data.config.clone());

    let response = service.create_topup(&user, request.into_inner()).await?;

    log::info!(
        "Top-up order {} created for user {}",
        response.merchant_order_id,
        user.id
    );

    Ok(HttpResponse::Created().json(ApiResponse::success(response)))
}

/// 查询单个充值订单
///
/// GET /api/v1/payments/{merchant_order_id}
///
/// 需要Bearer认证，仅能查询自己的订单
pub async fn get_payment(
    data: web::Data<AppState>,
    path: web::Path<String>,
    req: HttpRequest,
) -> Result<HttpResponse, AppError> {
    let merchant_order_id = path.into_inner();
    let user = authenticate(&req, &data.db_pool).await?;

    let duitku = DuitkuClient::new(data.config.duitku.clone())?;
    let service = PaymentService::new(data.db_pool.clone(), duitku, data.config.clone());

    let payment = service.get_payment(user.id, &merchant_order_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(payment.to_response())))
}

/// 获取充值订单列表
///
/// GET /api/v1/payments
///
/// 需要Bearer认证
/// 查询参数: PaymentListQuery
pub async fn list_payments(
    data: web::Data<AppState>,
    query: web::Query<PaymentListQuery>,
    req: HttpRequest,
) -> Result<HttpResponse, AppError> {
    let user = authenticate(&req, &data.db_pool).await?;

    let duitku = DuitkuClient::new(data.config.duitku.clone())?;
    let service = PaymentService::new(data.db_pool.clone(), duitku, data.config.clone());

    let result = service.list_payments(user.id, query.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(result)))
}
