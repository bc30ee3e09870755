// 优惠券API处理器
// 处理优惠券校验、核销与店铺侧管理的HTTP请求

use actix_web::{web, HttpRequest, HttpResponse};
use uuid::Uuid;
use crate::errors::AppError;
use crate::models::{ApiResponse, CreateVoucherRequest, ValidateVoucherRequest, VoucherListQuery};
use crate::services::VoucherService;
use crate::state::AppState;
use crate::utils::{authenticate, load_store};

/// 校验优惠券并计算折扣
///
/// POST /api/v1/stores/{store_id}/vouchers/validate
///
/// 需要Bearer认证；无副作用，配额不在此处扣减
pub async fn validate_voucher(
    data: web::Data<AppState>,
    path: web::Path<Uuid>,
    request: web::Json<ValidateVoucherRequest>,
    req: HttpRequest,
) -> Result<HttpResponse, AppError> {
    let store_id = path.into_inner();
    let user = authenticate(&req, &data.db_pool).await?;
    // 店铺不存在时同样返回404，避免跨店铺探测优惠码
    load_store(&data.db_pool, store_id, user.id, false).await?;

    let service = VoucherService::new(data.db_pool.clone());
    let request = request.into_inner();
    let result = service
        .validate_voucher(store_id, &request.code, request.subtotal)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(result)))
}

/// 核销优惠券 (订单确认时调用)
///
/// POST /api/v1/stores/{store_id}/vouchers/{code}/redeem
///
/// 需要Bearer认证
pub async fn redeem_voucher(
    data: web::Data<AppState>,
    path: web::Path<(Uuid, String)>,
    req: HttpRequest,
) -> Result<HttpResponse, AppError> {
    let (store_id, code) = path.into_inner();
    let user = authenticate(&req, &data.db_pool).await?;
    load_store(&data.db_pool, store_id, user.id, false).await?;

    let service = VoucherService::new(data.db_pool.clone());
    let voucher = service.redeem_voucher(store_id, &code).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(voucher)))
}

/// 创建优惠券
///
/// POST /api/v1/stores/{store_id}/vouchers
///
/// 需要Bearer认证，仅店主可操作
pub async fn create_voucher(
    data: web::Data<AppState>,
    path: web::Path<Uuid>,
    request: web::Json<CreateVoucherRequest>,
    req: HttpRequest,
) -> Result<HttpResponse, AppError> {
    let store_id = path.into_inner();
    let user = authenticate(&req, &data.db_pool).await?;
    load_store(&data.db_pool, store_id, user.id, true).await?;

    let service = VoucherService::new(data.db_pool.clone());
    let voucher = service.create_voucher(store_id, request.into_inner()).await?;

    Ok(HttpResponse::Created().json(ApiResponse::success(voucher)))
}

/// 获取店铺的优惠券列表
///
/// GET /api/v1/stores/{store_id}/vouchers
///
/// 需要Bearer认证，仅店主可操作
pub async fn list_vouchers(
    data: web::Data<AppState>,
    path: web::Path<Uuid>,
    query: web::Query<VoucherListQuery>,
    req: HttpRequest,
) -> Result<HttpResponse, AppError> {
    let store_id = path.into_inner();
    let user = authenticate(&req, &data.db_pool).await?;
    load_store(&data.db_pool, store_id, user.id, true).await?;

    let service = VoucherService::new(data.db_pool.clone());
    // 列表前同步一次过期标记，让状态列与日期一致
    service.mark_expired_vouchers(store_id).await?;
    let result = service.list_vouchers(store_id, query.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(result)))
}
