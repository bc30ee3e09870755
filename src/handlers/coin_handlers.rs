// 金币账本API处理器
// 处理余额查询、流水列表和金币消费的HTTP请求

use actix_web::{web, HttpRequest, HttpResponse};
use crate::errors::AppError;
use crate::models::{
    ApiResponse, CoinBalanceQuery, CoinBalanceResponse, CoinHistoryQuery, SpendCoinsRequest,
};
use crate::services::CoinService;
use crate::state::AppState;
use crate::utils::authenticate;

/// 查询金币余额
///
/// GET /api/v1/coins/balance?start_date=&end_date=
///
/// 需要Bearer认证
pub async fn get_balance(
    data: web::Data<AppState>,
    query: web::Query<CoinBalanceQuery>,
    req: HttpRequest,
) -> Result<HttpResponse, AppError> {
    let user = authenticate(&req, &data.db_pool).await?;

    let service = CoinService::new(data.db_pool.clone());
    let balance = service
        .balance(user.id, query.start_date, query.end_date)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(CoinBalanceResponse { balance })))
}

/// 获取金币流水列表
///
/// GET /api/v1/coins/transactions
///
/// 需要Bearer认证
pub async fn list_transactions(
    data: web::Data<AppState>,
    query: web::Query<CoinHistoryQuery>,
    req: HttpRequest,
) -> Result<HttpResponse, AppError> {
    let user = authenticate(&req, &data.db_pool).await?;

    let service = CoinService::new(data.db_pool.clone());
    let result = service.history(user.id, query.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(result)))
}

/// 消费金币
///
/// POST /api/v1/coins/spend
///
/// 需要Bearer认证；余额不足时返回400且不产生任何流水
pub async fn spend_coins(
    data: web::Data<AppState>,
    request: web::Json<SpendCoinsRequest>,
    req: HttpRequest,
) -> Result<HttpResponse, AppError> {
    let user = authenticate(&req, &data.db_pool).await?;

    let service = CoinService::new(data.db_pool.clone());
    let request = request.into_inner();
    let result = service
        .spend(user.id, request.amount, &request.description)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(result)))
}
