// API路由配置
// 定义所有HTTP接口的路由规则

use actix_web::{web, Scope};
use crate::handlers::*;

/// API v1路由配置
pub fn api_v1_routes() -> Scope {
    web::scope("/api/v1")
        // 店铺优惠券路由
        .service(voucher_routes())
        // 金币账本路由
        .service(coin_routes())
        // 充值订单路由 (含网关回调)
        .service(payment_routes())
        // 系统信息路由
        .route("/version", web::get().to(version_info))
}

/// 店铺优惠券路由
fn voucher_routes() -> Scope {
    web::scope("/stores/{store_id}/vouchers")
        .route("", web::post().to(create_voucher))
        .route("", web::get().to(list_vouchers))
        .route("/validate", web::post().to(validate_voucher))
        .route("/{code}/redeem", web::post().to(redeem_voucher))
}

/// 金币账本路由
fn coin_routes() -> Scope {
    web::scope("/coins")
        .route("/balance", web::get().to(get_balance))
        .route("/transactions", web::get().to(list_transactions))
        .route("/spend", web::post().to(spend_coins))
}

/// 充值订单路由
fn payment_routes() -> Scope {
    web::scope("/payments")
        .route("/topup", web::post().to(create_topup))
        // 网关回调，验签代替认证
        .route("/callback", web::post().to(payment_callback))
        .route("", web::get().to(list_payments))
        .route("/{merchant_order_id}", web::get().to(get_payment))
}

/// 公共路由 (无需认证)
pub fn public_routes() -> Scope {
    web::scope("")
        .route("/health", web::get().to(health_check))
}
