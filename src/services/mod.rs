// 服务层模块
// 包含所有业务逻辑服务

pub mod coin_service;
pub mod duitku;
pub mod payment_service;
pub mod voucher_service;

// 重新导出服务
pub use coin_service::CoinService;
pub use duitku::DuitkuClient;
pub use payment_service::PaymentService;
pub use voucher_service::VoucherService;
