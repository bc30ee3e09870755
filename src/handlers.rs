// API处理器模块
// 包含所有HTTP请求处理逻辑

pub mod callback_handlers;
pub mod coin_handlers;
pub mod health_handlers;
pub mod payment_handlers;
pub mod voucher_handlers;

// 重新导出处理器
pub use callback_handlers::*;
pub use coin_handlers::*;
pub use health_handlers::*;
pub use payment_handlers::*;
pub use voucher_handlers::*;
