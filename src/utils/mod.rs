// 工具函数模块
// 包含签名、认证、输入验证等通用工具

pub mod auth;
pub mod crypto;
pub mod validation;

// 重新导出常用函数
pub use auth::*;
pub use crypto::*;
pub use validation::*;
