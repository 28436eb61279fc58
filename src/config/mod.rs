//! 配置管理
//!
//! 配置在启动时加载一次，之后以 `web::Data<AppConfig>` 或构造参数的形式显式传递。

mod r#impl;
mod structs;

pub use structs::*;
