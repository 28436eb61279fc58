//! 作业提交与自动评分平台后端
//!
//! 教师发布练习（可附参考答案 PDF），学生上传 PDF 提交，
//! 存在参考答案时提交在上传时由本地语言模型自动评分。
//!
//! # 架构
//! - `config`: 配置管理
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `middlewares`: 认证授权中间件
//! - `models`: 数据模型定义
//! - `routes`: API 路由层
//! - `runtime`: 运行时生命周期管理
//! - `services`: 业务逻辑层（含评分客户端与媒体存储）
//! - `storage`: 数据存储层（SeaORM）
//! - `utils`: 工具函数（JWT、密码、PDF 文本提取、内容识别）

pub mod config;
pub mod entity;
pub mod errors;
pub mod middlewares;
pub mod models;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_support;
