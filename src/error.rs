//! 统一错误类型模块
//!
//! # 设计思路
//!
//! 定义全局统一的 `AppError` 枚举，替代各调用点分散的
//! `.map_err(|e| e.to_string())`、`format!(...)`、`expect()` 等不一致模式。
//! 入口路径（CLI）统一返回 `Result<T, AppError>`。
//!
//! # 实现思路
//!
//! - 使用 `thiserror` 派生可读错误消息。
//! - 为 `UploadError` 与 `std::io::Error` 提供 `From` 转换，无需手动 map。

use crate::uploader::UploadError;

/// 应用级统一错误类型
///
/// 入口路径的所有可失败操作均汇聚到此类型，日志输出一致的错误格式。
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// 上传流水线错误（加载 / 编码 / 传输）
    #[error("{0}")]
    Upload(#[from] UploadError),

    /// 文件系统 I/O 错误
    #[error("文件系统错误: {0}")]
    Io(#[from] std::io::Error),

    /// 设置文件读写或解析失败
    #[error("设置错误: {0}")]
    Settings(String),

    /// 命令行参数错误
    #[error("参数错误: {0}")]
    Cli(String),
}
