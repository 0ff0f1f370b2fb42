//! # 错误模型模块
//!
//! ## 设计思路
//!
//! 使用单一错误枚举承载上传链路中的所有错误来源，避免字符串拼接式错误处理。
//! 通过 `thiserror` 保持人类可读错误，同时让调用侧可按分支匹配。
//!
//! 注意：上传收到 4xx/5xx 状态码**不是**错误（传输完成即视为完成），
//! 探测收到非 200 也**不是**错误（映射为 `false`）。只有传输层失败、
//! 超时与编解码失败才会出现在这里。

/// 上传流水线统一错误类型。
///
/// 该类型会在入口层被上转为 `AppError`，最终输出到日志。
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("网络错误：{0}")]
    Network(String),

    #[error("超时错误：{0}")]
    Timeout(String),

    #[error("解码错误：{0}")]
    Decode(String),

    #[error("编码错误：{0}")]
    Encode(String),

    #[error("格式错误：{0}")]
    InvalidFormat(String),

    #[error("文件错误：{0}")]
    FileSystem(String),

    #[error("资源限制：{0}")]
    ResourceLimit(String),
}
