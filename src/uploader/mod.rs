//! # 页面上传模块（uploader）
//!
//! ## 设计思路
//!
//! 该模块将“来源加载 → 解码编码 → 地址构造 → 网络传输”按职责拆分为多个
//! 子模块，避免单文件膨胀与耦合。
//!
//! - `handler`：编排整条处理流水线，持有配置快照
//! - `loader`：负责文件 / Base64 加载与安全校验
//! - `encoder`：负责解码、资源上限、JPEG 定质量编码
//! - `destination`：负责归档地址的路径段清洗与拼接
//! - `transport`：负责 multipart 上传与存在性探测
//! - `config/error/source`：配置、错误、中间数据模型
//!
//! ## 实现思路
//!
//! 对外仅暴露必要类型与入口函数，内部细节保持 `mod` 私有。
//! 上传与探测各自严格对应一次网络请求：不重试、不跟随重定向，
//! 失败通过显式错误返回而不是悬挂等待。
//!
//! ## 调用链
//!
//! ```text
//! main.rs（CLI）
//!    ↓
//! handler.rs（统一编排 + 阶段耗时日志）
//!    ├─ loader.rs（来源加载 + 体积/签名校验）
//!    ├─ encoder.rs（解码 + 像素/内存上限 + JPEG 编码）
//!    └─ transport.rs（multipart POST / 状态码探测）
//! ```

mod config;
pub mod destination;
mod encoder;
mod error;
mod handler;
mod loader;
mod source;
mod transport;

pub use config::UploadConfig;
pub use error::UploadError;
pub use handler::UploadHandler;
pub use source::{EncodedPage, PageSource};
