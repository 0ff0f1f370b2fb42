//! # 页面上传工具 — 库入口
//!
//! ## 架构总览
//!
//! ```text
//! main.rs（CLI 入口：参数解析 + 激活开关判断）
//!    ↓
//! settings ── settings.json 读写（enabled / endpoint / 合集 / 页号 / 配置）
//!    ↓
//! uploader（核心流水线）
//!    ├─ loader       来源加载（文件 / Base64）+ 体积与签名校验
//!    ├─ encoder      解码 + 资源上限 + JPEG 定质量编码
//!    ├─ destination  归档地址构造（路径段清洗 + 百分号转义）
//!    ├─ transport    multipart 上传 + 存在性探测（各一次请求）
//!    └─ handler      流程编排 + 配置快照
//! ```
//!
//! ## 模块职责
//!
//! | 模块 | 职责 |
//! |------|------|
//! | [`error`] | 统一错误类型 `AppError`，入口路径的返回类型 |
//! | [`settings`] | 设置文件读写，激活开关与流水线配置的载体 |
//! | [`uploader`] | 加载图片、编码为 JPEG、上传到归档服务、探测远端是否已存在 |

pub mod error;
pub mod settings;
pub mod uploader;
