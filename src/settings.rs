//! 应用设置模块
//!
//! # 设计思路
//!
//! 将激活开关、归档端点、目标页面与流水线配置集中到一个 JSON 设置文件，
//! 入口在启动时读取。`enabled` 默认 false：不显式开启时程序不产生任何
//! 网络请求，只打日志后退出。
//!
//! # 实现思路
//!
//! - serde 派生，`#[serde(default)]` 容忍字段缺失与旧版本文件。
//! - 设置文件不存在时回退到默认值（即未启用状态），不视为错误。
//! - `--init` 场景下用 `save_app_settings` 落盘一份带默认配置的模板。

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::uploader::UploadConfig;

/// 应用设置。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// 激活开关。为 false 时入口直接退出，不产生任何网络请求。
    pub enabled: bool,
    /// 归档服务端点，例如 `http://localhost:8000`。
    pub endpoint: String,
    /// 合集名（目标地址第一段路径）。
    pub album: String,
    /// 页号（目标地址第二段路径，含扩展名，例如 `001.jpg`）。
    pub page: String,
    /// 图片来源：本地文件路径，或 `data:image/...;base64,` 形式的内联数据。
    pub source: String,
    /// 上传流水线配置。
    pub config: UploadConfig,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: "http://localhost:8000".to_string(),
            album: String::new(),
            page: String::new(),
            source: String::new(),
            config: UploadConfig::default(),
        }
    }
}

/// 读取设置文件。
///
/// 文件不存在时返回默认设置（未启用状态）。
pub fn load_app_settings(path: &Path) -> Result<AppSettings, AppError> {
    if !path.exists() {
        log::info!(
            "📄 设置文件 {} 不存在，使用默认设置（enabled=false）",
            path.display()
        );
        return Ok(AppSettings::default());
    }

    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content)
        .map_err(|e| AppError::Settings(format!("解析设置文件失败: {}", e)))
}

/// 写入设置文件（父目录不存在时自动创建）。
pub fn save_app_settings(path: &Path, settings: &AppSettings) -> Result<(), AppError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| AppError::Settings(format!("创建设置目录失败: {}", e)))?;
        }
    }

    let content = serde_json::to_string_pretty(settings)
        .map_err(|e| AppError::Settings(format!("序列化设置失败: {}", e)))?;

    fs::write(path, content)?;
    Ok(())
}
