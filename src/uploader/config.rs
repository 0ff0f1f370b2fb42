//! # 配置模块
//!
//! ## 设计思路
//!
//! 将所有“可调策略”集中到 `UploadConfig`，保证运行时行为可观测、可调整、可测试。
//! 字段覆盖了编码质量、输入体积限制、解码资源上限与网络超时四类参数。
//!
//! ## 实现思路
//!
//! - `Default` 提供生产可用的配置（编码质量 90，即满质量的 0.9）。
//! - `validate` 统一做取值范围检查，入口在处理器创建与配置替换处。
//! - 结构体直接参与 serde 序列化，作为设置文件的 `config` 字段落盘。

use serde::{Deserialize, Serialize};

use super::UploadError;

/// 上传流水线配置。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    /// JPEG 编码质量（1~100）。
    pub jpeg_quality: u8,
    /// 读取来源字节时允许的最大体积（字节）。
    pub max_file_size: u64,
    /// 解码后的像素上限（`width * height`）。
    pub max_decoded_pixels: u64,
    /// 解码阶段允许的预计内存上限（按 RGBA 估算，字节）。
    pub max_decoded_bytes: u64,
    /// 单次请求整体超时时间（秒），上传与探测共用。
    pub request_timeout: u64,
    /// 建立连接（TCP/TLS）超时时间（秒）。
    pub connect_timeout: u64,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            jpeg_quality: 90,
            max_file_size: 50 * 1024 * 1024,
            max_decoded_pixels: 40_000_000,
            max_decoded_bytes: 160 * 1024 * 1024,
            request_timeout: 30,
            connect_timeout: 8,
        }
    }
}

impl UploadConfig {
    /// 检查各字段取值范围。
    ///
    /// 处理器创建与配置替换前都会调用；不合法的配置不允许进入运行期。
    pub fn validate(&self) -> Result<(), UploadError> {
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(UploadError::InvalidFormat(
                "jpeg_quality 必须在 1~100 之间".to_string(),
            ));
        }
        if self.max_file_size < 64 * 1024 {
            return Err(UploadError::InvalidFormat(
                "max_file_size 不能小于 64KB".to_string(),
            ));
        }
        if self.max_decoded_pixels < 1_000_000 {
            return Err(UploadError::InvalidFormat(
                "max_decoded_pixels 不能小于 1000000".to_string(),
            ));
        }
        if self.max_decoded_bytes < 8 * 1024 * 1024 {
            return Err(UploadError::InvalidFormat(
                "max_decoded_bytes 不能小于 8MB".to_string(),
            ));
        }
        if !(1..=300).contains(&self.request_timeout) {
            return Err(UploadError::InvalidFormat(
                "request_timeout 必须在 1~300 秒之间".to_string(),
            ));
        }
        if !(1..=120).contains(&self.connect_timeout) {
            return Err(UploadError::InvalidFormat(
                "connect_timeout 必须在 1~120 秒之间".to_string(),
            ));
        }
        if self.connect_timeout > self.request_timeout {
            return Err(UploadError::InvalidFormat(
                "connect_timeout 不能大于 request_timeout".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_passes_validation() {
        UploadConfig::default()
            .validate()
            .expect("default config should be valid");
    }

    #[test]
    fn validation_rejects_zero_quality() {
        let mut config = UploadConfig::default();
        config.jpeg_quality = 0;

        assert!(matches!(
            config.validate(),
            Err(UploadError::InvalidFormat(_))
        ));
    }

    #[test]
    fn validation_rejects_quality_above_hundred() {
        let mut config = UploadConfig::default();
        config.jpeg_quality = 101;

        assert!(matches!(
            config.validate(),
            Err(UploadError::InvalidFormat(_))
        ));
    }

    #[test]
    fn validation_rejects_tiny_file_size_limit() {
        let mut config = UploadConfig::default();
        config.max_file_size = 1024;

        assert!(matches!(
            config.validate(),
            Err(UploadError::InvalidFormat(_))
        ));
    }

    #[test]
    fn validation_rejects_connect_timeout_above_request_timeout() {
        let mut config = UploadConfig::default();
        config.request_timeout = 5;
        config.connect_timeout = 10;

        assert!(matches!(
            config.validate(),
            Err(UploadError::InvalidFormat(_))
        ));
    }

    #[test]
    fn config_survives_serde_roundtrip() {
        let mut config = UploadConfig::default();
        config.jpeg_quality = 75;
        config.request_timeout = 12;

        let json = serde_json::to_string(&config).expect("serialize config failed");
        let parsed: UploadConfig = serde_json::from_str(&json).expect("parse config failed");

        assert_eq!(parsed.jpeg_quality, 75);
        assert_eq!(parsed.request_timeout, 12);
        assert_eq!(parsed.max_file_size, config.max_file_size);
    }

    #[test]
    fn partial_config_json_falls_back_to_defaults() {
        let parsed: UploadConfig =
            serde_json::from_str(r#"{ "jpeg_quality": 80 }"#).expect("parse config failed");

        assert_eq!(parsed.jpeg_quality, 80);
        assert_eq!(parsed.request_timeout, UploadConfig::default().request_timeout);
    }
}
