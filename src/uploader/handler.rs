//! # 核心编排模块
//!
//! ## 设计思路
//!
//! `UploadHandler` 只负责流程编排与配置管理，不直接与 CLI 绑定。
//! 处理链路固定为：
//! 1. 读取配置快照
//! 2. 按来源加载原始字节
//! 3. 编码为 JPEG
//! 4. multipart 上传（一次请求）
//!
//! 存在性探测作为并列入口暴露，是否先探测由调用方决定。
//!
//! ## 实现思路
//!
//! - 配置通过 `Arc<RwLock<UploadConfig>>` 支持运行时替换。
//! - 单次请求内使用“同一配置快照”，避免处理中途配置漂移。
//! - 记录 `load/encode/upload/total` 阶段耗时，便于性能诊断。

use std::sync::{Arc, RwLock};
use std::time::Instant;

use super::source::RawImageData;
use super::{EncodedPage, PageSource, UploadConfig, UploadError, encoder, loader, transport};

/// 页面上传处理器。
///
/// 封装配置状态，并编排各子模块实现完整流程。
pub struct UploadHandler {
    config: Arc<RwLock<UploadConfig>>,
}

impl UploadHandler {
    /// 根据初始配置创建处理器。配置先经过范围校验。
    ///
    /// # 示例
    /// ```rust,no_run
    /// use page_uploader::uploader::{UploadConfig, UploadHandler};
    ///
    /// let handler = UploadHandler::new(UploadConfig::default())?;
    /// # Ok::<(), page_uploader::uploader::UploadError>(())
    /// ```
    pub fn new(config: UploadConfig) -> Result<Self, UploadError> {
        config.validate()?;
        Ok(Self {
            config: Arc::new(RwLock::new(config)),
        })
    }

    /// 获取配置快照。
    ///
    /// 作用：保证单次请求链路使用一致参数。
    fn config_snapshot(&self) -> Result<UploadConfig, UploadError> {
        self.config
            .read()
            .map(|cfg| cfg.clone())
            .map_err(|_| UploadError::ResourceLimit("配置读取锁已中毒".to_string()))
    }

    /// 读取当前生效配置。
    pub fn current_config(&self) -> Result<UploadConfig, UploadError> {
        self.config_snapshot()
    }

    /// 整体替换运行期配置（先校验后生效）。
    pub fn set_config(&self, config: UploadConfig) -> Result<(), UploadError> {
        config.validate()?;

        let mut guard = self
            .config
            .write()
            .map_err(|_| UploadError::ResourceLimit("配置写入锁已中毒".to_string()))?;
        *guard = config;

        log::info!(
            "⚙️ 已更新上传配置（quality={}, request_timeout={}s, connect_timeout={}s）",
            guard.jpeg_quality,
            guard.request_timeout,
            guard.connect_timeout
        );

        Ok(())
    }

    /// 仅执行“加载 + 编码”，返回可上传的 JPEG 数据。
    ///
    /// # 示例
    /// ```rust,no_run
    /// use page_uploader::uploader::{PageSource, UploadConfig, UploadHandler};
    ///
    /// let handler = UploadHandler::new(UploadConfig::default())?;
    /// let page = handler.encode_source(&PageSource::FilePath("C:/tmp/page.png".into()))?;
    /// assert!(page.width > 0);
    /// # Ok::<(), page_uploader::uploader::UploadError>(())
    /// ```
    pub fn encode_source(&self, source: &PageSource) -> Result<EncodedPage, UploadError> {
        let config = self.config_snapshot()?;
        let raw = Self::load_source(source, &config)?;
        encoder::encode_page(&raw, &config)
    }

    /// 处理主入口：从任意来源加载页面并上传到目标地址。
    ///
    /// 返回上传响应的数字状态码（按约定非 2xx 也视为完成）。
    ///
    /// # 示例
    /// ```rust,no_run
    /// use page_uploader::uploader::{PageSource, UploadConfig, UploadHandler};
    ///
    /// # async fn demo() -> Result<(), page_uploader::uploader::UploadError> {
    /// let handler = UploadHandler::new(UploadConfig::default())?;
    /// let status = handler
    ///     .upload_page(
    ///         &PageSource::FilePath("C:/tmp/page.png".into()),
    ///         "http://localhost:8000/album/001.jpg",
    ///     )
    ///     .await?;
    /// assert!(status >= 100);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn upload_page(&self, source: &PageSource, url: &str) -> Result<u16, UploadError> {
        let config = self.config_snapshot()?;
        let total_start = Instant::now();

        let load_start = Instant::now();
        let raw = Self::load_source(source, &config)?;
        let load_elapsed = load_start.elapsed();

        let encode_start = Instant::now();
        let page = encoder::encode_page(&raw, &config)?;
        let encode_elapsed = encode_start.elapsed();

        let upload_start = Instant::now();
        let status = transport::post_multipart(url, &page, &config).await?;
        let upload_elapsed = upload_start.elapsed();

        let total_elapsed = total_start.elapsed();
        log::info!(
            "✅ 页面处理完成 - load={}ms encode={}ms upload={}ms total={}ms status={}",
            load_elapsed.as_millis(),
            encode_elapsed.as_millis(),
            upload_elapsed.as_millis(),
            total_elapsed.as_millis(),
            status
        );

        Ok(status)
    }

    /// 探测目标地址是否返回 200（且仅当 200 时为 `true`）。
    pub async fn page_exists(&self, url: &str) -> Result<bool, UploadError> {
        let config = self.config_snapshot()?;
        transport::get_probe(url, &config).await
    }

    fn load_source(source: &PageSource, config: &UploadConfig) -> Result<RawImageData, UploadError> {
        match source {
            PageSource::FilePath(path) => loader::read_source_file(path, config),
            PageSource::Base64(data) => loader::decode_base64_source(data, config),
        }
    }
}
