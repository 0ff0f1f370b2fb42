//! # 网络传输模块
//!
//! ## 设计思路
//!
//! 上传与存在性探测各自严格对应一次 HTTP 请求：不重试、不退避、不跟随
//! 重定向。上传的完成信号与状态码无关（4xx/5xx 一视同仁），探测只消费
//! 数字状态码。传输层失败与超时通过显式错误返回，调用方不会无限等待。
//!
//! ## 实现思路
//!
//! - 客户端按当次配置构建：整体超时 + 连接超时 + 重定向策略关闭。
//! - 上传体为单分片 multipart 表单，字段名与文件名为固定常量。
//! - reqwest 错误统一映射到 `UploadError` 的 Timeout/Network 分支。

use reqwest::multipart;
use std::time::Duration;

use super::source::EncodedPage;
use super::{UploadConfig, UploadError};

/// multipart 表单中图片分片的字段名（与归档服务约定一致）。
const UPLOAD_FIELD_NAME: &str = "imagefile";
/// 上传分片携带的文件名。服务端只读字节不读文件名，扩展名与实际的
/// JPEG 内容不一致属于既有线上行为，保持原样。
const UPLOAD_FILE_NAME: &str = "test.png";
/// 上传分片的媒体类型。
const UPLOAD_MIME_TYPE: &str = "image/jpeg";

/// 将编码后的页面以 multipart 表单 POST 到目标地址。
///
/// 返回值是响应的数字状态码；只要传输层完成，无论状态码如何都视为完成。
pub(super) async fn post_multipart(
    url: &str,
    page: &EncodedPage,
    config: &UploadConfig,
) -> Result<u16, UploadError> {
    let parsed = reqwest::Url::parse(url)
        .map_err(|e| UploadError::InvalidFormat(format!("上传地址无效：{}", e)))?;

    let client = build_http_client(config)?;

    let part = multipart::Part::bytes(page.bytes.to_vec())
        .file_name(UPLOAD_FILE_NAME)
        .mime_str(UPLOAD_MIME_TYPE)
        .map_err(|e| UploadError::InvalidFormat(format!("构造上传分片失败：{}", e)))?;
    let form = multipart::Form::new().part(UPLOAD_FIELD_NAME, part);

    log::debug!("📡 发送上传请求 - {}", parsed);

    let response = client
        .post(parsed)
        .multipart(form)
        .send()
        .await
        .map_err(|e| map_reqwest_error(e, config))?;

    let status = response.status();
    if status.is_success() {
        log::info!("📤 上传传输完成 - HTTP {}", status.as_u16());
    } else {
        log::warn!("⚠️ 上传返回 HTTP {}，结果仍按传输完成处理", status.as_u16());
    }

    Ok(status.as_u16())
}

/// 探测目标地址是否返回 200。
///
/// 仅当状态码恰好为 200 时返回 `true`；404、500 等一律 `false`，
/// 互相之间不做区分。传输层失败返回错误。
pub(super) async fn get_probe(url: &str, config: &UploadConfig) -> Result<bool, UploadError> {
    let parsed = reqwest::Url::parse(url)
        .map_err(|e| UploadError::InvalidFormat(format!("探测地址无效：{}", e)))?;

    let client = build_http_client(config)?;

    log::debug!("🔍 发送存在性探测 - {}", parsed);

    let response = client
        .get(parsed)
        .send()
        .await
        .map_err(|e| map_reqwest_error(e, config))?;

    let status = response.status();
    log::debug!("🔍 探测返回 HTTP {}", status.as_u16());

    Ok(status == reqwest::StatusCode::OK)
}

/// 按当次配置构建 HTTP 客户端。
fn build_http_client(config: &UploadConfig) -> Result<reqwest::Client, UploadError> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.request_timeout))
        .connect_timeout(Duration::from_secs(config.connect_timeout))
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .map_err(|e| UploadError::Network(format!("无法创建 HTTP 客户端：{}", e)))
}

/// 统一映射 reqwest 错误到业务错误。
fn map_reqwest_error(e: reqwest::Error, config: &UploadConfig) -> UploadError {
    if e.is_timeout() {
        UploadError::Timeout(format!("请求超时（{}秒）", config.request_timeout))
    } else if e.is_connect() {
        UploadError::Network(format!("无法连接：{}", e))
    } else {
        UploadError::Network(format!("请求失败：{}", e))
    }
}
