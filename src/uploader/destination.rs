//! # 归档地址构造模块
//!
//! ## 设计思路
//!
//! 归档服务按 `{endpoint}/{合集名}/{页号}` 定位一张页面。服务端会剔除路径段中
//! 的 Windows 非法文件名字符，这里在客户端镜像同一过滤规则，保证两侧对同一
//! 页面计算出一致的存储位置。
//!
//! ## 实现思路
//!
//! - 端点仅接受 HTTP/HTTPS。
//! - 路径段先过滤非法字符再去除首尾空白，过滤后为空视为格式错误。
//! - 拼接交给 `reqwest::Url`，空格等字符由其完成百分号转义。

use reqwest::Url;

use super::UploadError;

/// 路径段中剔除的字符集（与归档服务的文件名过滤一致）。
pub const FORBIDDEN_SEGMENT_CHARS: &[char] =
    &['\\', '/', ':', '*', '?', '"', '<', '>', '|', '#'];

/// 清洗单个路径段：剔除非法字符并去除首尾空白。
pub fn sanitize_segment(raw: &str) -> String {
    raw.chars()
        .filter(|c| !FORBIDDEN_SEGMENT_CHARS.contains(c))
        .collect::<String>()
        .trim()
        .to_string()
}

/// 构造一张页面的归档地址：`{endpoint}/{album}/{page}`。
pub fn page_url(endpoint: &str, album: &str, page: &str) -> Result<Url, UploadError> {
    let base = Url::parse(endpoint)
        .map_err(|e| UploadError::InvalidFormat(format!("端点地址无效：{}", e)))?;

    if base.scheme() != "http" && base.scheme() != "https" {
        return Err(UploadError::InvalidFormat("仅支持 HTTP/HTTPS 端点".to_string()));
    }

    let album = sanitize_segment(album);
    if album.is_empty() {
        return Err(UploadError::InvalidFormat("合集名清洗后为空".to_string()));
    }

    let page = sanitize_segment(page);
    if page.is_empty() {
        return Err(UploadError::InvalidFormat("页号清洗后为空".to_string()));
    }

    let mut url = base;
    {
        let mut segments = url
            .path_segments_mut()
            .map_err(|_| UploadError::InvalidFormat("端点地址不支持路径段".to_string()))?;
        segments.pop_if_empty();
        segments.push(&album);
        segments.push(&page);
    }

    Ok(url)
}
