//! # 加载与校验模块
//!
//! ## 设计思路
//!
//! 统一处理不同来源（本地文件 / Base64）的原始字节加载，并在“尽可能早”的
//! 阶段执行输入校验，尽快失败，减少不必要的内存与 CPU 消耗。
//!
//! ## 实现思路
//!
//! - 文件：存在性 + metadata 体积限制 + 读取。
//! - Base64：先按长度估算解码体积并限流，再解码。
//! - 两条路径最后都通过文件签名（magic bytes）确认输入确实是图片。

use base64::{Engine as _, engine::general_purpose};
use std::path::Path;

use super::source::RawImageData;
use super::{UploadConfig, UploadError};

/// Data URL 中 Base64 数据段的起始标记。
const BASE64_MARKER: &str = ";base64,";

/// 从本地路径加载页面图片原始字节。
pub(super) fn read_source_file(path: &str, config: &UploadConfig) -> Result<RawImageData, UploadError> {
    log::info!("📁 开始读取本地图片 - 路径: {}", path);

    let file_path = Path::new(path);
    if !file_path.exists() {
        return Err(UploadError::FileSystem(format!("文件不存在：{}", path)));
    }

    let metadata = std::fs::metadata(file_path)
        .map_err(|e| UploadError::FileSystem(format!("无法读取文件信息：{}", e)))?;

    if metadata.len() > config.max_file_size {
        return Err(UploadError::ResourceLimit(format!(
            "文件过大：{:.2} MB（限制：{:.2} MB）",
            metadata.len() as f64 / 1024.0 / 1024.0,
            config.max_file_size as f64 / 1024.0 / 1024.0
        )));
    }

    let bytes = std::fs::read(file_path)
        .map_err(|e| UploadError::FileSystem(format!("无法读取图片文件：{}", e)))?;
    validate_image_signature(&bytes)?;

    Ok(RawImageData {
        bytes,
        source_hint: "file",
    })
}

/// 从 Base64 字符串加载页面图片原始字节。
pub(super) fn decode_base64_source(data: &str, config: &UploadConfig) -> Result<RawImageData, UploadError> {
    log::info!("📝 开始处理 base64 图片");

    let normalized = data.trim();
    let payload = if normalized.starts_with("data:") {
        let marker = normalized
            .find(BASE64_MARKER)
            .ok_or_else(|| UploadError::InvalidFormat("Data URL 缺少 base64 标记".to_string()))?;
        &normalized[marker + BASE64_MARKER.len()..]
    } else {
        normalized
    };

    // 解码前按长度估算体积上界，超限时不做任何分配
    let estimated = estimate_decoded_len(payload)?;
    if estimated > config.max_file_size {
        return Err(UploadError::ResourceLimit(format!(
            "Base64 预计解码体积过大：{:.2} MB（限制：{:.2} MB）",
            estimated as f64 / 1024.0 / 1024.0,
            config.max_file_size as f64 / 1024.0 / 1024.0
        )));
    }

    let bytes = general_purpose::STANDARD
        .decode(payload)
        .map_err(|e| UploadError::Decode(format!("Base64 解码失败：{}", e)))?;
    validate_image_signature(&bytes)?;

    Ok(RawImageData {
        bytes,
        source_hint: "base64",
    })
}

/// 估算 Base64 解码后体积的上界（每 4 字符对应 3 字节）。
fn estimate_decoded_len(payload: &str) -> Result<u64, UploadError> {
    let len = payload.trim().len() as u64;
    let groups = len
        .checked_add(3)
        .ok_or_else(|| UploadError::ResourceLimit("Base64 输入长度溢出".to_string()))?
        / 4;

    groups
        .checked_mul(3)
        .ok_or_else(|| UploadError::ResourceLimit("Base64 解码体积估算溢出".to_string()))
}

/// 通过文件签名（magic bytes）校验输入是否为图片。
fn validate_image_signature(bytes: &[u8]) -> Result<(), UploadError> {
    if bytes.is_empty() {
        return Err(UploadError::InvalidFormat("图片内容为空".to_string()));
    }

    let kind = infer::get(bytes)
        .ok_or_else(|| UploadError::InvalidFormat("无法识别图片类型".to_string()))?;

    if kind.matcher_type() != infer::MatcherType::Image {
        return Err(UploadError::InvalidFormat(format!(
            "文件签名不是图片类型：{}",
            kind.mime_type()
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::{Engine as _, engine::general_purpose};

    fn tiny_png_bytes() -> Vec<u8> {
        let img = image::ImageBuffer::from_pixel(4, 4, image::Rgba::<u8>([10, 20, 30, 255]));
        let mut cursor = std::io::Cursor::new(Vec::new());
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut cursor, image::ImageFormat::Png)
            .expect("failed to encode test image");
        cursor.into_inner()
    }

    #[test]
    fn missing_file_maps_to_file_system_error() {
        let result = read_source_file("/definitely/not/here.png", &UploadConfig::default());

        assert!(matches!(result, Err(UploadError::FileSystem(_))));
    }

    #[test]
    fn file_source_round_trips_png_bytes() {
        let png = tiny_png_bytes();
        let path = std::env::temp_dir().join(format!("page-uploader-loader-{}.png", std::process::id()));
        std::fs::write(&path, &png).expect("write temp image failed");

        let raw = read_source_file(path.to_str().expect("temp path is not utf-8"), &UploadConfig::default())
            .expect("file load should succeed");

        std::fs::remove_file(&path).expect("cleanup temp image failed");

        assert_eq!(raw.bytes, png);
        assert_eq!(raw.source_hint, "file");
    }

    #[test]
    fn base64_source_rejects_non_image_payload() {
        let result = decode_base64_source("SGVsbG8=", &UploadConfig::default());

        assert!(matches!(result, Err(UploadError::InvalidFormat(_))));
    }

    #[test]
    fn base64_source_accepts_data_url() {
        let encoded = general_purpose::STANDARD.encode(tiny_png_bytes());
        let data_url = format!("data:image/png;base64,{}", encoded);

        let raw = decode_base64_source(&data_url, &UploadConfig::default())
            .expect("data url load should succeed");

        assert_eq!(raw.source_hint, "base64");
        assert!(!raw.bytes.is_empty());
    }

    #[test]
    fn base64_source_without_marker_is_invalid() {
        let result = decode_base64_source("data:image/png;AAAA", &UploadConfig::default());

        assert!(matches!(result, Err(UploadError::InvalidFormat(_))));
    }

    #[test]
    fn oversized_base64_is_rejected_before_decode() {
        let mut config = UploadConfig::default();
        config.max_file_size = 64 * 1024;
        let huge = "A".repeat(256 * 1024);

        let result = decode_base64_source(&huge, &config);

        assert!(matches!(result, Err(UploadError::ResourceLimit(_))));
    }

    #[test]
    fn signature_check_rejects_empty_bytes() {
        let result = validate_image_signature(&[]);

        assert!(matches!(result, Err(UploadError::InvalidFormat(_))));
    }

    #[test]
    fn signature_check_accepts_png_header() {
        let png = tiny_png_bytes();

        validate_image_signature(&png).expect("png signature should pass");
    }

    #[test]
    fn signature_check_rejects_html_payload() {
        let result = validate_image_signature(b"<html><body>not an image</body></html>");

        assert!(matches!(result, Err(UploadError::InvalidFormat(_))));
    }
}
