//! # 解码与编码模块
//!
//! ## 设计思路
//!
//! 将“字节 → 图像 → JPEG”的过程集中管理，并在关键节点增加资源上限控制。
//! 优先做尺寸检查，再进行完整解码，降低恶意输入触发高内存开销的风险。
//!
//! ## 实现思路
//!
//! 1. 猜测格式并读取 header 尺寸
//! 2. 按像素与内存上限快速拒绝
//! 3. 完整解码
//! 4. 含 alpha 通道时先平铺为 RGB（JPEG 不携带 alpha）
//! 5. 以固定质量编码 JPEG，输出尺寸与输入严格一致
//!
//! 编码失败返回显式错误，调用方不会无限等待。

use bytes::Bytes;
use image::codecs::jpeg::JpegEncoder;
use image::{ColorType, DynamicImage, GenericImageView};
use std::io::Cursor;

use super::source::{EncodedPage, RawImageData};
use super::{UploadConfig, UploadError};

/// 将原始字节重编码为可上传的 JPEG 数据。
pub(super) fn encode_page(raw: &RawImageData, config: &UploadConfig) -> Result<EncodedPage, UploadError> {
    image::guess_format(&raw.bytes)
        .map_err(|e| UploadError::InvalidFormat(format!("不支持的图片格式：{}", e)))?;

    let (header_width, header_height) = inspect_dimensions_from_memory(&raw.bytes)?;
    validate_decode_limits(config, header_width, header_height)?;

    let decoded = image::load_from_memory(&raw.bytes)
        .map_err(|e| UploadError::Decode(format!("图片解码失败：{}", e)))?;

    let (width, height) = decoded.dimensions();
    if width == 0 || height == 0 {
        return Err(UploadError::InvalidFormat("图片尺寸为空".to_string()));
    }
    validate_decode_limits(config, width, height)?;

    // JPEG 编码器只接受 L8 / RGB8，其余颜色类型统一转为 RGB8
    let normalized = match decoded.color() {
        ColorType::L8 | ColorType::Rgb8 => decoded,
        _ => DynamicImage::ImageRgb8(decoded.to_rgb8()),
    };

    let mut buffer = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut buffer, config.jpeg_quality);
    normalized
        .write_with_encoder(encoder)
        .map_err(|e| UploadError::Encode(format!("JPEG 编码失败：{}", e)))?;

    if buffer.is_empty() {
        return Err(UploadError::Encode("JPEG 编码结果为空".to_string()));
    }

    log::info!(
        "✅ 页面编码成功 - 来源: {} 尺寸: {}x{} 输出: {}KB (quality={})",
        raw.source_hint,
        width,
        height,
        buffer.len() / 1024,
        config.jpeg_quality
    );

    Ok(EncodedPage {
        width,
        height,
        bytes: Bytes::from(buffer),
    })
}

/// 仅通过内存中的图片头信息读取宽高。
///
/// 用于在完整解码前做像素限制检查。
fn inspect_dimensions_from_memory(bytes: &[u8]) -> Result<(u32, u32), UploadError> {
    let cursor = Cursor::new(bytes);
    let reader = image::io::Reader::new(cursor)
        .with_guessed_format()
        .map_err(|e| UploadError::InvalidFormat(format!("无法识别图片格式：{}", e)))?;

    reader
        .into_dimensions()
        .map_err(|e| UploadError::InvalidFormat(format!("无法读取图片尺寸：{}", e)))
}

/// 校验像素数量与预计解码内存是否超过配置上限。
fn validate_decode_limits(config: &UploadConfig, width: u32, height: u32) -> Result<(), UploadError> {
    let pixels = (width as u64)
        .checked_mul(height as u64)
        .ok_or_else(|| UploadError::ResourceLimit("图片像素数溢出".to_string()))?;

    if pixels > config.max_decoded_pixels {
        return Err(UploadError::ResourceLimit(format!(
            "图片像素过大：{} 像素（限制：{} 像素）",
            pixels, config.max_decoded_pixels
        )));
    }

    let estimated = pixels
        .checked_mul(4)
        .ok_or_else(|| UploadError::ResourceLimit("图片解码内存估算溢出".to_string()))?;

    if estimated > config.max_decoded_bytes {
        return Err(UploadError::ResourceLimit(format!(
            "图片解码预计内存过大：{:.2} MB（限制：{:.2} MB）",
            estimated as f64 / 1024.0 / 1024.0,
            config.max_decoded_bytes as f64 / 1024.0 / 1024.0
        )));
    }

    Ok(())
}
