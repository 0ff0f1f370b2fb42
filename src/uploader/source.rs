//! # 数据源与中间模型
//!
//! ## 设计思路
//!
//! 将“外部输入类型”和“流水线中间结果”解耦：
//! - `PageSource` 表示外部来源语义
//! - `RawImageData` 表示已加载但未解码的字节
//! - `EncodedPage` 表示可直接上传的 JPEG 数据

use bytes::Bytes;

/// 页面图片输入来源。
pub enum PageSource {
    /// 本地文件路径来源。
    FilePath(String),
    /// Base64（支持 Data URL 与纯 Base64 字符串）。
    Base64(String),
}

impl PageSource {
    /// 从命令行 / 设置文件的 `source` 字段推断来源类型。
    ///
    /// `data:` 开头视为内联 Data URL，其余一律按文件路径处理。
    pub fn from_cli_value(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.starts_with("data:") {
            Self::Base64(trimmed.to_string())
        } else {
            Self::FilePath(trimmed.to_string())
        }
    }
}

/// 加载阶段输出：原始字节与来源标识。
pub(crate) struct RawImageData {
    /// 原始图片字节。
    pub(crate) bytes: Vec<u8>,
    /// 来源提示（用于日志与诊断）。
    pub(crate) source_hint: &'static str,
}

/// 编码阶段输出：可直接上传的 JPEG 数据。
///
/// 不变式：`bytes` 是源图在固定质量下的合法 JPEG 表示，
/// 解码后的尺寸与 `width`/`height` 严格一致。
#[derive(Debug, Clone)]
pub struct EncodedPage {
    /// 图像宽度（像素）。
    pub width: u32,
    /// 图像高度（像素）。
    pub height: u32,
    /// JPEG 字节（媒体类型 `image/jpeg`）。
    pub bytes: Bytes,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_value_with_data_prefix_becomes_base64_source() {
        let source = PageSource::from_cli_value("data:image/png;base64,AAAA");
        assert!(matches!(source, PageSource::Base64(_)));
    }

    #[test]
    fn cli_value_without_prefix_becomes_file_source() {
        let source = PageSource::from_cli_value("  /tmp/page.png ");
        match source {
            PageSource::FilePath(path) => assert_eq!(path, "/tmp/page.png"),
            PageSource::Base64(_) => panic!("expected file source"),
        }
    }
}
