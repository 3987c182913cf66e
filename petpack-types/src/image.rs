//! Encoded image buffers and the `data:` URI form used by upload surfaces.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use bytes::Bytes;

/// 编码后的图像缓冲区（PNG/JPEG/...），内容不透明。
///
/// `data` 使用 [`Bytes`]，同一批参考图在每次生成请求间共享而不复制。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBlob {
    pub mime_type: String,
    pub data: Bytes,
}

/// 用户上传的参考图。
pub type ReferenceImage = ImageBlob;

impl ImageBlob {
    /// 从原始字节创建。
    pub fn new(data: impl Into<Bytes>, mime_type: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    /// 解析 `data:<mime>;base64,<payload>` 形式的 URI。
    ///
    /// # Errors
    /// 当前缀缺失、不是 base64 编码或 payload 无法解码时返回错误。
    pub fn from_data_uri(uri: &str) -> Result<Self, DataUriError> {
        let rest = uri
            .trim()
            .strip_prefix("data:")
            .ok_or(DataUriError::MissingScheme)?;
        let comma = memchr::memchr(b',', rest.as_bytes()).ok_or(DataUriError::MissingPayload)?;
        let (header, payload) = (&rest[..comma], &rest[comma + 1..]);
        let mime_type = header
            .strip_suffix(";base64")
            .ok_or(DataUriError::NotBase64)?;
        if mime_type.is_empty() {
            return Err(DataUriError::MissingMimeType);
        }
        let data = STANDARD
            .decode(payload.as_bytes())
            .map_err(|err| DataUriError::Decode(err.to_string()))?;
        Ok(Self::new(data, mime_type))
    }

    /// 编码为 `data:` URI。
    #[must_use]
    pub fn to_data_uri(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.mime_type,
            STANDARD.encode(&self.data)
        )
    }

    /// 是否为图像媒体类型。
    #[must_use]
    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// `data:` URI 解析错误。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DataUriError {
    #[error("missing data: scheme")]
    MissingScheme,
    #[error("missing ',' before payload")]
    MissingPayload,
    #[error("missing media type")]
    MissingMimeType,
    #[error("only base64 data URIs are supported")]
    NotBase64,
    #[error("invalid base64 payload: {0}")]
    Decode(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_browser_style_data_uri() {
        let image = ImageBlob::from_data_uri("data:image/jpeg;base64,/9j/4A==").unwrap();
        assert_eq!(image.mime_type, "image/jpeg");
        assert_eq!(&image.data[..], &[0xffu8, 0xd8, 0xff, 0xe0]);
        assert!(image.is_image());
        assert_eq!(image.to_data_uri(), "data:image/jpeg;base64,/9j/4A==");
    }

    #[test]
    fn rejects_malformed_uris() {
        assert_eq!(
            ImageBlob::from_data_uri("image/png;base64,AA=="),
            Err(DataUriError::MissingScheme)
        );
        assert_eq!(
            ImageBlob::from_data_uri("data:image/png;base64"),
            Err(DataUriError::MissingPayload)
        );
        assert_eq!(
            ImageBlob::from_data_uri("data:image/svg+xml,<svg/>"),
            Err(DataUriError::NotBase64)
        );
        assert_eq!(
            ImageBlob::from_data_uri("data:;base64,AA=="),
            Err(DataUriError::MissingMimeType)
        );
        assert!(matches!(
            ImageBlob::from_data_uri("data:image/png;base64,@@@"),
            Err(DataUriError::Decode(_))
        ));
    }

    #[test]
    fn error_messages_are_readable() {
        assert_eq!(
            DataUriError::NotBase64.to_string(),
            "only base64 data URIs are supported"
        );
        let err = ImageBlob::from_data_uri("data:image/png;base64,@@@").unwrap_err();
        assert!(err.to_string().starts_with("invalid base64 payload: "));
        let boxed: Box<dyn std::error::Error> = Box::new(err);
        assert!(boxed.source().is_none());
    }
}
