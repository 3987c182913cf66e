//! Ordered in-memory store of uploaded reference images.

use std::path::Path;

use petpack_types::ReferenceImage;

use crate::error::{Error, Result};

/// 参考图存储：按上传顺序保存，只支持追加与按下标删除。
#[derive(Debug, Clone, Default)]
pub struct ImageStore {
    images: Vec<ReferenceImage>,
}

impl ImageStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加到末尾，不去重、不限数量。
    pub fn add(&mut self, image: ReferenceImage) {
        self.images.push(image);
    }

    /// 读取文件并按扩展名推断媒体类型后追加。
    ///
    /// # Errors
    /// 文件无法读取、不是图像类型或为空文件时返回错误，存储保持不变。
    pub async fn add_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let image = read_image_file(path.as_ref()).await?;
        self.add(image);
        Ok(())
    }

    /// 解析 `data:` URI 后追加（浏览器 `FileReader` 的输出形式）。
    ///
    /// # Errors
    /// URI 无效、不是图像类型或 payload 为空时返回错误。
    pub fn add_data_uri(&mut self, uri: &str) -> Result<()> {
        let image = ReferenceImage::from_data_uri(uri)?;
        ensure_image(&image, "data URI")?;
        self.add(image);
        Ok(())
    }

    /// 删除指定下标；越界时什么也不做。
    pub fn remove(&mut self, index: usize) -> Option<ReferenceImage> {
        (index < self.images.len()).then(|| self.images.remove(index))
    }

    /// 当前参考图快照（按插入顺序）。
    #[must_use]
    pub fn list(&self) -> Vec<ReferenceImage> {
        self.images.clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.images.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn clear(&mut self) {
        self.images.clear();
    }
}

/// 读取上传文件，按扩展名推断媒体类型。
///
/// # Errors
/// 文件无法读取、不是图像类型或为空文件时返回错误。
pub async fn read_image_file(path: &Path) -> Result<ReferenceImage> {
    let mime_type = mime_guess::from_path(path)
        .first()
        .map(|mime| mime.essence_str().to_string())
        .ok_or_else(|| Error::InvalidInput {
            message: format!("Cannot determine media type of {}", path.display()),
        })?;
    let image = ReferenceImage::new(tokio::fs::read(path).await?, mime_type);
    ensure_image(&image, &path.display().to_string())?;
    Ok(image)
}

fn ensure_image(image: &ReferenceImage, source: &str) -> Result<()> {
    if !image.is_image() {
        return Err(Error::InvalidInput {
            message: format!("{source} is {}, only images are accepted", image.mime_type),
        });
    }
    if image.is_empty() {
        return Err(Error::InvalidInput {
            message: format!("{source} is empty"),
        });
    }
    Ok(())
}
