//! Saving generated results to disk ("Download All").

use std::path::{Path, PathBuf};

use petpack_types::{GeneratedResult, OutputKind};
use serde::Serialize;

use crate::error::Result;

pub const MANIFEST_FILE: &str = "manifest.json";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ManifestEntry<'a> {
    id: &'a str,
    kind: OutputKind,
    label: &'a str,
    file: String,
    mime_type: &'a str,
    is_compliant: bool,
    compliance_notes: &'a [String],
}

pub(crate) fn extension_from_mime(mime: &str) -> &'static str {
    match mime {
        "image/png" => "png",
        "image/jpeg" => "jpg",
        "image/webp" => "webp",
        "image/gif" => "gif",
        "image/bmp" => "bmp",
        "image/tiff" => "tiff",
        _ => "bin",
    }
}

/// `<index>_<kind>.<ext>`，如 `01_main_white.png`。
#[must_use]
pub fn file_name(index: usize, result: &GeneratedResult) -> String {
    format!(
        "{:02}_{}.{}",
        index + 1,
        result.kind.as_str().to_ascii_lowercase(),
        extension_from_mime(&result.image.mime_type)
    )
}

/// 保存单个结果。
///
/// # Errors
/// 目录创建或写文件失败时返回错误。
pub async fn save_one(result: &GeneratedResult, index: usize, dir: &Path) -> Result<PathBuf> {
    tokio::fs::create_dir_all(dir).await?;
    let path = dir.join(file_name(index, result));
    tokio::fs::write(&path, &result.image.data).await?;
    Ok(path)
}

/// 保存全部结果并写出 `manifest.json`，返回图像文件路径。
///
/// # Errors
/// 目录创建、写文件或序列化失败时返回错误。
pub async fn save_all(results: &[GeneratedResult], dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::with_capacity(results.len());
    let mut manifest = Vec::with_capacity(results.len());
    for (index, result) in results.iter().enumerate() {
        let path = save_one(result, index, dir).await?;
        manifest.push(ManifestEntry {
            id: &result.id,
            kind: result.kind,
            label: &result.label,
            file: file_name(index, result),
            mime_type: &result.image.mime_type,
            is_compliant: result.is_compliant,
            compliance_notes: &result.compliance_notes,
        });
        paths.push(path);
    }
    tokio::fs::create_dir_all(dir).await?;
    let body = serde_json::to_vec_pretty(&manifest)?;
    tokio::fs::write(dir.join(MANIFEST_FILE), body).await?;
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use petpack_types::ImageBlob;
    use serde_json::Value;
    use tempfile::tempdir;

    fn result(kind: OutputKind, mime: &str, data: &[u8]) -> GeneratedResult {
        GeneratedResult {
            id: "abc123xyz".into(),
            image: ImageBlob::new(data.to_vec(), mime),
            kind,
            label: "Main Image (White BG)".into(),
            is_compliant: true,
            compliance_notes: vec!["Passed: No Text Rule".into()],
        }
    }

    #[test]
    fn file_names_follow_index_kind_and_mime() {
        let png = result(OutputKind::MainWhite, "image/png", b"x");
        let odd = result(OutputKind::SizeChart, "image/x-icon", b"x");
        assert_eq!(file_name(0, &png), "01_main_white.png");
        assert_eq!(file_name(5, &odd), "06_size_chart.bin");
        assert_eq!(extension_from_mime("image/jpeg"), "jpg");
    }

    #[tokio::test]
    async fn save_all_writes_images_and_manifest() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("pack");
        let results = vec![
            result(OutputKind::MainWhite, "image/png", b"png-bytes"),
            result(OutputKind::DetailSafety, "image/jpeg", b"jpg-bytes"),
        ];

        let paths = save_all(&results, &out).await.unwrap();
        assert_eq!(paths.len(), 2);
        assert_eq!(std::fs::read(&paths[0]).unwrap(), b"png-bytes");
        assert!(paths[1].ends_with("02_detail_safety.jpg"));

        let manifest: Value =
            serde_json::from_slice(&std::fs::read(out.join(MANIFEST_FILE)).unwrap()).unwrap();
        assert_eq!(manifest[1]["kind"], "DETAIL_SAFETY");
        assert_eq!(manifest[1]["file"], "02_detail_safety.jpg");
        assert_eq!(manifest[0]["isCompliant"], true);
        assert_eq!(manifest[0]["complianceNotes"][0], "Passed: No Text Rule");
    }

    #[tokio::test]
    async fn save_all_with_no_results_writes_empty_manifest() {
        let dir = tempdir().unwrap();
        let paths = save_all(&[], dir.path()).await.unwrap();
        assert!(paths.is_empty());
        let manifest = std::fs::read_to_string(dir.path().join(MANIFEST_FILE)).unwrap();
        assert_eq!(manifest.trim(), "[]");
    }
}
