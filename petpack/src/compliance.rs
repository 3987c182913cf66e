//! Compliance annotation for generated images.
//!
//! The default policy is static: every successful generation is labelled as
//! passing. Real checks (background sampling, text detection, frame coverage)
//! plug in through [`ComplianceAnnotator`] without touching the pipeline.

use petpack_types::{ImageBlob, OutputKind};

/// 合规检查结论。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplianceVerdict {
    pub is_compliant: bool,
    pub notes: Vec<String>,
}

/// 合规标注策略。
pub trait ComplianceAnnotator: Send + Sync {
    fn annotate(&self, kind: OutputKind, label: &str, image: &ImageBlob) -> ComplianceVerdict;
}

/// 静态策略：不检查像素，总是通过。
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticCompliance;

pub const SITE_CHECK_NOTE: &str = "Passed: Site Specific Check";
pub const NO_TEXT_NOTE: &str = "Passed: No Text Rule";

impl ComplianceAnnotator for StaticCompliance {
    fn annotate(&self, _kind: OutputKind, _label: &str, _image: &ImageBlob) -> ComplianceVerdict {
        ComplianceVerdict {
            is_compliant: true,
            notes: vec![SITE_CHECK_NOTE.to_string(), NO_TEXT_NOTE.to_string()],
        }
    }
}

impl<F> ComplianceAnnotator for F
where
    F: Fn(OutputKind, &str, &ImageBlob) -> ComplianceVerdict + Send + Sync,
{
    fn annotate(&self, kind: OutputKind, label: &str, image: &ImageBlob) -> ComplianceVerdict {
        self(kind, label, image)
    }
}
