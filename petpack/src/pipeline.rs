//! Listing pack pipeline.
//!
//! Drives the template catalog through an [`ImageGenerator`] one entry at a
//! time. A failed entry is logged and skipped; it never aborts the run, so
//! the other templates still produce their images.

use petpack_types::{GeneratedResult, GenerationRequest, OutputKind, TemplateEntry};
use rand::Rng;
use tracing::{debug, info, warn};

use crate::catalog;
use crate::compliance::{ComplianceAnnotator, StaticCompliance};
use crate::generator::ImageGenerator;
use crate::session::Session;

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_LEN: usize = 9;

/// 一轮运行的统计。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub attempted: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub cancelled: bool,
}

pub struct Pipeline<G, A = StaticCompliance> {
    generator: G,
    annotator: A,
}

impl<G: ImageGenerator> Pipeline<G> {
    #[must_use]
    pub fn new(generator: G) -> Self {
        Self {
            generator,
            annotator: StaticCompliance,
        }
    }
}

impl<G: ImageGenerator, A: ComplianceAnnotator> Pipeline<G, A> {
    /// 替换合规标注策略。
    #[must_use]
    pub fn with_annotator<B: ComplianceAnnotator>(self, annotator: B) -> Pipeline<G, B> {
        Pipeline {
            generator: self.generator,
            annotator,
        }
    }

    /// 依次为每个模板生成图像。
    ///
    /// 没有参考图或已有运行在进行时直接返回 `None`，会话状态不变。
    /// 单个模板失败只记录日志，结果中不留占位。
    pub async fn run(&self, session: &Session) -> Option<RunSummary> {
        if session.image_count() == 0 {
            debug!("no reference images, pipeline not started");
            return None;
        }
        let entries = catalog::entries();
        if !session.begin_run(entries.len()) {
            debug!("pipeline already running");
            return None;
        }
        info!(
            templates = entries.len(),
            references = session.image_count(),
            "listing pack run started"
        );

        let mut summary = RunSummary::default();
        for entry in entries {
            if session.is_cancelled() {
                info!(completed = summary.attempted, "listing pack run cancelled");
                summary.cancelled = true;
                break;
            }
            let request = session.build_request(entry);
            summary.attempted += 1;
            match self.attempt(entry, &request).await {
                Some(result) => {
                    session.push_result(result);
                    summary.succeeded += 1;
                }
                None => summary.failed += 1,
            }
            session.complete_entry();
        }
        session.end_run();

        info!(
            succeeded = summary.succeeded,
            failed = summary.failed,
            cancelled = summary.cancelled,
            "listing pack run finished"
        );
        Some(summary)
    }

    /// 重新生成单个模板，成功时替换同类结果。
    ///
    /// 返回是否写入了新结果。没有参考图、类别不在模板目录中或有运行在进行时
    /// 不发起调用。
    pub async fn regenerate(&self, session: &Session, kind: OutputKind) -> bool {
        let Some(entry) = catalog::entry(kind) else {
            warn!(%kind, "no template for output kind");
            return false;
        };
        if session.image_count() == 0 || !session.begin_single() {
            return false;
        }
        let request = session.build_request(entry);
        let result = self.attempt(entry, &request).await;
        let stored = result.is_some();
        if let Some(result) = result {
            session.replace_result(result);
        }
        session.end_run();
        stored
    }

    async fn attempt(
        &self,
        entry: &TemplateEntry,
        request: &GenerationRequest,
    ) -> Option<GeneratedResult> {
        debug!(
            label = entry.label,
            references = request.reference_images.len(),
            market = %request.market,
            "generating"
        );
        match self.generator.generate(request).await {
            Ok(Some(image)) if !image.is_empty() => {
                let verdict = self.annotator.annotate(entry.kind, entry.label, &image);
                Some(GeneratedResult {
                    id: new_result_id(),
                    image,
                    kind: entry.kind,
                    label: entry.label.to_string(),
                    is_compliant: verdict.is_compliant,
                    compliance_notes: verdict.notes,
                })
            }
            Ok(_) => {
                warn!(label = entry.label, "failed to generate: no image returned");
                None
            }
            Err(err) => {
                warn!(label = entry.label, error = %err, "failed to generate");
                None
            }
        }
    }
}

fn new_result_id() -> String {
    let mut rng = rand::rng();
    (0..ID_LEN)
        .map(|_| char::from(ID_ALPHABET[rng.random_range(0..ID_ALPHABET.len())]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn result_ids_are_short_base36_tokens() {
        let ids: HashSet<String> = (0..64).map(|_| new_result_id()).collect();
        assert_eq!(ids.len(), 64);
        for id in &ids {
            assert_eq!(id.len(), ID_LEN);
            assert!(id
                .bytes()
                .all(|b| b.is_ascii_digit() || b.is_ascii_lowercase()));
        }
    }
}
