use serde::{Deserialize, Serialize};

use crate::content::{Blob, Content};

/// 生成内容响应。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt_feedback: Option<PromptFeedback>,
}

impl GenerateContentResponse {
    /// 提取第一个候选的文本。
    #[must_use]
    pub fn text(&self) -> Option<String> {
        self.candidates
            .first()
            .and_then(|candidate| candidate.content.as_ref())
            .and_then(|content| content.first_text())
            .map(ToString::to_string)
    }

    /// 提取第一张内联图像（跨候选查找）。
    #[must_use]
    pub fn first_image(&self) -> Option<&Blob> {
        self.candidates
            .iter()
            .filter_map(|candidate| candidate.content.as_ref())
            .find_map(Content::first_image)
    }

    /// 拦截原因：prompt 被拦截，或候选以非 `STOP` 原因结束。
    #[must_use]
    pub fn block_reason(&self) -> Option<String> {
        if let Some(feedback) = &self.prompt_feedback {
            if let Some(reason) = &feedback.block_reason {
                return Some(with_detail(
                    reason,
                    feedback.block_reason_message.as_deref(),
                ));
            }
        }
        self.candidates.iter().find_map(|candidate| {
            let reason = candidate.finish_reason.as_deref()?;
            (reason != "STOP" && reason != "FINISH_REASON_UNSPECIFIED")
                .then(|| with_detail(reason, candidate.finish_message.as_deref()))
        })
    }
}

fn with_detail(reason: &str, detail: Option<&str>) -> String {
    match detail.map(str::trim) {
        Some(detail) if !detail.is_empty() => format!("{reason} ({detail})"),
        _ => reason.to_string(),
    }
}

/// 响应候选。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish_message: Option<String>,
}

/// Prompt 反馈。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_reason_message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn first_image_looks_past_text_only_candidates() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [
                {"content": {"role": "model", "parts": [{"text": "no image"}]}},
                {"content": {"role": "model", "parts": [
                    {"inlineData": {"mimeType": "image/png", "data": "iVBO"}}
                ]}, "finishReason": "STOP"}
            ]
        }))
        .unwrap();
        assert_eq!(response.text(), Some("no image".to_string()));
        assert_eq!(response.first_image().unwrap().mime_type, "image/png");
    }

    #[test]
    fn blocked_prompt_has_no_image() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "promptFeedback": {"blockReason": "IMAGE_SAFETY"}
        }))
        .unwrap();
        assert!(response.candidates.is_empty());
        assert!(response.first_image().is_none());
        assert_eq!(response.block_reason().as_deref(), Some("IMAGE_SAFETY"));
    }

    #[test]
    fn block_reason_reports_candidate_finish_reason() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "sorry"}]},
                "finishReason": "IMAGE_SAFETY",
                "finishMessage": "Unable to show the generated image."
            }]
        }))
        .unwrap();
        assert_eq!(
            response.block_reason().as_deref(),
            Some("IMAGE_SAFETY (Unable to show the generated image.)")
        );

        let normal: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "done"}]},
                "finishReason": "STOP"
            }]
        }))
        .unwrap();
        assert!(normal.block_reason().is_none());
    }
}
