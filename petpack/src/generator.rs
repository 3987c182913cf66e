//! Remote image generation: the [`ImageGenerator`] seam and its Gemini
//! implementation.

use std::sync::Arc;

use futures_util::future::BoxFuture;
use petpack_types::config::{GenerationConfig, ImageConfig, Modality};
use petpack_types::content::{Content, Part, Role};
use petpack_types::models::GenerateContentConfig;
use petpack_types::{GenerationRequest, ImageBlob, MarketSite};

use crate::client::Client;
use crate::error::{Error, Result};
use crate::models::Models;

/// 默认图像模型。
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image";
/// 默认输出比例（站点主图要求正方形）。
pub const DEFAULT_ASPECT_RATIO: &str = "1:1";

/// 远程生成接口：一次调用对应一个模板条目。
///
/// `Ok(None)` 表示服务端未返回图像；实现不得修改输入请求。
pub trait ImageGenerator: Send + Sync {
    fn generate<'a>(
        &'a self,
        request: &'a GenerationRequest,
    ) -> BoxFuture<'a, Result<Option<ImageBlob>>>;
}

impl<G: ImageGenerator + ?Sized> ImageGenerator for Arc<G> {
    fn generate<'a>(
        &'a self,
        request: &'a GenerationRequest,
    ) -> BoxFuture<'a, Result<Option<ImageBlob>>> {
        (**self).generate(request)
    }
}

impl<G: ImageGenerator + ?Sized> ImageGenerator for Box<G> {
    fn generate<'a>(
        &'a self,
        request: &'a GenerationRequest,
    ) -> BoxFuture<'a, Result<Option<ImageBlob>>> {
        (**self).generate(request)
    }
}

/// 基于 Gemini `generateContent` 的生成器。
#[derive(Clone)]
pub struct GeminiImageGenerator {
    models: Models,
    model: String,
    aspect_ratio: Option<String>,
}

impl GeminiImageGenerator {
    #[must_use]
    pub fn new(client: &Client) -> Self {
        Self {
            models: client.models(),
            model: DEFAULT_IMAGE_MODEL.to_string(),
            aspect_ratio: Some(DEFAULT_ASPECT_RATIO.to_string()),
        }
    }

    /// 设置模型名称。
    #[must_use]
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// 设置输出比例；`None` 交由模型决定。
    #[must_use]
    pub fn aspect_ratio(mut self, aspect_ratio: Option<String>) -> Self {
        self.aspect_ratio = aspect_ratio;
        self
    }

    async fn generate_inner(&self, request: &GenerationRequest) -> Result<Option<ImageBlob>> {
        if request.reference_images.is_empty() {
            return Err(Error::InvalidInput {
                message: "at least one reference image is required".into(),
            });
        }
        let config = GenerateContentConfig {
            system_instruction: None,
            generation_config: Some(GenerationConfig {
                response_modalities: Some(vec![Modality::Text, Modality::Image]),
                image_config: self.aspect_ratio.clone().map(|aspect_ratio| ImageConfig {
                    aspect_ratio: Some(aspect_ratio),
                }),
            }),
        };
        let response = self
            .models
            .generate_content_with_config(&self.model, vec![build_contents(request)], config)
            .await?;
        if let Some(blob) = response.first_image() {
            return Ok(Some(ImageBlob::new(blob.data.clone(), blob.mime_type.clone())));
        }
        match response.block_reason() {
            Some(reason) => Err(Error::Blocked { reason }),
            None => Ok(None),
        }
    }
}

impl ImageGenerator for GeminiImageGenerator {
    fn generate<'a>(
        &'a self,
        request: &'a GenerationRequest,
    ) -> BoxFuture<'a, Result<Option<ImageBlob>>> {
        Box::pin(self.generate_inner(request))
    }
}

/// 参考图在前、文本提示在后，组成单条用户消息。
pub(crate) fn build_contents(request: &GenerationRequest) -> Content {
    let mut parts: Vec<Part> = request
        .reference_images
        .iter()
        .map(|image| Part::inline_data(image.data.to_vec(), image.mime_type.clone()))
        .collect();
    parts.push(Part::text(build_prompt(request)));
    Content::from_parts(parts, Role::User)
}

pub(crate) fn build_prompt(request: &GenerationRequest) -> String {
    let mut prompt = format!(
        "Using the {count} attached reference photo(s) of the same pet product, create a new \
         e-commerce image. Keep the product exactly as shown: same shape, colors, materials, \
         proportions and printed details.\n\nShot: {instruction}\n\nMarketplace: Amazon {site}. \
         {rules}",
        count = request.reference_images.len(),
        instruction = request.instruction.trim(),
        site = request.market,
        rules = market_rules(request.market),
    );
    let custom = request.custom_instruction.trim();
    if !custom.is_empty() {
        prompt.push_str("\n\nSeller notes: ");
        prompt.push_str(custom);
    }
    prompt
}

fn market_rules(market: MarketSite) -> &'static str {
    match market {
        MarketSite::Us => {
            "Follow Amazon US image policy: no watermarks, logos, badges or overlaid text; \
             styling should feel like a typical American home."
        }
        MarketSite::Uk => {
            "Follow Amazon UK image policy: no watermarks, logos, badges or overlaid text; \
             styling should feel like a typical British home."
        }
        MarketSite::De => {
            "Follow Amazon DE image policy: no watermarks, logos, badges or overlaid text; \
             clean, understated German interior styling."
        }
        MarketSite::Eu => {
            "Follow Amazon EU image policy: no watermarks, logos, badges or overlaid text; \
             neutral European interior styling."
        }
        MarketSite::Jp => {
            "Follow Amazon JP image policy: no watermarks, logos, badges or overlaid text; \
             compact, tidy Japanese home styling."
        }
    }
}
