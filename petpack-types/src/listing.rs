//! Marketplace listing vocabulary: output kinds, market sites, categories,
//! catalog templates and generated results.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::image::{ImageBlob, ReferenceImage};

/// 输出图像类别。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OutputKind {
    MainWhite,
    SceneLivingRoom,
    SceneOutdoor,
    DetailMaterial,
    DetailSafety,
    SizeChart,
    /// 词汇表中存在但模板目录未收录。
    FunctionDemo,
}

impl OutputKind {
    pub const ALL: [Self; 7] = [
        Self::MainWhite,
        Self::SceneLivingRoom,
        Self::SceneOutdoor,
        Self::DetailMaterial,
        Self::DetailSafety,
        Self::SizeChart,
        Self::FunctionDemo,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MainWhite => "MAIN_WHITE",
            Self::SceneLivingRoom => "SCENE_LIVING_ROOM",
            Self::SceneOutdoor => "SCENE_OUTDOOR",
            Self::DetailMaterial => "DETAIL_MATERIAL",
            Self::DetailSafety => "DETAIL_SAFETY",
            Self::SizeChart => "SIZE_CHART",
            Self::FunctionDemo => "FUNCTION_DEMO",
        }
    }

    /// 是否有对应的模板目录条目。
    #[must_use]
    pub const fn in_catalog(self) -> bool {
        !matches!(self, Self::FunctionDemo)
    }
}

impl fmt::Display for OutputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputKind {
    type Err = ParseListingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseListingError::new("output kind", s))
    }
}

/// 目标站点。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MarketSite {
    #[default]
    Us,
    Eu,
    Jp,
    Uk,
    De,
}

impl MarketSite {
    pub const ALL: [Self; 5] = [Self::Us, Self::Eu, Self::Jp, Self::Uk, Self::De];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Us => "US",
            Self::Eu => "EU",
            Self::Jp => "JP",
            Self::Uk => "UK",
            Self::De => "DE",
        }
    }
}

impl fmt::Display for MarketSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MarketSite {
    type Err = ParseListingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|site| site.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseListingError::new("market site", s))
    }
}

/// 宠物商品类目。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Category {
    #[default]
    Bedding,
    Toys,
    Feeding,
    Walking,
    Grooming,
    Apparel,
}

impl Category {
    pub const ALL: [Self; 6] = [
        Self::Bedding,
        Self::Toys,
        Self::Feeding,
        Self::Walking,
        Self::Grooming,
        Self::Apparel,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bedding => "Bedding",
            Self::Toys => "Toys",
            Self::Feeding => "Feeding",
            Self::Walking => "Walking",
            Self::Grooming => "Grooming",
            Self::Apparel => "Apparel",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ParseListingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseListingError::new("category", s))
    }
}

/// 枚举解析失败。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {what}: {value:?}")]
pub struct ParseListingError {
    what: &'static str,
    value: String,
}

impl ParseListingError {
    fn new(what: &'static str, value: &str) -> Self {
        Self {
            what,
            value: value.to_string(),
        }
    }
}

/// 模板目录条目（进程级常量）。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateEntry {
    pub kind: OutputKind,
    pub label: &'static str,
    pub instruction: &'static str,
}

/// 单个模板的生成请求，每次调用时按当前会话状态重新构建。
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub reference_images: Vec<ReferenceImage>,
    pub instruction: String,
    pub market: MarketSite,
    pub custom_instruction: String,
}

/// 生成成功的结果，创建后不再修改。
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedResult {
    pub id: String,
    pub image: ImageBlob,
    pub kind: OutputKind,
    pub label: String,
    pub is_compliant: bool,
    pub compliance_notes: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enums_parse_case_insensitively() {
        assert_eq!("jp".parse::<MarketSite>().unwrap(), MarketSite::Jp);
        assert_eq!(" Apparel ".parse::<Category>().unwrap(), Category::Apparel);
        assert_eq!(
            "scene_outdoor".parse::<OutputKind>().unwrap(),
            OutputKind::SceneOutdoor
        );
        let err = "FR".parse::<MarketSite>().unwrap_err();
        assert_eq!(err.to_string(), "unknown market site: \"FR\"");
    }

    #[test]
    fn serde_names_match_display() {
        for kind in OutputKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{kind}\""));
        }
        for site in MarketSite::ALL {
            let json = serde_json::to_string(&site).unwrap();
            assert_eq!(json, format!("\"{site}\""));
        }
        assert_eq!(serde_json::to_string(&Category::Toys).unwrap(), "\"Toys\"");
    }

    #[test]
    fn function_demo_is_outside_catalog() {
        assert!(!OutputKind::FunctionDemo.in_catalog());
        assert!(OutputKind::SizeChart.in_catalog());
    }

    #[test]
    fn defaults_match_initial_form_state() {
        assert_eq!(MarketSite::default(), MarketSite::Us);
        assert_eq!(Category::default(), Category::Bedding);
    }
}
