//! Static template catalog: one entry per image in the listing pack.

use petpack_types::{OutputKind, TemplateEntry};

static ENTRIES: [TemplateEntry; 6] = [
    TemplateEntry {
        kind: OutputKind::MainWhite,
        label: "Main Image (White BG)",
        instruction: "Professional Amazon main image. Pure white background (RGB 255,255,255). \
            Product centered, 85% frame coverage. NO pet models, NO extra props. \
            Studio lighting, soft shadows, 4k sharp.",
    },
    TemplateEntry {
        kind: OutputKind::SceneLivingRoom,
        label: "Lifestyle (Indoor)",
        instruction: "Lifestyle shot in a bright, modern cozy living room. A happy pet \
            (cat or dog depending on size) is naturally using the product. \
            Soft natural window light, photorealistic, 8k.",
    },
    TemplateEntry {
        kind: OutputKind::SceneOutdoor,
        label: "Lifestyle (Outdoor)",
        instruction: "Outdoor scene in a lush green garden or park during golden hour. \
            Cinematic lighting. If it is a walking gear, show it in use. \
            Professional pet photography.",
    },
    TemplateEntry {
        kind: OutputKind::DetailMaterial,
        label: "Material Detail",
        instruction: "Macro close-up shot focusing on the texture and premium fabric/material \
            of the pet product. Show high-quality stitching and durability. Bokeh background.",
    },
    TemplateEntry {
        kind: OutputKind::DetailSafety,
        label: "Safety Feature",
        instruction: "Close-up of safety buckles, non-slip bottom, or reinforced parts. \
            Highlighting \"Safe for pets\" design. Clean studio setting.",
    },
    TemplateEntry {
        kind: OutputKind::SizeChart,
        label: "Size Comparison",
        instruction: "The product placed next to a common object (like a smartphone or a \
            standard breed of pet) to show relative size. Minimalist background with clean layout.",
    },
];

/// 全部模板，按生成顺序排列。
#[must_use]
pub fn entries() -> &'static [TemplateEntry] {
    &ENTRIES
}

/// 按类别查找模板。
#[must_use]
pub fn entry(kind: OutputKind) -> Option<&'static TemplateEntry> {
    ENTRIES.iter().find(|entry| entry.kind == kind)
}

/// 模板所在位置。
#[must_use]
pub fn position(kind: OutputKind) -> Option<usize> {
    ENTRIES.iter().position(|entry| entry.kind == kind)
}

#[must_use]
pub fn len() -> usize {
    ENTRIES.len()
}
