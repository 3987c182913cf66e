//! Shared types for petpack.

mod base64_serde;

pub mod config;
pub mod content;
pub mod image;
pub mod listing;
pub mod models;
pub mod response;

pub use image::{DataUriError, ImageBlob, ReferenceImage};
pub use listing::{
    Category, GeneratedResult, GenerationRequest, MarketSite, OutputKind, ParseListingError,
    TemplateEntry,
};
