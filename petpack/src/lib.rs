//! Marketplace listing image packs generated with Gemini image models.
//!
//! A [`Session`] holds the seller's reference photos and settings. A
//! [`Pipeline`] walks the fixed [`catalog`] of shots, asks an
//! [`ImageGenerator`] for each one, and collects the annotated results.

pub mod catalog;
pub mod client;
pub mod compliance;
pub mod error;
pub mod export;
pub mod generator;
pub mod models;
pub mod pipeline;
pub mod session;
pub mod store;

#[cfg(test)]
mod test_support;

pub use petpack_types as types;

pub use client::{Client, ClientBuilder, HttpOptions};
pub use compliance::{ComplianceAnnotator, ComplianceVerdict, StaticCompliance};
pub use error::{Error, Result};
pub use generator::{GeminiImageGenerator, ImageGenerator};
pub use pipeline::{Pipeline, RunSummary};
pub use session::{GenerationSettings, RunSnapshot, RunState, Session};
pub use store::ImageStore;
